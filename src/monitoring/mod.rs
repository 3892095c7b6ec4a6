pub mod logger;

pub use logger::{init_logging, init_stderr_logging};
