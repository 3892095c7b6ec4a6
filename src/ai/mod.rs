pub mod completion;
pub mod prompt;

pub use completion::CompletionClient;
pub use prompt::render_prompt;
