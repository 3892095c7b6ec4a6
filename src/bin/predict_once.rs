//! Read one `{"crypto", "timeframe"}` line from stdin and print one JSON
//! response line.

use anyhow::Result;
use crypto_predictor::config::{Config, EnvConfig};
use crypto_predictor::monitoring;
use crypto_predictor::prediction::PredictionService;
use crypto_predictor::stdio::{self, StdinResponse};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    monitoring::init_stderr_logging();

    let response = match run().await {
        Ok(response) => response,
        Err(e) => StdinResponse::Failure {
            success: false,
            error: format!("{:#}", e),
        },
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", stdio::render_line(&response))?;
    stdout.flush()?;

    Ok(())
}

async fn run() -> Result<StdinResponse> {
    let env_config = EnvConfig::load()?;
    let config = Config::load_or_default(&env_config.config_path)?;
    let service = PredictionService::from_config(&config, &env_config);

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

    Ok(stdio::handle_line(&service, &line).await)
}
