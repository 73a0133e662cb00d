//! Terminal frontend for a running Weather Explorer proxy.
//!
//! `weather-lookup London` prints a weather card;
//! `weather-lookup --suggest Lon` prints autocomplete candidates.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use weather_explorer::frontend::{WeatherCard, WeatherClient};

#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Look up current weather via a Weather Explorer proxy")]
struct Cli {
    /// City name (or prefix with --suggest).
    city: String,

    /// List matching city names instead of fetching weather.
    #[arg(long)]
    suggest: bool,

    /// Base URL of the proxy.
    #[arg(long, env = "WEATHER_EXPLORER_URL", default_value = "http://localhost:8000")]
    backend: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let client = WeatherClient::new(cli.backend, Duration::from_secs(cli.timeout_secs))?;

    if cli.suggest {
        for name in client.fetch_suggestions(&cli.city).await {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    match client.fetch_weather(&cli.city).await {
        Ok(weather) => {
            println!("{}", WeatherCard::new(&weather, &chrono::Local::now()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
