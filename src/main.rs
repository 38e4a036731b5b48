use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use weathervane::config::Settings;
use weathervane::engine::Engine;
use weathervane::state::QueryState;
use weathervane::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    miette::set_panic_hook();

    let settings = Settings::from_env();
    let engine = Engine::new(
        Arc::new(settings.completion_client()),
        Arc::new(settings.weather_client()),
    );

    let city = prompt("Enter city name: ").await?;
    let query = format!("What is the weather of {city}?");

    let final_state = engine
        .invoke(QueryState::new_with_user_message(&query))
        .await?;

    if let Some(reply) = final_state.last_message() {
        println!("\nOutput:");
        println!("{}", reply.content);
    }

    Ok(())
}

async fn prompt(label: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await.into_diagnostic()?;
    stdout.flush().await.into_diagnostic()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .into_diagnostic()?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
