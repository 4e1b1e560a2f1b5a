//! Desk fixture generator.
//!
//! Creates, fetches, lists or updates Desk resources with random data,
//! printing each API response as pretty JSON on stdout.
//!
//! # Configuration
//!
//! Every flag can also come from the environment or a `.env` file:
//!
//! - `DESK_API_KEY`: API key (required)
//! - `DESK_BASE_URL`: API base URL
//! - `DESK_RESOURCE`, `DESK_ACTION`, `DESK_COUNT`: defaults for the
//!   matching flags
//!
//! # Usage
//!
//! ```bash
//! deskgen --resource customers --action create --count 5
//! deskgen --resource tickets --action get --id 42
//! deskgen --resource all --action create --data '{"state": "active"}'
//! ```

use std::process::ExitCode;

use clap::Parser;
use desk_client::cli::Cli;
use desk_client::generate::Generator;
use desk_client::middleware::Logging;
use desk_client::DeskClient;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries the JSON results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let Some(api_key) = cli.api_key.as_deref().filter(|k| !k.is_empty()) else {
        eprintln!("Error: API key is required");
        eprintln!("Hint: Set it via --api-key or the DESK_API_KEY environment variable");
        return ExitCode::FAILURE;
    };

    let client = match DeskClient::builder(&cli.base_url)
        .api_key(api_key)
        .middleware(Logging)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(client, &cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: DeskClient, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let generator = Generator::new(client, cli.data.clone());

    for resource in cli.resources() {
        for _ in 0..cli.effective_count() {
            tracing::info!(resource = %resource.name(), action = ?cli.action, "running");
            let result = generator.run(resource, cli.action, cli.id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
