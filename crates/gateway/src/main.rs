//! API Gateway - HTTP shell for the lab application.

use std::io::BufRead;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP gateway for the lab application")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Read one password from stdin and print its hash
    HashPassword,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env();

    // Initialize tracing
    common::telemetry::init_tracing(&config.service.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            gateway_lib::run_server(config.with_bind(host, port)).await?;
        }
        Commands::HashPassword => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            let plaintext = SecretString::from(line.trim_end_matches(&['\r', '\n'][..]).to_string());
            line.clear();

            let hash = gateway_lib::hash_once(&config, plaintext).await?;
            println!("{}", hash);
        }
    }

    Ok(())
}
