//! EdgeStore CLI - command-line access to the file storage API

mod commands;

use clap::Parser;
use commands::Command;
use edgestore_client::{Config, CredentialsInput, EdgeStoreClient, ENDPOINT_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "edgestore")]
#[command(about = "Command-line client for EdgeStore file storage")]
#[command(version)]
struct Args {
    /// API endpoint
    #[arg(long, env = ENDPOINT_ENV, default_value = edgestore_client::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Access key
    #[arg(long, env = edgestore_client::ACCESS_KEY_ENV, hide_env_values = true)]
    access_key: Option<String>,

    /// Secret key
    #[arg(long, env = edgestore_client::SECRET_KEY_ENV, hide_env_values = true)]
    secret_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, env = "EDGE_STORE_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("edgestore_cli={log_level},edgestore_client={log_level}").into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Using endpoint {}", args.endpoint);

    let credentials = CredentialsInput {
        access_key: args.access_key,
        secret_key: args.secret_key,
    };
    // Flags already carry the env fallback, so no second lookup here
    let config = Config::new(args.endpoint)
        .with_user_agent(format!("edgestore-cli/{}", env!("CARGO_PKG_VERSION")));
    let client = EdgeStoreClient::create_with_config(config, credentials, |_| None)?;

    let output = commands::run(&client, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
