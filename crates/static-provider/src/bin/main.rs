//! Static Provider entry point
//!
//! Serves canned NGSI context data, or answers one-off lookups from the
//! command line.

use clap::{Parser, Subcommand};
use static_provider::config::{LogFormat, ProviderConfig};
use static_provider::engine::TypeValueResolver;
use static_provider::handler::{create_router, AppState, StaticProvider};
use static_provider::telemetry::EventBus;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "static-provider")]
#[command(about = "Static context provider - canned NGSI data for broker integration tests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// TOML configuration file
        #[arg(short, long, env = "PROVIDER_CONFIG")]
        config: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Address to bind to
        #[arg(long, env = "PROVIDER_HOST")]
        host: Option<String>,

        /// Log output format
        #[arg(long, value_enum)]
        log_format: Option<LogFormat>,
    },

    /// Print the canned value for an attribute type
    Resolve {
        /// Attribute type name (case-insensitive)
        type_name: String,
    },

    /// Print the health response body
    Health,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down Static Provider");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            log_format,
        } => {
            let base = match config {
                Some(path) => ProviderConfig::from_file(path)?,
                None => ProviderConfig::default(),
            };
            let config = base.with_overrides(host, port, log_format);
            config.validate()?;

            init_tracing(config.log_format);

            let addr = config.socket_addr()?;
            let state = Arc::new(AppState::new(config.event_capacity));
            let router = create_router(state);

            tracing::info!("Starting Static Provider on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }

        Commands::Resolve { type_name } => {
            init_tracing(LogFormat::Json);

            let resolver = TypeValueResolver::new();
            let value = resolver.resolve(&type_name).unwrap_or(serde_json::Value::Null);
            println!("{}", serde_json::to_string(&value)?);
        }

        Commands::Health => {
            init_tracing(LogFormat::Json);

            let provider = StaticProvider::new(
                Arc::new(TypeValueResolver::new()),
                Arc::new(EventBus::default()),
            );
            let (_, body) = provider.health_check();
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
