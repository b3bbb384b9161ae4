//! Service bootstrap daemon.
//!
//! Brings a service's messaging dependency online before the service starts
//! taking work.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          BOOTSTRAP                               │
//!   │                                                                  │
//!   │  ┌─────────┐    ┌──────────┐    ┌──────────────────────────────┐ │
//!   │  │ config  │───▶│ registry │───▶│      startup sequence        │ │
//!   │  │ loader  │    │          │    │  ┌────────────────────────┐  │ │
//!   │  └─────────┘    │  config  │    │  │  messaging handler     │  │ │
//!   │                 │  secrets │◀───┼──│  secret → config →     │  │ │
//!   │                 │  client  │    │  │  connect (retry timer) │  │ │
//!   │                 └──────────┘    │  └────────────────────────┘  │ │
//!   │                                 │        completion barrier    │ │
//!   │  ┌──────────────┐               └──────────────┬───────────────┘ │
//!   │  │   signals    │── shutdown ──────────────────┘                 │
//!   │  └──────────────┘                                                │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use service_bootstrap::config::{load_config, BootstrapConfig};
use service_bootstrap::lifecycle::{signals, Shutdown, StartupSequence};
use service_bootstrap::messaging::{MessagingBootstrap, TcpClientFactory};
use service_bootstrap::observability::{logging, metrics};
use service_bootstrap::registry::{keys, Registry};
use service_bootstrap::secrets::InsecureSecretProvider;

#[derive(Parser)]
#[command(name = "bootstrapd")]
#[command(about = "Bring a service's messaging dependency online", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit after bootstrap instead of waiting for a shutdown signal.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => BootstrapConfig::default(),
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {e}");
    }

    tracing::info!("bootstrapd v0.1.0 starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let registry = Registry::new();
    keys::set_secret_provider(
        &registry,
        Arc::new(InsecureSecretProvider::from_config(&config.insecure_secrets)),
    );

    let shutdown = Shutdown::new();
    let signal_task = signals::spawn_signal_listener(shutdown.clone());

    let mut sequence = StartupSequence::new(registry.clone(), shutdown.clone(), config.startup);
    match config.message_bus {
        Some(bus) => {
            tracing::info!(kind = %bus.kind, host = %bus.host, port = bus.port, "Message bus configured");
            keys::set_message_bus_config(&registry, bus);
            sequence = sequence.with_handler(Arc::new(MessagingBootstrap::new(Arc::new(TcpClientFactory::new()))));
        }
        None => tracing::warn!("No message bus configured, nothing to bootstrap"),
    }

    if !sequence.run().await {
        tracing::error!("Bootstrap failed, exiting");
        return ExitCode::FAILURE;
    }

    if !cli.once {
        tracing::info!("Bootstrap complete, waiting for shutdown signal");
        shutdown.cancelled().await;
    }
    signal_task.abort();

    if let Some(client) = keys::messaging_client(&registry) {
        if let Err(e) = client.disconnect().await {
            tracing::warn!(error = %e, "Error while disconnecting messaging client");
        }
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
