//! Exporter configuration
//!
//! Flags take precedence over `EXPORTER_*` environment variables, which take
//! precedence over the built-in defaults.

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Command-line options
#[derive(Debug, Parser)]
#[command(
    name = "container-state-exporter",
    version,
    about = "Exports Docker container lifecycle state as Prometheus gauges"
)]
pub struct Cli {
    /// Address on which to expose metrics and web interface
    #[arg(long = "web.listen-address")]
    pub listen_address: Option<String>,

    /// Seconds between reconciliation cycles
    #[arg(long = "reconcile-interval-secs")]
    pub reconcile_interval_secs: Option<u64>,
}

/// Exporter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
    /// Listen address for the metrics endpoint
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Reconciliation interval in seconds
    #[serde(default = "default_reconcile_interval")]
    pub reconcile_interval_secs: u64,
}

fn default_listen_address() -> String {
    ":9188".to_string()
}

fn default_reconcile_interval() -> u64 {
    10
}

impl ExporterConfig {
    /// Load configuration from the environment, then apply flag overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("EXPORTER").try_parsing(true))
            .build()?;

        let mut config: ExporterConfig =
            config.try_deserialize().unwrap_or_else(|_| ExporterConfig {
                listen_address: default_listen_address(),
                reconcile_interval_secs: default_reconcile_interval(),
            });

        if let Some(address) = &cli.listen_address {
            config.listen_address = address.clone();
        }
        if let Some(secs) = cli.reconcile_interval_secs {
            config.reconcile_interval_secs = secs;
        }

        Ok(config)
    }

    /// Bind address for the listener; a bare `:port` binds all interfaces.
    pub fn bind_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }
}
