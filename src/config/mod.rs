use std::time::Duration;

use clap::Parser;

use crate::domain::Variant;

/// Rule engine configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "fraudshield")]
#[command(about = "Static threshold rule engine for transaction decisions")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:7000", env = "FRAUDSHIELD_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Evaluation variants to serve (comma separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "tiered,fraud-flag",
        env = "FRAUDSHIELD_VARIANTS"
    )]
    pub variants: Vec<Variant>,

    /// Latency budget in milliseconds for a single evaluation request
    #[arg(long, default_value = "10", env = "FRAUDSHIELD_LATENCY_BUDGET_MS")]
    pub latency_budget_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "FRAUDSHIELD_LOG_JSON")]
    pub log_json: bool,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "FRAUDSHIELD_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Config {
    /// Get latency budget as Duration.
    pub fn latency_budget(&self) -> Duration {
        Duration::from_millis(self.latency_budget_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:7000".to_string(),
            variants: Variant::ALL.to_vec(),
            latency_budget_ms: 10,
            log_level: "info".to_string(),
            log_json: false,
            graceful_shutdown: true,
        }
    }
}
