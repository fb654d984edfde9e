use std::time::Duration;

use eyre::Result;
use serde::Deserialize;

use crate::transport::DEFAULT_TIMEOUT;

/// Client configuration structure
///
/// This structure contains the parameters needed to reach an Ethereum node.
/// Values come from environment variables (optionally via a `.env` file)
/// layered over defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ethereum RPC endpoint URL for communicating with the blockchain
    pub ethereum_rpc_url: String,

    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `ETHEREUM_RPC_URL` - Ethereum RPC URL (default: "http://localhost:8545")
    /// * `REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        let settings = config::Config::builder()
            .set_default("ethereum_rpc_url", "http://localhost:8545")?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        if config.request_timeout_secs == 0 {
            eyre::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
