// Export modules for the binary, tests and benchmarks
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod rpc;
pub mod transport;
pub mod units;

pub use error::{EthError, Result};
pub use rpc::EthereumClient;
