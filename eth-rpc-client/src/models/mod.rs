//! Data models used throughout the client
//!
//! This module contains the JSON-RPC envelope types, the typed request
//! parameters, and the records mapped out of decoded responses.

// JSON-RPC protocol data structures
pub mod jsonrpc;
pub mod params;

// Response records
pub mod block;
pub mod log;
pub mod receipt;
pub mod sync;
pub mod transaction;

pub use block::{Block, BlockTransactions};
pub use log::Log;
pub use params::{AddressFilter, BlockParam, LogFilter, TransactionRequest};
pub use receipt::TransactionReceipt;
pub use sync::SyncStatus;
pub use transaction::Transaction;
