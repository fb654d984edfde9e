use serde::Serialize;

use crate::decode::{kind, Fields, RpcValue};
use crate::error::{EthError, Result};

/// Result of `eth_syncing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SyncStatus {
    NotSyncing,
    #[serde(rename_all = "camelCase")]
    Syncing {
        starting_block: u64,
        current_block: u64,
        highest_block: u64,
    },
}

impl SyncStatus {
    /// The node answers `false` when idle and a progress object otherwise.
    pub fn from_rpc(value: &RpcValue) -> Result<Self> {
        match value {
            RpcValue::Bool(false) => Ok(Self::NotSyncing),
            RpcValue::Object(map) => {
                let fields = Fields::new(map);
                Ok(Self::Syncing {
                    starting_block: fields.u64("startingBlock")?,
                    current_block: fields.u64("currentBlock")?,
                    highest_block: fields.u64("highestBlock")?,
                })
            }
            _ => Err(EthError::TypeMismatch {
                expected: "false or sync progress mapping",
                found: kind(value),
            }),
        }
    }
}
