use serde::Serialize;

use crate::decode::{as_mapping, Fields, RpcMap, RpcValue};
use crate::error::Result;

/// Event log emitted by a transaction.
///
/// Position fields are absent on logs belonging to pending transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: Option<u64>,
    pub block_hash: Option<String>,
    pub transaction_hash: Option<String>,
    pub transaction_index: Option<u64>,
    pub log_index: Option<u64>,
    pub removed: Option<bool>,
}

impl Log {
    pub fn from_rpc(map: &RpcMap) -> Result<Self> {
        let fields = Fields::new(map);
        Ok(Self {
            address: fields.string("address")?,
            topics: fields.strings("topics")?,
            data: fields.string("data")?,
            block_number: fields.opt_u64("blockNumber")?,
            block_hash: fields.opt_string("blockHash")?,
            transaction_hash: fields.opt_string("transactionHash")?,
            transaction_index: fields.opt_u64("transactionIndex")?,
            log_index: fields.opt_u64("logIndex")?,
            removed: fields.opt_bool("removed")?,
        })
    }
}

/// Map every entry of a JSON sequence through [`Log::from_rpc`].
pub fn logs_from_rpc(values: &[RpcValue]) -> Result<Vec<Log>> {
    values
        .iter()
        .map(|value| as_mapping(value).and_then(Log::from_rpc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EthError;
    use serde_json::json;

    #[test]
    fn test_log_from_rpc() {
        let value = json!({
            "address": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "topics": [
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
            ],
            "data": "0x",
            "blockNumber": "0x10",
            "blockHash": "0xblock",
            "transactionHash": "0xtx",
            "transactionIndex": "0x0",
            "logIndex": "0x3",
            "removed": false
        });
        let log = Log::from_rpc(value.as_object().unwrap()).unwrap();
        assert_eq!(log.address, "0x5fbdb2315678afecb367f032d93f642f64180aa3");
        assert_eq!(log.topics.len(), 1);
        assert_eq!(log.block_number, Some(16));
        assert_eq!(log.log_index, Some(3));
        assert_eq!(log.removed, Some(false));
    }

    #[test]
    fn test_pending_log_has_no_position() {
        let value = json!({
            "address": "0xabc",
            "topics": [],
            "data": "0x01",
            "blockNumber": null,
            "blockHash": null
        });
        let log = Log::from_rpc(value.as_object().unwrap()).unwrap();
        assert_eq!(log.block_number, None);
        assert_eq!(log.block_hash, None);
        assert_eq!(log.transaction_index, None);
    }

    #[test]
    fn test_logs_from_rpc_rejects_non_objects() {
        let values = vec![json!("0xdeadbeef")];
        assert!(matches!(
            logs_from_rpc(&values),
            Err(EthError::TypeMismatch { expected: "mapping", .. })
        ));
    }
}
