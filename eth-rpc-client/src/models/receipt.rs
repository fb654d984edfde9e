use serde::Serialize;

use crate::decode::{hex_to_int, kind, Fields, RpcMap, RpcValue};
use crate::error::{EthError, Result};
use crate::models::log::{logs_from_rpc, Log};
use crate::units::WeiAmount;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Option<String>,
    pub transaction_index: u64,
    pub block_hash: String,
    pub block_number: u64,
    pub from: String,
    pub to: Option<String>,
    pub cumulative_gas_used: WeiAmount,
    /// Price per gas actually paid, in wei
    pub effective_gas_price: WeiAmount,
    pub gas_used: WeiAmount,
    /// Address of the deployed contract, present only for contract creation
    pub contract_address: Option<String>,
    pub logs: Vec<Log>,
    pub logs_bloom: String,
    #[serde(rename = "type")]
    pub tx_type: u64,
    pub status: bool,
}

impl TransactionReceipt {
    pub fn from_rpc(map: &RpcMap) -> Result<Self> {
        let fields = Fields::new(map);
        Ok(Self {
            transaction_hash: fields.opt_string("transactionHash")?,
            transaction_index: fields.u64("transactionIndex")?,
            block_hash: fields.string("blockHash")?,
            block_number: fields.u64("blockNumber")?,
            from: fields.string("from")?,
            to: fields.opt_string("to")?,
            cumulative_gas_used: fields.wei("cumulativeGasUsed")?,
            effective_gas_price: fields.wei("effectiveGasPrice")?,
            gas_used: fields.wei("gasUsed")?,
            contract_address: fields.opt_string("contractAddress")?,
            logs: logs_from_rpc(fields.sequence("logs")?)?,
            logs_bloom: fields.string("logsBloom")?,
            tx_type: fields.u64("type")?,
            status: status_from_rpc(fields.raw("status")?)?,
        })
    }

    /// Total fee paid, in wei.
    pub fn fee(&self) -> WeiAmount {
        self.gas_used.times(&self.effective_gas_price)
    }
}

/// Nodes report status as a `0x0`/`0x1` quantity; some fixtures use a JSON boolean.
fn status_from_rpc(value: &RpcValue) -> Result<bool> {
    match value {
        RpcValue::Bool(status) => Ok(*status),
        RpcValue::String(_) => hex_to_int(value).map(|status| status != 0),
        _ => Err(EthError::TypeMismatch {
            expected: "status quantity",
            found: kind(value),
        }),
    }
}
