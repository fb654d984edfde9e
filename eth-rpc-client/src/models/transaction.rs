use serde::Serialize;

use crate::decode::{Fields, RpcMap};
use crate::error::Result;
use crate::units::WeiAmount;

/// A transaction as returned by `eth_getTransactionBy*` or inside a full block.
///
/// `block_hash`, `block_number` and `transaction_index` are absent while the
/// transaction is pending; `to` is absent for contract creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub block_hash: Option<String>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
    pub from: String,
    pub to: Option<String>,
    pub gas: WeiAmount,
    /// Gas price in wei
    pub gas_price: WeiAmount,
    pub max_fee_per_gas: Option<WeiAmount>,
    pub max_priority_fee_per_gas: Option<WeiAmount>,
    pub input: String,
    pub nonce: WeiAmount,
    /// Transferred value in wei
    pub value: WeiAmount,
    #[serde(rename = "type")]
    pub tx_type: Option<u64>,
    pub chain_id: Option<u64>,
    /// ECDSA recovery id
    pub v: u64,
    /// ECDSA signature r
    pub r: String,
    /// ECDSA signature s
    pub s: String,
}

impl Transaction {
    pub fn from_rpc(map: &RpcMap) -> Result<Self> {
        let fields = Fields::new(map);
        Ok(Self {
            hash: fields.string("hash")?,
            block_hash: fields.opt_string("blockHash")?,
            block_number: fields.opt_u64("blockNumber")?,
            transaction_index: fields.opt_u64("transactionIndex")?,
            from: fields.string("from")?,
            to: fields.opt_string("to")?,
            gas: fields.wei("gas")?,
            gas_price: fields.wei("gasPrice")?,
            max_fee_per_gas: fields.opt_wei("maxFeePerGas")?,
            max_priority_fee_per_gas: fields.opt_wei("maxPriorityFeePerGas")?,
            input: fields.string("input")?,
            nonce: fields.wei("nonce")?,
            value: fields.wei("value")?,
            tx_type: fields.opt_u64("type")?,
            chain_id: fields.opt_u64("chainId")?,
            v: fields.u64("v")?,
            r: fields.string("r")?,
            s: fields.string("s")?,
        })
    }

    /// Whether the transaction has been included in a block.
    pub fn is_pending(&self) -> bool {
        self.block_hash.is_none()
    }
}
