//! Typed parameters for outgoing requests

use std::fmt;

use serde::{Serialize, Serializer};

use crate::decode::RpcValue;

/// Block identifier: a tag or a specific block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockParam {
    #[default]
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
    Number(u64),
}

impl fmt::Display for BlockParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Earliest => write!(f, "earliest"),
            Self::Pending => write!(f, "pending"),
            Self::Safe => write!(f, "safe"),
            Self::Finalized => write!(f, "finalized"),
            Self::Number(n) => write!(f, "0x{:x}", n),
        }
    }
}

impl Serialize for BlockParam {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<u64> for BlockParam {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<BlockParam> for RpcValue {
    fn from(block: BlockParam) -> Self {
        RpcValue::String(block.to_string())
    }
}

/// Encode an index or position as a `0x` quantity.
pub fn quantity(n: u64) -> RpcValue {
    RpcValue::String(format!("0x{:x}", n))
}

/// Transaction object for `eth_call`, `eth_estimateGas`, `eth_sendTransaction`
/// and `eth_signTransaction`.
///
/// Quantities are expected as `0x` hex strings; see [`crate::units::wei_to_hex`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Recipient address (absent for contract creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Gas limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,

    /// Legacy gas price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,

    /// EIP-1559 max fee per gas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,

    /// EIP-1559 max priority fee per gas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,

    /// Value in wei
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Call data
    #[serde(rename = "input", skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

/// Address filter: a single contract or any of several.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AddressFilter {
    One(String),
    Many(Vec<String>),
}

/// Filter object for `eth_newFilter` and `eth_getLogs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockParam>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockParam>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressFilter>,

    /// Topic positions; `None` entries match anything.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Option<String>>,

    /// Restricts the query to a single block; exclusive with the block range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
}
