use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decode::{as_mapping, as_string, Fields, RpcMap, RpcValue};
use crate::error::Result;
use crate::models::transaction::Transaction;
use crate::units::WeiAmount;

/// Transactions carried by a block.
///
/// Which variant is produced is decided solely by the caller's request flag,
/// never by inspecting the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<String>),
    Full(Vec<Transaction>),
}

impl BlockTransactions {
    fn from_rpc(values: &[RpcValue], full: bool) -> Result<Self> {
        if full {
            values
                .iter()
                .map(|value| as_mapping(value).and_then(Transaction::from_rpc))
                .collect::<Result<Vec<_>>>()
                .map(Self::Full)
        } else {
            values
                .iter()
                .map(|value| as_string(value).map(str::to_owned))
                .collect::<Result<Vec<_>>>()
                .map(Self::Hashes)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(hashes) => hashes.len(),
            Self::Full(transactions) => transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes regardless of variant.
    pub fn hashes(&self) -> Vec<&str> {
        match self {
            Self::Hashes(hashes) => hashes.iter().map(String::as_str).collect(),
            Self::Full(transactions) => transactions.iter().map(|tx| tx.hash.as_str()).collect(),
        }
    }
}

/// A block as returned by `eth_getBlockBy*` and `eth_getUncleBy*`.
///
/// Header fields a node may omit (pending blocks, post-merge chains, light
/// responses) are optional; an absent key maps to `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Absent for pending blocks
    pub number: Option<u64>,
    /// Absent for pending blocks
    pub hash: Option<String>,
    pub parent_hash: Option<String>,
    pub mix_hash: Option<String>,
    pub nonce: Option<WeiAmount>,
    pub sha3_uncles: Option<String>,
    pub logs_bloom: Option<String>,
    pub transactions_root: Option<String>,
    pub state_root: Option<String>,
    pub receipts_root: Option<String>,
    pub miner: Option<String>,
    pub difficulty: WeiAmount,
    pub total_difficulty: Option<WeiAmount>,
    pub extra_data: Option<String>,
    pub size: Option<WeiAmount>,
    pub gas_limit: Option<WeiAmount>,
    pub gas_used: Option<WeiAmount>,
    pub base_fee_per_gas: Option<WeiAmount>,
    pub timestamp: DateTime<Utc>,
    pub transactions: BlockTransactions,
    pub uncles: Vec<String>,
}

impl Block {
    /// Map a block response; `full_transactions` must match the flag sent
    /// with the request.
    pub fn from_rpc(map: &RpcMap, full_transactions: bool) -> Result<Self> {
        let fields = Fields::new(map);
        let transactions =
            BlockTransactions::from_rpc(fields.sequence("transactions")?, full_transactions)?;
        Self::with_transactions(fields, transactions)
    }

    /// Map an uncle header. Uncle responses carry no body, so a missing
    /// `transactions` key yields an empty hash list.
    pub fn uncle_from_rpc(map: &RpcMap) -> Result<Self> {
        let fields = Fields::new(map);
        let transactions = match fields.opt_sequence("transactions")? {
            Some(values) => BlockTransactions::from_rpc(values, false)?,
            None => BlockTransactions::Hashes(Vec::new()),
        };
        Self::with_transactions(fields, transactions)
    }

    fn with_transactions(fields: Fields<'_>, transactions: BlockTransactions) -> Result<Self> {
        Ok(Self {
            number: fields.opt_u64("number")?,
            hash: fields.opt_string("hash")?,
            parent_hash: fields.opt_string("parentHash")?,
            mix_hash: fields.opt_string("mixHash")?,
            nonce: fields.opt_wei("nonce")?,
            sha3_uncles: fields.opt_string("sha3Uncles")?,
            logs_bloom: fields.opt_string("logsBloom")?,
            transactions_root: fields.opt_string("transactionsRoot")?,
            state_root: fields.opt_string("stateRoot")?,
            receipts_root: fields.opt_string("receiptsRoot")?,
            miner: fields.opt_string("miner")?,
            difficulty: fields.wei("difficulty")?,
            total_difficulty: fields.opt_wei("totalDifficulty")?,
            extra_data: fields.opt_string("extraData")?,
            size: fields.opt_wei("size")?,
            gas_limit: fields.opt_wei("gasLimit")?,
            gas_used: fields.opt_wei("gasUsed")?,
            base_fee_per_gas: fields.opt_wei("baseFeePerGas")?,
            timestamp: fields.timestamp("timestamp")?,
            transactions,
            uncles: fields.strings("uncles")?,
        })
    }
}
