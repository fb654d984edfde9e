use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::{
    decode::{
        as_bool, as_mapping, as_sequence, as_string, hex_to_int, hex_to_quantity, RpcMap, RpcValue,
    },
    error::{EthError, Result},
    models::{
        log::logs_from_rpc,
        params::quantity,
        Block, BlockParam, Log, LogFilter, SyncStatus, Transaction, TransactionReceipt,
        TransactionRequest,
    },
    transport::{HttpTransport, Transport},
    units::WeiAmount,
};

/// Ethereum JSON-RPC client
///
/// Each method issues exactly one RPC call and decodes its result into a
/// typed value. The client holds no mutable state and can be shared freely
/// between tasks.
#[derive(Debug)]
pub struct EthereumClient<T = HttpTransport> {
    transport: T,
}

impl EthereumClient<HttpTransport> {
    /// Create a new Ethereum client talking JSON-RPC over HTTP
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - URL of the Ethereum RPC endpoint
    /// * `timeout` - Per-request timeout
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(rpc_url, timeout)?))
    }
}

fn to_param<P: Serialize>(value: &P) -> Result<RpcValue> {
    serde_json::to_value(value)
        .map_err(|e| EthError::Transport(format!("cannot encode params: {e}")))
}

fn strings(value: &RpcValue) -> Result<Vec<String>> {
    as_sequence(value)?
        .iter()
        .map(|v| as_string(v).map(str::to_owned))
        .collect()
}

/// Map a mapping-or-null lookup result.
fn optional<R>(value: RpcValue, map: impl FnOnce(&RpcMap) -> Result<R>) -> Result<Option<R>> {
    if value.is_null() {
        return Ok(None);
    }
    as_mapping(&value).and_then(map).map(Some)
}

impl<T: Transport> EthereumClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue an arbitrary call and return the undecoded result.
    pub async fn raw_request(&self, method: &str, params: Vec<RpcValue>) -> Result<RpcValue> {
        self.transport.request(method, params).await
    }

    async fn call(&self, method: &str, params: Vec<RpcValue>) -> Result<RpcValue> {
        debug!(method, "calling node");
        self.transport.request(method, params).await
    }

    // web3 / net

    pub async fn client_version(&self) -> Result<String> {
        let result = self.call("web3_clientVersion", vec![]).await?;
        as_string(&result).map(str::to_owned)
    }

    /// Keccak-256 of the given hex data, computed by the node.
    pub async fn sha3(&self, data: &str) -> Result<String> {
        let result = self.call("web3_sha3", vec![json!(data)]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn network_version(&self) -> Result<String> {
        let result = self.call("net_version", vec![]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn is_listening(&self) -> Result<bool> {
        let result = self.call("net_listening", vec![]).await?;
        as_bool(&result)
    }

    pub async fn peer_count(&self) -> Result<u64> {
        let result = self.call("net_peerCount", vec![]).await?;
        hex_to_int(&result)
    }

    // chain state

    pub async fn protocol_version(&self) -> Result<u64> {
        let result = self.call("eth_protocolVersion", vec![]).await?;
        hex_to_int(&result)
    }

    pub async fn syncing(&self) -> Result<SyncStatus> {
        let result = self.call("eth_syncing", vec![]).await?;
        SyncStatus::from_rpc(&result)
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.call("eth_chainId", vec![]).await?;
        hex_to_int(&result)
    }

    /// Only meaningful on proof-of-work networks.
    pub async fn is_mining(&self) -> Result<bool> {
        let result = self.call("eth_mining", vec![]).await?;
        as_bool(&result)
    }

    /// Only meaningful on proof-of-work networks.
    pub async fn hashrate(&self) -> Result<u64> {
        let result = self.call("eth_hashrate", vec![]).await?;
        hex_to_int(&result)
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> Result<WeiAmount> {
        let result = self.call("eth_gasPrice", vec![]).await?;
        hex_to_quantity(as_string(&result)?)
    }

    pub async fn accounts(&self) -> Result<Vec<String>> {
        let result = self.call("eth_accounts", vec![]).await?;
        strings(&result)
    }

    pub async fn block_number(&self) -> Result<u64> {
        let result = self.call("eth_blockNumber", vec![]).await?;
        hex_to_int(&result)
    }

    /// Balance of `address` in wei.
    #[instrument(skip(self), err)]
    pub async fn balance(&self, address: &str, block: BlockParam) -> Result<WeiAmount> {
        let result = self
            .call("eth_getBalance", vec![json!(address), block.into()])
            .await?;
        hex_to_quantity(as_string(&result)?)
    }

    /// Raw 32-byte storage word at `position`, left as a hex digest.
    pub async fn storage_at(
        &self,
        address: &str,
        position: u64,
        block: BlockParam,
    ) -> Result<String> {
        let result = self
            .call(
                "eth_getStorageAt",
                vec![json!(address), quantity(position), block.into()],
            )
            .await?;
        as_string(&result).map(str::to_owned)
    }

    /// Number of transactions sent from `address`.
    pub async fn transaction_count(&self, address: &str, block: BlockParam) -> Result<u64> {
        let result = self
            .call("eth_getTransactionCount", vec![json!(address), block.into()])
            .await?;
        hex_to_int(&result)
    }

    pub async fn block_transaction_count_by_hash(&self, block_hash: &str) -> Result<u64> {
        let result = self
            .call("eth_getBlockTransactionCountByHash", vec![json!(block_hash)])
            .await?;
        hex_to_int(&result)
    }

    pub async fn block_transaction_count_by_number(&self, block: BlockParam) -> Result<u64> {
        let result = self
            .call("eth_getBlockTransactionCountByNumber", vec![block.into()])
            .await?;
        hex_to_int(&result)
    }

    pub async fn uncle_count_by_block_hash(&self, block_hash: &str) -> Result<u64> {
        let result = self
            .call("eth_getUncleCountByBlockHash", vec![json!(block_hash)])
            .await?;
        hex_to_int(&result)
    }

    pub async fn uncle_count_by_block_number(&self, block: BlockParam) -> Result<u64> {
        let result = self
            .call("eth_getUncleCountByBlockNumber", vec![block.into()])
            .await?;
        hex_to_int(&result)
    }

    pub async fn code(&self, address: &str, block: BlockParam) -> Result<String> {
        let result = self
            .call("eth_getCode", vec![json!(address), block.into()])
            .await?;
        as_string(&result).map(str::to_owned)
    }

    // node-side signing and submission

    /// Sign with an account unlocked on the node.
    pub async fn sign(&self, address: &str, message: &str) -> Result<String> {
        let result = self
            .call("eth_sign", vec![json!(address), json!(message)])
            .await?;
        as_string(&result).map(str::to_owned)
    }

    /// Ask the node to sign `tx`; returns the node's `{raw, tx}` object.
    pub async fn sign_transaction(&self, tx: &TransactionRequest) -> Result<RpcMap> {
        let result = self.call("eth_signTransaction", vec![to_param(tx)?]).await?;
        as_mapping(&result).cloned()
    }

    /// Returns the transaction hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String> {
        let result = self.call("eth_sendTransaction", vec![to_param(tx)?]).await?;
        as_string(&result).map(str::to_owned)
    }

    /// Returns the transaction hash.
    pub async fn send_raw_transaction(&self, data: &str) -> Result<String> {
        let result = self.call("eth_sendRawTransaction", vec![json!(data)]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn call_contract(
        &self,
        tx: &TransactionRequest,
        block: BlockParam,
    ) -> Result<String> {
        let result = self.call("eth_call", vec![to_param(tx)?, block.into()]).await?;
        as_string(&result).map(str::to_owned)
    }

    /// Estimated gas for `tx`, as an unbounded quantity like every other gas field.
    pub async fn estimate_gas(
        &self,
        tx: &TransactionRequest,
        block: BlockParam,
    ) -> Result<WeiAmount> {
        let result = self
            .call("eth_estimateGas", vec![to_param(tx)?, block.into()])
            .await?;
        hex_to_quantity(as_string(&result)?)
    }

    // blocks

    /// `None` when the node does not know the block.
    #[instrument(skip(self), err)]
    pub async fn block_by_hash(
        &self,
        block_hash: &str,
        full_transactions: bool,
    ) -> Result<Option<Block>> {
        let result = self
            .call(
                "eth_getBlockByHash",
                vec![json!(block_hash), json!(full_transactions)],
            )
            .await?;
        optional(result, |map| Block::from_rpc(map, full_transactions))
    }

    /// `None` when the node does not know the block.
    #[instrument(skip(self), err)]
    pub async fn block_by_number(
        &self,
        block: BlockParam,
        full_transactions: bool,
    ) -> Result<Option<Block>> {
        let result = self
            .call(
                "eth_getBlockByNumber",
                vec![block.into(), json!(full_transactions)],
            )
            .await?;
        optional(result, |map| Block::from_rpc(map, full_transactions))
    }

    pub async fn last_block(&self, full_transactions: bool) -> Result<Option<Block>> {
        self.block_by_number(BlockParam::Latest, full_transactions).await
    }

    // transactions

    #[instrument(skip(self), err)]
    pub async fn transaction_by_hash(&self, hash: &str) -> Result<Option<Transaction>> {
        let result = self.call("eth_getTransactionByHash", vec![json!(hash)]).await?;
        optional(result, Transaction::from_rpc)
    }

    pub async fn transaction_by_block_hash_and_index(
        &self,
        block_hash: &str,
        index: u64,
    ) -> Result<Option<Transaction>> {
        let result = self
            .call(
                "eth_getTransactionByBlockHashAndIndex",
                vec![json!(block_hash), quantity(index)],
            )
            .await?;
        optional(result, Transaction::from_rpc)
    }

    pub async fn transaction_by_block_number_and_index(
        &self,
        block: BlockParam,
        index: u64,
    ) -> Result<Option<Transaction>> {
        let result = self
            .call(
                "eth_getTransactionByBlockNumberAndIndex",
                vec![block.into(), quantity(index)],
            )
            .await?;
        optional(result, Transaction::from_rpc)
    }

    /// `None` while the transaction is pending or unknown.
    #[instrument(skip(self), err)]
    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>> {
        let result = self.call("eth_getTransactionReceipt", vec![json!(hash)]).await?;
        optional(result, TransactionReceipt::from_rpc)
    }

    // uncles

    pub async fn uncle_by_block_hash_and_index(
        &self,
        block_hash: &str,
        index: u64,
    ) -> Result<Option<Block>> {
        let result = self
            .call(
                "eth_getUncleByBlockHashAndIndex",
                vec![json!(block_hash), quantity(index)],
            )
            .await?;
        optional(result, Block::uncle_from_rpc)
    }

    pub async fn uncle_by_block_number_and_index(
        &self,
        block: BlockParam,
        index: u64,
    ) -> Result<Option<Block>> {
        let result = self
            .call(
                "eth_getUncleByBlockNumberAndIndex",
                vec![block.into(), quantity(index)],
            )
            .await?;
        optional(result, Block::uncle_from_rpc)
    }

    // filters and logs
    //
    // Filter ids are opaque hex strings; some clients issue 128-bit ids.

    pub async fn new_filter(&self, filter: &LogFilter) -> Result<String> {
        let result = self.call("eth_newFilter", vec![to_param(filter)?]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn new_block_filter(&self) -> Result<String> {
        let result = self.call("eth_newBlockFilter", vec![]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn new_pending_transaction_filter(&self) -> Result<String> {
        let result = self.call("eth_newPendingTransactionFilter", vec![]).await?;
        as_string(&result).map(str::to_owned)
    }

    pub async fn uninstall_filter(&self, filter_id: &str) -> Result<bool> {
        let result = self.call("eth_uninstallFilter", vec![json!(filter_id)]).await?;
        as_bool(&result)
    }

    /// Entries are hashes for block/pending filters and log objects for log filters.
    pub async fn filter_changes(&self, filter_id: &str) -> Result<Vec<RpcValue>> {
        let result = self.call("eth_getFilterChanges", vec![json!(filter_id)]).await?;
        as_sequence(&result).cloned()
    }

    pub async fn filter_logs(&self, filter_id: &str) -> Result<Vec<Log>> {
        let result = self.call("eth_getFilterLogs", vec![json!(filter_id)]).await?;
        logs_from_rpc(as_sequence(&result)?)
    }

    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>> {
        let result = self.call("eth_getLogs", vec![to_param(filter)?]).await?;
        logs_from_rpc(as_sequence(&result)?)
    }
}
