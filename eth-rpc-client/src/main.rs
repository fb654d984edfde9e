use eth_rpc_client::{config::Config, models::BlockParam, EthereumClient};
use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Demo entry point
///
/// Connects to the configured node and prints a short chain summary. If an
/// address is passed as the first argument, its balance is printed as well.
#[tokio::main]
async fn main() -> Result<()> {
    // Debug level for our crate, lower levels for HTTP dependencies to reduce noise
    let filter = EnvFilter::from_default_env()
        .add_directive("eth_rpc_client=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let client = EthereumClient::new(&config.ethereum_rpc_url, config.request_timeout())?;
    info!("Using node at {}", config.ethereum_rpc_url);

    let version = client.client_version().await?;
    let chain_id = client.chain_id().await?;
    println!("client:    {version}");
    println!("chain id:  {chain_id}");

    match client.last_block(false).await? {
        Some(block) => {
            println!(
                "block:     #{} at {} ({} transactions)",
                block.number.map_or_else(|| "pending".to_string(), |n| n.to_string()),
                block.timestamp.to_rfc3339(),
                block.transactions.len()
            );
            if let Some(base_fee) = &block.base_fee_per_gas {
                println!("base fee:  {} gwei", base_fee.to_gwei()?);
            }
        }
        None => println!("block:     none"),
    }

    let gas_price = client.gas_price().await?;
    println!("gas price: {} gwei", gas_price.to_gwei()?);

    if let Some(address) = std::env::args().nth(1) {
        let balance = client.balance(&address, BlockParam::Latest).await?;
        println!("balance:   {} wei ({} ether)", balance, balance.to_ether()?);
    }

    Ok(())
}
