//! One-shot deployment and seed tool.
//!
//! Deploys the game contract against a dev node with unlocked accounts,
//! provisions the character catalog and boss through the constructor, then
//! smoke-tests the mint and attack entry points, reading back each minted
//! token's URI. Sequential and non-retrying: every call is
//! awaited to settlement before the next, and any failure aborts the whole
//! run with a non-zero exit, leaving partially-provisioned state behind.
//!
//! Usage: RPC=http://localhost:8545 ARTIFACT=artifacts/MetaSapiens.json cargo run -p sapiens-cli

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use sapiens_api::prelude::*;
use serde_json::Value;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const RECEIPT_POLL_LIMIT: u32 = 30;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), anyhow::Error> {
    let rpc_url = std::env::var("RPC").unwrap_or_else(|_| "http://localhost:8545".to_string());
    let artifact_path =
        std::env::var("ARTIFACT").unwrap_or_else(|_| "artifacts/MetaSapiens.json".to_string());

    let provider = EthProvider::new(&rpc_url);
    let bytecode = load_bytecode(&artifact_path)?;

    // Deploy from an explicit account, or fall back to the node's first
    // unlocked one.
    let deployer = match std::env::var("DEPLOYER") {
        Ok(s) => Address::from_str(&s).map_err(|_| anyhow!("invalid DEPLOYER address: {s}"))?,
        Err(_) => *provider
            .accounts()
            .await
            .context("listing node accounts")?
            .first()
            .ok_or(Error::NoAccounts)?,
    };

    let contract = deploy(&provider, &deployer, bytecode).await?;

    println!();
    println!("Contract deployed to: {}", contract.address());
    println!("Deployer:             {deployer}");
    println!();

    mint(&provider, &contract, &deployer, 0).await?;
    log_token_uri(&provider, &contract, 1).await?;

    attack(&provider, &contract, &deployer).await?;
    attack(&provider, &contract, &deployer).await?;

    mint(&provider, &contract, &deployer, 1).await?;
    log_token_uri(&provider, &contract, 2).await?;

    mint(&provider, &contract, &deployer, 2).await?;
    log_token_uri(&provider, &contract, 3).await?;

    mint(&provider, &contract, &deployer, 3).await?;
    log_token_uri(&provider, &contract, 4).await?;

    println!();
    println!("Seed complete.");

    Ok(())
}

/// Pull the creation bytecode out of the compiled artifact. The abi entry
/// is carried opaquely and never interpreted here.
fn load_bytecode(path: &str) -> Result<Vec<u8>, anyhow::Error> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading contract artifact {path}"))?;
    let artifact: Value = serde_json::from_str(&raw)
        .with_context(|| format!("contract artifact {path} is not valid json"))?;
    let bytecode = artifact
        .get("bytecode")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("contract artifact {path} has no bytecode field"))?;
    Ok(abi::from_hex(bytecode).context("decoding creation bytecode")?)
}

async fn deploy(
    provider: &EthProvider,
    deployer: &Address,
    mut data: Vec<u8>,
) -> Result<GameContract, anyhow::Error> {
    for template in CHARACTER_TEMPLATES {
        println!(
            "Provisioning {} ({}) - {} hp, {} attack damage",
            template.name, template.class, template.hp, template.attack_damage
        );
    }
    println!(
        "Provisioning boss {} - {} hp, {} attack damage",
        BOSS_TEMPLATE.name, BOSS_TEMPLATE.hp, BOSS_TEMPLATE.attack_damage
    );

    data.extend(GameContract::constructor_args());
    let hash = provider
        .send_transaction(deployer, None, &data)
        .await
        .context("submitting deploy transaction")?;
    let receipt = wait_for_receipt(provider, &hash).await?;
    let address = receipt
        .contract_address
        .as_deref()
        .ok_or_else(|| anyhow!("deploy receipt {hash} carries no contract address"))?;
    let address =
        Address::from_str(address).map_err(|_| anyhow!("malformed contract address {address}"))?;
    Ok(GameContract::new(address))
}

async fn mint(
    provider: &EthProvider,
    contract: &GameContract,
    from: &Address,
    template_index: u64,
) -> Result<(), anyhow::Error> {
    let template = &CHARACTER_TEMPLATES[template_index as usize];
    println!("Minting {} (template {template_index})...", template.name);
    let hash = provider
        .send_transaction(
            from,
            Some(contract.address()),
            &contract.mint_calldata(template_index),
        )
        .await
        .with_context(|| format!("submitting mint for template {template_index}"))?;
    wait_for_receipt(provider, &hash).await?;
    println!("  settled: {hash}");
    Ok(())
}

async fn attack(
    provider: &EthProvider,
    contract: &GameContract,
    from: &Address,
) -> Result<(), anyhow::Error> {
    println!("Attacking {}...", BOSS_TEMPLATE.name);
    let hash = provider
        .send_transaction(from, Some(contract.address()), &contract.attack_calldata())
        .await
        .context("submitting attack")?;
    wait_for_receipt(provider, &hash).await?;
    let boss = contract
        .big_boss(provider)
        .await
        .context("re-fetching boss")?;
    println!(
        "  settled: {hash} ({} {}/{} hp)",
        boss.name, boss.hp, boss.max_hp
    );
    Ok(())
}

async fn log_token_uri(
    provider: &EthProvider,
    contract: &GameContract,
    token_id: u64,
) -> Result<(), anyhow::Error> {
    let uri = contract
        .token_uri(provider, token_id)
        .await
        .with_context(|| format!("fetching tokenURI({token_id})"))?;
    println!("Minted Sapien NFT #{token_id}");
    println!("  URI: {uri}");
    Ok(())
}

/// Poll until the transaction is mined. A local dev node mines on submit,
/// so the bound is generous; hitting it means the node is stuck.
async fn wait_for_receipt(
    provider: &EthProvider,
    hash: &str,
) -> Result<TransactionReceipt, anyhow::Error> {
    for _ in 0..RECEIPT_POLL_LIMIT {
        if let Some(receipt) = provider.transaction_receipt(hash).await? {
            if !receipt.succeeded() {
                return Err(Error::Reverted(hash.to_string()).into());
            }
            return Ok(receipt);
        }
        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
    Err(Error::SettlementTimeout {
        hash: hash.to_string(),
        polls: RECEIPT_POLL_LIMIT,
    }
    .into())
}
