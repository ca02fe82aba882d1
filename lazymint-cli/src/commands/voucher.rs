// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    primitives::{utils::parse_ether, U256},
    providers::Provider,
};
use lazy_minter::LazyMinter;

use crate::{
    common_args::{AuthArgs, ContractArgs, ProviderArgs},
    error::LazyMintCliResult,
    utils::display_wei,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    contract: ContractArgs,
    /// Chain the voucher is valid on. Queried from the endpoint if omitted.
    #[arg(long)]
    chain_id: Option<u64>,
    /// Token id to mint on redemption.
    #[arg(long)]
    token_id: U256,
    /// Number of tokens to mint on redemption.
    #[arg(long)]
    amount: U256,
    /// Least amount of Ether the redeemer must pay.
    #[arg(long, value_parser = parse_ether, default_value = "0")]
    min_price: U256,
    /// Metadata URI stored for the token.
    #[arg(long)]
    uri: String,
    /// Where to write the voucher (defaults to stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Minter wallet that signs the voucher.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> LazyMintCliResult {
    let signer = args.auth.signer()?;
    let chain_id = match args.chain_id {
        Some(chain_id) => chain_id,
        None => {
            let provider = args.provider.build_provider().await?;
            provider.get_chain_id().await?
        }
    };

    let minter = LazyMinter::new(args.contract.contract, chain_id, signer);
    log::debug!(
        "signing voucher for token {} as {} on chain {chain_id}",
        args.token_id,
        minter.address()
    );
    let voucher = minter
        .create_voucher_with_price(args.token_id, args.amount, args.min_price, args.uri)
        .await?;
    let json = voucher.to_json()?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!(
                "wrote voucher for {} of token {} at {} to {}",
                voucher.amount,
                voucher.token_id,
                display_wei(voucher.min_price),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
