// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;

use crate::{
    common_args::{ContractArgs, ProviderArgs},
    contract::{revert_report, ILazyMint},
    error::LazyMintCliResult,
    utils::display_wei,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    contract: ContractArgs,
    /// Account to check.
    #[arg(long)]
    account: Address,

    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> LazyMintCliResult {
    let provider = args.provider.build_provider().await?;
    let contract = ILazyMint::new(args.contract.contract, &provider);

    let admin = contract.admin().call().await.map_err(revert_report)?;
    let is_minter = contract
        .isMinter(args.account)
        .call()
        .await
        .map_err(revert_report)?;
    let pending = contract
        .availableToWithdraw(args.account)
        .call()
        .await
        .map_err(revert_report)?;

    println!("admin: {admin}");
    println!("{} is minter: {is_minter}", args.account);
    println!("available to withdraw: {}", display_wei(pending));
    Ok(())
}
