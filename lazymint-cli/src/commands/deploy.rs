// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::primitives::Address;

use crate::{
    common_args::{AuthArgs, ProviderArgs},
    constants::{CONTRACT_NAME, DEFAULT_BASE_URI, DEFAULT_CONTRACT_DIR, DEFAULT_MINTER},
    deployer::Deployer,
    error::LazyMintCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Account allowed to sign vouchers from the start.
    #[arg(long, default_value = DEFAULT_MINTER)]
    minter: Address,
    /// URI prefix for tokens redeemed without their own URI.
    #[arg(long, default_value = DEFAULT_BASE_URI)]
    base_uri: String,
    /// Directory of the contract crate.
    #[arg(long, default_value = DEFAULT_CONTRACT_DIR)]
    dir: PathBuf,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// If specified, will not run the command in a reproducible docker container. Useful for local
    /// builds, but at the risk of not having a reproducible contract for verification purposes.
    #[arg(long)]
    no_verify: bool,

    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub fn exec(args: Args) -> LazyMintCliResult {
    let deployer = Deployer::builder()
        .endpoint(args.provider.endpoint.clone())
        .dir(args.dir.clone())
        .auth(args.auth.forward_args()?)
        .no_verify(args.no_verify)
        .constructor_args(vec![args.minter.to_string(), args.base_uri.clone()])
        .build();

    if args.estimate_gas {
        let fee = deployer.estimate_gas()?;
        println!("wasm data fee: {fee} ETH");
        return Ok(());
    }

    log::info!(
        "deploying {CONTRACT_NAME} to {} with minter {} and base uri {:?}",
        args.provider.endpoint,
        args.minter,
        args.base_uri
    );
    let deployment = deployer.deploy()?;
    log::debug!("deployment tx hash: {}", deployment.tx_hash);
    if let Some(fee) = deployment.data_fee {
        log::debug!("wasm data fee: {fee} ETH");
    }
    println!("{CONTRACT_NAME} deployed to: {}", deployment.address);
    Ok(())
}
