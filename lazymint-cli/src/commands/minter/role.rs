// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::eyre;

use super::RoleArgs;
use crate::{
    contract::{revert_report, ILazyMint},
    error::LazyMintCliResult,
};

pub async fn exec(args: RoleArgs, enabled: bool) -> LazyMintCliResult {
    let provider = args.provider.build_provider_with_wallet(&args.auth).await?;
    let contract = ILazyMint::new(args.contract.contract, &provider);
    let account = args.account;

    let pending = if enabled {
        contract.grantMinter(account).send().await
    } else {
        contract.revokeMinter(account).send().await
    };
    let receipt = pending.map_err(revert_report)?.get_receipt().await?;
    if !receipt.status() {
        return Err(eyre!("transaction {} reverted", receipt.transaction_hash).into());
    }
    log::debug!("tx hash: {}", receipt.transaction_hash);

    let action = if enabled { "granted to" } else { "revoked from" };
    println!("minter role {action} {account}");
    Ok(())
}
