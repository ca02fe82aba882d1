// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{providers::WalletProvider, sol_types::SolEvent};
use eyre::eyre;

use crate::{
    common_args::{AuthArgs, ContractArgs, ProviderArgs},
    contract::{revert_report, ILazyMint},
    error::LazyMintCliResult,
    utils::display_wei,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    contract: ContractArgs,

    /// Minter wallet whose payments are withdrawn.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> LazyMintCliResult {
    let provider = args.provider.build_provider_with_wallet(&args.auth).await?;
    let account = provider.default_signer_address();
    let contract = ILazyMint::new(args.contract.contract, &provider);

    let available = contract
        .availableToWithdraw(account)
        .call()
        .await
        .map_err(revert_report)?;
    if available.is_zero() {
        return Err(eyre!("nothing to withdraw for {account}").into());
    }
    log::info!("withdrawing {} to {account}", display_wei(available));

    let receipt = contract
        .withdraw()
        .send()
        .await
        .map_err(revert_report)?
        .get_receipt()
        .await?;
    if !receipt.status() {
        return Err(eyre!("withdraw transaction {} reverted", receipt.transaction_hash).into());
    }
    println!("withdraw tx hash: {}", receipt.transaction_hash);
    for log in receipt.inner.logs() {
        if let Ok(withdrawal) = ILazyMint::Withdrawal::decode_log_data(log.data()) {
            println!(
                "Withdrawal to {}: {}",
                withdrawal.account,
                display_wei(withdrawal.amount)
            );
        }
    }
    Ok(())
}
