// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    primitives::{utils::parse_ether, Address, U256},
    providers::{Provider, WalletProvider},
    sol_types::SolEvent,
};
use eyre::{eyre, Context};
use lazy_minter::{signing_domain, SignedVoucher};

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
    /// Voucher JSON file written by `lazymint voucher`.
    #[arg(long)]
    voucher: PathBuf,
    /// Minter the tokens are minted to first. Defaults to the voucher's signer.
    #[arg(long)]
    minter: Option<Address>,
    /// Account receiving the tokens. Defaults to the wallet address.
    #[arg(long)]
    redeemer: Option<Address>,
    /// Ether paid for the voucher. Defaults to its minimum price.
    #[arg(long, value_parser = parse_ether)]
    value: Option<U256>,

    /// Wallet that pays for and sends the redemption.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> LazyMintCliResult {
    let json = fs::read_to_string(&args.voucher)
        .wrap_err_with(|| format!("could not read voucher {}", args.voucher.display()))?;
    let voucher = SignedVoucher::from_json(&json)?;

    let provider = args.provider.build_provider_with_wallet(&args.auth).await?;
    let chain_id = provider.get_chain_id().await?;
    let address = args.contract.contract;
    let minter = match args.minter {
        Some(minter) => minter,
        None => voucher.recover_signer(&signing_domain(chain_id, address))?,
    };
    let redeemer = args
        .redeemer
        .unwrap_or_else(|| provider.default_signer_address());
    let value = args.value.unwrap_or(voucher.min_price);

    let contract = ILazyMint::new(address, &provider);
    let token_id = voucher.token_id;
    let digest = contract
        .voucherDigest(voucher.clone().into())
        .call()
        .await
        .map_err(revert_report)?;
    if digest != voucher.digest(&signing_domain(chain_id, address)) {
        return Err(eyre!(
            "contract at {address} computes a different voucher digest, check the contract and chain"
        )
        .into());
    }

    log::info!(
        "redeeming token {token_id} signed by {minter} for {redeemer}, paying {}",
        display_wei(value)
    );
    let receipt = contract
        .redeem(minter, redeemer, voucher.into())
        .value(value)
        .send()
        .await
        .map_err(revert_report)?
        .get_receipt()
        .await?;
    if !receipt.status() {
        return Err(eyre!("redeem transaction {} reverted", receipt.transaction_hash).into());
    }
    println!("redeem tx hash: {}", receipt.transaction_hash);

    for log in receipt.inner.logs() {
        if let Ok(transfer) = ILazyMint::VoucherTransfer::decode_log_data(log.data()) {
            println!(
                "VoucherTransfer {} -> {}: {} of token {}",
                transfer.from, transfer.to, transfer.amount, transfer.tokenId
            );
        }
    }

    let balance = contract
        .balanceOf(redeemer, token_id)
        .call()
        .await
        .map_err(revert_report)?;
    log::info!("{redeemer} now holds {balance} of token {token_id}");
    Ok(())
}
