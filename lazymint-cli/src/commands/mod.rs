// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::LazyMintCliResult;

mod deploy;
mod minter;
mod redeem;
mod voucher;
mod withdraw;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Deploy the lazy minting contract through cargo stylus
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Sign a voucher off-chain and write it as JSON
    #[clap(visible_alias = "v")]
    Voucher(voucher::Args),
    /// Redeem a signed voucher, minting its tokens to the redeemer
    #[clap(visible_alias = "r")]
    Redeem(redeem::Args),
    /// Withdraw the redemption payments collected by the wallet
    #[clap(visible_alias = "w")]
    Withdraw(withdraw::Args),
    /// Manage the accounts allowed to sign vouchers
    #[command(subcommand)]
    Minter(minter::Command),
}

pub async fn exec(cmd: Command) -> LazyMintCliResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args),
        Command::Voucher(args) => voucher::exec(args).await,
        Command::Redeem(args) => redeem::exec(args).await,
        Command::Withdraw(args) => withdraw::exec(args).await,
        Command::Minter(command) => minter::exec(command).await,
    }
}
