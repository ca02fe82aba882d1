// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;

use crate::{
    common_args::{AuthArgs, ContractArgs, ProviderArgs},
    error::LazyMintCliResult,
};

mod role;
mod status;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Allow an account to sign vouchers. Admin only.
    #[command(visible_alias = "g")]
    Grant(RoleArgs),
    /// Stop honoring vouchers signed by an account. Admin only.
    Revoke(RoleArgs),
    /// Show whether an account may sign vouchers.
    #[command(visible_alias = "s")]
    Status(status::Args),
}

#[derive(Debug, clap::Args)]
pub struct RoleArgs {
    #[command(flatten)]
    contract: ContractArgs,
    /// Account to grant or revoke.
    #[arg(long)]
    account: Address,

    /// Admin wallet.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(cmd: Command) -> LazyMintCliResult {
    match cmd {
        Command::Grant(args) => role::exec(args, true).await,
        Command::Revoke(args) => role::exec(args, false).await,
        Command::Status(args) => status::exec(args).await,
    }
}
