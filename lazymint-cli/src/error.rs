// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

pub type LazyMintCliResult = Result<(), LazyMintCliError>;

#[derive(Debug)]
pub struct LazyMintCliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl LazyMintCliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for LazyMintCliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<eyre::Error> for LazyMintCliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

macro_rules! failure_from {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for LazyMintCliError {
                fn from(err: $err) -> Self {
                    Self {
                        error: err.into(),
                        exit_code: ExitCode::FAILURE,
                    }
                }
            }
        )*
    };
}

failure_from!(
    std::io::Error,
    lazy_minter::VoucherError,
    alloy::contract::Error,
    alloy::providers::PendingTransactionError,
    alloy::transports::TransportError,
);
