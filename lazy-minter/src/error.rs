// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = VoucherError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum VoucherError {
    #[error("failed to sign voucher: {0}")]
    Signer(#[from] alloy::signers::Error),
    #[error("invalid voucher signature: {0}")]
    Signature(#[from] alloy::primitives::SignatureError),
    #[error("voucher for token {0} has a zero amount")]
    ZeroAmount(alloy::primitives::U256),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
