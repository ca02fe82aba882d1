// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Off-chain signer for lazy minting vouchers.
//!
//! A [`LazyMinter`] wraps the minter's key and the address of a deployed lazy minting
//! contract. Vouchers it creates cost no gas: they are EIP-712 signatures over
//! `NFTVoucher(uint256 tokenId,uint256 amount,uint256 minPrice,string uri)` under the
//! `LazyNFT-Voucher` domain, bound to one chain id and one contract address. The redeemer
//! later submits the [`SignedVoucher`] to the contract's `redeem` method.
//!
//! ```no_run
//! # async fn example() -> lazy_minter::Result<()> {
//! use alloy::{primitives::{address, U256}, signers::local::PrivateKeySigner};
//! use lazy_minter::LazyMinter;
//!
//! let contract = address!("0x56715d15149f12c474a73098610dec7078340447");
//! let minter = LazyMinter::new(contract, 412346, PrivateKeySigner::random());
//! let voucher = minter
//!     .create_voucher(U256::from(1), U256::from(1000), "ipfs://bafy...")
//!     .await?;
//! assert_eq!(voucher.recover_signer(&minter.domain())?, minter.address());
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use alloy::{
    primitives::{Address, Bytes, Signature, B256, U256},
    signers::Signer,
    sol,
    sol_types::{Eip712Domain, SolStruct},
};
use serde::{Deserialize, Serialize};

pub use error::{Result, VoucherError};

mod error;

/// EIP-712 domain name checked by the contract.
pub const SIGNING_DOMAIN: &str = "LazyNFT-Voucher";

/// EIP-712 domain version checked by the contract.
pub const SIGNATURE_VERSION: &str = "1";

sol! {
    /// The signed part of a voucher.
    #[derive(Debug, PartialEq, Eq)]
    struct NFTVoucher {
        uint256 tokenId;
        uint256 amount;
        uint256 minPrice;
        string uri;
    }
}

/// The EIP-712 domain of the contract at `verifying_contract` on `chain_id`.
pub fn signing_domain(chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(SIGNING_DOMAIN)),
        Some(Cow::Borrowed(SIGNATURE_VERSION)),
        Some(U256::from(chain_id)),
        Some(verifying_contract),
        None,
    )
}

/// A voucher and the minter's signature over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedVoucher {
    pub token_id: U256,
    pub amount: U256,
    pub min_price: U256,
    pub uri: String,
    pub signature: Bytes,
}

impl SignedVoucher {
    /// The fields covered by the signature.
    pub fn body(&self) -> NFTVoucher {
        NFTVoucher {
            tokenId: self.token_id,
            amount: self.amount,
            minPrice: self.min_price,
            uri: self.uri.clone(),
        }
    }

    /// The EIP-712 digest the minter signs under `domain`.
    pub fn digest(&self, domain: &Eip712Domain) -> B256 {
        self.body().eip712_signing_hash(domain)
    }

    /// Recovers the signer the contract at `domain` would see.
    pub fn recover_signer(&self, domain: &Eip712Domain) -> Result<Address> {
        let signature = Signature::try_from(self.signature.as_ref())?;
        Ok(signature.recover_address_from_prehash(&self.digest(domain))?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Creates vouchers signed by `signer` for one deployed contract.
#[derive(Debug, Clone)]
pub struct LazyMinter<S> {
    contract_address: Address,
    chain_id: u64,
    signer: S,
}

impl<S: Signer + Send + Sync> LazyMinter<S> {
    pub fn new(contract_address: Address, chain_id: u64, signer: S) -> Self {
        Self {
            contract_address,
            chain_id,
            signer,
        }
    }

    /// The account vouchers will recover to.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn domain(&self) -> Eip712Domain {
        signing_domain(self.chain_id, self.contract_address)
    }

    /// Creates a free voucher for `amount` of `token_id`.
    pub async fn create_voucher(
        &self,
        token_id: U256,
        amount: U256,
        uri: impl Into<String>,
    ) -> Result<SignedVoucher> {
        self.create_voucher_with_price(token_id, amount, U256::ZERO, uri)
            .await
    }

    /// Creates a voucher that must be redeemed with at least `min_price` wei.
    pub async fn create_voucher_with_price(
        &self,
        token_id: U256,
        amount: U256,
        min_price: U256,
        uri: impl Into<String>,
    ) -> Result<SignedVoucher> {
        if amount.is_zero() {
            return Err(VoucherError::ZeroAmount(token_id));
        }
        let mut voucher = SignedVoucher {
            token_id,
            amount,
            min_price,
            uri: uri.into(),
            signature: Bytes::new(),
        };
        let digest = voucher.digest(&self.domain());
        let signature = self.signer.sign_hash(&digest).await?;
        voucher.signature = Bytes::from(signature.as_bytes().to_vec());
        Ok(voucher)
    }
}
