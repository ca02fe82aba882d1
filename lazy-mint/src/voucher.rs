// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Signed vouchers and their EIP-712 digest.
//!
//! A voucher authorizes whoever holds it to redeem `amount` of `tokenId` for at least
//! `minPrice` wei. The minter signs the EIP-712 hash of the [`NFTVoucher`] body under the
//! `LazyNFT-Voucher` domain, which binds the signature to one chain and one contract.
//! Signatures are recovered through the `ecrecover` precompile.

use alloc::{borrow::Cow, vec::Vec};
use alloy_primitives::{address, Address, FixedBytes, B256, U256};
use alloy_sol_types::{
    sol,
    sol_data::{Address as SOLAddress, FixedBytes as SolFixedBytes, Uint},
    Eip712Domain, SolStruct, SolType,
};
use stylus_sdk::prelude::*;

/// EIP-712 domain name shared with the off-chain signer.
pub const SIGNING_DOMAIN: &str = "LazyNFT-Voucher";

/// EIP-712 domain version shared with the off-chain signer.
pub const SIGNATURE_VERSION: &str = "1";

/// The `ecrecover` precompile.
pub const ECRECOVER: Address = address!("0000000000000000000000000000000000000001");

type ECRECOVERType = (
    SolFixedBytes<32>,
    Uint<8>,
    SolFixedBytes<32>,
    SolFixedBytes<32>,
);

sol! {
    /// The signed part of a voucher.
    #[derive(Debug)]
    struct NFTVoucher {
        uint256 tokenId;
        uint256 amount;
        uint256 minPrice;
        string uri;
    }

    /// A voucher together with the minter's signature, as passed to `redeem`.
    #[derive(Debug, AbiType)]
    struct SignedVoucher {
        uint256 tokenId;
        uint256 amount;
        uint256 minPrice;
        string uri;
        bytes signature;
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

impl SignedVoucher {
    /// The fields covered by the signature.
    pub fn body(&self) -> NFTVoucher {
        NFTVoucher {
            tokenId: self.tokenId,
            amount: self.amount,
            minPrice: self.minPrice,
            uri: self.uri.clone(),
        }
    }

    /// `keccak256(0x1901 || domainSeparator || hashStruct(voucher))`
    pub fn digest(&self, domain: &Eip712Domain) -> B256 {
        self.body().eip712_signing_hash(domain)
    }
}

/// Splits a 65 byte `r || s || v` signature, normalizing `v` to 27 or 28.
pub fn split_signature(signature: &[u8]) -> Option<(FixedBytes<32>, FixedBytes<32>, u8)> {
    if signature.len() != 65 {
        return None;
    }
    let r = FixedBytes::from_slice(&signature[0..32]);
    let s = FixedBytes::from_slice(&signature[32..64]);
    let v = match signature[64] {
        v @ (0 | 1) => v + 27,
        v => v,
    };
    Some((r, s, v))
}

/// Calldata for the `ecrecover` precompile, or `None` if the signature is malformed.
pub fn ecrecover_calldata(digest: B256, signature: &[u8]) -> Option<Vec<u8>> {
    let (r, s, v) = split_signature(signature)?;
    Some(ECRECOVERType::abi_encode(&(digest, v, r, s)))
}

/// Decodes the precompile output. An empty or zero result means recovery failed.
pub fn decode_recovered(output: &[u8]) -> Option<Address> {
    match SOLAddress::abi_decode(output) {
        Ok(signer) if !signer.is_zero() => Some(signer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn voucher(signature: Vec<u8>) -> SignedVoucher {
        SignedVoucher {
            tokenId: U256::from(1),
            amount: U256::from(1000),
            minPrice: U256::ZERO,
            uri: "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".into(),
            signature: signature.into(),
        }
    }

    #[test]
    fn split_signature_normalizes_v() {
        let mut sig = vec![0xaa; 32];
        sig.extend_from_slice(&[0xbb; 32]);
        sig.push(1);
        let (r, s, v) = split_signature(&sig).unwrap();
        assert_eq!(r, FixedBytes::from([0xaa; 32]));
        assert_eq!(s, FixedBytes::from([0xbb; 32]));
        assert_eq!(v, 28);

        sig[64] = 27;
        assert_eq!(split_signature(&sig).unwrap().2, 27);
    }

    #[test]
    fn malformed_signatures_are_rejected() {
        assert!(split_signature(&[0u8; 64]).is_none());
        assert!(ecrecover_calldata(B256::ZERO, &[0u8; 66]).is_none());
        assert!(decode_recovered(&[]).is_none());
        assert!(decode_recovered(&[0u8; 32]).is_none());
    }

    #[test]
    fn digest_is_bound_to_domain() {
        let voucher = voucher(vec![]);
        let a = Address::from([0x0a; 20]);
        let b = Address::from([0x0b; 20]);
        assert_eq!(
            voucher.digest(&signing_domain(42161, a)),
            voucher.digest(&signing_domain(42161, a))
        );
        assert_ne!(
            voucher.digest(&signing_domain(42161, a)),
            voucher.digest(&signing_domain(42161, b))
        );
        assert_ne!(
            voucher.digest(&signing_domain(42161, a)),
            voucher.digest(&signing_domain(1, a))
        );
    }

    #[test]
    fn signature_is_not_part_of_digest() {
        let domain = signing_domain(1, Address::ZERO);
        assert_eq!(
            voucher(vec![1, 2, 3]).digest(&domain),
            voucher(vec![4, 5, 6]).digest(&domain)
        );
    }
}
