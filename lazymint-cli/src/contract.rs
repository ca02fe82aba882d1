// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! RPC bindings for the deployed lazy minting contract.

use alloy::sol;
use eyre::eyre;

sol! {
    #[sol(rpc, all_derives)]
    interface ILazyMint {
        struct SignedVoucher {
            uint256 tokenId;
            uint256 amount;
            uint256 minPrice;
            string uri;
            bytes signature;
        }

        function redeem(address minter, address redeemer, SignedVoucher voucher) external payable returns (uint256);
        function voucherDigest(SignedVoucher voucher) external view returns (bytes32);
        function isRedeemed(uint256 token_id) external view returns (bool);
        function admin() external view returns (address);
        function isMinter(address account) external view returns (bool);
        function grantMinter(address account) external;
        function revokeMinter(address account) external;
        function availableToWithdraw(address account) external view returns (uint256);
        function withdraw() external returns (uint256);
        function balanceOf(address account, uint256 id) external view returns (uint256);

        event VoucherTransfer(address indexed from, address indexed to, uint256 indexed tokenId, uint256 amount, bytes signature);
        event Withdrawal(address indexed account, uint256 amount);

        error InvalidSignature();
        error SignerMismatch(address expected, address recovered);
        error UnauthorizedMinter(address signer);
        error InvalidAmount(uint256 token_id);
        error AlreadyRedeemed(uint256 token_id);
        error InsufficientPayment(uint256 required, uint256 paid);
        error NotAdmin(address sender);
        error NothingToWithdraw(address account);
        error WithdrawFailed(address account, uint256 amount);
        error TransferToZero(uint256 id);
    }
}

impl From<lazy_minter::SignedVoucher> for ILazyMint::SignedVoucher {
    fn from(voucher: lazy_minter::SignedVoucher) -> Self {
        Self {
            tokenId: voucher.token_id,
            amount: voucher.amount,
            minPrice: voucher.min_price,
            uri: voucher.uri,
            signature: voucher.signature,
        }
    }
}

/// Turns a contract call failure into a report naming the revert reason when known.
pub fn revert_report(err: alloy::contract::Error) -> eyre::Report {
    match err.as_decoded_interface_error::<ILazyMint::ILazyMintErrors>() {
        Some(reason) => eyre!("contract reverted: {reason:?}"),
        None => err.into(),
    }
}
