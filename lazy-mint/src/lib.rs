// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

// Modules and imports
pub mod erc1155;
pub mod voucher;

use crate::erc1155::{Erc1155, Erc1155Error, Erc1155Params};
use crate::voucher::{
    decode_recovered, ecrecover_calldata, signing_domain, SignedVoucher, ECRECOVER,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::sol;
use stylus_sdk::call::transfer::transfer_eth;
/// Import the Stylus SDK along with alloy primitive types for use in our program.
use stylus_sdk::prelude::*;

/// Initializes a custom, global allocator for Rust programs compiled to WASM.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: mini_alloc::MiniAlloc = mini_alloc::MiniAlloc::INIT;

/// Immutable definitions
pub struct LazyMintParams;
impl Erc1155Params for LazyMintParams {
    const NAME: &'static str = "ERC1155Lazyminting";
    const SYMBOL: &'static str = "LAZY";
}

// Define the entrypoint as a Solidity storage object. The sol_storage! macro
// will generate Rust-equivalent structs with all fields mapped to Solidity-equivalent
// storage slots and types.
sol_storage! {
    #[entrypoint]
    pub struct Erc1155LazyMinting {
        #[borrow] // Allows erc1155 to access Erc1155LazyMinting's storage and make calls
        Erc1155<LazyMintParams> erc1155;
        /// Account allowed to manage minters
        address admin;
        /// Accounts whose vouchers may be redeemed
        mapping(address => bool) minters;
        /// Token ids already minted through a voucher
        mapping(uint256 => bool) redeemed;
        /// Redemption payments owed to minters
        mapping(address => uint256) pending_withdrawals;
    }
}

sol! {
    /// Emitted twice per redemption: once for the mint to the minter, once for the
    /// hand-over to the redeemer.
    event VoucherTransfer(address indexed from, address indexed to, uint256 indexed tokenId, uint256 amount, bytes signature);
    event MinterGranted(address indexed account, address indexed sender);
    event MinterRevoked(address indexed account, address indexed sender);
    event Withdrawal(address indexed account, uint256 amount);

    #[derive(Debug)]
    error InvalidSignature();
    #[derive(Debug)]
    error SignerMismatch(address expected, address recovered);
    #[derive(Debug)]
    error UnauthorizedMinter(address signer);
    #[derive(Debug)]
    error InvalidAmount(uint256 token_id);
    #[derive(Debug)]
    error AlreadyRedeemed(uint256 token_id);
    #[derive(Debug)]
    error InsufficientPayment(uint256 required, uint256 paid);
    #[derive(Debug)]
    error NotAdmin(address sender);
    #[derive(Debug)]
    error NothingToWithdraw(address account);
    #[derive(Debug)]
    error WithdrawFailed(address account, uint256 amount);
}

/// Represents the ways redemption and administration may fail.
#[derive(SolidityError, Debug)]
pub enum LazyMintError {
    InvalidSignature(InvalidSignature),
    SignerMismatch(SignerMismatch),
    UnauthorizedMinter(UnauthorizedMinter),
    InvalidAmount(InvalidAmount),
    AlreadyRedeemed(AlreadyRedeemed),
    InsufficientPayment(InsufficientPayment),
    NotAdmin(NotAdmin),
    NothingToWithdraw(NothingToWithdraw),
    WithdrawFailed(WithdrawFailed),
    InsufficientBalance(erc1155::InsufficientBalance),
    NotApproved(erc1155::NotApproved),
    TransferToZero(erc1155::TransferToZero),
    LengthMismatch(erc1155::LengthMismatch),
    ReceiverRefused(erc1155::ReceiverRefused),
    SelfApproval(erc1155::SelfApproval),
}

impl From<Erc1155Error> for LazyMintError {
    fn from(err: Erc1155Error) -> Self {
        match err {
            Erc1155Error::InsufficientBalance(e) => Self::InsufficientBalance(e),
            Erc1155Error::NotApproved(e) => Self::NotApproved(e),
            Erc1155Error::TransferToZero(e) => Self::TransferToZero(e),
            Erc1155Error::LengthMismatch(e) => Self::LengthMismatch(e),
            Erc1155Error::ReceiverRefused(e) => Self::ReceiverRefused(e),
            Erc1155Error::SelfApproval(e) => Self::SelfApproval(e),
        }
    }
}

impl Erc1155LazyMinting {
    fn only_admin(&self) -> Result<(), LazyMintError> {
        let sender = self.vm().msg_sender();
        if self.admin.get() != sender {
            return Err(LazyMintError::NotAdmin(NotAdmin { sender }));
        }
        Ok(())
    }

    fn set_minter(&mut self, account: Address, enabled: bool) {
        self.minters.insert(account, enabled);
        let sender = self.vm().msg_sender();
        if enabled {
            stylus_sdk::evm::log(self.vm(), MinterGranted { account, sender });
        } else {
            stylus_sdk::evm::log(self.vm(), MinterRevoked { account, sender });
        }
    }
}

#[public]
#[inherit(Erc1155<LazyMintParams>)]
impl Erc1155LazyMinting {
    /// Makes the deploying EOA the admin and authorizes `minter` to sign vouchers.
    #[constructor]
    pub fn constructor(&mut self, minter: Address, base_uri: String) {
        // Use tx_origin instead of msg_sender because we use a factory contract in deployment.
        let admin = self.vm().tx_origin();
        self.admin.set(admin);
        self.erc1155.set_base_uri(base_uri);
        self.set_minter(minter, true);
    }

    /// The EIP-712 digest a minter signs for `voucher` on this contract.
    pub fn voucher_digest(&self, voucher: SignedVoucher) -> B256 {
        let domain = signing_domain(self.vm().chain_id(), self.vm().contract_address());
        voucher.digest(&domain)
    }

    /// Recovers the account that signed `voucher` for this contract.
    pub fn recover_signer(&self, voucher: SignedVoucher) -> Result<Address, LazyMintError> {
        let digest = self.voucher_digest(voucher.clone());
        let calldata = ecrecover_calldata(digest, &voucher.signature)
            .ok_or(LazyMintError::InvalidSignature(InvalidSignature {}))?;
        let output = static_call(self.vm(), Call::new(), ECRECOVER, &calldata)
            .map_err(|_| LazyMintError::InvalidSignature(InvalidSignature {}))?;
        decode_recovered(&output).ok_or(LazyMintError::InvalidSignature(InvalidSignature {}))
    }

    /// Mints the voucher's tokens to `minter` and hands them to `redeemer`.
    ///
    /// The voucher must be signed by `minter`, who must hold the minter role, and
    /// the call must carry at least `minPrice` wei. Each token id is redeemable once.
    #[payable]
    pub fn redeem(
        &mut self,
        minter: Address,
        redeemer: Address,
        voucher: SignedVoucher,
    ) -> Result<U256, LazyMintError> {
        let recovered = self.recover_signer(voucher.clone())?;
        if recovered != minter {
            return Err(LazyMintError::SignerMismatch(SignerMismatch {
                expected: minter,
                recovered,
            }));
        }
        if !self.minters.get(minter) {
            return Err(LazyMintError::UnauthorizedMinter(UnauthorizedMinter {
                signer: minter,
            }));
        }

        let token_id = voucher.tokenId;
        if voucher.amount.is_zero() {
            return Err(LazyMintError::InvalidAmount(InvalidAmount { token_id }));
        }
        if self.redeemed.get(token_id) {
            return Err(LazyMintError::AlreadyRedeemed(AlreadyRedeemed { token_id }));
        }
        let paid = self.vm().msg_value();
        if paid < voucher.minPrice {
            return Err(LazyMintError::InsufficientPayment(InsufficientPayment {
                required: voucher.minPrice,
                paid,
            }));
        }
        if redeemer.is_zero() {
            return Err(LazyMintError::TransferToZero(erc1155::TransferToZero {
                id: token_id,
            }));
        }

        self.redeemed.insert(token_id, true);
        if !voucher.uri.is_empty() {
            self.erc1155.set_token_uri(token_id, voucher.uri.clone());
        }

        let amount = voucher.amount;
        let signature: Bytes = voucher.signature;

        // first assign the token to the signer, to establish provenance on-chain
        self.erc1155.mint(minter, token_id, amount)?;
        stylus_sdk::evm::log(
            self.vm(),
            VoucherTransfer {
                from: Address::ZERO,
                to: minter,
                tokenId: token_id,
                amount,
                signature: signature.clone(),
            },
        );

        // record payment before handing control to the redeemer's receiver hook
        let pending = self.pending_withdrawals.get(minter);
        self.pending_withdrawals.insert(minter, pending + paid);

        Erc1155::<LazyMintParams>::safe_transfer(
            self,
            minter,
            redeemer,
            token_id,
            amount,
            Vec::new(),
        )?;
        stylus_sdk::evm::log(
            self.vm(),
            VoucherTransfer {
                from: minter,
                to: redeemer,
                tokenId: token_id,
                amount,
                signature,
            },
        );

        Ok(token_id)
    }

    /// Whether a voucher for `token_id` has been redeemed.
    pub fn is_redeemed(&self, token_id: U256) -> bool {
        self.redeemed.get(token_id)
    }

    pub fn admin(&self) -> Address {
        self.admin.get()
    }

    pub fn is_minter(&self, account: Address) -> bool {
        self.minters.get(account)
    }

    /// Authorizes `account` to sign vouchers. Only the admin may call this.
    pub fn grant_minter(&mut self, account: Address) -> Result<(), LazyMintError> {
        self.only_admin()?;
        self.set_minter(account, true);
        Ok(())
    }

    /// Stops honoring vouchers signed by `account`. Only the admin may call this.
    pub fn revoke_minter(&mut self, account: Address) -> Result<(), LazyMintError> {
        self.only_admin()?;
        self.set_minter(account, false);
        Ok(())
    }

    pub fn set_base_uri(&mut self, base_uri: String) -> Result<(), LazyMintError> {
        self.only_admin()?;
        self.erc1155.set_base_uri(base_uri);
        Ok(())
    }

    /// Payments collected for `account` and not yet withdrawn.
    pub fn available_to_withdraw(&self, account: Address) -> U256 {
        self.pending_withdrawals.get(account)
    }

    /// Sends the sender's collected payments to the sender.
    pub fn withdraw(&mut self) -> Result<U256, LazyMintError> {
        let account = self.vm().msg_sender();
        let amount = self.pending_withdrawals.get(account);
        if amount.is_zero() {
            return Err(LazyMintError::NothingToWithdraw(NothingToWithdraw { account }));
        }
        // zero the balance before sending to prevent re-entrancy attacks
        self.pending_withdrawals.insert(account, U256::ZERO);
        transfer_eth(self.vm(), account, amount)
            .map_err(|_| LazyMintError::WithdrawFailed(WithdrawFailed { account, amount }))?;
        stylus_sdk::evm::log(self.vm(), Withdrawal { account, amount });
        Ok(amount)
    }
}
