// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Implementation of the ERC-1155 multi token standard
//!
//! The eponymous [`Erc1155`] type provides all the standard methods,
//! and is intended to be inherited by other contract types.
//!
//! You can configure the behavior of [`Erc1155`] via the [`Erc1155Params`] trait,
//! which allows specifying the collection name and symbol. Token URIs are either
//! set per token or derived from a base URI kept in storage.
//!
//! Note that this code is unaudited and not fit for production use.

use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::sol;
use core::{borrow::BorrowMut, marker::PhantomData};
use stylus_sdk::stylus_core::calls::Call;
use stylus_sdk::{abi::Bytes, prelude::*};

pub trait Erc1155Params {
    /// Immutable collection name.
    const NAME: &'static str;

    /// Immutable collection symbol.
    const SYMBOL: &'static str;
}

sol_storage! {
    /// Erc1155 implements all ERC-1155 methods
    pub struct Erc1155<T: Erc1155Params> {
        /// Token id to (account to balance) map
        mapping(uint256 => mapping(address => uint256)) balances;
        /// Account to operator map (the operator can move all tokens of the account)
        mapping(address => mapping(address => bool)) operator_approvals;
        /// Token id to minted supply
        mapping(uint256 => uint256) supply;
        /// Token id to metadata URI, empty when the base URI applies
        mapping(uint256 => string) token_uris;
        /// Prefix for token ids without their own URI
        string base_uri;
        /// Used to allow [`Erc1155Params`]
        PhantomData<T> phantom;
    }
}

// Declare events and Solidity error types
sol! {
    event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value);
    event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values);
    event ApprovalForAll(address indexed account, address indexed operator, bool approved);
    event URI(string value, uint256 indexed id);

    // The account does not hold enough of the token id
    #[derive(Debug)]
    error InsufficientBalance(address from, uint256 id, uint256 balance, uint256 needed);
    // The caller is neither the owner nor an approved operator of the owner
    #[derive(Debug)]
    error NotApproved(address owner, address operator);
    // Attempt to transfer token id to the Zero address
    #[derive(Debug)]
    error TransferToZero(uint256 id);
    // Ids and values (or accounts) arrays differ in length
    #[derive(Debug)]
    error LengthMismatch(uint256 ids_length, uint256 values_length);
    // The receiver address refused to receive the specified token id
    #[derive(Debug)]
    error ReceiverRefused(address receiver, uint256 id, bytes4 returned);
    // An account cannot be its own operator
    #[derive(Debug)]
    error SelfApproval(address owner);
}

/// Represents the ways methods may fail.
#[derive(SolidityError, Debug)]
pub enum Erc1155Error {
    InsufficientBalance(InsufficientBalance),
    NotApproved(NotApproved),
    TransferToZero(TransferToZero),
    LengthMismatch(LengthMismatch),
    ReceiverRefused(ReceiverRefused),
    SelfApproval(SelfApproval),
}

// External interfaces
sol_interface! {
    /// Allows calls to the receiver hooks of contracts implementing `IERC1155Receiver`.
    interface IERC1155Receiver {
        function onERC1155Received(address operator, address from, uint256 id, uint256 value, bytes data) external returns (bytes4);
        function onERC1155BatchReceived(address operator, address from, uint256[] ids, uint256[] values, bytes data) external returns (bytes4);
    }
}

/// Selector for `onERC1155Received`.
const ERC1155_RECEIVED_ID: u32 = 0xf23a6e61;

/// Selector for `onERC1155BatchReceived`.
const ERC1155_BATCH_RECEIVED_ID: u32 = 0xbc197c81;

// These methods aren't public, but are helpers used by public methods.
// Methods marked as "pub" here are usable outside of the erc1155 module (i.e. they're callable from lib.rs).
impl<T: Erc1155Params> Erc1155<T> {
    /// Requires that msg_sender may move the tokens of `owner`
    fn require_authorized(&self, owner: Address) -> Result<(), Erc1155Error> {
        let operator = self.vm().msg_sender();
        if operator == owner || self.operator_approvals.getter(owner).get(operator) {
            return Ok(());
        }
        Err(Erc1155Error::NotApproved(NotApproved { owner, operator }))
    }

    /// Moves balances without emitting events or calling receivers.
    /// A zero `from` mints; `to` must not be zero.
    fn update(
        &mut self,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
    ) -> Result<(), Erc1155Error> {
        if from.is_zero() {
            let supply = self.supply.get(id);
            self.supply.insert(id, supply + value);
        } else {
            let balance = self.balances.getter(id).get(from);
            if balance < value {
                return Err(Erc1155Error::InsufficientBalance(InsufficientBalance {
                    from,
                    id,
                    balance,
                    needed: value,
                }));
            }
            self.balances.setter(id).insert(from, balance - value);
        }

        let balance = self.balances.getter(id).get(to);
        self.balances.setter(id).insert(to, balance + value);
        Ok(())
    }

    /// Transfers `value` of `id` from `from` to `to` and emits `TransferSingle`.
    /// Ownership is checked against balances, but the caller's authorization is not,
    /// so this is usable for minting and voucher redemption.
    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
    ) -> Result<(), Erc1155Error> {
        self.update(from, to, id, value)?;
        let operator = self.vm().msg_sender();
        stylus_sdk::evm::log(
            self.vm(),
            TransferSingle {
                operator,
                from,
                to,
                id,
                value,
            },
        );
        Ok(())
    }

    /// Calls `onERC1155Received` on the `to` address if it is a contract.
    /// Otherwise it does nothing
    fn call_receiver<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
        data: Vec<u8>,
    ) -> Result<(), Erc1155Error> {
        if storage.borrow().vm().code_size(to) > 0 {
            let msg_sender = storage.borrow().vm().msg_sender();
            let context = Call::new_mutating(storage);
            let receiver = IERC1155Receiver::new(to);
            let received = receiver
                .on_erc_1155_received(
                    storage.borrow_mut().vm(),
                    context,
                    msg_sender,
                    from,
                    id,
                    value,
                    data.into(),
                )
                .map_err(|_e| {
                    Erc1155Error::ReceiverRefused(ReceiverRefused {
                        receiver: receiver.address,
                        id,
                        returned: FixedBytes(0_u32.to_be_bytes()),
                    })
                })?
                .0;

            if u32::from_be_bytes(received) != ERC1155_RECEIVED_ID {
                return Err(Erc1155Error::ReceiverRefused(ReceiverRefused {
                    receiver: receiver.address,
                    id,
                    returned: FixedBytes(received),
                }));
            }
        }
        Ok(())
    }

    /// Calls `onERC1155BatchReceived` on the `to` address if it is a contract.
    fn call_batch_receiver<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        ids: Vec<U256>,
        values: Vec<U256>,
        data: Vec<u8>,
    ) -> Result<(), Erc1155Error> {
        if storage.borrow().vm().code_size(to) > 0 {
            let id = ids.first().copied().unwrap_or_default();
            let msg_sender = storage.borrow().vm().msg_sender();
            let context = Call::new_mutating(storage);
            let receiver = IERC1155Receiver::new(to);
            let received = receiver
                .on_erc_1155_batch_received(
                    storage.borrow_mut().vm(),
                    context,
                    msg_sender,
                    from,
                    ids,
                    values,
                    data.into(),
                )
                .map_err(|_e| {
                    Erc1155Error::ReceiverRefused(ReceiverRefused {
                        receiver: receiver.address,
                        id,
                        returned: FixedBytes(0_u32.to_be_bytes()),
                    })
                })?
                .0;

            if u32::from_be_bytes(received) != ERC1155_BATCH_RECEIVED_ID {
                return Err(Erc1155Error::ReceiverRefused(ReceiverRefused {
                    receiver: receiver.address,
                    id,
                    returned: FixedBytes(received),
                }));
            }
        }
        Ok(())
    }

    /// Transfers and calls `onERC1155Received`
    pub fn safe_transfer<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
        data: Vec<u8>,
    ) -> Result<(), Erc1155Error> {
        if to.is_zero() {
            return Err(Erc1155Error::TransferToZero(TransferToZero { id }));
        }
        storage.borrow_mut().transfer(from, to, id, value)?;
        Self::call_receiver(storage, from, to, id, value, data)
    }

    /// Mints `value` of `id` to `to` without consulting receiver hooks
    pub fn mint(&mut self, to: Address, id: U256, value: U256) -> Result<(), Erc1155Error> {
        if to.is_zero() {
            return Err(Erc1155Error::TransferToZero(TransferToZero { id }));
        }
        self.transfer(Address::ZERO, to, id, value)
    }

    /// Stores the metadata URI of `id` and emits `URI`
    pub fn set_token_uri(&mut self, id: U256, uri: String) {
        self.token_uris.setter(id).set_str(&uri);
        stylus_sdk::evm::log(self.vm(), URI { value: uri, id });
    }

    /// Replaces the URI prefix used by tokens without their own URI
    pub fn set_base_uri(&mut self, base_uri: String) {
        self.base_uri.set_str(base_uri);
    }
}

// these methods are public to other contracts
#[public]
impl<T: Erc1155Params> Erc1155<T> {
    /// Immutable collection name.
    pub fn name() -> Result<String, Erc1155Error> {
        Ok(T::NAME.into())
    }

    /// Immutable collection symbol.
    pub fn symbol() -> Result<String, Erc1155Error> {
        Ok(T::SYMBOL.into())
    }

    /// The metadata URI of a token id, falling back to the base URI followed by the id.
    pub fn uri(&self, id: U256) -> Result<String, Erc1155Error> {
        let uri = self.token_uris.get(id).get_string();
        if !uri.is_empty() {
            return Ok(uri);
        }
        Ok(format!("{}{}", self.base_uri.get_string(), id))
    }

    /// Gets the amount of a token id held by an account.
    pub fn balance_of(&self, account: Address, id: U256) -> Result<U256, Erc1155Error> {
        Ok(self.balances.getter(id).get(account))
    }

    /// Gets balances for pairs of accounts and token ids.
    pub fn balance_of_batch(
        &self,
        accounts: Vec<Address>,
        ids: Vec<U256>,
    ) -> Result<Vec<U256>, Erc1155Error> {
        if accounts.len() != ids.len() {
            return Err(Erc1155Error::LengthMismatch(LengthMismatch {
                ids_length: U256::from(ids.len()),
                values_length: U256::from(accounts.len()),
            }));
        }
        Ok(accounts
            .into_iter()
            .zip(ids)
            .map(|(account, id)| self.balances.getter(id).get(account))
            .collect())
    }

    /// Total amount of a token id in circulation.
    pub fn total_supply(&self, id: U256) -> Result<U256, Erc1155Error> {
        Ok(self.supply.get(id))
    }

    /// Grants or revokes an operator's permission to move all of the sender's tokens.
    pub fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Erc1155Error> {
        let account = self.vm().msg_sender();
        if account == operator {
            return Err(Erc1155Error::SelfApproval(SelfApproval { owner: account }));
        }
        self.operator_approvals
            .setter(account)
            .insert(operator, approved);

        stylus_sdk::evm::log(
            self.vm(),
            ApprovalForAll {
                account,
                operator,
                approved,
            },
        );
        Ok(())
    }

    /// Determines if an operator may move all of an account's tokens.
    pub fn is_approved_for_all(
        &self,
        account: Address,
        operator: Address,
    ) -> Result<bool, Erc1155Error> {
        Ok(self.operator_approvals.getter(account).get(operator))
    }

    /// Transfers tokens, then checks the `to` address accepts them.
    pub fn safe_transfer_from<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
        data: Bytes,
    ) -> Result<(), Erc1155Error> {
        storage.borrow_mut().require_authorized(from)?;
        Self::safe_transfer(storage, from, to, id, value, data.0)
    }

    /// Transfers several token ids at once, then checks the `to` address accepts them.
    pub fn safe_batch_transfer_from<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        ids: Vec<U256>,
        values: Vec<U256>,
        data: Bytes,
    ) -> Result<(), Erc1155Error> {
        if ids.len() != values.len() {
            return Err(Erc1155Error::LengthMismatch(LengthMismatch {
                ids_length: U256::from(ids.len()),
                values_length: U256::from(values.len()),
            }));
        }
        if to.is_zero() {
            let id = ids.first().copied().unwrap_or_default();
            return Err(Erc1155Error::TransferToZero(TransferToZero { id }));
        }

        let this = storage.borrow_mut();
        this.require_authorized(from)?;
        for (id, value) in ids.iter().zip(values.iter()) {
            this.update(from, to, *id, *value)?;
        }
        let operator = this.vm().msg_sender();
        stylus_sdk::evm::log(
            this.vm(),
            TransferBatch {
                operator,
                from,
                to,
                ids: ids.clone(),
                values: values.clone(),
            },
        );

        Self::call_batch_receiver(storage, from, to, ids, values, data.0)
    }

    /// Whether the collection supports a given standard.
    pub fn supports_interface(interface: FixedBytes<4>) -> Result<bool, Erc1155Error> {
        let interface_id = u32::from_be_bytes(interface.0);

        if interface_id == 0xffffffff {
            // special cased in the ERC165 standard
            return Ok(false);
        }

        const IERC165: u32 = 0x01ffc9a7;
        const IERC1155: u32 = 0xd9b67a26;
        const IERC1155_METADATA_URI: u32 = 0x0e89341c;

        Ok(matches!(
            interface_id,
            IERC165 | IERC1155 | IERC1155_METADATA_URI
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestParams;
    impl Erc1155Params for TestParams {
        const NAME: &'static str = "Test";
        const SYMBOL: &'static str = "TST";
    }

    #[test]
    fn supports_erc1155_interfaces() {
        let check = |id: u32| Erc1155::<TestParams>::supports_interface(id.to_be_bytes().into());
        assert!(check(0x01ffc9a7).unwrap());
        assert!(check(0xd9b67a26).unwrap());
        assert!(check(0x0e89341c).unwrap());
        assert!(!check(0xffffffff).unwrap());
        assert!(!check(0x80ac58cd).unwrap());
    }

    #[test]
    fn name_and_symbol_come_from_params() {
        assert_eq!(Erc1155::<TestParams>::name().unwrap(), "Test");
        assert_eq!(Erc1155::<TestParams>::symbol().unwrap(), "TST");
    }
}
