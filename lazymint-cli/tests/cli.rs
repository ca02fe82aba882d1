// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fs;

use alloy::{
    primitives::{address, Address, U256},
    signers::local::PrivateKeySigner,
};
use assert_cmd::Command;
use lazy_minter::{signing_domain, SignedVoucher};

const KEY: &str = "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";
const CONTRACT: Address = address!("0x525c2aba45f66987217323e8a05ea400c65d06dc");

fn lazymint() -> Command {
    Command::cargo_bin("lazymint").unwrap()
}

#[test]
fn deploy_without_wallet_fails() {
    let output = lazymint()
        .args(["deploy", "--endpoint", "http://127.0.0.1:1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "stderr: {stderr}");
    assert!(stderr.contains("no wallet given"), "stderr: {stderr}");
}

#[test]
fn voucher_with_chain_id_signs_offline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voucher.json");
    lazymint()
        .args([
            "voucher",
            "--contract",
            &CONTRACT.to_string(),
            "--chain-id",
            "412346",
            "--token-id",
            "1",
            "--amount",
            "1000",
            "--min-price",
            "0.5",
            "--uri",
            "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "--private-key",
            KEY,
            "--endpoint",
            "http://127.0.0.1:1",
            "--output",
        ])
        .arg(&path)
        .assert()
        .success();

    let voucher = SignedVoucher::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(voucher.token_id, U256::from(1));
    assert_eq!(voucher.amount, U256::from(1000));
    assert_eq!(voucher.min_price, U256::from(500_000_000_000_000_000u128));

    let signer: PrivateKeySigner = KEY.parse().unwrap();
    let recovered = voucher
        .recover_signer(&signing_domain(412346, CONTRACT))
        .unwrap();
    assert_eq!(recovered, signer.address());
}

#[test]
fn zero_amount_voucher_fails() {
    let output = lazymint()
        .args([
            "voucher",
            "--contract",
            &CONTRACT.to_string(),
            "--chain-id",
            "1",
            "--token-id",
            "7",
            "--amount",
            "0",
            "--uri",
            "ipfs://x",
            "--private-key",
            KEY,
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("zero amount"));
}

#[test]
fn redeem_with_missing_voucher_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    lazymint()
        .args(["redeem", "--contract", &CONTRACT.to_string(), "--private-key", KEY])
        .arg("--voucher")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .code(1);
}
