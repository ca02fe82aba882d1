// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, process::Command, sync::LazyLock};

use alloy::primitives::{Address, TxHash};
use eyre::{bail, eyre, Result, WrapErr};
use regex::Regex;
use typed_builder::TypedBuilder;

static GAS_ESTIMATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"wasm data fee: (\d+\.\d+) ETH \(originally (\d+\.\d+) ETH with 20% bump\)")
        .expect("valid gas estimate pattern")
});

static ANSI_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[ABCDHJKSTfGmsu]").expect("valid color pattern")
});

/// Deploys the lazy minting contract by driving `cargo stylus deploy`.
///
/// `cargo stylus` builds, checks, deploys and activates the wasm. The constructor is
/// invoked through the Stylus deployer contract with `constructor_args`.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct Deployer {
    #[builder(!default)]
    endpoint: String,

    /// Contract crate to deploy; the current directory if unset.
    dir: Option<PathBuf>,

    /// Wallet flags forwarded to `cargo stylus`.
    #[builder(!default)]
    auth: Vec<String>,

    no_verify: bool,

    constructor_args: Vec<String>,
}

/// What `cargo stylus deploy` reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub data_fee: Option<f64>,
}

impl Deployer {
    /// Estimates the wasm data fee in ETH without sending a transaction.
    pub fn estimate_gas(&self) -> Result<f64> {
        let mut args = vec!["--estimate-gas".to_owned()];
        args.extend(self.deploy_args());
        let out = self.call("deploy", args)?;
        extract_gas_estimate(&out).ok_or(eyre!("failed to extract gas estimate"))
    }

    pub fn deploy(&self) -> Result<Deployment> {
        let out = self.call("deploy", self.deploy_args())?;
        extract_deployment(&out)
    }

    fn deploy_args(&self) -> Vec<String> {
        let mut args = vec!["-e".to_owned(), self.endpoint.to_owned()];
        if self.no_verify {
            args.push("--no-verify".to_owned());
        }
        args.extend(self.auth.iter().cloned());
        if !self.constructor_args.is_empty() {
            // Must add the args at the end
            args.push("--constructor-args".to_owned());
            args.extend(self.constructor_args.iter().cloned());
        }
        args
    }

    fn call(&self, func: &str, args: Vec<String>) -> Result<String> {
        let mut command = Command::new("cargo");
        command.arg("stylus").arg(func).args(&args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        log::debug!("running cargo stylus {func} in {:?}", self.dir);
        let output = command
            .output()
            .wrap_err(format!("failed to run cargo stylus {func}"))?;
        if !output.status.success() {
            let err = String::from_utf8(output.stderr)
                .map(strip_color)
                .unwrap_or("failed to decode error".to_owned());
            bail!("cargo stylus {func} failed: {}", err.trim());
        }
        String::from_utf8(output.stdout)
            .map(strip_color)
            .wrap_err("failed to decode stdout")
    }
}

fn extract_deployment(s: &str) -> Result<Deployment> {
    let mut address = None;
    let mut tx_hash = None;
    let mut data_fee = None;
    for line in s.lines() {
        if let Some((_, rest)) = line.split_once("deployed code at address: ") {
            address = Some(rest.trim());
        } else if let Some((_, rest)) = line.split_once("deployment tx hash: ") {
            tx_hash = Some(rest.trim());
        } else if let Some(fee) = parse_gas_estimate(line) {
            data_fee = Some(fee);
        }
    }
    let (Some(address), Some(tx_hash)) = (address, tx_hash) else {
        bail!("failed to extract deployed address and tx hash");
    };
    Ok(Deployment {
        address: address
            .parse()
            .wrap_err("failed to parse deployment address")?,
        tx_hash: tx_hash
            .parse()
            .wrap_err("failed to parse deployment tx hash")?,
        data_fee,
    })
}

fn extract_gas_estimate(s: &str) -> Option<f64> {
    s.lines().find_map(parse_gas_estimate)
}

fn parse_gas_estimate(s: &str) -> Option<f64> {
    let caps = GAS_ESTIMATE.captures(s)?;
    caps.get(2)?.as_str().parse().ok()
}

fn strip_color(s: impl Into<String>) -> String {
    ANSI_COLOR.replace_all(s.into().as_str(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const DEPLOY_OUTPUT: &str = "\
stripped custom section from user wasm to remove any sensitive data
contract size: 19.8 KiB (20302 bytes)
wasm data fee: 0.000122 ETH (originally 0.000102 ETH with 20% bump)
deployed code at address: 0x525c2aba45f66987217323e8a05ea400c65d06dc
deployment tx hash: 0x3bc5d2bc8e3b1bc6ba49dbc41fef4e1a6b0a2d1ff1e77e3a3f0d5e9b8f5e1a24
contract activated and ready onchain with tx hash: 0x1d8ae97e245e1db21dd188e5b64ad9025c1fb4e5f82a8d38f8c34a0c0e5f4e7b
";

    #[test]
    fn parses_deploy_output() {
        let deployment = extract_deployment(DEPLOY_OUTPUT).unwrap();
        assert_eq!(
            deployment.address,
            address!("0x525c2aba45f66987217323e8a05ea400c65d06dc")
        );
        assert_eq!(
            deployment.tx_hash.to_string(),
            "0x3bc5d2bc8e3b1bc6ba49dbc41fef4e1a6b0a2d1ff1e77e3a3f0d5e9b8f5e1a24"
        );
        assert_eq!(deployment.data_fee, Some(0.000102));
    }

    #[test]
    fn missing_address_is_an_error() {
        let err = extract_deployment("deployment tx hash: 0x00\n").unwrap_err();
        assert!(err.to_string().contains("failed to extract"));
    }

    #[test]
    fn strips_colors() {
        let colored = "\x1b[1;32mdeployed code at address: \x1b[0m0x525c2aba45f66987217323e8a05ea400c65d06dc";
        assert_eq!(
            strip_color(colored),
            "deployed code at address: 0x525c2aba45f66987217323e8a05ea400c65d06dc"
        );
    }

    #[test]
    fn estimate_uses_unbumped_fee() {
        assert_eq!(extract_gas_estimate(DEPLOY_OUTPUT), Some(0.000102));
        assert_eq!(extract_gas_estimate("nothing here"), None);
    }

    #[test]
    fn constructor_args_come_last() {
        let deployer = Deployer::builder()
            .endpoint("http://localhost:8547")
            .auth(vec!["--private-key".to_owned(), "0x01".to_owned()])
            .no_verify(true)
            .constructor_args(vec![
                "0x56715d15149f12c474a73098610dec7078340447".to_owned(),
                "ipfs:/".to_owned(),
            ])
            .build();
        assert_eq!(
            deployer.deploy_args(),
            vec![
                "-e",
                "http://localhost:8547",
                "--no-verify",
                "--private-key",
                "0x01",
                "--constructor-args",
                "0x56715d15149f12c474a73098610dec7078340447",
                "ipfs:/",
            ]
        );
    }
}
