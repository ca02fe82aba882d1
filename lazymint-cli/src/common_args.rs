// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::{Address, FixedBytes},
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::local::{LocalSigner, PrivateKeySigner},
};
use eyre::{bail, eyre, Context};

use crate::{constants::DEFAULT_ENDPOINT, utils::decode0x};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<PathBuf>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    /// Loads the local signer from whichever wallet source was given.
    pub fn signer(&self) -> eyre::Result<PrivateKeySigner> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                bail!("empty private key");
            }
            return signer_from_hex(key);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return signer_from_hex(&key);
        }

        let keystore = self.keystore_path.as_ref().ok_or(eyre!(
            "no wallet given: pass --private-key, --private-key-path or --keystore-path"
        ))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))
            .wrap_err("could not read keystore password file")?;
        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())
            .wrap_err("could not decrypt keystore")?;
        Ok(signer)
    }

    /// The same wallet source as `cargo stylus` flags.
    pub fn forward_args(&self) -> eyre::Result<Vec<String>> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                bail!("empty private key");
            }
            return Ok(vec!["--private-key".to_owned(), key.to_owned()]);
        }
        if let Some(file) = &self.private_key_path {
            return Ok(vec![
                "--private-key-path".to_owned(),
                file.display().to_string(),
            ]);
        }
        let keystore = self.keystore_path.as_ref().ok_or(eyre!(
            "no wallet given: pass --private-key, --private-key-path or --keystore-path"
        ))?;
        let mut args = vec!["--keystore-path".to_owned(), keystore.display().to_string()];
        if let Some(password) = &self.keystore_password_path {
            args.push("--keystore-password-path".to_owned());
            args.push(password.display().to_string());
        }
        Ok(args)
    }
}

fn signer_from_hex(key: &str) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key).wrap_err("private key is not hex")?;
    if bytes.len() != 32 {
        bail!("private key must be 32 bytes, got {}", bytes.len());
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    Ok(PrivateKeySigner::from_bytes(&priv_key_bytes)?)
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Arbitrum RPC endpoint
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl ProviderArgs {
    pub async fn build_provider(&self) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&self.endpoint).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let wallet = EthereumWallet::new(auth.signer()?);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&self.endpoint)
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct ContractArgs {
    /// Address of the deployed lazy minting contract
    #[arg(long)]
    pub contract: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";

    fn auth(private_key: Option<&str>) -> AuthArgs {
        AuthArgs {
            private_key_path: None,
            private_key: private_key.map(str::to_owned),
            keystore_path: None,
            keystore_password_path: None,
        }
    }

    #[test]
    fn signer_from_private_key() {
        let signer = auth(Some(KEY)).signer().unwrap();
        assert_eq!(
            signer.address(),
            "0x3f1Eae7D46d88F08fc2F8ed27FCb2AB183EB2d0E"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn missing_wallet_is_an_error() {
        let err = auth(None).signer().unwrap_err();
        assert!(err.to_string().contains("no wallet given"));
        assert!(auth(None).forward_args().is_err());
        assert!(auth(Some("")).signer().is_err());
        assert!(auth(Some("0x1234")).signer().is_err());
    }

    #[test]
    fn private_key_is_forwarded() {
        assert_eq!(
            auth(Some(KEY)).forward_args().unwrap(),
            vec!["--private-key".to_owned(), KEY.to_owned()]
        );
    }
}
