// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// The default endpoint for connections to a Stylus-enabled Arbitrum node.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8547";

/// Minter authorized by the constructor when `--minter` is not given.
pub const DEFAULT_MINTER: &str = "0x56715d15149f12c474a73098610dec7078340447";

/// Base URI stored by the constructor when `--base-uri` is not given.
pub const DEFAULT_BASE_URI: &str = "ipfs:/";

/// Directory of the contract crate, relative to the workspace root.
pub const DEFAULT_CONTRACT_DIR: &str = "lazy-mint";

/// Name printed after a successful deployment.
pub const CONTRACT_NAME: &str = "Erc1155LazyMinting";
