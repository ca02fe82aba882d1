// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use alloy::primitives::{utils::format_ether, U256};

use style::{BOLD, ERROR, GREY};

mod style;

pub fn decode0x(text: impl AsRef<str>) -> eyre::Result<Vec<u8>> {
    let text = text.as_ref();
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    Ok(hex::decode(text)?)
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}

/// Renders a wei amount as `<ether> ETH (<wei> wei)`.
pub fn display_wei(wei: U256) -> String {
    format!("{} ETH {GREY}({wei} wei){GREY:#}", format_ether(wei))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode0x_accepts_prefix_and_whitespace() {
        assert_eq!(decode0x("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode0x("beef\n").unwrap(), vec![0xbe, 0xef]);
        assert_eq!(decode0x("  0x00ff  ").unwrap(), vec![0x00, 0xff]);
        assert!(decode0x("").unwrap().is_empty());
    }

    #[test]
    fn decode0x_rejects_non_hex() {
        assert!(decode0x("0xzz").is_err());
        assert!(decode0x("abc").is_err());
    }

    #[test]
    fn display_wei_shows_both_units() {
        let shown = display_wei(U256::from(1_500_000_000_000_000_000u128));
        assert!(shown.contains("1.5"));
        assert!(shown.contains("1500000000000000000 wei"));
    }
}
