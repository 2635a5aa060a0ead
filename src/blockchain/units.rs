//! Address validation and wei/ether conversion.

use alloy::primitives::{Address, U256};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Decimal places between wei and ether.
pub const ETHER_DECIMALS: usize = 18;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Number of hex digits in a rendered address.
const ADDRESS_HEX_LEN: usize = 40;

/// True if `candidate` is 40 hex digits, optionally `0x`/`0X`-prefixed.
///
/// Checksum casing is not verified.
pub fn is_valid_address(candidate: &str) -> bool {
    let digits = strip_hex_prefix(candidate);
    digits.len() == ADDRESS_HEX_LEN && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate and decode an address.
pub fn parse_address(candidate: &str) -> BlockchainResult<Address> {
    if !is_valid_address(candidate) {
        return Err(BlockchainError::InvalidAddress(candidate.to_string()));
    }
    strip_hex_prefix(candidate)
        .parse::<Address>()
        .map_err(|_| BlockchainError::InvalidAddress(candidate.to_string()))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Render a wei amount as a decimal ether string.
///
/// Integer arithmetic only; trailing fractional zeros are dropped, so
/// `10^18` renders as `"1"` and `1` as `"0.000000000000000001"`.
pub fn format_ether(wei: U256) -> String {
    let (whole, frac) = wei.div_rem(U256::from(WEI_PER_ETHER));
    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = ETHER_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
