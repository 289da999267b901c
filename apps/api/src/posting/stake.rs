//! Stake amounts: decimal ETH strings to wei.

use thiserror::Error;

/// Wei per ether.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const ETHER_DECIMALS: usize = 18;
/// Smallest stake the posting form accepts (0.1 ETH).
pub const MIN_STAKE_WEI: u128 = WEI_PER_ETHER / 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakeError {
    #[error("stake amount is empty")]
    Empty,

    #[error("stake amount must not be negative")]
    Negative,

    #[error("'{0}' is not a decimal ETH amount")]
    Malformed(String),

    #[error("stake amount has more than 18 decimal places")]
    TooPrecise,

    #[error("stake amount is too large")]
    Overflow,

    #[error("stake must be at least 0.1 ETH")]
    BelowMinimum,
}

/// Converts a decimal ETH amount ("1.5", "0.1", ".25") to wei.
pub fn parse_ether(amount: &str) -> Result<u128, StakeError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(StakeError::Empty);
    }
    if amount.starts_with('-') {
        return Err(StakeError::Negative);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(StakeError::Malformed(amount.to_string()));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(StakeError::TooPrecise);
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| StakeError::Overflow)?
            .checked_mul(WEI_PER_ETHER)
            .ok_or(StakeError::Overflow)?
    };

    let fraction_wei = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<width$}", width = ETHER_DECIMALS)
            .parse::<u128>()
            .map_err(|_| StakeError::Malformed(amount.to_string()))?
    };

    whole_wei
        .checked_add(fraction_wei)
        .ok_or(StakeError::Overflow)
}

/// Parses a stake and enforces the minimum.
pub fn parse_stake(amount: &str) -> Result<u128, StakeError> {
    let wei = parse_ether(amount)?;
    if wei < MIN_STAKE_WEI {
        return Err(StakeError::BelowMinimum);
    }
    Ok(wei)
}

/// Formats wei as a decimal ETH string without trailing zeros.
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{fraction:0>width$}", width = ETHER_DECIMALS);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
