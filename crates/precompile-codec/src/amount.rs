//! Token amounts in smallest indivisible units.
//!
//! ROKO and pwROKO use 18 decimals. Amounts are kept as 256-bit integers end
//! to end; conversion to decimal text happens only through [`format_units`].

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Decimals of the native token and its locked representation.
pub const TOKEN_DECIMALS: u8 = 18;

/// Largest power of ten representable in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// One whole token (10^18 smallest units).
pub const ONE_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Basis points representing 100%.
pub const FULL_BPS: u32 = 10_000;

/// A non-negative token quantity in smallest units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256::ZERO);

    pub const fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a smallest-unit decimal integer, e.g. `"1500000000000000000"`.
    pub fn from_raw_str(text: &str) -> Result<Self, CodecError> {
        reject_negative(text)?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::InvalidArgument(format!(
                "not a decimal integer: {text:?}"
            )));
        }
        parse_digits(text).map(Self)
    }

    /// Parses human decimal text such as `"1.5"` into smallest units.
    pub fn parse_units(text: &str, decimals: u8) -> Result<Self, CodecError> {
        reject_negative(text)?;
        let scale = pow10(decimals)?;

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(CodecError::InvalidArgument(format!(
                "not a decimal amount: {text:?}"
            )));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(CodecError::InvalidArgument(format!(
                "not a decimal amount: {text:?}"
            )));
        }
        if fraction.len() > usize::from(decimals) {
            return Err(CodecError::InvalidArgument(format!(
                "{text:?} has more than {decimals} fractional digits"
            )));
        }

        let whole = if whole.is_empty() { U256::ZERO } else { parse_digits(whole)? };
        let fraction = if fraction.is_empty() {
            U256::ZERO
        } else {
            let padded = format!("{fraction:0<width$}", width = usize::from(decimals));
            parse_digits(&padded)?
        };

        whole
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| CodecError::InvalidArgument(format!("{text:?} exceeds 256 bits")))
    }

    /// Parses a JSON-RPC hex quantity such as the `eth_getBalance` result
    /// `"0x1bc16d674ec80000"`.
    pub fn from_hex_quantity(text: &str) -> Result<Self, CodecError> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .ok_or_else(|| {
                CodecError::InvalidArgument(format!("quantity must start with 0x: {text:?}"))
            })?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidArgument(format!("not a hex quantity: {text:?}")));
        }

        U256::from_str_radix(digits, 16).map(Self).map_err(|e| {
            CodecError::InvalidArgument(format!("{text:?} is not a 256-bit quantity: {e}"))
        })
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl TryFrom<i128> for Amount {
    type Error = CodecError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        u128::try_from(value)
            .map(Amount::from)
            .map_err(|_| CodecError::InvalidArgument(format!("negative amount: {value}")))
    }
}

/// Formats a smallest-unit amount as decimal text.
///
/// The integer part is `amount / 10^decimals`; the remainder is left-padded
/// to `decimals` digits, trailing zeros are stripped, and the separator is
/// dropped entirely when nothing remains.
pub fn format_units(amount: Amount, decimals: u8) -> Result<String, CodecError> {
    let scale = pow10(decimals)?;
    Ok(format_scaled(amount.0, scale, usize::from(decimals)))
}

/// Same as [`format_units`], with the fractional part cut to at most
/// `max_fraction_digits` digits (no rounding).
pub fn format_units_truncated(
    amount: Amount,
    decimals: u8,
    max_fraction_digits: usize,
) -> Result<String, CodecError> {
    let full = format_units(amount, decimals)?;
    let Some((whole, fraction)) = full.split_once('.') else {
        return Ok(full);
    };

    let cut = &fraction[..fraction.len().min(max_fraction_digits)];
    let cut = cut.trim_end_matches('0');
    if cut.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{whole}.{cut}"))
    }
}

/// Share of `part` in `total`, in basis points.
///
/// Returns 0 for a zero total and saturates at [`FULL_BPS`].
pub fn percentage_bps(part: Amount, total: Amount) -> u32 {
    if total.is_zero() {
        return 0;
    }
    if part >= total {
        return FULL_BPS;
    }

    let full = U256::from(FULL_BPS);
    let bps = match part.0.checked_mul(full) {
        Some(scaled) => scaled / total.0,
        None => part.0 / (total.0 / full),
    };
    u32::try_from(bps).unwrap_or(FULL_BPS)
}

fn format_scaled(value: U256, scale: U256, decimals: usize) -> String {
    let whole = value / scale;
    let remainder = value % scale;

    if remainder.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

fn pow10(decimals: u8) -> Result<U256, CodecError> {
    if decimals > MAX_DECIMALS {
        return Err(CodecError::InvalidArgument(format!(
            "at most {MAX_DECIMALS} decimals supported, got {decimals}"
        )));
    }
    Ok(U256::from(10u64).pow(U256::from(decimals)))
}

fn parse_digits(digits: &str) -> Result<U256, CodecError> {
    U256::from_str_radix(digits, 10).map_err(|e| {
        CodecError::InvalidArgument(format!("{digits:?} is not a 256-bit integer: {e}"))
    })
}

fn reject_negative(text: &str) -> Result<(), CodecError> {
    if text.trim_start().starts_with('-') {
        return Err(CodecError::InvalidArgument(format!("negative amount: {text}")));
    }
    Ok(())
}
