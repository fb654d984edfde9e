//! Exact conversion between Ethereum denominations
//!
//! All arithmetic is done on arbitrary-precision integers with an explicit
//! decimal scale; no value ever passes through a binary floating point type.
//! Inputs are validated in full before any arithmetic is attempted.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use serde::{Serialize, Serializer};

use crate::decode::hex_to_quantity;
use crate::error::{EthError, Result};

/// Ethereum denomination with its number of decimal places relative to Wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Wei,
    Gwei,
    Ether,
}

impl Unit {
    pub const fn decimals(self) -> u32 {
        match self {
            Unit::Wei => 0,
            Unit::Gwei => 9,
            Unit::Ether => 18,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Unit::Wei => "Wei",
            Unit::Gwei => "Gwei",
            Unit::Ether => "Ether",
        }
    }

    fn factor(self) -> BigUint {
        BigUint::from(10u32).pow(self.decimals())
    }
}

/// Arbitrary-precision non-negative integer rendered in base 10.
///
/// Used for Wei amounts and for every other protocol quantity whose magnitude
/// is unbounded (difficulty, gas, sizes). Always matches `^[0-9]+$` with no
/// leading zeros except for `"0"` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeiAmount(String);

impl WeiAmount {
    pub(crate) fn from_biguint(value: &BigUint) -> Self {
        WeiAmount(value.to_str_radix(10))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value as a native integer, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        self.0.parse().ok()
    }

    fn to_biguint(&self) -> BigUint {
        // The invariant guarantees a valid decimal numeral.
        BigUint::from_str_radix(&self.0, 10).unwrap_or_default()
    }
}

impl FromStr for WeiAmount {
    type Err = EthError;

    fn from_str(s: &str) -> Result<Self> {
        let value = parse_integer(s, Unit::Wei)?;
        Ok(WeiAmount::from_biguint(&value))
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        WeiAmount(value.to_string())
    }
}

/// Fixed-scale decimal rendering such as `"1.500000000"`.
///
/// The number of fractional digits always equals [`DecimalAmount::scale`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecimalAmount {
    text: String,
    scale: u32,
}

impl DecimalAmount {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

macro_rules! string_like {
    ($ty:ty, $field:tt) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.$field)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.$field
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.$field == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.$field == *other
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.$field)
            }
        }
    };
}

string_like!(WeiAmount, 0);
string_like!(DecimalAmount, text);

/// Validated decimal numeral split at the decimal point.
struct Numeral<'a> {
    integer: &'a str,
    fraction: &'a str,
}

/// Check `value` against `^[0-9]+(\.[0-9]+)?$`.
fn parse_numeral(value: &str, unit: Unit) -> Result<Numeral<'_>> {
    let invalid = || EthError::InvalidArgument {
        unit: unit.name(),
        value: value.to_string(),
    };
    let (integer, fraction) = match value.split_once('.') {
        Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
        Some(_) => return Err(invalid()),
        None => (value, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
        return Err(invalid());
    }
    Ok(Numeral { integer, fraction })
}

/// Parse a whole-number amount with no fractional part.
fn parse_integer(value: &str, unit: Unit) -> Result<BigUint> {
    let numeral = parse_numeral(value, unit)?;
    if !numeral.fraction.is_empty() {
        return Err(EthError::InvalidArgument {
            unit: unit.name(),
            value: value.to_string(),
        });
    }
    digits_to_biguint(numeral.integer)
}

fn digits_to_biguint(digits: &str) -> Result<BigUint> {
    BigUint::from_str_radix(digits, 10).map_err(|_| EthError::InvalidArgument {
        unit: Unit::Wei.name(),
        value: digits.to_string(),
    })
}

fn checked_div_rem(numerator: &BigUint, divisor: &BigUint) -> Result<(BigUint, BigUint)> {
    if divisor.is_zero() {
        return Err(EthError::DivisionByZero);
    }
    Ok((numerator / divisor, numerator % divisor))
}

/// Convert an amount of `unit` into Wei.
///
/// Fractional digits beyond the unit's scale cannot be represented in Wei
/// and are rejected instead of truncated.
fn to_wei(value: &str, unit: Unit) -> Result<WeiAmount> {
    let numeral = parse_numeral(value, unit)?;
    let decimals = unit.decimals() as usize;
    if numeral.fraction.len() > decimals {
        return Err(EthError::InvalidArgument {
            unit: unit.name(),
            value: value.to_string(),
        });
    }
    let integer = digits_to_biguint(numeral.integer)?;
    let fraction = if numeral.fraction.is_empty() {
        BigUint::zero()
    } else {
        let padded = format!("{:0<width$}", numeral.fraction, width = decimals);
        digits_to_biguint(&padded)?
    };
    Ok(WeiAmount::from_biguint(&(integer * unit.factor() + fraction)))
}

/// Render a Wei amount in `unit` with exactly `unit.decimals()` fractional digits.
fn from_wei(wei: &str, unit: Unit) -> Result<DecimalAmount> {
    let value = parse_integer(wei, Unit::Wei)?;
    scale_down(&value, unit)
}

fn scale_down(value: &BigUint, unit: Unit) -> Result<DecimalAmount> {
    let (quotient, remainder) = checked_div_rem(value, &unit.factor())?;
    let scale = unit.decimals();
    Ok(DecimalAmount {
        text: format!(
            "{}.{:0>width$}",
            quotient,
            remainder.to_str_radix(10),
            width = scale as usize
        ),
        scale,
    })
}

pub fn wei_to_gwei(wei: &str) -> Result<DecimalAmount> {
    from_wei(wei, Unit::Gwei)
}

pub fn gwei_to_wei(gwei: &str) -> Result<WeiAmount> {
    to_wei(gwei, Unit::Gwei)
}

pub fn wei_to_ether(wei: &str) -> Result<DecimalAmount> {
    from_wei(wei, Unit::Ether)
}

pub fn ether_to_wei(ether: &str) -> Result<WeiAmount> {
    to_wei(ether, Unit::Ether)
}

/// Gwei to Ether, routed through Wei.
pub fn gwei_to_ether(gwei: &str) -> Result<DecimalAmount> {
    let wei = gwei_to_wei(gwei)?;
    wei_to_ether(wei.as_str())
}

/// Ether to Gwei, routed through Wei.
pub fn ether_to_gwei(ether: &str) -> Result<DecimalAmount> {
    let wei = ether_to_wei(ether)?;
    wei_to_gwei(wei.as_str())
}

/// Decode a hex quantity of any width into a decimal Wei string.
///
/// Input that is not a hex quantity is an [`EthError::InvalidArgument`]. Node
/// responses go through [`hex_to_quantity`], which reports
/// [`EthError::InvalidHex`] instead.
pub fn hex_to_wei(hex: &str) -> Result<WeiAmount> {
    hex_to_quantity(hex).map_err(|_| EthError::InvalidArgument {
        unit: Unit::Wei.name(),
        value: hex.to_string(),
    })
}

/// Encode a decimal Wei string as a lowercase `0x` quantity.
pub fn wei_to_hex(wei: &str) -> Result<String> {
    let value = parse_integer(wei, Unit::Wei)?;
    Ok(format!("0x{}", value.to_str_radix(16)))
}

impl WeiAmount {
    pub fn to_gwei(&self) -> Result<DecimalAmount> {
        scale_down(&self.to_biguint(), Unit::Gwei)
    }

    pub fn to_ether(&self) -> Result<DecimalAmount> {
        scale_down(&self.to_biguint(), Unit::Ether)
    }

    /// Product of two amounts, e.g. gas used times price per gas.
    pub fn times(&self, other: &WeiAmount) -> WeiAmount {
        WeiAmount::from_biguint(&(self.to_biguint() * other.to_biguint()))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", self.to_biguint().to_str_radix(16))
    }
}
