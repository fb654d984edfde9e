//! Typed extraction from untyped JSON-RPC results
//!
//! Every value a node returns arrives as a generic JSON value. The functions
//! here are the only place that inspects its shape: each one either yields the
//! requested type or fails with [`EthError::TypeMismatch`] / [`EthError::InvalidHex`].
//! There is no implicit coercion between variants.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Num;
use serde_json::{Map, Value};

use crate::error::{EthError, Result};
use crate::units::WeiAmount;

/// Untyped value as received in the `result` field of a JSON-RPC response.
pub type RpcValue = Value;

/// Ordered JSON object.
pub type RpcMap = Map<String, Value>;

/// Name of the JSON variant held by `value`, used in mismatch errors.
pub fn kind(value: &RpcValue) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn mismatch(expected: &'static str, value: &RpcValue) -> EthError {
    EthError::TypeMismatch {
        expected,
        found: kind(value),
    }
}

pub fn as_string(value: &RpcValue) -> Result<&str> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

/// Extract a boolean. A string such as `"true"` is rejected.
pub fn as_bool(value: &RpcValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| mismatch("boolean", value))
}

/// Extract an integer from a native JSON integer or a string of decimal digits.
pub fn as_integer(value: &RpcValue) -> Result<i64> {
    match value {
        Value::Number(n) if n.is_f64() => Err(mismatch("integer", value)),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| EthError::QuantityOverflow(n.to_string())),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse::<i64>()
            .map_err(|_| EthError::QuantityOverflow(s.clone())),
        _ => Err(mismatch("integer", value)),
    }
}

pub fn as_mapping(value: &RpcValue) -> Result<&RpcMap> {
    value.as_object().ok_or_else(|| mismatch("mapping", value))
}

pub fn as_sequence(value: &RpcValue) -> Result<&Vec<RpcValue>> {
    value.as_array().ok_or_else(|| mismatch("sequence", value))
}

/// Strip an optional `0x`/`0X` prefix and check the remaining hex digits.
///
/// Returns the digits on success. An empty remainder is rejected.
pub(crate) fn hex_digits(hex: &str) -> Result<&str> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EthError::InvalidHex(hex.to_string()));
    }
    Ok(digits)
}

/// Decode a hex quantity into a `u64`.
///
/// Quantities wider than 64 bits fail with [`EthError::QuantityOverflow`];
/// use [`hex_to_quantity`] for fields whose magnitude is unbounded.
pub fn hex_to_int(value: &RpcValue) -> Result<u64> {
    let hex = value.as_str().ok_or_else(|| mismatch("hex string", value))?;
    let digits = hex_digits(hex)?;
    u64::from_str_radix(digits, 16).map_err(|_| EthError::QuantityOverflow(hex.to_string()))
}

/// Decode a hex quantity of any width into a Wei amount.
pub fn hex_to_quantity(hex: &str) -> Result<WeiAmount> {
    let digits = hex_digits(hex)?;
    let value =
        BigUint::from_str_radix(digits, 16).map_err(|_| EthError::InvalidHex(hex.to_string()))?;
    Ok(WeiAmount::from_biguint(&value))
}

/// Decode a hex Unix-epoch-seconds quantity into a UTC timestamp.
pub fn hex_to_timestamp(value: &RpcValue) -> Result<DateTime<Utc>> {
    let seconds = hex_to_int(value)?;
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| EthError::QuantityOverflow(format!("timestamp {seconds}")))
}

/// Field accessor over a decoded JSON object.
///
/// Required accessors fail on a missing key; optional accessors treat a
/// missing key and an explicit `null` alike as "no value".
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a RpcMap,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a RpcMap) -> Self {
        Self { map }
    }

    fn required(&self, key: &'static str) -> Result<&'a RpcValue> {
        match self.map.get(key) {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(field = key, "required field missing");
                Err(EthError::missing(key))
            }
        }
    }

    fn optional(&self, key: &str) -> Option<&'a RpcValue> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    pub fn string(&self, key: &'static str) -> Result<String> {
        as_string(self.required(key)?).map(str::to_owned)
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>> {
        self.optional(key)
            .map(|v| as_string(v).map(str::to_owned))
            .transpose()
    }

    pub fn u64(&self, key: &'static str) -> Result<u64> {
        hex_to_int(self.required(key)?)
    }

    pub fn opt_u64(&self, key: &str) -> Result<Option<u64>> {
        self.optional(key).map(hex_to_int).transpose()
    }

    pub fn wei(&self, key: &'static str) -> Result<WeiAmount> {
        hex_to_quantity(as_string(self.required(key)?)?)
    }

    pub fn opt_wei(&self, key: &str) -> Result<Option<WeiAmount>> {
        self.optional(key)
            .map(|v| as_string(v).and_then(hex_to_quantity))
            .transpose()
    }

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>> {
        self.optional(key).map(as_bool).transpose()
    }

    pub fn timestamp(&self, key: &'static str) -> Result<DateTime<Utc>> {
        hex_to_timestamp(self.required(key)?)
    }

    pub fn sequence(&self, key: &'static str) -> Result<&'a Vec<RpcValue>> {
        as_sequence(self.required(key)?)
    }

    pub fn opt_sequence(&self, key: &str) -> Result<Option<&'a Vec<RpcValue>>> {
        self.optional(key).map(as_sequence).transpose()
    }

    pub fn strings(&self, key: &'static str) -> Result<Vec<String>> {
        self.sequence(key)?
            .iter()
            .map(|v| as_string(v).map(str::to_owned))
            .collect()
    }

    /// Raw access for fields with protocol-specific shapes.
    pub fn raw(&self, key: &'static str) -> Result<&'a RpcValue> {
        self.required(key)
    }
}
