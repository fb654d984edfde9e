use http::StatusCode;
use thiserror::Error;

/// Client-specific error types
///
/// This enum defines every failure the client can report. Decoding and
/// conversion errors are raised on the first violated contract and are never
/// recovered from internally; transport errors are opaque upstream failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EthError {
    /// The JSON value's runtime shape does not match the requested extraction type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A string expected to be a hex quantity fails the hex-digit grammar
    #[error("invalid hex quantity: {0:?}")]
    InvalidHex(String),

    /// A conversion input is not a well-formed non-negative decimal numeral
    #[error("invalid numeric value for {unit}: {value:?}")]
    InvalidArgument { unit: &'static str, value: String },

    /// A conversion divisor evaluated to zero
    #[error("division by zero")]
    DivisionByZero,

    /// A hex quantity does not fit the native integer it is decoded into
    #[error("quantity out of range: {0}")]
    QuantityOverflow(String),

    /// The node answered with a non-200 HTTP status
    #[error("HTTP error: {0}")]
    HttpStatus(StatusCode),

    /// The JSON-RPC envelope carried an `error` object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The request could not be sent or the response body could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// The node did not answer within the configured timeout
    #[error("request timed out")]
    Timeout,
}

impl EthError {
    /// Shorthand for a [`EthError::TypeMismatch`] on a missing mapping key.
    pub(crate) fn missing(expected: &'static str) -> Self {
        EthError::TypeMismatch {
            expected,
            found: "missing",
        }
    }

    /// Whether the error originated upstream of the decoder (network or node).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EthError::HttpStatus(_)
                | EthError::Rpc { .. }
                | EthError::Transport(_)
                | EthError::Timeout
        )
    }
}

impl From<reqwest::Error> for EthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EthError::Timeout
        } else {
            EthError::Transport(err.to_string())
        }
    }
}

pub type Result<T, E = EthError> = std::result::Result<T, E>;
