//! Error types for wxbridge

use thiserror::Error;

/// Result type alias for wxbridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wxbridge
#[derive(Debug, Error)]
pub enum Error {
    /// Argument of the wrong kind (caller bug)
    #[error("invalid argument kind: {0}")]
    InvalidArgumentKind(String),

    /// Expected a list, found something else
    #[error("expected list, {0} found")]
    NotAList(String),

    /// Lookup produced no item
    #[error("not found")]
    NotFound,

    /// Lookup produced more than one item
    #[error("more than one found ({0})")]
    MultipleFound(usize),

    /// Message has no owning robot
    #[error("robot not found: {0}")]
    MissingRobot(String),

    /// Session layer rejected a request
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Non-zero `BaseResponse` returned by the WeChat web API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("err_code: {ret}; err_msg: {err_msg}")]
pub struct ResponseError {
    /// `Ret` field of the response
    pub ret: i64,
    /// `ErrMsg` field of the response
    pub err_msg: String,
}

impl ResponseError {
    /// Create a response error
    #[must_use]
    pub fn new(ret: i64, err_msg: impl Into<String>) -> Self {
        Self {
            ret,
            err_msg: err_msg.into(),
        }
    }
}
