//! Transport to the Tuling answer service

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use super::types::{Answer, ReplyPayload};
use crate::Result;

/// Why no answer could be obtained
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Could not connect to the service
    #[error("connection failed: {0}")]
    Connect(String),

    /// Response body was not a valid answer
    #[error("invalid answer body: {0}")]
    Decode(String),

    /// Any other request failure
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Something that answers Tuling queries
pub trait AnswerService {
    /// Send `payload` and parse the answer
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the service is unreachable or the body
    /// is not a valid answer
    fn ask(&self, payload: &ReplyPayload) -> std::result::Result<Answer, TransportError>;
}

/// Blocking HTTP client for the Tuling OpenAPI
///
/// Holds one `reqwest` client so connections are reused across replies.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: Client,
    url: String,
}

impl HttpAnswerService {
    /// Create a client for `url`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl AnswerService for HttpAnswerService {
    fn ask(&self, payload: &ReplyPayload) -> std::result::Result<Answer, TransportError> {
        // Status is not checked: a JSON error body still decides the reply
        let response = self.client.post(&self.url).json(payload).send()?;
        let answer = response.json()?;
        Ok(answer)
    }
}
