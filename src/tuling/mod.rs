//! Tuling auto-reply bridge
//!
//! Turns an inbound message into a Tuling OpenAPI query and the answer back
//! into reply text. Service failures never surface as errors: an unreachable
//! service, an unparsable body and a low answer code all produce
//! [`FALLBACK_REPLY`].
//!
//! API docs: <http://tuling123.com/help/h_cent_webapi.jhtml>

mod client;
pub mod format;
mod types;

pub use client::{AnswerService, HttpAnswerService, TransportError};
pub use format::FALLBACK_REPLY;
pub use types::{ANSWER_CODE_THRESHOLD, Answer, AnswerItem, NO_ANSWER_CODE, ReplyPayload};

use crate::chat::Message;
use crate::config::{DEFAULT_TULING_URL, TulingConfig};
use crate::{Error, Result};

/// Tuling chatbot wired to WeChat messages
#[derive(Debug, Clone)]
pub struct Tuling<S = HttpAnswerService> {
    api_key: String,
    service: S,
}

impl Tuling {
    /// Create a bridge against the public Tuling endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let defaults = TulingConfig::default();
        let service = HttpAnswerService::new(DEFAULT_TULING_URL, defaults.timeout)?;
        Ok(Self::with_service(api_key, service))
    }

    /// Create a bridge from configuration
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or the HTTP client cannot
    /// be built
    pub fn from_config(config: &TulingConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let service = HttpAnswerService::new(config.url.clone(), config.timeout)?;
        Ok(Self::with_service(api_key, service))
    }
}

impl<S: AnswerService> Tuling<S> {
    /// Create a bridge over any answer service
    #[must_use]
    pub fn with_service(api_key: impl Into<String>, service: S) -> Self {
        Self {
            api_key: api_key.into(),
            service,
        }
    }

    /// The underlying answer service
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Reply to `msg` and return the text sent
    ///
    /// Returns `Ok(None)` without sending when the message has no text.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRobot` if the message has no owning robot, or
    /// any error from the session layer while sending
    pub fn do_reply(&self, msg: &Message, to_member: bool) -> Result<Option<String>> {
        let Some(text) = self.reply_text(msg, to_member)? else {
            return Ok(None);
        };
        msg.reply(&text)?;
        Ok(Some(text))
    }

    /// Compute the reply text for `msg`
    ///
    /// With `to_member` set, group messages are answered to the sending
    /// member and prefixed with `@name `; otherwise the chat itself is the
    /// target. Returns `Ok(None)` when the message has no text.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRobot` if the message has no owning robot
    pub fn reply_text(&self, msg: &Message, to_member: bool) -> Result<Option<String>> {
        if msg.robot.is_none() {
            return Err(Error::MissingRobot(msg.to_string()));
        }

        let Some(text) = msg.text.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let member = msg.member.as_ref().filter(|_| to_member);
        let target = member.unwrap_or(&msg.chat);

        let payload = ReplyPayload {
            api_key: self.api_key.clone(),
            info: format::query_text(text),
            user_id: format::sanitize_user_id(&target.user_name),
            loc: format::location_of(target),
        };

        tracing::debug!(?payload, "tuling payload");

        let answer = match self.service.ask(&payload) {
            Ok(answer) => {
                tracing::debug!(?answer, "tuling answer");
                Some(answer)
            }
            Err(e) => {
                tracing::warn!(error = %e, "tuling request failed");
                None
            }
        };

        let mut reply = member.and_then(format::mention).unwrap_or_default();
        reply.push_str(&format::render_answer(answer.as_ref()));

        Ok(Some(reply))
    }
}
