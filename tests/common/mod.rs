//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use wxbridge::{
    Answer, AnswerService, Chats, Contact, Message, MessageSender, ReplyPayload, ResponseError,
    Robot, TransportError,
};

/// Install a test log subscriber (honours `RUST_LOG`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Contact with location and `AttrStatus`
#[must_use]
pub fn friend(user_name: &str, nick: &str, province: &str, city: &str, status: i64) -> Contact {
    Contact::new(user_name, nick)
        .with_location(province, city)
        .with_attr("AttrStatus", status)
}

/// Sender recording every delivered text
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub reject: Option<ResponseError>,
}

impl RecordingSender {
    /// Sender failing every send with `err`
    #[must_use]
    pub fn rejecting(err: ResponseError) -> Self {
        Self {
            sent: Mutex::default(),
            reject: Some(err),
        }
    }

    /// Texts sent so far as `(to user name, text)`
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageSender for RecordingSender {
    fn send_text(&self, to: &Contact, text: &str) -> wxbridge::Result<()> {
        if let Some(err) = &self.reject {
            return Err(err.clone().into());
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.user_name.clone(), text.to_string()));
        Ok(())
    }
}

/// Answer service replaying a fixed outcome and counting calls
pub struct ScriptedService {
    outcome: Box<dyn Fn() -> Result<Answer, TransportError>>,
    pub payloads: Mutex<Vec<ReplyPayload>>,
}

impl ScriptedService {
    /// Always answer with `json`
    #[must_use]
    pub fn answering(json: serde_json::Value) -> Self {
        let answer: Answer = serde_json::from_value(json).expect("valid answer fixture");
        Self::with(move || Ok(answer.clone()))
    }

    /// Always fail with `make()`
    #[must_use]
    pub fn failing(make: fn() -> TransportError) -> Self {
        Self::with(move || Err(make()))
    }

    fn with(outcome: impl Fn() -> Result<Answer, TransportError> + 'static) -> Self {
        Self {
            outcome: Box::new(outcome),
            payloads: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> ReplyPayload {
        self.payloads
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("service was called")
    }
}

impl AnswerService for ScriptedService {
    fn ask(&self, payload: &ReplyPayload) -> Result<Answer, TransportError> {
        self.payloads.lock().unwrap().push(payload.clone());
        (self.outcome)()
    }
}

/// Robot with the given friends and sender
pub fn robot(friends: Vec<Contact>, sender: Arc<RecordingSender>) -> Arc<Robot> {
    Arc::new(Robot::new("@me", "me", Chats::new(friends), sender))
}

/// Direct message from a friend
pub fn direct_message(text: &str, from: Contact, robot: Arc<Robot>) -> Message {
    Message {
        text: Some(text.to_string()),
        chat: from,
        member: None,
        robot: Some(robot),
    }
}

/// Group message sent by `member`
pub fn group_message(text: &str, group: Contact, member: Contact, robot: Arc<Robot>) -> Message {
    Message {
        text: Some(text.to_string()),
        chat: group,
        member: Some(member),
        robot: Some(robot),
    }
}
