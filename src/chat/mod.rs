//! WeChat session-layer data model
//!
//! Login, transport and contact sync live in the session library. This module
//! only models the attributes the rest of the crate reads, plus the
//! `MessageSender` seam used to deliver replies.

pub(crate) mod source;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use source::{ContactSource, FriendSource};

use crate::{Error, Result};

/// A chat participant (friend, group or group member)
///
/// Deserializes from the raw member JSON returned by the WeChat web API.
/// Keys without a dedicated field are kept in `attrs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Session-scoped user identifier (e.g. `@a1b2...`)
    #[serde(rename = "UserName", default, deserialize_with = "null_as_empty")]
    pub user_name: String,

    /// Nickname chosen by the user
    #[serde(rename = "NickName", default, deserialize_with = "null_as_empty")]
    pub nick_name: String,

    /// Group display name (group members only)
    #[serde(rename = "DisplayName", default, deserialize_with = "null_as_empty")]
    pub display_name: String,

    #[serde(rename = "Province", default, deserialize_with = "null_as_empty")]
    pub province: String,

    #[serde(rename = "City", default, deserialize_with = "null_as_empty")]
    pub city: String,

    /// Remaining raw attributes
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

/// The web API sends `null` for unset profile fields
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Contact {
    /// Create a contact with the given nickname
    #[must_use]
    pub fn new(user_name: impl Into<String>, nick_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            nick_name: nick_name.into(),
            ..Self::default()
        }
    }

    /// Set province and city
    #[must_use]
    pub fn with_location(mut self, province: impl Into<String>, city: impl Into<String>) -> Self {
        self.province = province.into();
        self.city = city.into();
        self
    }

    /// Set a raw attribute
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Look up a raw attribute
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// `AttrStatus` as an integer
    ///
    /// Accepts JSON integers and numeric strings.
    #[must_use]
    pub fn attr_status(&self) -> Option<i64> {
        match self.attr("AttrStatus")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Name to show for this contact: display name, falling back to nickname
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        [self.display_name.as_str(), self.nick_name.as_str()]
            .into_iter()
            .find(|n| !n.is_empty())
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name().unwrap_or(&self.user_name))
    }
}

/// Ordered collection of contacts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chats(Vec<Contact>);

impl Chats {
    /// Create a collection from contacts
    #[must_use]
    pub const fn new(contacts: Vec<Contact>) -> Self {
        Self(contacts)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.0.iter()
    }

    /// Contacts whose nickname or display name contains `name`
    ///
    /// Pair with [`crate::ensure_one`] when exactly one match is expected.
    #[must_use]
    pub fn search(&self, name: &str) -> Vec<&Contact> {
        self.0
            .iter()
            .filter(|c| c.nick_name.contains(name) || c.display_name.contains(name))
            .collect()
    }

    /// Borrow as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Contact] {
        &self.0
    }
}

impl FromIterator<Contact> for Chats {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Chats {
    type Item = Contact;
    type IntoIter = std::vec::IntoIter<Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Chats {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outbound text delivery provided by the session layer
pub trait MessageSender: Send + Sync {
    /// Send `text` to `to`
    ///
    /// # Errors
    ///
    /// Returns `Error::Response` when the WeChat API rejects the send
    fn send_text(&self, to: &Contact, text: &str) -> Result<()>;
}

/// A logged-in WeChat account
pub struct Robot {
    /// The account's own user name
    pub user_name: String,

    /// The account's own nickname
    pub nick_name: String,

    /// Friend list as synced by the session layer
    pub friends: Chats,

    sender: Arc<dyn MessageSender>,
}

impl Robot {
    /// Create a robot backed by the given sender
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        nick_name: impl Into<String>,
        friends: Chats,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            nick_name: nick_name.into(),
            friends,
            sender,
        }
    }

    /// Send text through this account
    ///
    /// # Errors
    ///
    /// Propagates errors from the session layer
    pub fn send_text(&self, to: &Contact, text: &str) -> Result<()> {
        tracing::debug!(to = %to, len = text.len(), "sending text");
        self.sender.send_text(to, text)
    }
}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robot")
            .field("user_name", &self.user_name)
            .field("nick_name", &self.nick_name)
            .field("friends", &self.friends.len())
            .finish_non_exhaustive()
    }
}

/// An inbound message
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Text content (absent for media messages)
    pub text: Option<String>,

    /// Conversation partner: the friend, or the group
    pub chat: Contact,

    /// Individual sender, present for group messages only
    pub member: Option<Contact>,

    /// Account that received the message
    pub robot: Option<Arc<Robot>>,
}

impl Message {
    /// Reply to the conversation this message came from
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRobot` if the message has no owning robot, or
    /// any error from the session layer
    pub fn reply(&self, text: &str) -> Result<()> {
        let robot = self
            .robot
            .as_ref()
            .ok_or_else(|| Error::MissingRobot(self.to_string()))?;
        robot.send_text(&self.chat, text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{} › {}", self.chat, member)?,
            None => write!(f, "{}", self.chat)?,
        }
        write!(f, ": {}", self.text.as_deref().unwrap_or_default())
    }
}
