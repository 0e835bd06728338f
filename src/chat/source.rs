//! Contact sources accepted by mutual friend computation

use serde_json::Value;

use super::{Chats, Contact, Robot};
use crate::{Error, Result};

/// Anything that can enumerate a friend list
pub trait FriendSource {
    /// The contacts this source contributes
    fn friends(&self) -> &[Contact];
}

impl FriendSource for Robot {
    fn friends(&self) -> &[Contact] {
        self.friends.as_slice()
    }
}

impl FriendSource for Chats {
    fn friends(&self) -> &[Contact] {
        self.as_slice()
    }
}

/// A contact source loaded from a JSON snapshot
///
/// Either an account snapshot (`{"friends": [...]}`) or a bare contact list.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactSource {
    /// Account snapshot: its friend list
    Account {
        /// Friend list of the account
        friends: Chats,
    },
    /// Bare collection of contacts
    Collection(Chats),
}

impl ContactSource {
    /// Classify and parse a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgumentKind` if the value is neither an object
    /// with a `friends` list nor a list, or `Error::Serialization` if the
    /// contacts inside are malformed
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(_) => Ok(Self::Collection(serde_json::from_value(value)?)),
            Value::Object(mut map) => match map.remove("friends") {
                Some(friends @ Value::Array(_)) => Ok(Self::Account {
                    friends: serde_json::from_value(friends)?,
                }),
                _ => Err(Error::InvalidArgumentKind(
                    "object without a friends list".to_string(),
                )),
            },
            other => Err(Error::InvalidArgumentKind(json_kind(&other).to_string())),
        }
    }
}

impl FriendSource for ContactSource {
    fn friends(&self) -> &[Contact] {
        match self {
            Self::Account { friends } | Self::Collection(friends) => friends.as_slice(),
        }
    }
}

/// Name of a JSON value's kind, for error messages
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
