//! wxbridge - helpers layered on top of a WeChat session library
//!
//! This library provides two independent pieces:
//! - Mutual friend computation across several accounts or contact lists
//! - A Tuling auto-reply bridge turning inbound messages into bot replies
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              WeChat session layer                    │
//! │   Robot  │  Chats  │  Message  │  MessageSender     │
//! └──────────┬─────────────────────────┬────────────────┘
//!            │                         │
//! ┌──────────▼──────────┐   ┌──────────▼────────────────┐
//! │   mutual_friends    │   │   Tuling reply bridge      │
//! │   (ContactKey)      │   │   payload │ answer │ send  │
//! └─────────────────────┘   └──────────┬────────────────┘
//!                                      │
//!                           ┌──────────▼────────────────┐
//!                           │   Tuling OpenAPI (HTTP)    │
//!                           └───────────────────────────┘
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod mutual;
pub mod tuling;
pub mod util;

pub use chat::{Chats, Contact, ContactSource, FriendSource, Message, MessageSender, Robot};
pub use config::TulingConfig;
pub use error::{Error, ResponseError, Result};
pub use mutual::{ContactKey, mutual_friends};
pub use tuling::{
    Answer, AnswerItem, AnswerService, FALLBACK_REPLY, HttpAnswerService, ReplyPayload,
    TransportError, Tuling,
};
pub use util::{ensure_one, ensure_one_value, mute_response_error};
