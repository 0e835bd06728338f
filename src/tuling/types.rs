//! Tuling OpenAPI wire types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `code` assumed when the answer is missing or carries no code
pub const NO_ANSWER_CODE: i64 = -1;

/// Lowest `code` that carries a usable answer
pub const ANSWER_CODE_THRESHOLD: i64 = 100_000;

/// Request body sent to the Tuling API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyPayload {
    #[serde(rename = "key")]
    pub api_key: String,

    /// Query text (last 30 characters of the message)
    pub info: String,

    /// Anonymized sender id (ASCII alphanumerics, at most 32)
    pub user_id: String,

    /// Coarse location, `null` when unknown
    pub loc: Option<String>,
}

/// Parsed Tuling answer
///
/// `code` and `text` are read leniently: a float or numeric-string code and a
/// non-string text are accepted rather than failing the whole answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    #[serde(default = "no_answer_code", deserialize_with = "lenient_code")]
    pub code: i64,

    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// News / recipe style result lists
    #[serde(default)]
    pub list: Option<Vec<AnswerItem>>,
}

const fn no_answer_code() -> i64 {
    NO_ANSWER_CODE
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(code.unwrap_or(NO_ANSWER_CODE))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl Answer {
    /// Whether the service actually answered
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.code >= ANSWER_CODE_THRESHOLD
    }

    /// List entries, empty when absent
    #[must_use]
    pub fn items(&self) -> impl Iterator<Item = &AnswerItem> {
        self.list.iter().flatten()
    }
}

/// One entry of a list answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerItem {
    /// Headline (news answers)
    #[serde(default)]
    pub article: Option<String>,

    /// Name (recipe answers)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub detailurl: Option<String>,
}

impl AnswerItem {
    /// `article`, falling back to `name`
    #[must_use]
    pub fn title(&self) -> &str {
        self.article
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}
