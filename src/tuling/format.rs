//! Request shaping and answer rendering

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Answer;
use crate::chat::Contact;

/// Reply used when the service has nothing useful to say
pub const FALLBACK_REPLY: &str = "这话我接不了…";

const MAX_USER_ID_CHARS: usize = 32;
const MAX_INFO_CHARS: usize = 30;
const MAX_LOC_CHARS: usize = 30;

/// Provinces that are cities in their own right
const MUNICIPALITIES: [&str; 4] = ["北京", "上海", "天津", "重庆"];

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z0-9]").expect("valid regex"));

/// Last `n` characters of `s`
fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    match s.char_indices().nth(count.saturating_sub(n)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// First `n` characters of `s`
fn first_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(idx, _)| &s[..idx])
}

/// Anonymized user id: ASCII alphanumerics only, last 32 kept
#[must_use]
pub fn sanitize_user_id(raw: &str) -> String {
    let cleaned = NON_ALNUM.replace_all(raw, "");
    last_chars(&cleaned, MAX_USER_ID_CHARS).to_string()
}

/// Coarse location of a contact, `None` when province or city is unknown
#[must_use]
pub fn location_of(contact: &Contact) -> Option<String> {
    let province = contact.province.as_str();
    let city = contact.city.as_str();

    let loc = if MUNICIPALITIES.contains(&province) {
        format!("{province}市{city}区")
    } else if !province.is_empty() && !city.is_empty() {
        format!("{province}省{city}市")
    } else {
        return None;
    };

    Some(first_chars(&loc, MAX_LOC_CHARS).to_string())
}

/// Query text: the last 30 characters of the message
#[must_use]
pub fn query_text(text: &str) -> String {
    last_chars(text, MAX_INFO_CHARS).to_string()
}

/// `@name ` prefix for a group member, if it has a name
#[must_use]
pub fn mention(member: &Contact) -> Option<String> {
    member.name().map(|name| format!("@{name} "))
}

/// Render an answer, or the fallback when there is none
#[must_use]
pub fn render_answer(answer: Option<&Answer>) -> String {
    let Some(answer) = answer.filter(|a| a.is_answered()) else {
        return FALLBACK_REPLY.to_string();
    };

    let mut out = String::new();
    if let Some(text) = answer.text.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(text);
    }
    if let Some(url) = answer.url.as_deref().filter(|u| !u.is_empty()) {
        let _ = write!(out, "\n{url}");
    }
    for item in answer.items() {
        let _ = write!(
            out,
            "\n\n{}\n{}",
            item.title(),
            item.detailurl.as_deref().unwrap_or_default()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn answer(value: serde_json::Value) -> Answer {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sanitize_strips_non_ascii_alnum() {
        assert_eq!(sanitize_user_id("wx_id-测试_007"), "wxid007");
        assert_eq!(sanitize_user_id("@@"), "");
        assert_eq!(sanitize_user_id("１２ab"), "ab");
    }

    #[test]
    fn test_sanitize_keeps_last_32() {
        let raw = format!("@{}", "a".repeat(10) + &"0123456789".repeat(4));
        let id = sanitize_user_id(&raw);

        assert_eq!(id.len(), 32);
        assert!(id.ends_with("0123456789"));
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_location_municipality() {
        let c = Contact::default().with_location("北京", "朝阳");
        assert_eq!(location_of(&c).as_deref(), Some("北京市朝阳区"));
    }

    #[test]
    fn test_location_province() {
        let c = Contact::default().with_location("广东", "深圳");
        assert_eq!(location_of(&c).as_deref(), Some("广东省深圳市"));
    }

    #[test]
    fn test_location_incomplete() {
        assert_eq!(location_of(&Contact::default().with_location("", "X")), None);
        assert_eq!(location_of(&Contact::default().with_location("广东", "")), None);
        assert_eq!(location_of(&Contact::default()), None);
    }

    #[test]
    fn test_location_truncated_to_30() {
        let c = Contact::default().with_location("广东", "长".repeat(40));
        let loc = location_of(&c).unwrap();

        assert_eq!(loc.chars().count(), 30);
        assert!(loc.starts_with("广东省长"));
    }

    #[test]
    fn test_query_text_keeps_tail() {
        assert_eq!(query_text("hello"), "hello");

        let text = format!("{}{}", "前".repeat(10), "后".repeat(30));
        assert_eq!(query_text(&text), "后".repeat(30));
    }

    #[test]
    fn test_mention() {
        let mut member = Contact::new("@m", "bob_nick");
        assert_eq!(mention(&member).as_deref(), Some("@bob_nick "));

        member.display_name = "Bob".to_string();
        assert_eq!(mention(&member).as_deref(), Some("@Bob "));

        assert_eq!(mention(&Contact::default()), None);
    }

    #[test]
    fn test_render_text_and_url() {
        let a = answer(json!({ "code": 100000, "text": "hello", "url": "http://x" }));
        assert_eq!(render_answer(Some(&a)), "hello\nhttp://x");
    }

    #[test]
    fn test_render_list() {
        let a = answer(json!({
            "code": 302000,
            "text": "新闻",
            "list": [
                { "article": "A", "detailurl": "http://a" },
                { "name": "B", "detailurl": "http://b" }
            ]
        }));

        assert_eq!(
            render_answer(Some(&a)),
            "新闻\n\nA\nhttp://a\n\nB\nhttp://b"
        );
    }

    #[test]
    fn test_render_fallback() {
        assert_eq!(render_answer(None), FALLBACK_REPLY);
        assert_eq!(render_answer(Some(&answer(json!({ "code": 0 })))), FALLBACK_REPLY);
        assert_eq!(
            render_answer(Some(&answer(json!({ "code": 40004, "text": "quota" })))),
            FALLBACK_REPLY
        );
    }
}
