//! Small helpers shared by wxbridge callers

use serde_json::Value;

use crate::chat::source::json_kind;
use crate::{Error, Result};

/// Return the only item of `found`
///
/// # Errors
///
/// Returns `Error::NotFound` if `found` is empty, `Error::MultipleFound` if it
/// holds more than one item
pub fn ensure_one<T>(found: Vec<T>) -> Result<T> {
    let count = found.len();
    let mut items = found.into_iter();
    match (items.next(), count) {
        (Some(item), 1) => Ok(item),
        (None, _) => Err(Error::NotFound),
        (Some(_), n) => Err(Error::MultipleFound(n)),
    }
}

/// Return the only element of a JSON array
///
/// # Errors
///
/// Returns `Error::NotAList` if `found` is not an array, otherwise as
/// [`ensure_one`]
pub fn ensure_one_value(found: Value) -> Result<Value> {
    match found {
        Value::Array(items) => ensure_one(items),
        other => Err(Error::NotAList(json_kind(&other).to_string())),
    }
}

/// Run `f`, logging and swallowing `Error::Response`
///
/// Returns `Ok(None)` when the session layer rejected the call. Every other
/// error is returned unchanged.
///
/// # Errors
///
/// Propagates any error from `f` other than `Error::Response`
pub fn mute_response_error<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(Error::Response(e)) => {
            tracing::warn!("ResponseError: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
