//! Normalization of gateway thread records.
//!
//! The thread service is inconsistent about where it puts a thread's
//! identifier and name, so records are kept as raw JSON and the handful of
//! fields the UI needs are lifted out once, here.

use crate::ids::{IdGenerator, MappingStore, ReconciliationCache};
use serde_json::{Map, Value};
use tracing::warn;

/// Keys that may carry the identifier in a channel's thread listing, in precedence order.
const LIST_ID_KEYS: [&str; 3] = ["thread_id", "_id", "id"];
/// Keys that may carry the identifier in a single-thread response.
const DETAIL_ID_KEYS: [&str; 2] = ["_id", "id"];
const NAME_KEYS: [&str; 3] = ["title", "thread_name", "name"];

/// A thread as the UI sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreadRecord {
    /// Identifier as the gateway sent it
    pub id: Option<String>,
    /// Reconciled local identifier, canonical UUID text
    pub local_id: Option<String>,
    /// Display name, `title` then `thread_name` then `name`
    pub name: Option<String>,
    /// Channel the thread belongs to
    pub channel_id: Option<String>,
    /// The untouched gateway object
    pub raw: Map<String, Value>,
}

impl ThreadRecord {
    /// Identifier used to address the thread in follow-up calls and as a list key.
    ///
    /// Prefers the local id and falls back to the gateway id.
    pub fn key(&self) -> Option<&str> {
        self.local_id.as_deref().or(self.id.as_deref())
    }

    /// Whether `id` names this thread under either identifier.
    pub fn matches(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id) || self.local_id.as_deref() == Some(id)
    }

    /// Display name with the UI's placeholder for unnamed threads.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled thread")
    }

    fn from_object<S, G>(
        raw: Map<String, Value>,
        id_keys: &[&str],
        cache: &ReconciliationCache<S, G>,
    ) -> Self
    where
        S: MappingStore,
        G: IdGenerator,
    {
        let id = first_text(&raw, id_keys);
        let local_id = cache.resolve(id.as_deref());
        Self {
            name: first_text(&raw, &NAME_KEYS),
            channel_id: first_text(&raw, &["channel_id"]),
            id,
            local_id,
            raw,
        }
    }
}

/// Normalize a channel's thread listing.
///
/// Anything other than a JSON array normalizes to an empty list. Entries that
/// are not objects are dropped.
pub fn normalize_threads<S, G>(payload: Value, cache: &ReconciliationCache<S, G>) -> Vec<ThreadRecord>
where
    S: MappingStore,
    G: IdGenerator,
{
    let Value::Array(items) = payload else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(raw) => Some(ThreadRecord::from_object(raw, &LIST_ID_KEYS, cache)),
            other => {
                warn!(entry = %other, "skipping thread entry that is not an object");
                None
            }
        })
        .collect()
}

/// Normalize a single-thread response. Non-object payloads produce an empty record.
pub fn normalize_thread_detail<S, G>(payload: Value, cache: &ReconciliationCache<S, G>) -> ThreadRecord
where
    S: MappingStore,
    G: IdGenerator,
{
    match payload {
        Value::Object(raw) => ThreadRecord::from_object(raw, &DETAIL_ID_KEYS, cache),
        _ => ThreadRecord::default(),
    }
}

/// First key holding a non-empty string or a number, rendered as text.
fn first_text(raw: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}
