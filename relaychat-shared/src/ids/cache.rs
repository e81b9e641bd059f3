//! The reconciliation cache itself.

use super::canonical::is_canonical;
use super::generator::{IdGenerator, RandomIdGenerator};
use super::store::MappingStore;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Storage key the browser client has always used for the table.
pub const DEFAULT_STORAGE_KEY: &str = "threadUuidMap";

/// Persisted `source id -> local id` table.
pub type MappingTable = BTreeMap<String, String>;

/// Maps gateway identifiers to stable local UUIDs.
///
/// Every operation is best effort against the store: unreadable or malformed
/// contents read as an empty table and failed writes are logged, so callers
/// always get a usable id back. A failed write only means the id will not be
/// remembered next time. Entries whose value is not a string are skipped and
/// the remaining ones still resolve.
///
/// The table is read, modified and written back whole on each miss. That is
/// not atomic across processes; two writers sharing one store can each
/// generate an id for the same source id and the last save wins.
#[derive(Debug)]
pub struct ReconciliationCache<S, G = RandomIdGenerator> {
    store: S,
    generator: G,
}

impl<S: MappingStore> ReconciliationCache<S> {
    /// Cache backed by `store`, generating random v4 UUIDs.
    pub fn new(store: S) -> Self {
        Self::with_generator(store, RandomIdGenerator)
    }
}

impl<S: MappingStore, G: IdGenerator> ReconciliationCache<S, G> {
    /// Cache backed by `store`, drawing fresh ids from `generator`.
    pub fn with_generator(store: S, generator: G) -> Self {
        Self { store, generator }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the local id for `source_id`, creating and persisting one on first sight.
    ///
    /// * `None` or an empty string yields `None`.
    /// * Canonical UUID text is returned unchanged and never stored.
    /// * Anything else is looked up in the table; misses get a fresh id.
    pub fn resolve(&self, source_id: Option<&str>) -> Option<String> {
        let source_id = non_empty(source_id)?;
        if is_canonical(source_id) {
            return Some(source_id.to_owned());
        }

        let mut table = self.load_table();
        if let Some(local_id) = stored(&table, source_id) {
            return Some(local_id.to_owned());
        }

        let local_id = self.assign(&mut table, source_id);
        self.persist(&table);
        Some(local_id)
    }

    /// Resolve a batch of ids with a single load and at most one save.
    ///
    /// Results line up with the input order; repeated source ids within the
    /// batch share one local id.
    pub fn resolve_all<'a, I>(&self, source_ids: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut table: Option<MappingTable> = None;
        let mut dirty = false;

        let resolved = source_ids
            .into_iter()
            .map(|source_id| {
                let source_id = non_empty(source_id)?;
                if is_canonical(source_id) {
                    return Some(source_id.to_owned());
                }
                let table = table.get_or_insert_with(|| self.load_table());
                if let Some(local_id) = stored(table, source_id) {
                    return Some(local_id.to_owned());
                }
                dirty = true;
                Some(self.assign(table, source_id))
            })
            .collect();

        if dirty && let Some(table) = &table {
            self.persist(table);
        }
        resolved
    }

    /// Like [`resolve`](Self::resolve) but never generates or persists anything.
    pub fn lookup(&self, source_id: Option<&str>) -> Option<String> {
        let source_id = non_empty(source_id)?;
        if is_canonical(source_id) {
            return Some(source_id.to_owned());
        }
        stored(&self.load_table(), source_id).map(str::to_owned)
    }

    /// Snapshot of the persisted table.
    pub fn entries(&self) -> MappingTable {
        self.load_table()
    }

    /// Drop the whole persisted table. Safe to call when nothing is stored.
    pub fn clear(&self) {
        match self.store.remove() {
            Ok(()) => debug!("cleared thread id mappings"),
            Err(err) => warn!(error = %err, "failed to clear thread id mappings"),
        }
    }

    fn assign(&self, table: &mut MappingTable, source_id: &str) -> String {
        let local_id = self.generator.generate();
        debug!(source_id, local_id = %local_id, "assigned local thread id");
        table.insert(source_id.to_owned(), local_id.clone());
        local_id
    }

    fn load_table(&self) -> MappingTable {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return MappingTable::new(),
            Err(err) => {
                warn!(error = %err, "failed to read thread id mappings");
                return MappingTable::new();
            }
        };
        if raw.is_empty() {
            return MappingTable::new();
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => string_entries(entries),
            Ok(other) => {
                warn!(
                    kind = json_kind(&other),
                    "thread id mappings are not an object, starting empty"
                );
                MappingTable::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to parse thread id mappings, starting empty");
                MappingTable::new()
            }
        }
    }

    fn persist(&self, table: &MappingTable) {
        let serialized = match serde_json::to_string(table) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize thread id mappings");
                return;
            }
        };
        if let Err(err) = self.store.save(&serialized) {
            warn!(error = %err, "failed to save thread id mappings");
        }
    }
}

// Non-string values are dropped; the remaining entries survive.
fn string_entries(entries: Map<String, Value>) -> MappingTable {
    entries
        .into_iter()
        .filter_map(|(source_id, local_id)| match local_id {
            Value::String(local_id) => Some((source_id, local_id)),
            other => {
                warn!(
                    source_id = %source_id,
                    kind = json_kind(&other),
                    "dropping thread id mapping with a non-string value"
                );
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn non_empty(source_id: Option<&str>) -> Option<&str> {
    source_id.filter(|id| !id.is_empty())
}

// An empty stored value counts as a miss.
fn stored<'t>(table: &'t MappingTable, source_id: &str) -> Option<&'t str> {
    table
        .get(source_id)
        .map(String::as_str)
        .filter(|local_id| !local_id.is_empty())
}
