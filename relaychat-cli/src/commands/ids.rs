//! `relaychat ids ...`: the thread id table from the command line.

use anyhow::Result;
use shared::ids::{IdGenerator, MappingStore, ReconciliationCache};
use std::io::Write;

const NO_MAPPING: &str = "(none)";

/// Resolve each source id, creating mappings for ids seen for the first time.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn resolve<S, G>(
    cache: &ReconciliationCache<S, G>,
    source_ids: &[String],
    out: &mut impl Write,
) -> Result<()>
where
    S: MappingStore,
    G: IdGenerator,
{
    let resolved = cache.resolve_all(source_ids.iter().map(|id| Some(id.as_str())));
    for (source_id, local_id) in source_ids.iter().zip(resolved) {
        print_pair(out, source_id, local_id.as_deref())?;
    }
    Ok(())
}

/// Print existing mappings without creating new ones.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn lookup<S, G>(
    cache: &ReconciliationCache<S, G>,
    source_ids: &[String],
    out: &mut impl Write,
) -> Result<()>
where
    S: MappingStore,
    G: IdGenerator,
{
    for source_id in source_ids {
        print_pair(out, source_id, cache.lookup(Some(source_id.as_str())).as_deref())?;
    }
    Ok(())
}

/// Dump the table as pretty JSON.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn show<S, G>(cache: &ReconciliationCache<S, G>, out: &mut impl Write) -> Result<()>
where
    S: MappingStore,
    G: IdGenerator,
{
    writeln!(out, "{}", serde_json::to_string_pretty(&cache.entries())?)?;
    Ok(())
}

/// Remove the whole table.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn clear<S, G>(
    cache: &ReconciliationCache<S, G>,
    location: &str,
    out: &mut impl Write,
) -> Result<()>
where
    S: MappingStore,
    G: IdGenerator,
{
    cache.clear();
    writeln!(out, "Cleared thread id table at {location}")?;
    Ok(())
}

fn print_pair(out: &mut impl Write, source_id: &str, local_id: Option<&str>) -> Result<()> {
    writeln!(out, "{source_id} -> {}", local_id.unwrap_or(NO_MAPPING))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ids::{MemoryStore, SeededIdGenerator};

    fn output(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_resolve_prints_one_line_per_id() {
        let cache = ReconciliationCache::with_generator(MemoryStore::new(), SeededIdGenerator::new(9));
        let printed = output(|out| {
            resolve(
                &cache,
                &ids(&["507f1f77bcf86cd799439011", "2eb511a1-5f38-41a7-8e75-3f4e65f4942e", ""]),
                out,
            )
        });
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 3);
        let expected = cache.lookup(Some("507f1f77bcf86cd799439011")).unwrap();
        assert_eq!(lines[0], format!("507f1f77bcf86cd799439011 -> {expected}"));
        assert_eq!(
            lines[1],
            "2eb511a1-5f38-41a7-8e75-3f4e65f4942e -> 2eb511a1-5f38-41a7-8e75-3f4e65f4942e"
        );
        assert_eq!(lines[2], " -> (none)");
    }

    #[test]
    fn test_lookup_does_not_create() {
        let store = MemoryStore::new();
        let cache = ReconciliationCache::new(&store);
        let printed = output(|out| lookup(&cache, &ids(&["abc"]), out));
        assert_eq!(printed, "abc -> (none)\n");
        assert_eq!(store.contents(), None);
    }

    #[test]
    fn test_show_prints_table() {
        let cache = ReconciliationCache::new(MemoryStore::with_contents(r#"{"abc":"local"}"#));
        let printed = output(|out| show(&cache, out));
        let table: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(table["abc"], "local");
    }

    #[test]
    fn test_show_empty_table() {
        let cache = ReconciliationCache::new(MemoryStore::new());
        assert_eq!(output(|out| show(&cache, out)).trim(), "{}");
    }

    #[test]
    fn test_clear_reports_location() {
        let store = MemoryStore::with_contents(r#"{"abc":"local"}"#);
        let cache = ReconciliationCache::new(&store);
        let printed = output(|out| clear(&cache, "memory", out));
        assert_eq!(printed, "Cleared thread id table at memory\n");
        assert_eq!(store.contents(), None);
    }
}
