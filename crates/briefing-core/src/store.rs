//! Persistent collection of briefing records.
//!
//! The whole collection lives as one JSON array under a single storage key.
//! Every mutation is a read-modify-write of that array, so two processes
//! sharing a data directory get last-writer-wins semantics.
//!
//! Ordering contract: a record saved for the first time is prepended; a
//! record whose id is already present is replaced in place and keeps its
//! position.

use crate::error::Result;
use crate::ids;
use crate::paths;
use crate::record::BriefingRecord;
use crate::storage::KeyValueStorage;
use chrono::Utc;
use tracing::{debug, warn};

/// The persistence seam the wizard and dashboard depend on.
///
/// `upsert` and `remove` report failures through `Result` so callers can
/// choose to log and carry on; `list_all` never fails.
pub trait BriefingStore {
    fn list_all(&self) -> Vec<BriefingRecord>;
    fn upsert(&mut self, record: &BriefingRecord) -> Result<BriefingRecord>;
    fn remove(&mut self, id: &str) -> Result<()>;

    fn get(&self, id: &str) -> Option<BriefingRecord> {
        self.list_all().into_iter().find(|r| r.id() == Some(id))
    }
}

impl<T: BriefingStore + ?Sized> BriefingStore for &mut T {
    fn list_all(&self) -> Vec<BriefingRecord> {
        (**self).list_all()
    }

    fn upsert(&mut self, record: &BriefingRecord) -> Result<BriefingRecord> {
        (**self).upsert(record)
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        (**self).remove(id)
    }
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// One element of the stored array. Entries this version cannot decode are
/// carried as raw JSON and written back untouched.
#[derive(Debug, Clone)]
enum Entry {
    Record(BriefingRecord),
    Opaque(serde_json::Value),
}

impl Entry {
    fn decode(value: serde_json::Value) -> Self {
        match serde_json::from_value::<BriefingRecord>(value.clone()) {
            Ok(record) => Entry::Record(record),
            Err(e) => {
                let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                warn!(id, error = %e, "skipping unreadable project, it is kept as stored");
                Entry::Opaque(value)
            }
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Entry::Record(r) => r.id(),
            Entry::Opaque(v) => v.get("id").and_then(|v| v.as_str()),
        }
    }

    fn to_value(&self) -> Result<serde_json::Value> {
        match self {
            Entry::Record(r) => Ok(serde_json::to_value(r)?),
            Entry::Opaque(v) => Ok(v.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, paths::PROJECTS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn load(&self) -> Vec<Entry> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read stored projects");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values.into_iter().map(Entry::decode).collect(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to parse stored projects, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&mut self, entries: &[Entry]) -> Result<()> {
        let values = entries
            .iter()
            .map(Entry::to_value)
            .collect::<Result<Vec<_>>>()?;
        let data = serde_json::to_string(&values)?;
        self.storage.set(&self.key, &data)
    }
}

impl<S: KeyValueStorage> BriefingStore for RecordStore<S> {
    fn list_all(&self) -> Vec<BriefingRecord> {
        self.load()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Record(r) => Some(r),
                Entry::Opaque(_) => None,
            })
            .collect()
    }

    fn upsert(&mut self, record: &BriefingRecord) -> Result<BriefingRecord> {
        let mut entries = self.load();
        let id = match record.id() {
            Some(id) => id.to_string(),
            None => ids::generate_id(),
        };

        let existing = entries.iter().position(|e| e.id() == Some(id.as_str()));
        let previous = existing.and_then(|i| match &entries[i] {
            Entry::Record(r) => r.last_modified,
            Entry::Opaque(_) => None,
        });
        let now = Utc::now();
        let last_modified = match previous {
            Some(prev) if prev > now => prev,
            _ => now,
        };

        let mut saved = record.clone();
        saved.id = Some(id);
        saved.last_modified = Some(last_modified);

        match existing {
            Some(i) => entries[i] = Entry::Record(saved.clone()),
            None => entries.insert(0, Entry::Record(saved.clone())),
        }
        self.persist(&entries)?;
        debug!(id = ?saved.id, replaced = existing.is_some(), "saved project");
        Ok(saved)
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id() != Some(id));
        if entries.len() == before {
            return Ok(());
        }
        self.persist(&entries)?;
        debug!(id, "deleted project");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn named(name: &str) -> BriefingRecord {
        BriefingRecord {
            project_name: name.to_string(),
            ..BriefingRecord::template()
        }
    }

    fn strip_identity(mut r: BriefingRecord) -> BriefingRecord {
        r.id = None;
        r.last_modified = None;
        r
    }

    #[test]
    fn empty_storage_lists_nothing() {
        let store = RecordStore::new(MemoryStorage::new());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn upsert_assigns_id_and_timestamp() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let saved = store.upsert(&named("Launch")).unwrap();
        assert!(saved.is_persisted());
        assert!(ids::is_uuid(saved.id().unwrap()));
        assert!(saved.last_modified.is_some());
    }

    #[test]
    fn upsert_twice_with_returned_record_keeps_one_entry() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let first = store.upsert(&named("Launch")).unwrap();
        let second = store.upsert(&first).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.list_all().len(), 1);
        assert!(second.last_modified >= first.last_modified);
    }

    #[test]
    fn roundtrip_equals_input_modulo_identity() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let mut input = named("Launch");
        input.script.hook = "Você sabia?".to_string();
        input.libras = true;
        store.upsert(&input).unwrap();

        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(strip_identity(listed[0].clone()), input);
    }

    #[test]
    fn new_records_are_prepended_and_updates_keep_position() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let a = store.upsert(&named("A")).unwrap();
        let _b = store.upsert(&named("B")).unwrap();
        let _c = store.upsert(&named("C")).unwrap();

        let mut a2 = a.clone();
        a2.project_name = "A2".to_string();
        store.upsert(&a2).unwrap();

        let names: Vec<String> = store
            .list_all()
            .into_iter()
            .map(|r| r.project_name)
            .collect();
        assert_eq!(names, ["C", "B", "A2"]);
    }

    #[test]
    fn last_modified_never_moves_backwards() {
        let future = Utc::now() + chrono::Duration::days(1);
        let mut stored = named("Future");
        stored.id = Some("fixed".to_string());
        stored.last_modified = Some(future);
        let raw = serde_json::to_string(&vec![stored.clone()]).unwrap();

        let mut store =
            RecordStore::new(MemoryStorage::new().with_entry(paths::PROJECTS_KEY, &raw));
        let saved = store.upsert(&stored).unwrap();
        assert_eq!(saved.last_modified, Some(future));
    }

    #[test]
    fn remove_deletes_entry() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let a = store.upsert(&named("A")).unwrap();
        let b = store.upsert(&named("B")).unwrap();

        store.remove(a.id().unwrap()).unwrap();
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, b.id);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.upsert(&named("A")).unwrap();
        let before = store.list_all();

        store.remove("does-not-exist").unwrap();
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn remove_unknown_id_does_not_write() {
        let mut store = RecordStore::new(MemoryStorage::read_only());
        store.remove("does-not-exist").unwrap();
    }

    #[test]
    fn corrupt_payload_degrades_to_empty() {
        let storage = MemoryStorage::new().with_entry(paths::PROJECTS_KEY, "{not json");
        let mut store = RecordStore::new(storage);
        assert!(store.list_all().is_empty());

        // the next save replaces the corrupt payload
        store.upsert(&named("Fresh")).unwrap();
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn write_failure_is_reported_not_panicked() {
        let mut store = RecordStore::new(MemoryStorage::read_only());
        assert!(store.upsert(&named("A")).is_err());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let a = store.upsert(&named("A")).unwrap();
        assert_eq!(store.get(a.id().unwrap()).unwrap().project_name, "A");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let saved = {
            let mut store = RecordStore::new(FileStorage::new(dir.path()));
            store.upsert(&named("Persisted")).unwrap()
        };
        let store = RecordStore::new(FileStorage::new(dir.path()));
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert!(dir.path().join("artifex_projects.json").exists());
    }

    #[test]
    fn reads_collection_written_by_other_clients() {
        let raw = r#"[{"id":"legacy-1","lastModified":1700000000000,"projectName":"Antigo","videoType":"venda","duration":30,"script":{"hook":"Oi","pain":"","value":"","trust":"","cta":""}}]"#;
        let store = RecordStore::new(MemoryStorage::new().with_entry(paths::PROJECTS_KEY, raw));
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_name, "Antigo");
        assert_eq!(listed[0].duration, 30);
        assert_eq!(listed[0].script.hook, "Oi");
    }

    #[test]
    fn unreadable_entry_is_skipped_but_kept_on_save() {
        let raw = r#"[{"id":"good","projectName":"Keep me"},{"id":"odd","projectName":"Odd","videoType":"vlog"}]"#;
        let mut store =
            RecordStore::new(MemoryStorage::new().with_entry(paths::PROJECTS_KEY, raw));
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_name, "Keep me");

        store.upsert(&named("New")).unwrap();
        let names: Vec<String> = store
            .list_all()
            .into_iter()
            .map(|r| r.project_name)
            .collect();
        assert_eq!(names, ["New", "Keep me"]);

        let stored = store.storage_mut().get(paths::PROJECTS_KEY).unwrap().unwrap();
        let values: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[2]["id"], "odd");
        assert_eq!(values[2]["videoType"], "vlog");
    }

    #[test]
    fn null_optional_fields_read_as_defaults() {
        let raw = r#"[{"id":"good","projectName":"Keep me"},{"id":"nulls","projectName":"Nulls","avatarName":null,"avatarUrl":null,"extraCharacters":null,"hasMoreCharacters":null}]"#;
        let mut store =
            RecordStore::new(MemoryStorage::new().with_entry(paths::PROJECTS_KEY, raw));
        assert_eq!(store.list_all().len(), 2);

        store.upsert(&named("New")).unwrap();
        let listed = store.list_all();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[2].avatar_name, "");
        assert!(listed[2].extra_characters.is_empty());
    }

    #[test]
    fn unreadable_entry_can_be_removed_by_id() {
        let raw = r#"[{"id":"odd","videoType":"vlog"}]"#;
        let mut store =
            RecordStore::new(MemoryStorage::new().with_entry(paths::PROJECTS_KEY, raw));
        store.remove("odd").unwrap();
        let stored = store.storage_mut().get(paths::PROJECTS_KEY).unwrap().unwrap();
        assert_eq!(stored, "[]");
    }
}
