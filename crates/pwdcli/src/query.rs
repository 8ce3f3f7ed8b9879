//! Query engine - listing, append, delete and search over the record store
//!
//! Every operation reloads the full store, works on the in-memory copy, and
//! writes the whole result back when it mutates. Indices always refer to the
//! sequence as loaded by that call.

use tracing::info;

use crate::error::{Result, StoreError};
use crate::record::{fold_case, format_line, Record};
use crate::store::RecordStore;

/// A search hit: a record together with its current index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Zero-based position in the store at search time
    pub index: usize,
    pub record: Record,
}

impl Match {
    /// Listing line for this hit (`[<index>] Website: ...`)
    pub fn line(&self) -> String {
        format_line(self.index, &self.record)
    }
}

/// User-facing operations built on a [`RecordStore`]
pub struct QueryEngine {
    store: RecordStore,
}

impl QueryEngine {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Every record, in stored order
    pub fn records(&self) -> Result<Vec<Record>> {
        self.store.load_all()
    }

    /// One listing line per record, indexed from zero
    pub fn list_all(&self) -> Result<Vec<String>> {
        let records = self.store.load_all()?;

        Ok(records
            .iter()
            .enumerate()
            .map(|(index, record)| format_line(index, record))
            .collect())
    }

    /// Append a record at the end of the store.
    ///
    /// Fields are stored as given, empty strings included.
    pub fn append(&self, record: Record) -> Result<()> {
        let mut records = self.store.load_all()?;
        records.push(record);
        self.store.replace_all(&records)?;

        info!(count = records.len(), "appended entry");
        Ok(())
    }

    /// Remove the record at `index`, shifting later records down by one.
    ///
    /// Fails with [`StoreError::IndexOutOfRange`] when `index` is negative or
    /// past the end, in which case the store is not written.
    pub fn delete_at(&self, index: i64) -> Result<bool> {
        let mut records = self.store.load_all()?;

        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i < records.len())
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: records.len(),
            })?;

        records.remove(position);
        self.store.replace_all(&records)?;

        info!(index = position, remaining = records.len(), "deleted entry");
        Ok(true)
    }

    /// Records where `keyword` appears in any field, ignoring case.
    ///
    /// Hits come back in ascending index order. An empty keyword matches
    /// every record; no hits is an empty vector, not an error.
    pub fn search(&self, keyword: &str) -> Result<Vec<Match>> {
        let records = self.store.load_all()?;
        let needle = fold_case(keyword);

        Ok(records
            .into_iter()
            .enumerate()
            .filter(|(_, record)| record.matches(&needle))
            .map(|(index, record)| Match { index, record })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_engine() -> (QueryEngine, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = RecordStore::new(&temp.path().join(".passwords.json"));
        store.ensure_initialized().unwrap();
        (QueryEngine::new(store), temp)
    }

    fn abc() -> Vec<Record> {
        vec![
            Record::new("a", "u1", "e1", "p1"),
            Record::new("b", "u2", "e2", "p2"),
            Record::new("c", "u3", "e3", "p3"),
        ]
    }

    fn seeded(records: &[Record]) -> (QueryEngine, TempDir) {
        let (engine, temp) = temp_engine();
        for record in records {
            engine.append(record.clone()).unwrap();
        }
        (engine, temp)
    }

    #[test]
    fn test_empty_store() {
        let (engine, _temp) = temp_engine();

        assert!(engine.list_all().unwrap().is_empty());
        assert!(engine.search("anything").unwrap().is_empty());
        assert!(engine.search("").unwrap().is_empty());
    }

    #[test]
    fn test_append_and_list() {
        let (engine, _temp) = temp_engine();
        engine
            .append(Record::new("example.com", "user", "a@b.com", "123"))
            .unwrap();

        let lines = engine.list_all().unwrap();
        assert_eq!(
            lines,
            vec!["[0] Website: example.com Username: user Email: a@b.com Password: 123"]
        );
    }

    #[test]
    fn test_append_keeps_call_order() {
        let (engine, _temp) = seeded(&abc());
        assert_eq!(engine.records().unwrap(), abc());

        let lines = engine.list_all().unwrap();
        assert!(lines[0].starts_with("[0] Website: a "));
        assert!(lines[1].starts_with("[1] Website: b "));
        assert!(lines[2].starts_with("[2] Website: c "));
    }

    #[test]
    fn test_append_allows_empty_fields_and_duplicates() {
        let (engine, _temp) = temp_engine();
        let blank = Record::new("", "", "", "");

        engine.append(blank.clone()).unwrap();
        engine.append(blank.clone()).unwrap();

        assert_eq!(engine.records().unwrap(), vec![blank.clone(), blank]);
    }

    #[test]
    fn test_delete_shifts_later_records() {
        let (engine, _temp) = seeded(&abc());

        assert!(engine.delete_at(1).unwrap());

        let records = engine.records().unwrap();
        assert_eq!(records, vec![abc()[0].clone(), abc()[2].clone()]);

        let hits = engine.search("c").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].record.website, "c");
    }

    #[test]
    fn test_delete_first_and_last() {
        let (engine, _temp) = seeded(&abc());

        engine.delete_at(2).unwrap();
        engine.delete_at(0).unwrap();

        assert_eq!(engine.records().unwrap(), vec![abc()[1].clone()]);

        engine.delete_at(0).unwrap();
        assert!(engine.records().unwrap().is_empty());
        assert_eq!(fs::read_to_string(engine.store().path()).unwrap(), "[]");
    }

    #[test]
    fn test_delete_out_of_range() {
        let (engine, _temp) = seeded(&abc());
        let before = fs::read_to_string(engine.store().path()).unwrap();

        for index in [-1, 3, 10, i64::MIN, i64::MAX] {
            let err = engine.delete_at(index).unwrap_err();
            assert!(
                matches!(err, StoreError::IndexOutOfRange { len: 3, .. }),
                "unexpected error for {}: {}",
                index,
                err
            );
            assert!(err.to_string().starts_with("index out of range"));
        }

        assert_eq!(fs::read_to_string(engine.store().path()).unwrap(), before);
    }

    #[test]
    fn test_delete_on_empty_store() {
        let (engine, _temp) = temp_engine();
        let err = engine.delete_at(0).unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_search_any_field() {
        let (engine, _temp) = seeded(&[
            Record::new("google.com", "user1", "a@b.com", "pass1"),
            Record::new("example.com", "user2", "c@d.com", "pass2"),
        ]);

        let hits = engine.search("google").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 0);

        let hits = engine.search("user2").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);

        let hits = engine.search("c@d").unwrap();
        assert_eq!(hits[0].record.website, "example.com");

        let hits = engine.search("pass").unwrap();
        assert_eq!(
            hits.iter().map(|m| m.index).collect::<Vec<_>>(),
            vec![0, 1]
        );

        assert!(engine.search("notfound").unwrap().is_empty());
    }

    #[test]
    fn test_search_ignores_case() {
        let (engine, _temp) = seeded(&[
            Record::new("google.com", "user1", "a@b.com", "pass1"),
            Record::new("Example.COM", "user2", "c@d.com", "PaSs2"),
        ]);

        let hits = engine.search("GOOGLE").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.website, "google.com");

        let hits = engine.search("example").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);

        assert_eq!(engine.search("pass2").unwrap().len(), 1);
    }

    #[test]
    fn test_search_final_sigma() {
        let (engine, _temp) = seeded(&[
            Record::new("example.com", "u", "e", "p"),
            Record::new("ΟΔΟΣ", "u", "e", "p"),
        ]);

        for keyword in ["Σ", "σ", "ΟΣ", "οδο"] {
            let hits = engine.search(keyword).unwrap();
            assert_eq!(hits.len(), 1, "keyword {:?}", keyword);
            assert_eq!(hits[0].index, 1);
        }
    }

    #[test]
    fn test_search_empty_keyword_matches_all() {
        let (engine, _temp) = seeded(&abc());

        let hits = engine.search("").unwrap();
        assert_eq!(
            hits.iter().map(|m| m.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(hits[2].line(), "[2] Website: c Username: u3 Email: e3 Password: p3");
    }

    #[test]
    fn test_errors_propagate() {
        let (engine, _temp) = temp_engine();
        fs::write(engine.store().path(), "garbage").unwrap();

        assert!(engine.list_all().unwrap_err().is_format());
        assert!(engine.search("x").unwrap_err().is_format());
        assert!(engine.delete_at(0).unwrap_err().is_format());
        assert!(engine
            .append(Record::new("a", "b", "c", "d"))
            .unwrap_err()
            .is_format());

        fs::remove_file(engine.store().path()).unwrap();
        assert!(engine.list_all().unwrap_err().is_io());
    }
}
