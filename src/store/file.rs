//! # CSV File Store

use std::fs;
use std::path::{Path, PathBuf};

use super::codec;
use super::errors::{StoreError, StoreResult};
use super::record::Record;

/// A CSV file bound to one resource
///
/// Reads hit the file fresh every time and writes replace it whole; the only
/// persistent state is the file contents, and the last write wins.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store bound to a file path. The file may not exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records. A missing file is an empty resource, not an error.
    pub fn read(&self) -> StoreResult<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        Ok(codec::parse(&content))
    }

    /// Overwrite the file with the given records. An empty slice truncates.
    pub fn write(&self, records: &[Record]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        fs::write(&self.path, codec::serialize(records)).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Merge new records after the existing ones and write the result.
    pub fn append_and_merge(&self, new_records: &[Record]) -> StoreResult<()> {
        let mut records = self.read()?;
        records.extend_from_slice(new_records);
        self.write(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("data.csv"));

        let records = vec![Record::from_pairs([("Name", "Ann"), ("Age", "30")])];
        store.write(&records).unwrap();

        assert_eq!(store.read().unwrap(), records);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("nope.csv"));

        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("a/b/data.csv"));

        store
            .write(&[Record::from_pairs([("A", "1")])])
            .unwrap();

        assert_eq!(store.read().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_write_truncates() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("data.csv"));

        store.write(&[Record::from_pairs([("A", "1")])]).unwrap();
        store.write(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_merge() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("data.csv"));

        store
            .write(&[Record::from_pairs([("A", "1"), ("B", "2")])])
            .unwrap();
        store
            .append_and_merge(&[Record::from_pairs([("A", "3"), ("B", "4")])])
            .unwrap();

        let records = store.read().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("A"), Some("3"));
    }

    #[test]
    fn test_append_to_missing_file_creates_it() {
        let temp = TempDir::new().unwrap();
        let store = CsvStore::new(temp.path().join("data.csv"));

        store
            .append_and_merge(&[Record::from_pairs([("A", "1")])])
            .unwrap();

        assert_eq!(store.read().unwrap().len(), 1);
    }
}
