use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::types::IncidentRecord;
use crate::error::MonitorResult;

/// Append-only JSONL incident log.
///
/// Every append opens the file, writes one complete line and closes it again,
/// so repeated runs can share the same log. Concurrent writers from several
/// processes are not coordinated.
#[derive(Debug, Clone)]
pub struct IncidentStore {
    path: PathBuf,
}

impl IncidentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. IO and serialization errors propagate.
    pub fn append(&self, record: &IncidentRecord) -> MonitorResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        // Single write per record
        file.write_all(line.as_bytes())?;
        file.flush()?;

        log::info!(
            "Incident appended to {:?}: {} ({})",
            self.path,
            record.incident_type,
            record.severity
        );
        Ok(())
    }

    /// Last `limit` records, oldest first. Missing log -> empty.
    pub fn read_recent(&self, limit: usize) -> MonitorResult<Vec<IncidentRecord>> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }

    /// Every parseable record in append order
    pub fn read_all(&self) -> MonitorResult<Vec<IncidentRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        // Raw bytes: a torn multibyte char must not fail the whole read
        for (idx, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<IncidentRecord>(&line) {
                Ok(record) => records.push(record),
                // Torn trailing line after a crash, or foreign content
                Err(e) => log::warn!("Skipping unreadable incident at line {}: {}", idx + 1, e),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::incident::types::{IncidentStatus, Severity};
    use serde_json::{json, Map, Value};
    use tempfile::tempdir;

    fn record(kind: &str, severity: Severity, n: i64) -> IncidentRecord {
        let mut details = Map::new();
        details.insert("n".to_string(), Value::from(n));
        IncidentRecord::new(kind, severity, details)
    }

    #[test]
    fn test_read_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("incident").join("incident_log.jsonl"));
        assert!(store.read_recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_append_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("nested").join("log.jsonl"));

        store.append(&record("Data Drift", Severity::P2, 0)).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_round_trip_keeps_append_order() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));

        let written: Vec<IncidentRecord> = (0..5)
            .map(|n| record("Data Drift", Severity::P3, n))
            .collect();
        for r in &written {
            store.append(r).unwrap();
        }

        let read = store.read_recent(5).unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn test_read_recent_returns_last_window() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));

        // Severity order must not affect the window
        store.append(&record("a", Severity::P1, 0)).unwrap();
        store.append(&record("b", Severity::P4, 1)).unwrap();
        store.append(&record("c", Severity::P2, 2)).unwrap();

        let recent = store.read_recent(2).unwrap();
        let kinds: Vec<&str> = recent.iter().map(|r| r.incident_type.as_str()).collect();
        assert_eq!(kinds, vec!["b", "c"]);

        assert_eq!(store.read_recent(100).unwrap().len(), 3);
        assert!(store.read_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_appended_records_are_immutable() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));

        let open = record("Missing Features", Severity::P2, 7);
        assert_eq!(open.status, IncidentStatus::Open);
        store.append(&open).unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();

        store.read_recent(10).unwrap();
        let again = store.read_recent(10).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(again, vec![open]);
    }

    #[test]
    fn test_one_json_object_per_line() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));
        for n in 0..3 {
            store.append(&record("Data Drift", Severity::P1, n)).unwrap();
        }

        let content = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["severity"], json!("P1"));
        }
    }

    #[test]
    fn test_tolerates_torn_trailing_line() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));
        store.append(&record("Data Drift", Severity::P1, 1)).unwrap();

        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        write!(file, "{{\"timestamp\": \"2025-11-22T00:0").unwrap();

        let records = store.read_recent(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].details["n"], json!(1));
    }

    #[test]
    fn test_tolerates_torn_multibyte_char() {
        let dir = tempdir().unwrap();
        let store = IncidentStore::new(dir.path().join("log.jsonl"));

        let mut details = Map::new();
        details.insert("feature".to_string(), json!("montant_é"));
        store.append(&IncidentRecord::new("Data Drift", Severity::P2, details)).unwrap();

        // Second record cut after the first byte of 'é'
        let line = serde_json::to_string(&record("montant_é", Severity::P1, 2)).unwrap();
        let cut = line.find('é').unwrap() + 1;
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(&line.as_bytes()[..cut]).unwrap();

        let records = store.read_recent(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].details["feature"], json!("montant_é"));
    }
}
