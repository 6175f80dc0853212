//! Keyed, name-ordered reference table
//!
//! # Critical Invariants
//!
//! 1. **Name Order**: Iteration follows display name ascending (case-sensitive,
//!    stable for equal names)
//! 2. **Key Uniqueness**: Each key appears exactly once
//! 3. **Name Resolution**: When display names collide, the later record in
//!    name order owns the name (a known data-quality risk in the source
//!    tables, not a feature)
//! 4. **Immutability**: No write path exists after construction

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::loader::DataLoadError;
use crate::models::ReferenceRecord;

/// Reference records indexed by unique key, ordered by display name
///
/// # Example
/// ```
/// use flo_finance_core::{FacilityRecord, RecordTable, StaffingProfile};
///
/// let row = |code: &str, name: &str| FacilityRecord {
///     code: code.to_string(),
///     name: name.to_string(),
///     state: "OH".to_string(),
///     bed_size: 100.0,
///     parent_organization: None,
///     staffing: StaffingProfile::default(),
/// };
///
/// let table = RecordTable::from_rows(
///     vec![row("360002", "Summit Hospital"), row("360001", "Akron Medical")],
///     String::new(),
/// )
/// .unwrap();
///
/// let names: Vec<&str> = table.iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, vec!["Akron Medical", "Summit Hospital"]);
/// assert_eq!(table.key_for_name("Summit Hospital"), Some("360002"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordTable<R> {
    /// Records keyed by unique key, in display-name order
    records: IndexMap<String, R>,

    /// Display name → key (last record in name order wins)
    by_name: HashMap<String, String>,

    /// SHA-256 (hex) of the bytes the table was parsed from
    fingerprint: String,
}

impl<R: ReferenceRecord> RecordTable<R> {
    /// Build a table from parsed rows
    ///
    /// Rows are stable-sorted by display name before indexing.
    ///
    /// # Errors
    /// `DataLoadError::DuplicateKey` if two rows share a key.
    pub fn from_rows(mut rows: Vec<R>, fingerprint: String) -> Result<Self, DataLoadError> {
        rows.sort_by(|a, b| a.display_name().cmp(b.display_name()));

        let mut records = IndexMap::with_capacity(rows.len());
        let mut by_name = HashMap::with_capacity(rows.len());

        for row in rows {
            let key = row.key().to_string();
            if records.contains_key(&key) {
                return Err(DataLoadError::DuplicateKey { kind: R::KIND, key });
            }
            by_name.insert(row.display_name().to_string(), key.clone());
            records.insert(key, row);
        }

        Ok(Self {
            records,
            by_name,
            fingerprint,
        })
    }

    /// Get a record by its unique key
    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    /// Resolve a display name to its key
    pub fn key_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Resolve a display name to its record
    pub fn get_by_name(&self, name: &str) -> Option<&R> {
        self.key_for_name(name).and_then(|key| self.get(key))
    }

    /// Records in display-name order
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    /// Keys in display-name order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 (hex) of the source bytes
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Hex SHA-256 of raw source bytes
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityKind, OrganizationRecord, StaffingProfile};

    fn org(id: &str, name: &str) -> OrganizationRecord {
        OrganizationRecord {
            id: id.to_string(),
            name: name.to_string(),
            bed_size: 0.0,
            states: String::new(),
            affiliated_hospitals: 0,
            staffing: StaffingProfile::default(),
        }
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let table = RecordTable::from_rows(
            vec![org("1", "beta"), org("2", "Alpha"), org("3", "Beta")],
            String::new(),
        )
        .unwrap();

        let names: Vec<&str> = table.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "beta"]);
    }

    #[test]
    fn test_duplicate_name_later_record_wins() {
        // Stable sort keeps source order for equal names, so "B" is later.
        let table = RecordTable::from_rows(
            vec![org("A", "Same Name"), org("B", "Same Name")],
            String::new(),
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.key_for_name("Same Name"), Some("B"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = RecordTable::from_rows(vec![org("X", "One"), org("X", "Two")], String::new())
            .unwrap_err();

        match err {
            DataLoadError::DuplicateKey { kind, key } => {
                assert_eq!(kind, EntityKind::Organization);
                assert_eq!(key, "X");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint_bytes(b"Health_System_ID\n");
        let b = fingerprint_bytes(b"Health_System_ID\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, fingerprint_bytes(b"CCN#\n"));
    }
}
