//! Where reference tables come from
//!
//! [`ReferenceSource`] is the seam between the cache and the raw data. The
//! production source reads two CSV files; tests and embedders can serve
//! CSV text straight from memory.

use std::path::{Path, PathBuf};

use super::loader::{parse_facilities, parse_organizations, DataLoadError, FacilityTable, OrganizationTable};
use crate::config::DataPaths;
use crate::models::EntityKind;

/// Supplies freshly parsed reference tables
pub trait ReferenceSource: Send + Sync {
    /// Parse the organizations (health systems) table
    fn read_organizations(&self) -> Result<OrganizationTable, DataLoadError>;

    /// Parse the facilities (hospitals) table
    fn read_facilities(&self) -> Result<FacilityTable, DataLoadError>;
}

/// Reference tables stored as two CSV files on disk
#[derive(Debug, Clone)]
pub struct CsvFiles {
    organizations: PathBuf,
    facilities: PathBuf,
}

impl CsvFiles {
    pub fn new(organizations: impl Into<PathBuf>, facilities: impl Into<PathBuf>) -> Self {
        Self {
            organizations: organizations.into(),
            facilities: facilities.into(),
        }
    }

    pub fn organizations_path(&self) -> &Path {
        &self.organizations
    }

    pub fn facilities_path(&self) -> &Path {
        &self.facilities
    }
}

impl From<&DataPaths> for CsvFiles {
    fn from(paths: &DataPaths) -> Self {
        CsvFiles::new(&paths.organizations, &paths.facilities)
    }
}

fn read_file(kind: EntityKind, path: &Path) -> Result<Vec<u8>, DataLoadError> {
    std::fs::read(path).map_err(|source| DataLoadError::Unreadable {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

impl ReferenceSource for CsvFiles {
    fn read_organizations(&self) -> Result<OrganizationTable, DataLoadError> {
        let bytes = read_file(EntityKind::Organization, &self.organizations)?;
        parse_organizations(&bytes)
    }

    fn read_facilities(&self) -> Result<FacilityTable, DataLoadError> {
        let bytes = read_file(EntityKind::Facility, &self.facilities)?;
        parse_facilities(&bytes)
    }
}

/// Reference tables held as CSV text in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub organizations: String,
    pub facilities: String,
}

impl InMemorySource {
    pub fn new(organizations: impl Into<String>, facilities: impl Into<String>) -> Self {
        Self {
            organizations: organizations.into(),
            facilities: facilities.into(),
        }
    }
}

impl ReferenceSource for InMemorySource {
    fn read_organizations(&self) -> Result<OrganizationTable, DataLoadError> {
        parse_organizations(self.organizations.as_bytes())
    }

    fn read_facilities(&self) -> Result<FacilityTable, DataLoadError> {
        parse_facilities(self.facilities.as_bytes())
    }
}
