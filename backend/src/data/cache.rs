//! Load-once reference cache
//!
//! Each table is parsed on first request and then served by reference for
//! the cache's lifetime. The cache is an ordinary value: create one per
//! process (or per test) at a defined initialization point and pass it to
//! whatever needs lookups.
//!
//! # Critical Invariants
//!
//! 1. **Single Parse**: A successfully loaded table is never parsed again
//! 2. **Stable Identity**: Repeated loads return the same table instance
//! 3. **No Partial State**: A failed load caches nothing; the next call retries

use once_cell::sync::OnceCell;
use tracing::debug;

use super::loader::{DataLoadError, FacilityTable, OrganizationTable};
use super::source::{CsvFiles, ReferenceSource};
use crate::config::DataPaths;
use crate::selection::EntitySelector;

/// Reference tables cached for the lifetime of the value
///
/// # Example
/// ```
/// use flo_finance_core::{InMemorySource, ReferenceCache};
///
/// let source = InMemorySource::new(
///     "Health_System_ID,Health_System_Name,Bed_Size,State(s),Affiliated_Hospitals,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need\n\
///      HS1,General Health System,850,OH,4,45.00,90.00,12.5\n",
///     "CCN#,Hospital_Name,State,Bed_Size,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need\n\
///      360001,Akron Medical,OH,210,41.00,80.00,6.0\n",
/// );
/// let cache = ReferenceCache::new(source);
///
/// let first = cache.load_organizations().unwrap();
/// let second = cache.load_organizations().unwrap();
/// assert!(std::ptr::eq(first, second));
/// assert_eq!(first.len(), 1);
/// ```
#[derive(Debug)]
pub struct ReferenceCache<S> {
    source: S,
    organizations: OnceCell<OrganizationTable>,
    facilities: OnceCell<FacilityTable>,
}

impl<S: ReferenceSource> ReferenceCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            organizations: OnceCell::new(),
            facilities: OnceCell::new(),
        }
    }

    /// Organizations table, parsed on first call
    ///
    /// # Errors
    /// Any `DataLoadError` from the source; nothing is cached on failure.
    pub fn load_organizations(&self) -> Result<&OrganizationTable, DataLoadError> {
        self.organizations.get_or_try_init(|| {
            debug!("Populating organization cache");
            self.source.read_organizations()
        })
    }

    /// Facilities table, parsed on first call
    ///
    /// # Errors
    /// Any `DataLoadError` from the source; nothing is cached on failure.
    pub fn load_facilities(&self) -> Result<&FacilityTable, DataLoadError> {
        self.facilities.get_or_try_init(|| {
            debug!("Populating facility cache");
            self.source.read_facilities()
        })
    }

    /// Load both tables and return a selector over them
    pub fn selector(&self) -> Result<EntitySelector<'_>, DataLoadError> {
        Ok(EntitySelector::new(
            self.load_organizations()?,
            self.load_facilities()?,
        ))
    }

    pub fn is_loaded(&self) -> bool {
        self.organizations.get().is_some() && self.facilities.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl ReferenceCache<CsvFiles> {
    /// Cache over the CSV files named in configuration
    pub fn from_paths(paths: &DataPaths) -> Self {
        ReferenceCache::new(CsvFiles::from(paths))
    }
}
