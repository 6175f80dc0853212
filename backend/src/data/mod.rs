//! Reference data: parsing, sources, and the load-once cache

pub mod cache;
pub mod loader;
pub mod source;
pub mod table;

pub use cache::ReferenceCache;
pub use loader::{parse_facilities, parse_organizations, DataLoadError, FacilityTable, OrganizationTable};
pub use source::{CsvFiles, InMemorySource, ReferenceSource};
pub use table::RecordTable;
