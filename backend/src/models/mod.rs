//! Domain models for the reference tables

pub mod facility;
pub mod organization;
pub mod record;

// Re-exports
pub use facility::FacilityRecord;
pub use organization::OrganizationRecord;
pub use record::{parse_flag, EntityKind, RateComparison, ReferenceRecord, StaffingProfile};
