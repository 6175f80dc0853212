//! Facility (hospital) record

use serde::{Deserialize, Serialize};

use super::record::{EntityKind, ReferenceRecord, StaffingProfile};

/// A hospital row from the facilities table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Unique facility code (`CCN#`), kept as text so leading zeros survive
    pub code: String,

    pub name: String,

    pub state: String,

    /// Total licensed beds, kept at full precision
    pub bed_size: f64,

    /// Name of the parent health system, if the hospital belongs to one
    pub parent_organization: Option<String>,

    pub staffing: StaffingProfile,
}

impl ReferenceRecord for FacilityRecord {
    const KIND: EntityKind = EntityKind::Facility;

    fn key(&self) -> &str {
        &self.code
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
