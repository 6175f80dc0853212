//! Organization (health system) record

use serde::{Deserialize, Serialize};

use super::record::{EntityKind, ReferenceRecord, StaffingProfile};

/// A health system row from the organizations table
///
/// # Example
/// ```
/// use flo_finance_core::{OrganizationRecord, ReferenceRecord, StaffingProfile};
///
/// let org = OrganizationRecord {
///     id: "HS-001".to_string(),
///     name: "General Health System".to_string(),
///     bed_size: 1_250.0,
///     states: "OH, PA".to_string(),
///     affiliated_hospitals: 9,
///     staffing: StaffingProfile::default(),
/// };
/// assert_eq!(org.key(), "HS-001");
/// assert_eq!(org.display_name(), "General Health System");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Unique organization ID (`Health_System_ID`)
    pub id: String,

    pub name: String,

    /// Total licensed beds, kept at full precision
    pub bed_size: f64,

    /// States the system operates in, possibly comma-joined
    pub states: String,

    pub affiliated_hospitals: u32,

    pub staffing: StaffingProfile,
}

impl ReferenceRecord for OrganizationRecord {
    const KIND: EntityKind = EntityKind::Organization;

    fn key(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
