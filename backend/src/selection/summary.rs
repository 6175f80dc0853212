//! Display projections of resolved records

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{FacilityRecord, OrganizationRecord, ReferenceRecord, StaffingProfile};

/// Shown in place of a missing parent organization
pub const NOT_AVAILABLE: &str = "N/A";

/// A record that has a read-only display projection
pub trait DisplayProjection: ReferenceRecord {
    type Summary: Debug + Clone + PartialEq + Serialize;

    fn summary(&self) -> Self::Summary;

    fn staffing(&self) -> &StaffingProfile;
}

/// Read-only fields shown for a health system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub name: String,
    pub bed_size: i64,
    pub states: String,
    pub affiliated_hospitals: u32,
}

/// Read-only fields shown for a hospital
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitySummary {
    pub name: String,
    pub bed_size: i64,
    pub state: String,
    /// Parent health system name, or `"N/A"`
    pub parent_organization: String,
}

/// Bed size rounded for display; the record keeps full precision
pub fn display_beds(bed_size: f64) -> i64 {
    if bed_size.is_finite() {
        bed_size.round() as i64
    } else {
        0
    }
}

impl DisplayProjection for OrganizationRecord {
    type Summary = OrganizationSummary;

    fn summary(&self) -> OrganizationSummary {
        OrganizationSummary {
            name: self.name.clone(),
            bed_size: display_beds(self.bed_size),
            states: self.states.clone(),
            affiliated_hospitals: self.affiliated_hospitals,
        }
    }

    fn staffing(&self) -> &StaffingProfile {
        &self.staffing
    }
}

impl DisplayProjection for FacilityRecord {
    type Summary = FacilitySummary;

    fn summary(&self) -> FacilitySummary {
        FacilitySummary {
            name: self.name.clone(),
            bed_size: display_beds(self.bed_size),
            state: self.state.clone(),
            parent_organization: self
                .parent_organization
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    fn staffing(&self) -> &StaffingProfile {
        &self.staffing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(parent: Option<&str>, bed_size: f64) -> FacilityRecord {
        FacilityRecord {
            code: "390111".to_string(),
            name: "Riverside".to_string(),
            state: "PA".to_string(),
            bed_size,
            parent_organization: parent.map(str::to_string),
            staffing: StaffingProfile::default(),
        }
    }

    #[test]
    fn test_missing_parent_shows_not_available() {
        assert_eq!(facility(None, 10.0).summary().parent_organization, "N/A");
        assert_eq!(
            facility(Some("Keystone Health"), 10.0).summary().parent_organization,
            "Keystone Health"
        );
    }

    #[test]
    fn test_bed_size_rounded_for_display_only() {
        let record = facility(None, 249.6);
        assert_eq!(record.summary().bed_size, 250);
        assert_eq!(record.bed_size, 249.6);
    }
}
