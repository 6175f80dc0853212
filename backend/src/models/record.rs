//! Shared record traits and staffing fields
//!
//! Both reference tables carry the same staffing figures (rates, RN need,
//! agency usage, and the agency-vs-staff flag). They live in
//! [`StaffingProfile`] so organizations and facilities share one shape.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two entity kinds lookups run over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Health system
    Organization,
    /// Hospital
    Facility,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Organization => write!(f, "health system"),
            EntityKind::Facility => write!(f, "hospital"),
        }
    }
}

/// A row of reference data that can be indexed by key and listed by name
pub trait ReferenceRecord {
    /// Which table the record belongs to
    const KIND: EntityKind;

    /// Unique key declared by the source table
    fn key(&self) -> &str;

    /// Name shown to users; tables are sorted by this
    fn display_name(&self) -> &str;
}

/// Whether the record's agency labor rate is above its staff labor rate
///
/// Resolved once when the row is loaded. Rows with no flag, or a flag that
/// cannot be read as a boolean, resolve to [`RateComparison::AgencyAbove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateComparison {
    #[default]
    AgencyAbove,
    AgencyNotAbove,
}

impl RateComparison {
    /// Resolve the stored flag text into a comparison
    ///
    /// # Example
    /// ```
    /// use flo_finance_core::RateComparison;
    ///
    /// assert_eq!(RateComparison::from_flag(Some("False")), RateComparison::AgencyNotAbove);
    /// assert_eq!(RateComparison::from_flag(Some("maybe")), RateComparison::AgencyAbove);
    /// assert_eq!(RateComparison::from_flag(None), RateComparison::AgencyAbove);
    /// ```
    pub fn from_flag(raw: Option<&str>) -> Self {
        match raw.and_then(parse_flag) {
            Some(false) => RateComparison::AgencyNotAbove,
            Some(true) | None => RateComparison::AgencyAbove,
        }
    }

    pub fn agency_above(&self) -> bool {
        matches!(self, RateComparison::AgencyAbove)
    }
}

/// Read a boolean cell; `None` if the text is not a recognized spelling
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Staffing figures common to organizations and facilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingProfile {
    /// Staff labor rate per hour (cents)
    pub staff_rate: i64,

    /// Agency labor rate per hour (cents)
    pub agency_rate: i64,

    /// Estimated registered-nurse need (FTE)
    pub rn_need: f64,

    /// Agency FTE currently in use, when the source reports it
    pub agency_fte: Option<f64>,

    /// Stored agency-vs-staff flag
    pub rate_comparison: RateComparison,
}

impl Default for StaffingProfile {
    fn default() -> Self {
        Self {
            staff_rate: 0,
            agency_rate: 0,
            rn_need: 0.0,
            agency_fte: None,
            rate_comparison: RateComparison::AgencyAbove,
        }
    }
}
