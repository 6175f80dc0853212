//! Entity selection over the cached reference tables
//!
//! Two flows are supported, matching how users pick an entity:
//! - **Health system**: pick a name from the full organization list
//! - **Hospital**: pick a state, then a hospital name within that state
//!
//! Listings are ascending by display name without duplicates. When the
//! source tables contain two records with the same display name, the later
//! one in name order is the one a name resolves to.

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::summary::DisplayProjection;
use crate::data::{FacilityTable, OrganizationTable};
use crate::finance::{Estimate, EstimateBranch, EstimateInputs, SavingsModel};
use crate::models::{EntityKind, FacilityRecord, OrganizationRecord, ReferenceRecord};

/// A name or key that is not in the current listing
///
/// Recoverable: the caller should re-prompt the selection.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("No {kind} named '{name}'")]
pub struct NotFoundError {
    pub kind: EntityKind,
    pub name: String,
}

impl NotFoundError {
    fn new(kind: EntityKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// A resolved record plus everything presentation needs to show it
#[derive(Debug, Clone, Serialize)]
pub struct Selection<'a, R: DisplayProjection> {
    /// Stored record (full precision)
    #[serde(skip)]
    pub record: &'a R,

    /// Read-only display fields
    pub summary: R::Summary,

    /// Editable defaults for the savings inputs
    pub inputs: EstimateInputs,

    /// Which estimate shape this record gets
    pub branch: EstimateBranch,
}

impl<'a, R: DisplayProjection> Selection<'a, R> {
    pub fn new(record: &'a R) -> Self {
        let staffing = record.staffing();
        Self {
            record,
            summary: record.summary(),
            inputs: EstimateInputs::from_profile(staffing),
            branch: EstimateBranch::from(staffing.rate_comparison),
        }
    }

    /// Key of the resolved record
    pub fn key(&self) -> &'a str {
        self.record.key()
    }

    /// Estimate from the record's default inputs
    pub fn estimate<M: SavingsModel + ?Sized>(&self, model: &M) -> Estimate {
        self.branch.evaluate(&self.inputs, model)
    }

    /// Estimate from caller-edited inputs (branch stays the record's)
    pub fn estimate_with<M: SavingsModel + ?Sized>(
        &self,
        inputs: &EstimateInputs,
        model: &M,
    ) -> Estimate {
        self.branch.evaluate(inputs, model)
    }
}

pub type OrganizationSelection<'a> = Selection<'a, OrganizationRecord>;
pub type FacilitySelection<'a> = Selection<'a, FacilityRecord>;

/// Read-only view for listing and resolving entities
#[derive(Debug, Clone, Copy)]
pub struct EntitySelector<'a> {
    organizations: &'a OrganizationTable,
    facilities: &'a FacilityTable,
}

impl<'a> EntitySelector<'a> {
    pub fn new(organizations: &'a OrganizationTable, facilities: &'a FacilityTable) -> Self {
        Self {
            organizations,
            facilities,
        }
    }

    pub fn organizations(&self) -> &'a OrganizationTable {
        self.organizations
    }

    pub fn facilities(&self) -> &'a FacilityTable {
        self.facilities
    }

    /// All health system names, ascending, without duplicates
    pub fn list_organization_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self
            .organizations
            .iter()
            .map(|org| org.display_name())
            .collect();
        names.dedup();
        names
    }

    /// Distinct states across all hospitals
    pub fn list_states(&self) -> BTreeSet<&'a str> {
        self.facilities.iter().map(|f| f.state.as_str()).collect()
    }

    /// Hospital names in `state`, ascending, without duplicates
    ///
    /// An unknown state yields an empty listing.
    pub fn list_facility_names(&self, state: &str) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self
            .facilities
            .iter()
            .filter(|f| f.state == state)
            .map(|f| f.display_name())
            .collect();
        names.dedup();
        names
    }

    /// Resolve a health system by display name
    pub fn resolve_organization(
        &self,
        name: &str,
    ) -> Result<OrganizationSelection<'a>, NotFoundError> {
        self.organizations
            .get_by_name(name)
            .map(Selection::new)
            .ok_or_else(|| NotFoundError::new(EntityKind::Organization, name))
    }

    /// Resolve a hospital by display name across all states
    pub fn resolve_facility(&self, name: &str) -> Result<FacilitySelection<'a>, NotFoundError> {
        self.facilities
            .get_by_name(name)
            .map(Selection::new)
            .ok_or_else(|| NotFoundError::new(EntityKind::Facility, name))
    }

    /// Resolve a hospital by display name within one state
    ///
    /// Hospitals sharing a name in different states resolve independently.
    pub fn resolve_facility_in_state(
        &self,
        state: &str,
        name: &str,
    ) -> Result<FacilitySelection<'a>, NotFoundError> {
        self.facilities
            .iter()
            .filter(|f| f.state == state && f.name == name)
            .last()
            .map(Selection::new)
            .ok_or_else(|| NotFoundError::new(EntityKind::Facility, name))
    }

    /// Health system by unique ID
    pub fn organization(&self, id: &str) -> Result<&'a OrganizationRecord, NotFoundError> {
        self.organizations
            .get(id)
            .ok_or_else(|| NotFoundError::new(EntityKind::Organization, id))
    }

    /// Hospital by unique facility code
    pub fn facility(&self, code: &str) -> Result<&'a FacilityRecord, NotFoundError> {
        self.facilities
            .get(code)
            .ok_or_else(|| NotFoundError::new(EntityKind::Facility, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_facilities, parse_organizations};
    use crate::finance::FinanceModel;

    const ORGS: &str = "\
Health_System_ID,Health_System_Name,Bed_Size,State(s),Affiliated_Hospitals,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need
HS2,Beta Health,300,PA,2,40.00,70.00,3.0
HS1,Alpha Health,120,OH,1,45.00,90.00,12.5
";

    const FACILITIES: &str = "\
CCN#,Hospital_Name,State,Bed_Size,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need,Agency_Rate_Exceeds_Staff
100,Mercy,OH,80,40.00,75.00,4,true
200,Mercy,PA,90,42.00,41.00,5,false
300,Akron General,OH,300,44.00,88.00,9,
";

    fn tables() -> (OrganizationTable, FacilityTable) {
        (
            parse_organizations(ORGS.as_bytes()).unwrap(),
            parse_facilities(FACILITIES.as_bytes()).unwrap(),
        )
    }

    #[test]
    fn test_listings_sorted() {
        let (orgs, facilities) = tables();
        let selector = EntitySelector::new(&orgs, &facilities);

        assert_eq!(selector.list_organization_names(), vec!["Alpha Health", "Beta Health"]);
        assert_eq!(selector.list_facility_names("OH"), vec!["Akron General", "Mercy"]);
        assert!(selector.list_facility_names("TX").is_empty());
    }

    #[test]
    fn test_same_name_in_two_states() {
        let (orgs, facilities) = tables();
        let selector = EntitySelector::new(&orgs, &facilities);

        assert_eq!(selector.resolve_facility_in_state("OH", "Mercy").unwrap().key(), "100");
        assert_eq!(selector.resolve_facility_in_state("PA", "Mercy").unwrap().key(), "200");
        // Global resolution: later in name order wins (stable sort keeps file order)
        assert_eq!(selector.resolve_facility("Mercy").unwrap().key(), "200");
    }

    #[test]
    fn test_repeated_names_listed_once() {
        let orgs = parse_organizations(
            b"Health_System_ID,Health_System_Name,Bed_Size,State(s),Affiliated_Hospitals,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need
A,Same,100,OH,1,40.00,80.00,1.0
B,Same,200,OH,2,41.00,81.00,2.0
",
        )
        .unwrap();
        let facilities = parse_facilities(
            b"CCN#,Hospital_Name,State,Bed_Size,Staff_Labor_Rate,Agency_Labor_Rate,Estimated_RN_Need
010,M,OH,50,40.00,80.00,1.0
020,M,OH,60,41.00,81.00,2.0
",
        )
        .unwrap();
        let selector = EntitySelector::new(&orgs, &facilities);

        assert_eq!(selector.list_organization_names(), vec!["Same"]);
        assert_eq!(selector.list_facility_names("OH"), vec!["M"]);

        assert_eq!(selector.resolve_organization("Same").unwrap().key(), "B");
        assert_eq!(selector.resolve_facility("M").unwrap().key(), "020");
        assert_eq!(selector.resolve_facility_in_state("OH", "M").unwrap().key(), "020");
    }

    #[test]
    fn test_wrong_state_not_found() {
        let (orgs, facilities) = tables();
        let selector = EntitySelector::new(&orgs, &facilities);

        let err = selector
            .resolve_facility_in_state("PA", "Akron General")
            .unwrap_err();
        assert_eq!(err.kind, EntityKind::Facility);
        assert_eq!(err.to_string(), "No hospital named 'Akron General'");
    }

    #[test]
    fn test_selection_estimate_uses_branch() {
        let (orgs, facilities) = tables();
        let selector = EntitySelector::new(&orgs, &facilities);
        let model = FinanceModel::default();

        let promo = selector.resolve_facility_in_state("PA", "Mercy").unwrap();
        assert_eq!(promo.branch, EstimateBranch::Promotional);
        assert_eq!(promo.estimate(&model).savings(), None);

        let priced = selector.resolve_organization("Alpha Health").unwrap();
        assert_eq!(priced.branch, EstimateBranch::Comparison);
        assert_eq!(priced.estimate(&model).savings(), Some(104_500_000.0));
    }
}
