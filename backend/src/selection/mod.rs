//! Listing, resolving, and projecting reference entities

pub mod selector;
pub mod summary;

pub use selector::{
    EntitySelector, FacilitySelection, NotFoundError, OrganizationSelection, Selection,
};
pub use summary::{DisplayProjection, FacilitySummary, OrganizationSummary, NOT_AVAILABLE};
