//! Florence Financial Impact - Rust Core
//!
//! Estimates what a health system or hospital saves by replacing agency
//! nurses with directly employed nurses, using HCRIS-derived reference data.
//!
//! # Architecture
//!
//! - **core**: Currency and FTE text handling
//! - **models**: Reference record types (health systems, hospitals)
//! - **data**: CSV loading and the load-once reference cache
//! - **selection**: Listing, name resolution, display projections
//! - **finance**: Savings model and comparison/promotional branches
//! - **session**: Session-local editable inputs with fallback on bad text
//! - **config**: JSON configuration
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. The savings model is pure and deterministic; rounding happens only
//!    at the presentation boundary
//! 3. Reference data is read once and never mutated
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod config;
pub mod core;
pub mod data;
pub mod finance;
pub mod models;
pub mod selection;
pub mod session;

// Re-exports for convenience
pub use config::{ConfigError, DataPaths, EstimatorConfig};
pub use crate::core::currency::{
    format_currency, format_fte, parse_currency, parse_fte, round_cents, ParseError,
};
pub use data::{
    parse_facilities, parse_organizations, CsvFiles, DataLoadError, FacilityTable,
    InMemorySource, OrganizationTable, RecordTable, ReferenceCache, ReferenceSource,
};
pub use finance::{
    compute_savings, Estimate, EstimateBranch, EstimateInputs, FinanceModel, SavingsModel,
};
pub use models::{
    EntityKind, FacilityRecord, OrganizationRecord, RateComparison, ReferenceRecord,
    StaffingProfile,
};
pub use selection::{
    DisplayProjection, EntitySelector, FacilitySelection, FacilitySummary, NotFoundError,
    OrganizationSelection, OrganizationSummary, Selection,
};
pub use session::{EditOutcome, InputSession};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn flo_finance_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::estimator::PyEstimator>()?;
    m.add_function(wrap_pyfunction!(ffi::estimator::py_compute_savings, m)?)?;
    Ok(())
}
