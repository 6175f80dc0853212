//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::{DataPaths, EstimatorConfig};
use crate::finance::{Estimate, EstimateBranch, EstimateInputs, FinanceModel};
use crate::selection::{FacilitySelection, OrganizationSelection};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract an optional field from a Python dict.
///
/// # Returns
/// `Some(value)` if field exists, `None` if missing
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_optional<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

/// Extract a field with a default value if missing.
///
/// # Example
/// ```ignore
/// let years: u32 = extract_with_default(&py_dict, "amortization_years", 3)?;
/// ```
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract a nested dict, if present
fn extract_section<'py>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into::<PyDict>()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to EstimatorConfig
///
/// Accepts the same shape as the JSON configuration:
/// `{"data": {...}, "finance": {...}}`; every key is optional.
pub fn parse_estimator_config(py_config: &Bound<'_, PyDict>) -> PyResult<EstimatorConfig> {
    let data = match extract_section(py_config, "data")? {
        Some(section) => parse_data_paths(&section)?,
        None => DataPaths::default(),
    };

    let finance = match extract_section(py_config, "finance")? {
        Some(section) => parse_finance_model(&section)?,
        None => FinanceModel::default(),
    };

    Ok(EstimatorConfig { data, finance })
}

fn parse_data_paths(py_data: &Bound<'_, PyDict>) -> PyResult<DataPaths> {
    let defaults = DataPaths::default();
    Ok(DataPaths {
        organizations: extract_with_default(py_data, "organizations", defaults.organizations)?,
        facilities: extract_with_default(py_data, "facilities", defaults.facilities)?,
    })
}

fn parse_finance_model(py_finance: &Bound<'_, PyDict>) -> PyResult<FinanceModel> {
    let defaults = FinanceModel::default();
    Ok(FinanceModel {
        hours_per_fte_year: extract_with_default(
            py_finance,
            "hours_per_fte_year",
            defaults.hours_per_fte_year,
        )?,
        placement_fee: extract_with_default(py_finance, "placement_fee", defaults.placement_fee)?,
        amortization_years: extract_with_default(
            py_finance,
            "amortization_years",
            defaults.amortization_years,
        )?,
    })
}

/// Read savings inputs from a dict, falling back to `base` per field
pub fn parse_estimate_inputs(
    py_inputs: Option<&Bound<'_, PyDict>>,
    base: EstimateInputs,
) -> PyResult<EstimateInputs> {
    let Some(py_inputs) = py_inputs else {
        return Ok(base);
    };

    Ok(EstimateInputs {
        staff_rate: extract_optional(py_inputs, "staff_rate")?.unwrap_or(base.staff_rate),
        agency_rate: extract_optional(py_inputs, "agency_rate")?.unwrap_or(base.agency_rate),
        rn_need: extract_optional(py_inputs, "rn_need")?.unwrap_or(base.rn_need),
    })
}

// ========================================================================
// Result Converters
// ========================================================================

fn branch_name(branch: EstimateBranch) -> &'static str {
    match branch {
        EstimateBranch::Comparison => "comparison",
        EstimateBranch::Promotional => "promotional",
    }
}

/// Convert EstimateInputs to Python dict
pub fn inputs_to_py<'py>(py: Python<'py>, inputs: &EstimateInputs) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("staff_rate", inputs.staff_rate)?;
    dict.set_item("agency_rate", inputs.agency_rate)?;
    dict.set_item("rn_need", inputs.rn_need)?;
    Ok(dict)
}

/// Convert Estimate to Python dict
///
/// Always carries `branch` and `rn_need`; `savings` and `inputs` are only
/// present on the comparison branch.
pub fn estimate_to_py(py: Python, estimate: &Estimate) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("branch", branch_name(estimate.branch()))?;
    dict.set_item("rn_need", estimate.rn_need())?;

    if let Estimate::Comparison { savings, inputs } = estimate {
        dict.set_item("savings", *savings)?;
        dict.set_item("inputs", inputs_to_py(py, inputs)?)?;
    }

    Ok(dict.into())
}

/// Convert a resolved health system to Python dict
pub fn organization_selection_to_py(
    py: Python,
    selection: &OrganizationSelection<'_>,
) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("key", selection.key())?;
    dict.set_item("name", &selection.summary.name)?;
    dict.set_item("bed_size", selection.summary.bed_size)?;
    dict.set_item("states", &selection.summary.states)?;
    dict.set_item("affiliated_hospitals", selection.summary.affiliated_hospitals)?;
    dict.set_item("inputs", inputs_to_py(py, &selection.inputs)?)?;
    dict.set_item("branch", branch_name(selection.branch))?;

    Ok(dict.into())
}

/// Convert a resolved hospital to Python dict
pub fn facility_selection_to_py(
    py: Python,
    selection: &FacilitySelection<'_>,
) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("key", selection.key())?;
    dict.set_item("name", &selection.summary.name)?;
    dict.set_item("bed_size", selection.summary.bed_size)?;
    dict.set_item("state", &selection.summary.state)?;
    dict.set_item("parent_organization", &selection.summary.parent_organization)?;
    dict.set_item("inputs", inputs_to_py(py, &selection.inputs)?)?;
    dict.set_item("branch", branch_name(selection.branch))?;

    Ok(dict.into())
}
