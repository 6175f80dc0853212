//! PyO3 wrapper for the reference cache and savings model
//!
//! This module provides the Python interface a web form (or notebook) uses
//! to drive the estimator.

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{
    estimate_to_py, facility_selection_to_py, organization_selection_to_py,
    parse_estimate_inputs, parse_estimator_config,
};
use crate::config::EstimatorConfig;
use crate::data::{CsvFiles, DataLoadError, ReferenceCache};
use crate::finance::{EstimateBranch, EstimateInputs, FinanceModel, SavingsModel};
use crate::selection::{EntitySelector, NotFoundError};

fn load_error(err: DataLoadError) -> PyErr {
    match err {
        DataLoadError::Unreadable { .. } => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn not_found(err: NotFoundError) -> PyErr {
    PyKeyError::new_err(err.to_string())
}

/// Python wrapper for the estimator
///
/// # Example (from Python)
///
/// ```python
/// from flo_finance_core import Estimator
///
/// est = Estimator({"data": {"organizations": "health_system.csv",
///                           "facilities": "all_hospitals.csv"}})
/// for name in est.list_organization_names():
///     print(name)
///
/// system = est.resolve_organization("General Health System")
/// result = est.estimate(system["branch"], system["inputs"])
/// if result["branch"] == "comparison":
///     print(f"Savings: ${result['savings'] / 100:,.2f}")
/// ```
#[pyclass(name = "Estimator")]
pub struct PyEstimator {
    cache: ReferenceCache<CsvFiles>,
    model: FinanceModel,
}

impl PyEstimator {
    fn selector(&self) -> PyResult<EntitySelector<'_>> {
        self.cache.selector().map_err(load_error)
    }
}

#[pymethods]
impl PyEstimator {
    /// Create an estimator from an optional configuration dict
    ///
    /// Tables are read lazily, on the first lookup.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => parse_estimator_config(dict)?,
            None => EstimatorConfig::default(),
        };

        Ok(PyEstimator {
            cache: ReferenceCache::from_paths(&config.data),
            model: config.finance,
        })
    }

    /// Read both tables now instead of on first lookup
    ///
    /// Raises IOError if a file is missing, ValueError if it is malformed.
    fn load(&self) -> PyResult<()> {
        self.selector().map(|_| ())
    }

    fn list_organization_names(&self) -> PyResult<Vec<String>> {
        Ok(self
            .selector()?
            .list_organization_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Distinct hospital states, ascending
    fn list_states(&self) -> PyResult<Vec<String>> {
        Ok(self
            .selector()?
            .list_states()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn list_facility_names(&self, state: &str) -> PyResult<Vec<String>> {
        Ok(self
            .selector()?
            .list_facility_names(state)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Resolve a health system by name
    ///
    /// Raises KeyError if the name is not listed.
    fn resolve_organization(&self, py: Python, name: &str) -> PyResult<Py<PyDict>> {
        let selector = self.selector()?;
        let selection = selector.resolve_organization(name).map_err(not_found)?;
        organization_selection_to_py(py, &selection)
    }

    /// Resolve a hospital by name, optionally within one state
    ///
    /// Raises KeyError if the name is not listed.
    #[pyo3(signature = (name, state=None))]
    fn resolve_facility(
        &self,
        py: Python,
        name: &str,
        state: Option<&str>,
    ) -> PyResult<Py<PyDict>> {
        let selector = self.selector()?;
        let selection = match state {
            Some(state) => selector.resolve_facility_in_state(state, name),
            None => selector.resolve_facility(name),
        }
        .map_err(not_found)?;
        facility_selection_to_py(py, &selection)
    }

    /// Yearly savings in cents (unrounded) under this estimator's model
    fn compute_savings(&self, staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64 {
        SavingsModel::compute_savings(&self.model, staff_rate, agency_rate, rn_need)
    }

    /// Evaluate a branch ("comparison" or "promotional") over inputs
    #[pyo3(signature = (branch, inputs=None))]
    fn estimate(
        &self,
        py: Python,
        branch: &str,
        inputs: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<Py<PyDict>> {
        let branch = match branch {
            "comparison" => EstimateBranch::Comparison,
            "promotional" => EstimateBranch::Promotional,
            other => {
                return Err(PyValueError::new_err(format!(
                    "Unknown branch '{}': expected 'comparison' or 'promotional'",
                    other
                )))
            }
        };

        let base = EstimateInputs {
            staff_rate: 0,
            agency_rate: 0,
            rn_need: 0.0,
        };
        let inputs = parse_estimate_inputs(inputs, base)?;
        estimate_to_py(py, &branch.evaluate(&inputs, &self.model))
    }
}

/// Yearly savings in cents (unrounded) under the default model
#[pyfunction]
#[pyo3(name = "compute_savings")]
pub fn py_compute_savings(staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64 {
    crate::finance::compute_savings(staff_rate, agency_rate, rn_need)
}
