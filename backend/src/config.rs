//! Estimator configuration
//!
//! Every section has defaults, so an empty JSON object (or no file at all)
//! is a valid configuration.
//!
//! ```json
//! {
//!   "data": {
//!     "organizations": "data/health_system.csv",
//!     "facilities": "data/all_hospitals.csv"
//!   },
//!   "finance": {
//!     "hours_per_fte_year": 2080,
//!     "placement_fee": 3000000,
//!     "amortization_years": 3
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::finance::FinanceModel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the two reference tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Health systems CSV
    pub organizations: PathBuf,

    /// Hospitals CSV
    pub facilities: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            organizations: PathBuf::from("data/health_system.csv"),
            facilities: PathBuf::from("data/all_hospitals.csv"),
        }
    }
}

/// Complete estimator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub data: DataPaths,
    pub finance: FinanceModel,
}

impl EstimatorConfig {
    /// Parse configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }
}
