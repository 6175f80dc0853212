//! CSV parsing for the two reference tables
//!
//! Rows are read by header name, so column order in the source files does
//! not matter and extra columns are ignored. Required columns are checked
//! before any row is parsed; a missing one fails the whole load.
//!
//! Numeric cells are coerced, never rejected: a blank or malformed rate,
//! need, bed size or count becomes `0` (optional agency FTE becomes absent,
//! the agency flag falls back to `AgencyAbove`). Every coercion of a
//! non-blank cell is logged at `warn`.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use super::table::{fingerprint_bytes, RecordTable};
use crate::core::currency::{parse_amount, parse_currency};
use crate::models::{
    parse_flag, EntityKind, FacilityRecord, OrganizationRecord, RateComparison, StaffingProfile,
};

pub type OrganizationTable = RecordTable<OrganizationRecord>;
pub type FacilityTable = RecordTable<FacilityRecord>;

/// Organization table column names
pub mod organization_columns {
    pub const ID: &str = "Health_System_ID";
    pub const NAME: &str = "Health_System_Name";
    pub const BED_SIZE: &str = "Bed_Size";
    pub const STATES: &str = "State(s)";
    pub const AFFILIATED_HOSPITALS: &str = "Affiliated_Hospitals";
    pub const STAFF_RATE: &str = "Staff_Labor_Rate";
    pub const AGENCY_RATE: &str = "Agency_Labor_Rate";
    pub const RN_NEED: &str = "Estimated_RN_Need";
    pub const AGENCY_FTE: &str = "Agency_FTE_Usage";
    pub const RATE_FLAG: &str = "Agency_Rate_Exceeds_Staff";

    pub const REQUIRED: [&str; 8] = [
        ID,
        NAME,
        BED_SIZE,
        STATES,
        AFFILIATED_HOSPITALS,
        STAFF_RATE,
        AGENCY_RATE,
        RN_NEED,
    ];
}

/// Facility table column names
pub mod facility_columns {
    pub const CODE: &str = "CCN#";
    pub const NAME: &str = "Hospital_Name";
    pub const STATE: &str = "State";
    pub const BED_SIZE: &str = "Bed_Size";
    pub const STAFF_RATE: &str = "Staff_Labor_Rate";
    pub const AGENCY_RATE: &str = "Agency_Labor_Rate";
    pub const RN_NEED: &str = "Estimated_RN_Need";
    pub const PARENT: &str = "Health_System_Name";
    pub const AGENCY_FTE: &str = "Agency_FTE_Usage";
    pub const RATE_FLAG: &str = "Agency_Rate_Exceeds_Staff";

    pub const REQUIRED: [&str; 7] = [CODE, NAME, STATE, BED_SIZE, STAFF_RATE, AGENCY_RATE, RN_NEED];
}

/// Errors that abort loading a reference table
///
/// Loading is all-or-nothing: no partial table is ever returned.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Cannot read {kind} data from {}: {source}", .path.display())]
    Unreadable {
        kind: EntityKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} data is missing required column '{column}'")]
    MissingColumn { kind: EntityKind, column: String },

    #[error("Malformed {kind} data: {source}")]
    Malformed {
        kind: EntityKind,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} row {row} has an empty '{column}'")]
    MissingKey {
        kind: EntityKind,
        row: usize,
        column: &'static str,
    },

    #[error("{kind} key '{key}' appears more than once")]
    DuplicateKey { kind: EntityKind, key: String },
}

#[derive(Debug, Deserialize)]
struct OrganizationRow {
    #[serde(rename = "Health_System_ID")]
    id: Option<String>,
    #[serde(rename = "Health_System_Name")]
    name: Option<String>,
    #[serde(rename = "Bed_Size")]
    bed_size: Option<String>,
    #[serde(rename = "State(s)")]
    states: Option<String>,
    #[serde(rename = "Affiliated_Hospitals")]
    affiliated_hospitals: Option<String>,
    #[serde(rename = "Staff_Labor_Rate")]
    staff_rate: Option<String>,
    #[serde(rename = "Agency_Labor_Rate")]
    agency_rate: Option<String>,
    #[serde(rename = "Estimated_RN_Need")]
    rn_need: Option<String>,
    #[serde(rename = "Agency_FTE_Usage", default)]
    agency_fte: Option<String>,
    #[serde(rename = "Agency_Rate_Exceeds_Staff", default)]
    rate_flag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FacilityRow {
    #[serde(rename = "CCN#")]
    code: Option<String>,
    #[serde(rename = "Hospital_Name")]
    name: Option<String>,
    #[serde(rename = "State")]
    state: Option<String>,
    #[serde(rename = "Bed_Size")]
    bed_size: Option<String>,
    #[serde(rename = "Staff_Labor_Rate")]
    staff_rate: Option<String>,
    #[serde(rename = "Agency_Labor_Rate")]
    agency_rate: Option<String>,
    #[serde(rename = "Estimated_RN_Need")]
    rn_need: Option<String>,
    #[serde(rename = "Health_System_Name", default)]
    parent: Option<String>,
    #[serde(rename = "Agency_FTE_Usage", default)]
    agency_fte: Option<String>,
    #[serde(rename = "Agency_Rate_Exceeds_Staff", default)]
    rate_flag: Option<String>,
}

/// Parse the organizations (health systems) table
///
/// # Errors
/// Fails on malformed CSV, a missing required column, an empty or duplicate
/// `Health_System_ID`.
pub fn parse_organizations(bytes: &[u8]) -> Result<OrganizationTable, DataLoadError> {
    use organization_columns as col;

    let kind = EntityKind::Organization;
    let mut reader = csv_reader(bytes);
    check_columns(&mut reader, kind, &col::REQUIRED)?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<OrganizationRow>().enumerate() {
        let row: OrganizationRow = result.map_err(|source| DataLoadError::Malformed { kind, source })?;
        let cells = Cells { kind, row: index + 1 };

        let id = cells.key(col::ID, row.id)?;
        rows.push(OrganizationRecord {
            id,
            name: row.name.unwrap_or_default(),
            bed_size: cells.number(col::BED_SIZE, row.bed_size.as_deref()),
            states: row.states.unwrap_or_default(),
            affiliated_hospitals: cells.count(
                col::AFFILIATED_HOSPITALS,
                row.affiliated_hospitals.as_deref(),
            ),
            staffing: StaffingProfile {
                staff_rate: cells.cents(col::STAFF_RATE, row.staff_rate.as_deref()),
                agency_rate: cells.cents(col::AGENCY_RATE, row.agency_rate.as_deref()),
                rn_need: cells.number(col::RN_NEED, row.rn_need.as_deref()),
                agency_fte: cells.optional_number(col::AGENCY_FTE, row.agency_fte.as_deref()),
                rate_comparison: cells.flag(col::RATE_FLAG, row.rate_flag.as_deref()),
            },
        });
    }

    finish(kind, rows, bytes)
}

/// Parse the facilities (hospitals) table
///
/// # Errors
/// Fails on malformed CSV, a missing required column, an empty or duplicate
/// `CCN#`.
pub fn parse_facilities(bytes: &[u8]) -> Result<FacilityTable, DataLoadError> {
    use facility_columns as col;

    let kind = EntityKind::Facility;
    let mut reader = csv_reader(bytes);
    check_columns(&mut reader, kind, &col::REQUIRED)?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<FacilityRow>().enumerate() {
        let row: FacilityRow = result.map_err(|source| DataLoadError::Malformed { kind, source })?;
        let cells = Cells { kind, row: index + 1 };

        let code = cells.key(col::CODE, row.code)?;
        rows.push(FacilityRecord {
            code,
            name: row.name.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            bed_size: cells.number(col::BED_SIZE, row.bed_size.as_deref()),
            parent_organization: row.parent,
            staffing: StaffingProfile {
                staff_rate: cells.cents(col::STAFF_RATE, row.staff_rate.as_deref()),
                agency_rate: cells.cents(col::AGENCY_RATE, row.agency_rate.as_deref()),
                rn_need: cells.number(col::RN_NEED, row.rn_need.as_deref()),
                agency_fte: cells.optional_number(col::AGENCY_FTE, row.agency_fte.as_deref()),
                rate_comparison: cells.flag(col::RATE_FLAG, row.rate_flag.as_deref()),
            },
        });
    }

    finish(kind, rows, bytes)
}

fn csv_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes)
}

fn check_columns(
    reader: &mut csv::Reader<&[u8]>,
    kind: EntityKind,
    required: &[&str],
) -> Result<(), DataLoadError> {
    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Malformed { kind, source })?;

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::MissingColumn {
                kind,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn finish<R: crate::models::ReferenceRecord>(
    kind: EntityKind,
    rows: Vec<R>,
    bytes: &[u8],
) -> Result<RecordTable<R>, DataLoadError> {
    let table = RecordTable::from_rows(rows, fingerprint_bytes(bytes))?;
    info!(
        %kind,
        records = table.len(),
        fingerprint = &table.fingerprint()[..12],
        "Loaded reference table"
    );
    Ok(table)
}

/// Per-row cell coercion with logging context
struct Cells {
    kind: EntityKind,
    row: usize,
}

impl Cells {
    fn key(&self, column: &'static str, raw: Option<String>) -> Result<String, DataLoadError> {
        raw.filter(|k| !k.is_empty())
            .ok_or(DataLoadError::MissingKey {
                kind: self.kind,
                row: self.row,
                column,
            })
    }

    fn number(&self, column: &str, raw: Option<&str>) -> f64 {
        self.optional_number(column, raw).unwrap_or(0.0)
    }

    fn optional_number(&self, column: &str, raw: Option<&str>) -> Option<f64> {
        let raw = raw?;
        match parse_amount(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                self.coerced(column, raw);
                None
            }
        }
    }

    fn cents(&self, column: &str, raw: Option<&str>) -> i64 {
        let Some(raw) = raw else { return 0 };
        match parse_currency(raw) {
            Ok(cents) => cents,
            Err(_) => {
                self.coerced(column, raw);
                0
            }
        }
    }

    fn count(&self, column: &str, raw: Option<&str>) -> u32 {
        let value = self.number(column, raw).round();
        if (0.0..=u32::MAX as f64).contains(&value) {
            value as u32
        } else {
            if let Some(raw) = raw {
                self.coerced(column, raw);
            }
            0
        }
    }

    fn flag(&self, column: &str, raw: Option<&str>) -> RateComparison {
        if let Some(raw) = raw {
            if parse_flag(raw).is_none() {
                self.coerced(column, raw);
            }
        }
        RateComparison::from_flag(raw)
    }

    fn coerced(&self, column: &str, raw: &str) {
        warn!(
            kind = %self.kind,
            row = self.row,
            column,
            value = raw,
            "Malformed cell replaced with default"
        );
    }
}
