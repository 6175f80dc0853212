//! Session-local editable inputs
//!
//! A user starts from the selected record's defaults and may overwrite any
//! of the three savings inputs with free text. Text that does not parse is
//! ignored: the last good value stays in place and the edit is reported as
//! [`EditOutcome::KeptPrevious`]. Parse errors never leave this module.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::currency::{format_currency, format_fte, parse_currency, parse_fte};
use crate::finance::{Estimate, EstimateBranch, EstimateInputs, SavingsModel};
use crate::selection::{DisplayProjection, Selection};

/// What happened to a single edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    /// The new value parsed and replaced the old one
    Applied,
    /// The text did not parse; the previous value was kept
    KeptPrevious,
}

/// Editable inputs for one user session
///
/// # Example
/// ```
/// use flo_finance_core::{EditOutcome, EstimateBranch, EstimateInputs, InputSession};
///
/// let defaults = EstimateInputs { staff_rate: 4_500, agency_rate: 9_000, rn_need: 12.5 };
/// let mut session = InputSession::new(defaults, EstimateBranch::Comparison);
///
/// assert_eq!(session.edit_agency_rate("$95.25"), EditOutcome::Applied);
/// assert_eq!(session.edit_staff_rate("lots"), EditOutcome::KeptPrevious);
/// assert_eq!(session.inputs().agency_rate, 9_525);
/// assert_eq!(session.inputs().staff_rate, 4_500);
/// assert_eq!(session.agency_rate_text(), "$95.25");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSession {
    inputs: EstimateInputs,
    branch: EstimateBranch,
}

impl InputSession {
    pub fn new(inputs: EstimateInputs, branch: EstimateBranch) -> Self {
        Self { inputs, branch }
    }

    /// Start a session from a resolved selection's defaults
    pub fn from_selection<R: DisplayProjection>(selection: &Selection<'_, R>) -> Self {
        Self::new(selection.inputs, selection.branch)
    }

    pub fn inputs(&self) -> &EstimateInputs {
        &self.inputs
    }

    pub fn branch(&self) -> EstimateBranch {
        self.branch
    }

    pub fn edit_staff_rate(&mut self, text: &str) -> EditOutcome {
        Self::apply(&mut self.inputs.staff_rate, parse_currency(text), "staff_rate", text)
    }

    pub fn edit_agency_rate(&mut self, text: &str) -> EditOutcome {
        Self::apply(&mut self.inputs.agency_rate, parse_currency(text), "agency_rate", text)
    }

    pub fn edit_rn_need(&mut self, text: &str) -> EditOutcome {
        Self::apply(&mut self.inputs.rn_need, parse_fte(text), "rn_need", text)
    }

    fn apply<T, E: std::fmt::Display>(
        slot: &mut T,
        parsed: Result<T, E>,
        field: &str,
        text: &str,
    ) -> EditOutcome {
        match parsed {
            Ok(value) => {
                *slot = value;
                EditOutcome::Applied
            }
            Err(err) => {
                debug!(field, input = text, error = %err, "Edit rejected, keeping previous value");
                EditOutcome::KeptPrevious
            }
        }
    }

    /// Estimate from the current inputs
    pub fn estimate<M: SavingsModel + ?Sized>(&self, model: &M) -> Estimate {
        self.branch.evaluate(&self.inputs, model)
    }

    pub fn staff_rate_text(&self) -> String {
        format_currency(self.inputs.staff_rate)
    }

    pub fn agency_rate_text(&self) -> String {
        format_currency(self.inputs.agency_rate)
    }

    pub fn rn_need_text(&self) -> String {
        format_fte(self.inputs.rn_need)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> InputSession {
        InputSession::new(
            EstimateInputs {
                staff_rate: 4_500,
                agency_rate: 9_000,
                rn_need: 12.5,
            },
            EstimateBranch::Comparison,
        )
    }

    #[test]
    fn test_rn_need_edit_rounds() {
        let mut s = session();
        assert_eq!(s.edit_rn_need("7.04"), EditOutcome::Applied);
        assert_eq!(s.inputs().rn_need, 7.0);
        assert_eq!(s.rn_need_text(), "7.0");
    }

    #[test]
    fn test_rejected_edit_keeps_last_good_not_default() {
        let mut s = session();
        s.edit_staff_rate("50");
        assert_eq!(s.edit_staff_rate(""), EditOutcome::KeptPrevious);
        assert_eq!(s.inputs().staff_rate, 5_000);
    }
}
