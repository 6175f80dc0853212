//! Savings calculator
//!
//! Estimates yearly savings from replacing agency nurses with directly
//! employed nurses placed by Florence, whose one-time placement fee is
//! amortized over the first years of employment:
//!
//! ```text
//! annual_fee = placement_fee / amortization_years
//! savings    = rn_need × (hours_per_fte_year × (agency_rate − staff_rate) − annual_fee)
//! ```
//!
//! Rates and fee are cents; the result is unrounded cents. Round only when
//! displaying (see `round_cents`).
//!
//! # Critical Invariants
//!
//! 1. **Purity**: Output depends only on the inputs and the model constants
//! 2. **Determinism**: Identical inputs yield bit-identical output
//! 3. **No Faults**: A zero denominator or non-finite result yields 0.0

use serde::{Deserialize, Serialize};

/// Anything that can price a staffing switch
///
/// Branch evaluation goes through this trait so the promotional branch can
/// be checked to never price anything.
pub trait SavingsModel {
    /// Yearly savings in cents (unrounded)
    fn compute_savings(&self, staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64;
}

/// Constants of the placement-fee amortization model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceModel {
    /// Paid hours per full-time nurse per year
    pub hours_per_fte_year: u32,

    /// One-time placement fee per nurse (cents)
    pub placement_fee: i64,

    /// Years the placement fee is spread over
    pub amortization_years: u32,
}

impl Default for FinanceModel {
    fn default() -> Self {
        Self {
            hours_per_fte_year: 2_080,  // 40 h × 52 weeks
            placement_fee: 3_000_000,   // $30,000 per nurse
            amortization_years: 3,
        }
    }
}

impl FinanceModel {
    /// Placement fee attributed to one year (cents), `None` if the
    /// amortization period is zero
    pub fn annual_fee(&self) -> Option<f64> {
        if self.amortization_years == 0 {
            None
        } else {
            Some(self.placement_fee as f64 / self.amortization_years as f64)
        }
    }

    /// Yearly savings in cents (unrounded)
    ///
    /// # Example
    /// ```
    /// use flo_finance_core::FinanceModel;
    ///
    /// let model = FinanceModel::default();
    /// // $45 staff vs $90 agency for 12.5 nurses → $1,045,000.00
    /// assert_eq!(model.compute_savings(4_500, 9_000, 12.5), 104_500_000.0);
    /// ```
    pub fn compute_savings(&self, staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64 {
        let Some(annual_fee) = self.annual_fee() else {
            return 0.0;
        };

        let rate_gap = agency_rate.saturating_sub(staff_rate) as f64;
        let savings = rn_need * (self.hours_per_fte_year as f64 * rate_gap - annual_fee);

        // Also folds -0.0 into 0.0
        if savings.is_finite() && savings != 0.0 {
            savings
        } else {
            0.0
        }
    }
}

impl SavingsModel for FinanceModel {
    fn compute_savings(&self, staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64 {
        FinanceModel::compute_savings(self, staff_rate, agency_rate, rn_need)
    }
}

/// Yearly savings under the default model (cents, unrounded)
pub fn compute_savings(staff_rate: i64, agency_rate: i64, rn_need: f64) -> f64 {
    FinanceModel::default().compute_savings(staff_rate, agency_rate, rn_need)
}
