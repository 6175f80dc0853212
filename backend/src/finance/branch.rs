//! Comparison vs promotional estimate
//!
//! A record whose agency rate sits above its staff rate gets a priced
//! comparison. Any other record gets the promotional shape, which only shows
//! the RN need and never calls the savings model.

use serde::{Deserialize, Serialize};

use super::savings::SavingsModel;
use crate::core::currency::round_fte;
use crate::models::{RateComparison, StaffingProfile};

/// The three inputs the savings model consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateInputs {
    /// Staff labor rate per hour (cents)
    pub staff_rate: i64,

    /// Agency labor rate per hour (cents)
    pub agency_rate: i64,

    /// Estimated RN need (FTE)
    pub rn_need: f64,
}

impl EstimateInputs {
    /// Default inputs for a record, with RN need rounded to 1 decimal
    pub fn from_profile(profile: &StaffingProfile) -> Self {
        Self {
            staff_rate: profile.staff_rate,
            agency_rate: profile.agency_rate,
            rn_need: round_fte(profile.rn_need),
        }
    }
}

/// Which estimate shape a record gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateBranch {
    /// Savings figure alongside the inputs that produced it
    Comparison,
    /// RN need only; no pricing
    Promotional,
}

impl From<RateComparison> for EstimateBranch {
    fn from(comparison: RateComparison) -> Self {
        match comparison {
            RateComparison::AgencyAbove => EstimateBranch::Comparison,
            RateComparison::AgencyNotAbove => EstimateBranch::Promotional,
        }
    }
}

impl EstimateBranch {
    /// Produce the estimate for this branch
    ///
    /// # Example
    /// ```
    /// use flo_finance_core::{Estimate, EstimateBranch, EstimateInputs, FinanceModel};
    ///
    /// let inputs = EstimateInputs { staff_rate: 4_500, agency_rate: 9_000, rn_need: 12.5 };
    /// let model = FinanceModel::default();
    ///
    /// let priced = EstimateBranch::Comparison.evaluate(&inputs, &model);
    /// assert_eq!(priced.savings(), Some(104_500_000.0));
    ///
    /// let promo = EstimateBranch::Promotional.evaluate(&inputs, &model);
    /// assert_eq!(promo, Estimate::Promotional { rn_need: 12.5 });
    /// ```
    pub fn evaluate<M: SavingsModel + ?Sized>(&self, inputs: &EstimateInputs, model: &M) -> Estimate {
        match self {
            EstimateBranch::Comparison => Estimate::Comparison {
                savings: model.compute_savings(inputs.staff_rate, inputs.agency_rate, inputs.rn_need),
                inputs: *inputs,
            },
            EstimateBranch::Promotional => Estimate::Promotional {
                rn_need: inputs.rn_need,
            },
        }
    }
}

/// Result handed to presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum Estimate {
    Comparison {
        /// Yearly savings (cents, unrounded)
        savings: f64,
        inputs: EstimateInputs,
    },
    Promotional {
        rn_need: f64,
    },
}

impl Estimate {
    pub fn branch(&self) -> EstimateBranch {
        match self {
            Estimate::Comparison { .. } => EstimateBranch::Comparison,
            Estimate::Promotional { .. } => EstimateBranch::Promotional,
        }
    }

    /// Savings figure, present only on the comparison branch
    pub fn savings(&self) -> Option<f64> {
        match self {
            Estimate::Comparison { savings, .. } => Some(*savings),
            Estimate::Promotional { .. } => None,
        }
    }

    pub fn rn_need(&self) -> f64 {
        match self {
            Estimate::Comparison { inputs, .. } => inputs.rn_need,
            Estimate::Promotional { rn_need } => *rn_need,
        }
    }
}
