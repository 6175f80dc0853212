//! Savings model and the estimate branches built on it

pub mod branch;
pub mod savings;

pub use branch::{Estimate, EstimateBranch, EstimateInputs};
pub use savings::{compute_savings, FinanceModel, SavingsModel};
