//! Reimbursement rules for the four silson product generations and the
//! engine that applies them to receipts.

pub mod domain;
mod engine;
mod generation;
mod rules;

pub use domain::{CostBreakdown, DomainViolation, Facility, TreatmentContext, TreatmentType, Won};
pub use engine::{
    BatchEvaluation, GenerationAmounts, GrandTotals, ReimbursementEngine, ResultVector,
};
pub use generation::{Generation, GenerationRule};
