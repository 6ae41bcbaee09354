use crate::reimbursement::{CostBreakdown, TreatmentContext};
use chrono::NaiveDate;
use serde::Serialize;

/// One receipt row as entered or imported by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptRecord {
    /// Line of the source file the row came from, when imported.
    pub source_line: Option<u64>,
    pub date: Option<NaiveDate>,
    pub context: TreatmentContext,
    pub disease_code: String,
    pub costs: CostBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<RowIssue>,
}

impl ReceiptRecord {
    pub fn new(
        date: Option<NaiveDate>,
        context: TreatmentContext,
        disease_code: impl Into<String>,
        costs: CostBreakdown,
    ) -> Self {
        Self {
            source_line: None,
            date,
            context,
            disease_code: disease_code.into(),
            costs,
            issues: Vec::new(),
        }
    }

    /// Keeps a row that failed to parse. Costs and date are dropped so the
    /// row still counts but can never produce a payout.
    pub(crate) fn malformed(
        source_line: Option<u64>,
        context: TreatmentContext,
        disease_code: String,
        issues: Vec<RowIssue>,
    ) -> Self {
        Self {
            source_line,
            date: None,
            context,
            disease_code,
            costs: CostBreakdown::zero(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reason an imported row was flagged malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowIssue {
    #[error("date '{value}' is not YYYY-MM-DD or a spreadsheet serial")]
    InvalidDate { value: String },
    #[error("treatment type '{value}' is neither inpatient nor outpatient")]
    UnknownTreatmentType { value: String },
    #[error("{field} amount '{value}' is not a non-negative whole number")]
    InvalidAmount { field: &'static str, value: String },
    #[error("column {column} is not valid UTF-8 text")]
    InvalidEncoding { column: usize },
}
