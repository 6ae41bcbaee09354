use crate::reimbursement::{
    CostBreakdown, Facility, Generation, GenerationAmounts, GrandTotals, TreatmentType, Won,
};
use serde::Serialize;
use std::ops::AddAssign;

/// Display row for one receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptRowView {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u64>,
    pub treatment_type: TreatmentType,
    pub treatment_label: String,
    pub date: String,
    pub disease_code: String,
    pub facility: Facility,
    pub facility_label: &'static str,
    pub costs: CostBreakdown,
    pub total_cost: Won,
    pub payouts: GenerationAmounts,
    /// Generations paying nothing although the receipt has reimbursable cost.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zero_payouts: Vec<Generation>,
    pub malformed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// Column sums of the raw cost fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputTotals {
    pub pay_self: Won,
    pub pay_nhis: Won,
    pub pay_full: Won,
    pub non_pay_select: Won,
    pub non_pay_other: Won,
    pub total_cost: Won,
}

impl AddAssign<&CostBreakdown> for InputTotals {
    fn add_assign(&mut self, costs: &CostBreakdown) {
        self.pay_self = self.pay_self.saturating_add(costs.pay_self);
        self.pay_nhis = self.pay_nhis.saturating_add(costs.pay_nhis);
        self.pay_full = self.pay_full.saturating_add(costs.pay_full);
        self.non_pay_select = self.non_pay_select.saturating_add(costs.non_pay_select);
        self.non_pay_other = self.non_pay_other.saturating_add(costs.non_pay_other);
        self.total_cost = self.total_cost.saturating_add(costs.total_cost());
    }
}

impl<'a> FromIterator<&'a CostBreakdown> for InputTotals {
    fn from_iter<I: IntoIterator<Item = &'a CostBreakdown>>(iter: I) -> Self {
        let mut totals = Self::default();
        for costs in iter {
            totals += costs;
        }
        totals
    }
}

/// Side-by-side card for one generation's batch total.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonCardView {
    pub generation: Generation,
    pub name: &'static str,
    pub cap_description: &'static str,
    pub description: &'static str,
    pub amount: Won,
    pub best: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub rows: Vec<ReceiptRowView>,
    pub malformed_rows: usize,
    pub input_totals: InputTotals,
    pub grand_totals: GrandTotals,
}
