use super::views::{ComparisonCardView, InputTotals, LedgerSummary, ReceiptRowView};
use crate::receipts::ReceiptRecord;
use crate::reimbursement::{
    BatchEvaluation, Generation, GenerationRule, GrandTotals, ReimbursementEngine, ResultVector,
};

const MISSING: &str = "-";
const MALFORMED_SUFFIX: &str = " (오타)";

/// Receipts of one session together with their evaluated payouts.
#[derive(Debug, Clone)]
pub struct ReceiptLedger {
    records: Vec<ReceiptRecord>,
    evaluation: BatchEvaluation,
}

impl ReceiptLedger {
    pub fn evaluate(records: Vec<ReceiptRecord>, engine: &ReimbursementEngine) -> Self {
        let evaluation = engine.evaluate_batch(&records);
        Self {
            records,
            evaluation,
        }
    }

    pub fn records(&self) -> &[ReceiptRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&ReceiptRecord, &ResultVector)> {
        self.records.iter().zip(self.evaluation.rows.iter())
    }

    pub fn grand_totals(&self) -> GrandTotals {
        self.evaluation.totals
    }

    pub fn input_totals(&self) -> InputTotals {
        self.records.iter().map(|record| &record.costs).collect()
    }

    pub fn malformed_rows(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.is_valid())
            .count()
    }

    pub fn summary(&self) -> LedgerSummary {
        let rows = self
            .rows()
            .enumerate()
            .map(|(position, (record, payouts))| row_view(position + 1, record, payouts))
            .collect();

        LedgerSummary {
            rows,
            malformed_rows: self.malformed_rows(),
            input_totals: self.input_totals(),
            grand_totals: self.grand_totals(),
        }
    }

    pub fn comparison(&self) -> Vec<ComparisonCardView> {
        comparison_cards(&self.evaluation.totals)
    }
}

pub fn comparison_cards(totals: &GrandTotals) -> Vec<ComparisonCardView> {
    let (best_generation, best_amount) = totals.best();
    GenerationRule::all()
        .iter()
        .map(|rule| {
            let amount = totals.get(rule.generation);
            ComparisonCardView {
                generation: rule.generation,
                name: rule.name,
                cap_description: rule.cap_description,
                description: rule.description,
                amount,
                best: best_amount > 0 && rule.generation == best_generation,
            }
        })
        .collect()
}

fn row_view(index: usize, record: &ReceiptRecord, payouts: &ResultVector) -> ReceiptRowView {
    let malformed = !record.is_valid();
    let has_reimbursable_cost = record
        .costs
        .pay_base()
        .saturating_add(record.costs.non_pay_base())
        > 0;

    let mut treatment_label = record.context.treatment_type.label().to_string();
    if malformed {
        treatment_label.push_str(MALFORMED_SUFFIX);
    }

    let zero_payouts = if has_reimbursable_cost {
        Generation::ordered()
            .into_iter()
            .filter(|generation| payouts.get(*generation) == 0)
            .collect()
    } else {
        Vec::new()
    };

    ReceiptRowView {
        index,
        source_line: record.source_line,
        treatment_type: record.context.treatment_type,
        treatment_label,
        date: record
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| MISSING.to_string()),
        disease_code: display_or_missing(&record.disease_code),
        facility: record.context.facility,
        facility_label: record.context.facility.label(),
        costs: record.costs,
        total_cost: record.costs.total_cost(),
        payouts: *payouts,
        zero_payouts,
        malformed,
        issues: record.issues.iter().map(ToString::to_string).collect(),
    }
}

fn display_or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}
