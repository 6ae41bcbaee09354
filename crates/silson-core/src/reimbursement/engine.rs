use super::domain::{CostBreakdown, TreatmentContext, Won};
use super::generation::Generation;
use crate::receipts::ReceiptRecord;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// One amount per generation, keyed `gen1..gen4` when serialized.
///
/// Used both for a single receipt's result vector and for grand totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationAmounts {
    pub gen1: Won,
    pub gen2: Won,
    pub gen3: Won,
    pub gen4: Won,
}

pub type ResultVector = GenerationAmounts;
pub type GrandTotals = GenerationAmounts;

impl GenerationAmounts {
    pub const fn zero() -> Self {
        Self {
            gen1: 0,
            gen2: 0,
            gen3: 0,
            gen4: 0,
        }
    }

    pub const fn get(&self, generation: Generation) -> Won {
        match generation {
            Generation::First => self.gen1,
            Generation::Second => self.gen2,
            Generation::Third => self.gen3,
            Generation::Fourth => self.gen4,
        }
    }

    fn slot_mut(&mut self, generation: Generation) -> &mut Won {
        match generation {
            Generation::First => &mut self.gen1,
            Generation::Second => &mut self.gen2,
            Generation::Third => &mut self.gen3,
            Generation::Fourth => &mut self.gen4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Generation, Won)> + '_ {
        Generation::ordered()
            .into_iter()
            .map(move |generation| (generation, self.get(generation)))
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, amount)| amount == 0)
    }

    /// Generation paying the most, earliest generation on ties.
    pub fn best(&self) -> (Generation, Won) {
        self.iter()
            .fold((Generation::First, self.gen1), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
    }
}

impl Add for GenerationAmounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for GenerationAmounts {
    fn add_assign(&mut self, rhs: Self) {
        for generation in Generation::ordered() {
            let slot = self.slot_mut(generation);
            *slot = slot.saturating_add(rhs.get(generation));
        }
    }
}

impl Sum for GenerationAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a GenerationAmounts> for GenerationAmounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Stateless service applying every generation rule to a receipt.
///
/// The engine trusts its inputs: cost fields are already non-negative by
/// type, and enum values can only be the recognized variants. Parsing and
/// validation belong to the callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReimbursementEngine;

impl ReimbursementEngine {
    pub const fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, breakdown: &CostBreakdown, context: TreatmentContext) -> ResultVector {
        let pay_base = breakdown.pay_base();
        let non_pay_base = breakdown.non_pay_base();

        let mut result = ResultVector::zero();
        for generation in Generation::ordered() {
            *result.slot_mut(generation) = generation.reimburse(pay_base, non_pay_base, context);
        }
        result
    }

    pub fn aggregate<'a, I>(&self, results: I) -> GrandTotals
    where
        I: IntoIterator<Item = &'a ResultVector>,
    {
        results.into_iter().sum()
    }

    pub fn evaluate_record(&self, record: &ReceiptRecord) -> ResultVector {
        self.evaluate(&record.costs, record.context)
    }

    pub fn evaluate_batch(&self, records: &[ReceiptRecord]) -> BatchEvaluation {
        let rows: Vec<ResultVector> = records
            .iter()
            .map(|record| self.evaluate_record(record))
            .collect();
        let totals = self.aggregate(&rows);
        BatchEvaluation { rows, totals }
    }
}

/// Per-row result vectors in input order plus their grand totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchEvaluation {
    pub rows: Vec<ResultVector>,
    pub totals: GrandTotals,
}
