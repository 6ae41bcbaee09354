//! Payout formulas for each product generation.
//!
//! Coverage rates are whole tenths (90%, 80%, ...), so every formula is
//! evaluated in tenths of a won and floored once when converted back. This
//! keeps `floor(0.9 * x)` exact for every input instead of depending on
//! binary floating point.

use super::domain::{Facility, TreatmentType, Won};

pub(crate) type RuleFn = fn(Won, Won, TreatmentType, Facility) -> Won;

const GEN1_OUTPATIENT_DEDUCTIBLE: Won = 5_000;
const GEN1_OUTPATIENT_CAP: Won = 100_000;
const OUTPATIENT_CAP: Won = 250_000;
const PHARMACY_CAP: Won = 50_000;
const NON_PAY_DEDUCTIBLE_FLOOR: Won = 30_000;

/// `amount * rate_tenths / 10`, kept in tenths of a won.
const fn share(amount: Won, rate_tenths: u64) -> u64 {
    amount.saturating_mul(rate_tenths)
}

const fn tenths(amount: Won) -> u64 {
    share(amount, 10)
}

const fn floor_won(value_tenths: u64) -> Won {
    value_tenths / 10
}

/// Per-visit cap from the 2nd generation onwards.
const fn outpatient_cap(facility: Facility) -> Won {
    match facility {
        Facility::Pharmacy => PHARMACY_CAP,
        _ => OUTPATIENT_CAP,
    }
}

/// Minimum outpatient deductible shared by the 2nd and 3rd generations.
pub(crate) const fn tiered_deductible(facility: Facility) -> Won {
    match facility {
        Facility::Clinic => 10_000,
        Facility::Hospital => 15_000,
        Facility::General | Facility::Tertiary => 20_000,
        Facility::Pharmacy => 8_000,
    }
}

/// Fixed floor of the 4th generation covered-care deductible.
pub(crate) const fn covered_deductible_floor(facility: Facility) -> Won {
    match facility {
        Facility::Clinic | Facility::Hospital => 10_000,
        Facility::General | Facility::Tertiary => 20_000,
        Facility::Pharmacy => 5_000,
    }
}

pub(crate) fn first_generation(
    pay_base: Won,
    non_pay_base: Won,
    treatment_type: TreatmentType,
    _facility: Facility,
) -> Won {
    let total = pay_base.saturating_add(non_pay_base);
    match treatment_type {
        TreatmentType::Inpatient => total,
        TreatmentType::Outpatient => total
            .saturating_sub(GEN1_OUTPATIENT_DEDUCTIBLE)
            .min(GEN1_OUTPATIENT_CAP),
    }
}

pub(crate) fn second_generation(
    pay_base: Won,
    non_pay_base: Won,
    treatment_type: TreatmentType,
    facility: Facility,
) -> Won {
    let total = pay_base.saturating_add(non_pay_base);
    match treatment_type {
        TreatmentType::Inpatient => floor_won(share(total, 9)),
        TreatmentType::Outpatient => total
            .saturating_sub(tiered_deductible(facility))
            .min(outpatient_cap(facility)),
    }
}

pub(crate) fn third_generation(
    pay_base: Won,
    non_pay_base: Won,
    treatment_type: TreatmentType,
    facility: Facility,
) -> Won {
    match treatment_type {
        TreatmentType::Inpatient => {
            floor_won(share(pay_base, 9).saturating_add(share(non_pay_base, 8)))
        }
        TreatmentType::Outpatient => {
            let total = pay_base.saturating_add(non_pay_base);
            let min_deductible = tenths(tiered_deductible(facility));
            let coinsurance = share(pay_base, 1).saturating_add(share(non_pay_base, 2));
            let deductible = min_deductible.max(coinsurance);

            floor_won(tenths(total).saturating_sub(deductible)).min(outpatient_cap(facility))
        }
    }
}

pub(crate) fn fourth_generation(
    pay_base: Won,
    non_pay_base: Won,
    treatment_type: TreatmentType,
    facility: Facility,
) -> Won {
    match treatment_type {
        TreatmentType::Inpatient => {
            floor_won(share(pay_base, 8).saturating_add(share(non_pay_base, 7)))
        }
        TreatmentType::Outpatient => {
            let pay_retained = tenths(covered_deductible_floor(facility)).max(share(pay_base, 2));
            let pay_refund = tenths(pay_base).saturating_sub(pay_retained);

            let non_pay_retained = tenths(NON_PAY_DEDUCTIBLE_FLOOR).max(share(non_pay_base, 3));
            let non_pay_refund = tenths(non_pay_base).saturating_sub(non_pay_retained);

            floor_won(pay_refund.saturating_add(non_pay_refund)).min(outpatient_cap(facility))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TreatmentType::{Inpatient, Outpatient};

    #[test]
    fn first_generation_outpatient_subtracts_flat_deductible() {
        assert_eq!(first_generation(60_000, 0, Outpatient, Facility::Clinic), 55_000);
        assert_eq!(first_generation(5_000, 0, Outpatient, Facility::Clinic), 0);
        assert_eq!(first_generation(3_000, 1_000, Outpatient, Facility::Tertiary), 0);
        assert_eq!(first_generation(300_000, 0, Outpatient, Facility::Hospital), 100_000);
    }

    #[test]
    fn first_generation_inpatient_pays_everything() {
        assert_eq!(first_generation(1_234_567, 89, Inpatient, Facility::General), 1_234_656);
    }

    #[test]
    fn second_generation_uses_facility_deductible() {
        assert_eq!(second_generation(100_000, 0, Outpatient, Facility::General), 80_000);
        assert_eq!(second_generation(100_000, 0, Outpatient, Facility::Tertiary), 80_000);
        assert_eq!(second_generation(100_000, 0, Outpatient, Facility::Hospital), 85_000);
        assert_eq!(second_generation(100_000, 0, Outpatient, Facility::Clinic), 90_000);
        assert_eq!(second_generation(20_000, 0, Outpatient, Facility::Pharmacy), 12_000);
    }

    #[test]
    fn second_generation_caps_outpatient_visits() {
        assert_eq!(second_generation(600_000, 0, Outpatient, Facility::Pharmacy), 50_000);
        assert_eq!(second_generation(600_000, 0, Outpatient, Facility::Clinic), 250_000);
    }

    #[test]
    fn second_generation_inpatient_floors_ninety_percent() {
        assert_eq!(second_generation(100_000, 50_000, Inpatient, Facility::Hospital), 135_000);
        assert_eq!(second_generation(11, 0, Inpatient, Facility::Clinic), 9);
        assert_eq!(second_generation(3_000_000, 0, Inpatient, Facility::Clinic), 2_700_000);
    }

    #[test]
    fn third_generation_inpatient_splits_rates() {
        assert_eq!(third_generation(100_000, 50_000, Inpatient, Facility::Clinic), 130_000);
        assert_eq!(third_generation(15, 15, Inpatient, Facility::Clinic), 25);
    }

    #[test]
    fn third_generation_takes_larger_deductible() {
        // minimum deductible wins: 30,000 - max(10,000, 3,000)
        assert_eq!(third_generation(30_000, 0, Outpatient, Facility::Clinic), 20_000);
        // coinsurance wins: 200,000 - max(10,000, 20,000 + 0)
        assert_eq!(third_generation(200_000, 0, Outpatient, Facility::Clinic), 180_000);
        // mixed: 150,000 + 100,000 - max(20,000, 15,000 + 20,000)
        assert_eq!(third_generation(150_000, 100_000, Outpatient, Facility::General), 215_000);
        assert_eq!(third_generation(7_000, 0, Outpatient, Facility::Pharmacy), 0);
    }

    #[test]
    fn third_generation_floors_fractional_coinsurance() {
        // 10,005 - max(10,000, 1,000.5) = 5
        assert_eq!(third_generation(10_005, 0, Outpatient, Facility::Clinic), 5);
        // 100,005 - 10,000.5 = 90,004.5
        assert_eq!(third_generation(100_005, 0, Outpatient, Facility::Clinic), 90_004);
    }

    #[test]
    fn fourth_generation_outpatient_deducts_per_category() {
        assert_eq!(fourth_generation(20_000, 0, Outpatient, Facility::Pharmacy), 15_000);
        // covered: 100,000 - 20,000; non-covered: 100,000 - 30,000
        assert_eq!(fourth_generation(100_000, 100_000, Outpatient, Facility::Clinic), 150_000);
        // non-covered below the 30,000 floor contributes nothing
        assert_eq!(fourth_generation(0, 25_000, Outpatient, Facility::Hospital), 0);
        assert_eq!(fourth_generation(15_000, 0, Outpatient, Facility::Tertiary), 0);
    }

    #[test]
    fn fourth_generation_caps_summed_refund() {
        assert_eq!(fourth_generation(400_000, 0, Outpatient, Facility::Clinic), 250_000);
        assert_eq!(fourth_generation(100_000, 0, Outpatient, Facility::Pharmacy), 50_000);
    }

    #[test]
    fn fourth_generation_inpatient_applies_flat_rates() {
        assert_eq!(fourth_generation(100_000, 50_000, Inpatient, Facility::General), 115_000);
        assert_eq!(fourth_generation(3, 3, Inpatient, Facility::General), 4);
    }

    #[test]
    fn deductible_schedules_cover_every_facility() {
        let tiered: Vec<Won> = Facility::ordered()
            .into_iter()
            .map(tiered_deductible)
            .collect();
        assert_eq!(tiered, vec![10_000, 15_000, 20_000, 20_000, 8_000]);

        let covered: Vec<Won> = Facility::ordered()
            .into_iter()
            .map(covered_deductible_floor)
            .collect();
        assert_eq!(covered, vec![10_000, 10_000, 20_000, 20_000, 5_000]);
    }
}
