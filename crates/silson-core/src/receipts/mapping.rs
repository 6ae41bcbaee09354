use super::normalizer::normalize_cell;
use crate::reimbursement::{Facility, TreatmentType};
use std::collections::HashMap;
use std::sync::OnceLock;

static TREATMENT_TOKEN_MAP: OnceLock<HashMap<String, TreatmentType>> = OnceLock::new();

/// Keywords found in Korean facility names. Checked in order; the last
/// keyword present wins, so `상급종합병원` resolves to tertiary even though it
/// also contains `병원` and `종합`.
const FACILITY_KEYWORDS: &[(&str, Facility)] = &[
    ("병원", Facility::Hospital),
    ("종합", Facility::General),
    ("상급", Facility::Tertiary),
    ("약국", Facility::Pharmacy),
];

pub(crate) fn treatment_type_for(token: &str) -> Option<TreatmentType> {
    let normalized = normalize_cell(token).to_lowercase();
    if let Some(treatment_type) = treatment_token_map().get(&normalized) {
        return Some(*treatment_type);
    }

    if normalized.contains("입원") {
        Some(TreatmentType::Inpatient)
    } else if normalized.contains("통원") {
        Some(TreatmentType::Outpatient)
    } else {
        None
    }
}

/// Unrecognized or blank facility text falls back to a clinic.
pub(crate) fn facility_for(token: &str) -> Facility {
    let normalized = normalize_cell(token);
    if let Ok(facility) = normalized.parse::<Facility>() {
        return facility;
    }

    FACILITY_KEYWORDS
        .iter()
        .filter(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, facility)| *facility)
        .last()
        .unwrap_or(Facility::Clinic)
}

fn treatment_token_map() -> &'static HashMap<String, TreatmentType> {
    TREATMENT_TOKEN_MAP.get_or_init(|| {
        const TOKENS: &[(&str, TreatmentType)] = &[
            ("inpatient", TreatmentType::Inpatient),
            ("입원", TreatmentType::Inpatient),
            ("outpatient", TreatmentType::Outpatient),
            ("통원", TreatmentType::Outpatient),
        ];

        let mut map = HashMap::with_capacity(TOKENS.len());
        for (token, treatment_type) in TOKENS {
            map.insert(normalize_cell(token).to_lowercase(), *treatment_type);
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treatment_tokens_accept_korean_and_english() {
        assert_eq!(treatment_type_for("통원"), Some(TreatmentType::Outpatient));
        assert_eq!(treatment_type_for(" Inpatient "), Some(TreatmentType::Inpatient));
        assert_eq!(treatment_type_for("입원(수술)"), Some(TreatmentType::Inpatient));
        assert_eq!(treatment_type_for("톱원"), None);
        assert_eq!(treatment_type_for(""), None);
    }

    #[test]
    fn facility_keywords_resolve_most_specific_match() {
        assert_eq!(facility_for("의원"), Facility::Clinic);
        assert_eq!(facility_for("병원"), Facility::Hospital);
        assert_eq!(facility_for("종합병원"), Facility::General);
        assert_eq!(facility_for("상급종합병원"), Facility::Tertiary);
        assert_eq!(facility_for("온누리약국"), Facility::Pharmacy);
        assert_eq!(facility_for("pharmacy"), Facility::Pharmacy);
        assert_eq!(facility_for("치과"), Facility::Clinic);
        assert_eq!(facility_for(""), Facility::Clinic);
    }
}
