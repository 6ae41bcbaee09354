use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Amount in won. Every cost field and payout is a whole number of won.
pub type Won = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    Inpatient,
    Outpatient,
}

impl TreatmentType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Outpatient, Self::Inpatient]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Inpatient => "inpatient",
            Self::Outpatient => "outpatient",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inpatient => "입원",
            Self::Outpatient => "통원",
        }
    }
}

impl FromStr for TreatmentType {
    type Err = DomainViolation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inpatient" => Ok(Self::Inpatient),
            "outpatient" => Ok(Self::Outpatient),
            _ => Err(DomainViolation::UnknownTreatmentType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    Clinic,
    Hospital,
    General,
    Tertiary,
    Pharmacy,
}

impl Facility {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Clinic,
            Self::Hospital,
            Self::General,
            Self::Tertiary,
            Self::Pharmacy,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Clinic => "clinic",
            Self::Hospital => "hospital",
            Self::General => "general",
            Self::Tertiary => "tertiary",
            Self::Pharmacy => "pharmacy",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clinic => "의원",
            Self::Hospital => "병원",
            Self::General => "종합병원",
            Self::Tertiary => "상급종합병원",
            Self::Pharmacy => "약국",
        }
    }
}

impl FromStr for Facility {
    type Err = DomainViolation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|facility| facility.key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| DomainViolation::UnknownFacility(value.to_string()))
    }
}

/// Care setting every generation rule needs alongside the cost bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreatmentContext {
    pub treatment_type: TreatmentType,
    pub facility: Facility,
}

impl TreatmentContext {
    pub const fn new(treatment_type: TreatmentType, facility: Facility) -> Self {
        Self {
            treatment_type,
            facility,
        }
    }

    pub const fn is_inpatient(&self) -> bool {
        matches!(self.treatment_type, TreatmentType::Inpatient)
    }
}

/// The five cost lines printed on a Korean medical receipt.
///
/// `pay_nhis` is the share paid by the National Health Insurance Service. It
/// only ever contributes to [`CostBreakdown::total_cost`]; neither base used
/// by the generation rules includes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default)]
    pub pay_self: Won,
    #[serde(default)]
    pub pay_nhis: Won,
    #[serde(default)]
    pub pay_full: Won,
    #[serde(default)]
    pub non_pay_select: Won,
    #[serde(default)]
    pub non_pay_other: Won,
}

impl CostBreakdown {
    pub const fn zero() -> Self {
        Self {
            pay_self: 0,
            pay_nhis: 0,
            pay_full: 0,
            non_pay_select: 0,
            non_pay_other: 0,
        }
    }

    /// Builds a breakdown from signed input, rejecting negative amounts.
    pub fn from_signed(
        pay_self: i64,
        pay_nhis: i64,
        pay_full: i64,
        non_pay_select: i64,
        non_pay_other: i64,
    ) -> Result<Self, DomainViolation> {
        let field = |name: &'static str, value: i64| {
            Won::try_from(value).map_err(|_| DomainViolation::NegativeCost { field: name, value })
        };

        Ok(Self {
            pay_self: field("pay_self", pay_self)?,
            pay_nhis: field("pay_nhis", pay_nhis)?,
            pay_full: field("pay_full", pay_full)?,
            non_pay_select: field("non_pay_select", non_pay_select)?,
            non_pay_other: field("non_pay_other", non_pay_other)?,
        })
    }

    /// Covered-care amount the coverage percentages apply to.
    pub const fn pay_base(&self) -> Won {
        self.pay_self.saturating_add(self.pay_full)
    }

    /// Non-covered amount the coverage percentages apply to.
    pub const fn non_pay_base(&self) -> Won {
        self.non_pay_select.saturating_add(self.non_pay_other)
    }

    /// Receipt total for display. Never fed into a generation rule.
    pub const fn total_cost(&self) -> Won {
        self.pay_base()
            .saturating_add(self.pay_nhis)
            .saturating_add(self.non_pay_base())
    }

    pub const fn is_zero(&self) -> bool {
        self.total_cost() == 0
    }
}

/// Input outside the engine's domain, rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainViolation {
    #[error("cost field {field} must not be negative (found {value})")]
    NegativeCost { field: &'static str, value: i64 },
    #[error("unrecognized treatment type '{0}' (expected inpatient or outpatient)")]
    UnknownTreatmentType(String),
    #[error("unrecognized facility '{0}' (expected clinic, hospital, general, tertiary or pharmacy)")]
    UnknownFacility(String),
}
