use super::domain::{TreatmentContext, Won};
use super::rules::{self, RuleFn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product generation of the supplemental indemnity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Generation {
    #[serde(rename = "gen1")]
    First,
    #[serde(rename = "gen2")]
    Second,
    #[serde(rename = "gen3")]
    Third,
    #[serde(rename = "gen4")]
    Fourth,
}

impl Generation {
    pub const fn ordered() -> [Self; 4] {
        [Self::First, Self::Second, Self::Third, Self::Fourth]
    }

    pub fn key(self) -> &'static str {
        self.rule().key
    }

    pub fn label(self) -> &'static str {
        self.rule().name
    }

    pub fn rule(self) -> &'static GenerationRule {
        match self {
            Self::First => &GENERATION_RULES[0],
            Self::Second => &GENERATION_RULES[1],
            Self::Third => &GENERATION_RULES[2],
            Self::Fourth => &GENERATION_RULES[3],
        }
    }

    pub fn reimburse(self, pay_base: Won, non_pay_base: Won, context: TreatmentContext) -> Won {
        self.rule().calc(pay_base, non_pay_base, context)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static terms of one generation: display metadata plus its payout formula.
pub struct GenerationRule {
    pub generation: Generation,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cap_description: &'static str,
    calc: RuleFn,
}

impl GenerationRule {
    pub fn calc(&self, pay_base: Won, non_pay_base: Won, context: TreatmentContext) -> Won {
        (self.calc)(
            pay_base,
            non_pay_base,
            context.treatment_type,
            context.facility,
        )
    }

    pub fn all() -> &'static [GenerationRule] {
        &GENERATION_RULES
    }
}

impl fmt::Debug for GenerationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRule")
            .field("generation", &self.generation)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static GENERATION_RULES: [GenerationRule; 4] = [
    GenerationRule {
        generation: Generation::First,
        key: "gen1",
        name: "1세대",
        description: "입원 100% / 통원 100% (공제 5천원)",
        cap_description: "통원 1회당 10만원 한도",
        calc: rules::first_generation,
    },
    GenerationRule {
        generation: Generation::Second,
        key: "gen2",
        name: "2세대",
        description: "급여 90% / 비급여 90% (또는 80%)",
        cap_description: "통원 25만원 / 약국 5만원",
        calc: rules::second_generation,
    },
    GenerationRule {
        generation: Generation::Third,
        key: "gen3",
        name: "3세대",
        description: "급여 90% / 비급여 80%",
        cap_description: "통원 25만원 / 약국 5만원",
        calc: rules::third_generation,
    },
    GenerationRule {
        generation: Generation::Fourth,
        key: "gen4",
        name: "4세대",
        description: "급여 80% / 비급여 70%",
        cap_description: "통원 25만원 / 약국 5만원",
        calc: rules::fourth_generation,
    },
];
