mod config;
mod ranking;
mod rules;

pub use config::{CompoundRulePolicy, InferenceConfig};

use super::domain::ObservationRecord;
use serde::{Deserialize, Serialize};

/// Constitution types scored by the engine, in declaration (tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const fn ordered() -> [Self; 3] {
        [Self::Vata, Self::Pitta, Self::Kapha]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Vata => "vata",
            Self::Pitta => "pitta",
            Self::Kapha => "kapha",
        }
    }

    pub const fn upper_name(self) -> &'static str {
        match self {
            Self::Vata => "VATA",
            Self::Pitta => "PITTA",
            Self::Kapha => "KAPHA",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Pitta => {
                "Pitta-pacifying: cool fluids, coriander, avoid spicy/sour, manage heat."
            }
            Self::Vata => {
                "Vata-pacifying: warm fluids, cumin-fennel tea, routine, avoid dehydration."
            }
            Self::Kapha => "Kapha-pacifying: reduce sweets/dairy, ginger tea, increase activity.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaScores {
    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn add(&mut self, dosha: Dosha, points: u32) {
        let slot = match dosha {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        };
        *slot = slot.saturating_add(points);
    }

    /// Highest score first; exact ties keep declaration order.
    pub fn ranked(&self) -> [(Dosha, u32); 3] {
        let mut ranked = Dosha::ordered().map(|dosha| (dosha, self.get(dosha)));
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked
    }
}

/// Points one rule awarded, kept so a report can show why a type scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub step_id: &'static str,
    pub field_id: &'static str,
    pub value: String,
    pub dosha: Dosha,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceResult {
    pub scores: DoshaScores,
    pub primary: Option<Dosha>,
    pub secondary: Option<Dosha>,
    pub summary: String,
    pub recommendations: String,
    pub contributions: Vec<RuleContribution>,
}

impl InferenceResult {
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}

/// Stateless scorer applying the rule table to observation records.
#[derive(Debug, Clone, Default)]
pub struct InferenceEngine {
    config: InferenceConfig,
}

impl InferenceEngine {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn infer(&self, observations: &ObservationRecord) -> InferenceResult {
        let (scores, contributions) = rules::score_observations(observations, &self.config);
        let ranking = ranking::rank(&scores);

        InferenceResult {
            scores,
            primary: ranking.primary,
            secondary: ranking.secondary,
            summary: ranking.summary,
            recommendations: ranking.recommendations,
            contributions,
        }
    }
}
