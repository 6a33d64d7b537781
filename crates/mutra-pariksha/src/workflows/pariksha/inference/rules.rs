use super::super::domain::ObservationRecord;
use super::config::{CompoundRulePolicy, InferenceConfig};
use super::Dosha::{Kapha, Pitta, Vata};
use super::{Dosha, DoshaScores, RuleContribution};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Award {
    Single(Dosha, u32),
    /// One match scores two types. The legacy table wrote these as
    /// `add(a) || add(b)`, which only ever reached `a`; the policy decides.
    Compound {
        primary: Dosha,
        secondary: Dosha,
        points: u32,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct InferenceRule {
    pub step_id: &'static str,
    pub field_id: &'static str,
    pub terms: &'static [&'static str],
    pub award: Award,
}

const fn rule(
    step_id: &'static str,
    field_id: &'static str,
    terms: &'static [&'static str],
    award: Award,
) -> InferenceRule {
    InferenceRule {
        step_id,
        field_id,
        terms,
        award,
    }
}

pub(crate) const RULES: &[InferenceRule] = &[
    // Varna
    rule("Varna", "varna", &["dark", "reddish", "brown"], Award::Single(Pitta, 2)),
    rule("Varna", "varna", &["straw", "pale", "clear"], Award::Single(Vata, 1)),
    rule("Varna", "varna", &["yellow"], Award::Single(Pitta, 1)),
    // Gandha & burning
    rule("Gandha", "gandha", &["foul", "strong"], Award::Single(Pitta, 2)),
    rule("Gandha", "gandha", &["sweet"], Award::Single(Kapha, 2)),
    rule("Gandha", "burning", &["burn"], Award::Single(Pitta, 2)),
    // Rupa
    rule("Rupa", "phenila", &["persistent"], Award::Single(Vata, 1)),
    rule("Rupa", "avila", &["turbid"], Award::Single(Kapha, 2)),
    rule("Rupa", "sediment", &["heavy", "moderate"], Award::Single(Kapha, 1)),
    // Picchila / snigdhatva / threads
    rule("Picchila", "picchila", &["present"], Award::Single(Kapha, 2)),
    rule("Picchila", "snigdhatva", &["present"], Award::Single(Kapha, 2)),
    rule("Picchila", "tantra", &["present"], Award::Single(Vata, 1)),
    // Collection & symptoms
    rule("Collection", "quantity", &["excess"], Award::Single(Kapha, 1)),
    rule(
        "Collection",
        "quantity",
        &["scanty"],
        Award::Compound {
            primary: Vata,
            secondary: Pitta,
            points: 1,
        },
    ),
    rule("Collection", "urgency", &["strong"], Award::Single(Pitta, 1)),
    rule("Collection", "dysuria", &["severe"], Award::Single(Pitta, 2)),
    rule("Additional", "nocturia", &["yes"], Award::Single(Kapha, 1)),
    rule(
        "Additional",
        "pain",
        &["severe"],
        Award::Compound {
            primary: Pitta,
            secondary: Vata,
            points: 1,
        },
    ),
];

impl InferenceRule {
    fn matches(&self, observations: &ObservationRecord) -> Option<String> {
        let value = observations
            .field_value(self.step_id, self.field_id)
            .to_lowercase();
        self.terms
            .iter()
            .any(|term| value.contains(term))
            .then_some(value)
    }

    fn awards(&self, policy: CompoundRulePolicy) -> Vec<(Dosha, u32)> {
        match self.award {
            Award::Single(dosha, points) => vec![(dosha, points)],
            Award::Compound {
                primary,
                secondary,
                points,
            } => match policy {
                CompoundRulePolicy::Both => vec![(primary, points), (secondary, points)],
                CompoundRulePolicy::PrimaryOnly => vec![(primary, points)],
            },
        }
    }
}

pub(crate) fn score_observations(
    observations: &ObservationRecord,
    config: &InferenceConfig,
) -> (DoshaScores, Vec<RuleContribution>) {
    let mut scores = DoshaScores::default();
    let mut contributions = Vec::new();

    for rule in RULES {
        let Some(value) = rule.matches(observations) else {
            continue;
        };

        for (dosha, points) in rule.awards(config.compound_rules) {
            scores.add(dosha, points);
            contributions.push(RuleContribution {
                step_id: rule.step_id,
                field_id: rule.field_id,
                value: value.clone(),
                dosha,
                points,
            });
        }
    }

    (scores, contributions)
}
