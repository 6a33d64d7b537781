use super::{Dosha, DoshaScores};

pub(crate) struct Ranking {
    pub primary: Option<Dosha>,
    pub secondary: Option<Dosha>,
    pub summary: String,
    pub recommendations: String,
}

/// Orders the scores and derives the pattern summary. A secondary type joins
/// the summary only when it trails the primary by at most one point.
pub(crate) fn rank(scores: &DoshaScores) -> Ranking {
    let ranked = scores.ranked();
    let scored = |(dosha, score): (Dosha, u32)| (score > 0).then_some(dosha);
    let primary = scored(ranked[0]);
    let secondary = scored(ranked[1]);

    let summary = match (primary, secondary) {
        (Some(first), Some(second)) if ranked[0].1 - ranked[1].1 <= 1 => format!(
            "{}-{} dominant pattern",
            first.upper_name(),
            second.upper_name()
        ),
        (Some(first), _) => format!("{} dominant pattern", first.upper_name()),
        _ => String::new(),
    };

    let recommendations = primary
        .map(|dosha| dosha.recommendation().to_string())
        .unwrap_or_default();

    Ranking {
        primary,
        secondary,
        summary,
        recommendations,
    }
}
