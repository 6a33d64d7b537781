use serde::{Deserialize, Serialize};

/// How a compound rule (one match, two constitution types) awards points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundRulePolicy {
    /// Both types receive the points.
    #[default]
    Both,
    /// Only the first-listed type scores, as the legacy wizard did.
    PrimaryOnly,
}

impl CompoundRulePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "both" => Some(Self::Both),
            "primary" | "primary_only" | "primary-only" | "legacy" => Some(Self::PrimaryOnly),
            _ => None,
        }
    }
}

/// Rule-table configuration for the inference engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub compound_rules: CompoundRulePolicy,
}
