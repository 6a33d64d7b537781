use super::super::inference::{Dosha, DoshaScores, RuleContribution};
use super::summary::{ObservationSection, ReportLine};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InferenceView {
    pub scores: DoshaScores,
    pub primary: Option<Dosha>,
    pub secondary: Option<Dosha>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<RuleContribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReportView {
    pub patient: Vec<ReportLine>,
    pub observations: Vec<ObservationSection>,
    pub inference: InferenceView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_verdict: Option<String>,
}

/// Completion overview of the stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataStatus {
    pub patient_complete: bool,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub verdict_saved: bool,
}

impl DataStatus {
    pub fn render_text(&self) -> String {
        let mark = |done: bool, yes: &str, no: &str| {
            if done {
                format!("✓ {yes}")
            } else {
                format!("✗ {no}")
            }
        };

        format!(
            "Data Status:\n- Patient Information: {}\n- Assessment Steps: {}/{} completed\n- Final Verdict: {}\n",
            mark(self.patient_complete, "Complete", "Incomplete"),
            self.completed_steps,
            self.total_steps,
            mark(self.verdict_saved, "Saved", "Not saved"),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One form step as the presentation layer renders it, prefilled.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub index: usize,
    pub id: &'static str,
    pub title: &'static str,
    pub complete: bool,
    pub fields: Vec<FieldView>,
}
