use super::super::domain::{ObservationRecord, PatientRecord, StepRecord};
use super::super::inference::InferenceResult;
use super::super::schema::{AssessmentSchema, StepDefinition};
use super::views::{AssessmentReportView, InferenceView};
use serde::Serialize;
use std::fmt::Write;

const PATIENT_SUMMARY_FIELDS: [(&str, &str); 3] =
    [("name", "Name"), ("age", "Age"), ("gender", "Gender")];
const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub field_id: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationSection {
    pub step_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub lines: Vec<ReportLine>,
}

/// Printable summary of an assessment: patient, observations, inference, verdict.
#[derive(Debug, Clone)]
pub struct AssessmentReport {
    pub patient: Vec<ReportLine>,
    pub sections: Vec<ObservationSection>,
    pub inference: InferenceResult,
    pub verdict: String,
}

impl AssessmentReport {
    pub fn build(
        schema: &AssessmentSchema,
        patient: &PatientRecord,
        observations: &ObservationRecord,
        inference: InferenceResult,
        verdict: &str,
    ) -> Self {
        let patient = PATIENT_SUMMARY_FIELDS
            .iter()
            .map(|(field_id, label)| ReportLine {
                field_id: field_id.to_string(),
                label: label.to_string(),
                value: patient
                    .get(field_id)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(MISSING_VALUE)
                    .to_string(),
            })
            .collect();

        // Known steps in schema order, then anything imported under other ids.
        let known = schema
            .observation_steps()
            .filter_map(|step| observations.get(step.id).map(|record| (step.id, record)));
        let unknown = observations
            .iter()
            .filter(|(step_id, _)| schema.step_by_id(step_id).is_none());
        let sections = known
            .chain(unknown)
            .map(|(step_id, record)| section_for(schema.step_by_id(step_id), step_id, record))
            .collect();

        Self {
            patient,
            sections,
            inference,
            verdict: verdict.to_string(),
        }
    }

    pub fn patient_text(&self) -> String {
        let mut text = String::new();
        for line in &self.patient {
            let _ = writeln!(text, "{}: {}", line.label, line.value);
        }
        text
    }

    /// Observation listing followed by the inference lines when a pattern
    /// was found.
    pub fn observation_text(&self) -> String {
        let mut text = String::new();
        for section in &self.sections {
            let _ = writeln!(text, "--- {} ---", section.step_id);
            for line in &section.lines {
                let _ = writeln!(text, "  {}: {}", line.label, line.value);
            }
            text.push('\n');
        }

        if self.inference.has_summary() {
            let _ = writeln!(text, "Dosha Inference: {}", self.inference.summary);
            let _ = writeln!(text, "Recommendations: {}", self.inference.recommendations);
        }
        text
    }

    pub fn render_text(&self) -> String {
        let verdict = if self.verdict.trim().is_empty() {
            "(not recorded)"
        } else {
            self.verdict.as_str()
        };

        format!(
            "Final Mutra Pariksha Report\n\nPatient Information\n{}\nMutra Observations\n{}\nFinal Verdict\n{}\n",
            self.patient_text(),
            self.observation_text(),
            verdict
        )
    }

    pub fn view(&self) -> AssessmentReportView {
        AssessmentReportView {
            patient: self.patient.clone(),
            observations: self.sections.clone(),
            inference: InferenceView {
                scores: self.inference.scores,
                primary: self.inference.primary,
                secondary: self.inference.secondary,
                summary: Some(self.inference.summary.clone()).filter(|value| !value.is_empty()),
                recommendations: Some(self.inference.recommendations.clone())
                    .filter(|value| !value.is_empty()),
                contributions: self.inference.contributions.clone(),
            },
            final_verdict: Some(self.verdict.clone()).filter(|value| !value.trim().is_empty()),
        }
    }
}

fn section_for(
    step: Option<&StepDefinition>,
    step_id: &str,
    record: &StepRecord,
) -> ObservationSection {
    let line = |field_id: &str, value: &str| ReportLine {
        field_id: field_id.to_string(),
        label: step
            .and_then(|step| step.field_label(field_id))
            .unwrap_or(field_id)
            .to_string(),
        value: value.to_string(),
    };

    let lines = match step {
        Some(step) => {
            let known = step
                .fields
                .iter()
                .filter_map(|field| record.get(field.id).map(|value| line(field.id, value)));
            let extra = record
                .iter()
                .filter(|(field_id, _)| step.field(field_id).is_none())
                .map(|(field_id, value)| line(field_id, value));
            known.chain(extra).collect()
        }
        None => record
            .iter()
            .map(|(field_id, value)| line(field_id, value))
            .collect(),
    };

    ObservationSection {
        step_id: step_id.to_string(),
        title: step.map(|step| step.title),
        lines,
    }
}
