//! Mutra Pariksha assessment workflow: a step-wise questionnaire whose answers
//! feed a rule-based dosha inference and a printable report.

pub mod domain;
pub mod inference;
pub mod navigator;
pub mod report;
pub mod schema;
pub mod session;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    FieldError, FieldErrorReason, FieldValues, Notice, NoticeLevel, ObservationRecord,
    PatientRecord, StepRecord,
};
pub use inference::{
    CompoundRulePolicy, Dosha, DoshaScores, InferenceConfig, InferenceEngine, InferenceResult,
    RuleContribution,
};
pub use navigator::{CompletenessCheck, NavigationError, StepNavigator};
pub use report::views::{AssessmentReportView, DataStatus, StepView};
pub use report::{write_observations_csv, AssessmentReport};
pub use schema::{AssessmentSchema, FieldDefinition, FieldKind, StepDefinition, PATIENT_STEP_ID};
pub use session::{AssessmentSession, SubmissionError, SubmitOutcome, VerdictError};
pub use snapshot::{InvalidFormatError, Snapshot};
pub use store::{AnswerStore, FileRecordStore, MemoryRecordStore, PersistenceError, RecordStore};
