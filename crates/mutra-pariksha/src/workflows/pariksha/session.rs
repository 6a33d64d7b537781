use super::domain::{FieldError, FieldValues, Notice, StepRecord};
use super::inference::{InferenceConfig, InferenceEngine, InferenceResult};
use super::navigator::{NavigationError, StepNavigator};
use super::report::views::{DataStatus, FieldView, StepView};
use super::report::AssessmentReport;
use super::schema::{AssessmentSchema, StepDefinition};
use super::snapshot::{InvalidFormatError, Snapshot};
use super::store::{AnswerStore, PersistenceError, RecordStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Error raised when a step submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("the summary step has no form to submit")]
    AtSummary,
    #[error("{} field(s) need attention", .0.len())]
    InvalidFields(Vec<FieldError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerdictError {
    #[error("final verdict must not be blank")]
    Blank,
}

/// Result of an accepted step submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub saved_step: &'static str,
    pub persisted: bool,
    pub current_index: usize,
}

/// Explicit context for one assessment: schema, answers, position, and the
/// inference engine. Every presentation-layer action goes through it.
#[derive(Debug)]
pub struct AssessmentSession<S> {
    schema: AssessmentSchema,
    store: AnswerStore<S>,
    navigator: StepNavigator,
    engine: InferenceEngine,
    notices: Vec<Notice>,
}

impl<S: RecordStore> AssessmentSession<S> {
    pub fn open(backend: S, config: InferenceConfig) -> Self {
        Self::with_schema(AssessmentSchema::standard(), backend, config)
    }

    pub fn with_schema(schema: AssessmentSchema, backend: S, config: InferenceConfig) -> Self {
        let (store, failures) = AnswerStore::open(backend);
        let notices = failures
            .iter()
            .map(|_| Notice::error("Error loading saved data"))
            .collect();
        let navigator = StepNavigator::new(schema.step_count());

        Self {
            schema,
            store,
            navigator,
            engine: InferenceEngine::new(config),
            notices,
        }
    }

    pub fn schema(&self) -> &AssessmentSchema {
        &self.schema
    }

    pub fn store(&self) -> &AnswerStore<S> {
        &self.store
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    /// Form step at the current position; `None` on the summary step.
    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.schema.step(self.navigator.current())
    }

    pub fn is_at_summary(&self) -> bool {
        self.navigator.is_terminal()
    }

    pub fn progress_pct(&self) -> f32 {
        self.navigator.progress_pct()
    }

    pub fn is_complete(&self, index: usize) -> bool {
        step_complete(&self.schema, &self.store, index)
    }

    /// Saved values for the step at `index`, for prefilling its form.
    pub fn prefill(&self, index: usize) -> Option<&StepRecord> {
        self.schema
            .step(index)
            .and_then(|step| self.store.record_for(step))
    }

    pub fn step_view(&self, index: usize) -> Option<StepView> {
        let step = self.schema.step(index)?;
        let saved = self.store.record_for(step);
        let fields = step
            .fields
            .iter()
            .map(|field| FieldView {
                id: field.id,
                label: field.label,
                options: field.options().map(|options| options.to_vec()),
                value: saved
                    .and_then(|record| record.get(field.id))
                    .map(str::to_string),
            })
            .collect();

        Some(StepView {
            index,
            id: step.id,
            title: step.title,
            complete: self.is_complete(index),
            fields,
        })
    }

    /// Handles the "step submitted" event for the current step: validates the
    /// values against the schema, stores the record, then moves forward.
    pub fn submit_step(&mut self, values: &FieldValues) -> Result<SubmitOutcome, SubmissionError> {
        let index = self.navigator.current();
        let step = self
            .schema
            .step(index)
            .ok_or(SubmissionError::AtSummary)?;
        let step_id = step.id;

        let record = match StepRecord::from_submission(step, values) {
            Ok(record) => record,
            Err(errors) => {
                debug!(step = step_id, invalid = errors.len(), "step submission rejected");
                self.notices
                    .push(Notice::error("Please fill all required fields"));
                return Err(SubmissionError::InvalidFields(errors));
            }
        };

        let persisted = match self.store.put_step(step, record) {
            Ok(()) => {
                self.notices.push(Notice::success("Data saved successfully"));
                true
            }
            Err(err) => {
                self.persistence_failed("Error saving data", &err);
                false
            }
        };
        info!(step = step_id, persisted, "step record saved");

        let current_index = self.navigate(1).unwrap_or(index);
        Ok(SubmitOutcome {
            saved_step: step_id,
            persisted,
            current_index,
        })
    }

    /// Signed navigation request from the presentation layer.
    pub fn navigate(&mut self, delta: i32) -> Result<usize, NavigationError> {
        let Self {
            schema,
            store,
            navigator,
            notices,
            ..
        } = self;
        let check = |index: usize| step_complete(schema, store, index);

        navigator.request(delta, &check).inspect_err(|err| {
            debug!(error = %err, "navigation blocked");
            notices.push(Notice::error(
                "Please complete the current page before moving forward",
            ));
        })
    }

    /// Moves to `index` one step at a time, honouring the forward gate.
    pub fn seek(&mut self, index: usize) -> Result<usize, NavigationError> {
        while self.navigator.current() > index {
            self.navigate(-1)?;
        }
        while self.navigator.current() < index.min(self.navigator.terminal()) {
            self.navigate(1)?;
        }
        Ok(self.navigator.current())
    }

    /// Advances past every complete step, stopping at the first one that
    /// still needs answers (or the summary).
    pub fn resume(&mut self) -> usize {
        while !self.navigator.is_terminal() && self.is_complete(self.navigator.current()) {
            if self.navigate(1).is_err() {
                break;
            }
        }
        self.navigator.current()
    }

    pub fn save_verdict(&mut self, text: &str) -> Result<(), VerdictError> {
        let verdict = text.trim();
        if verdict.is_empty() {
            self.notices.push(Notice::error("Please provide a final verdict"));
            return Err(VerdictError::Blank);
        }

        match self.store.set_verdict(verdict.to_string()) {
            Ok(()) => self
                .notices
                .push(Notice::success("Final Verdict Saved Successfully!")),
            Err(err) => self.persistence_failed("Error saving data", &err),
        }
        Ok(())
    }

    /// Clears every record and returns to the first step.
    pub fn reset(&mut self) {
        match self.store.clear() {
            Ok(()) => self
                .notices
                .push(Notice::success("All data cleared successfully")),
            Err(err) => self.persistence_failed("Error clearing data", &err),
        }
        self.navigator.reset();
        info!("assessment reset");
    }

    pub fn export_snapshot(&self, exported_at: DateTime<Utc>) -> Snapshot {
        self.store.export_snapshot(exported_at)
    }

    /// Replaces all records with an exported snapshot. Rejected payloads
    /// leave every record untouched.
    pub fn import_snapshot(&mut self, payload: &str) -> Result<(), InvalidFormatError> {
        let snapshot = match Snapshot::parse(payload) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "snapshot import rejected");
                self.notices
                    .push(Notice::error("Invalid file format or corrupted data"));
                return Err(err);
            }
        };

        match self.store.restore(snapshot) {
            Ok(()) => self.notices.push(Notice::success("Data imported successfully")),
            Err(err) => self.persistence_failed("Error saving data", &err),
        }
        info!(
            steps = self.store.observations().len(),
            "snapshot imported"
        );
        Ok(())
    }

    pub fn inference(&self) -> InferenceResult {
        self.engine.infer(self.store.observations())
    }

    pub fn report(&self) -> AssessmentReport {
        AssessmentReport::build(
            &self.schema,
            self.store.patient(),
            self.store.observations(),
            self.inference(),
            self.store.verdict(),
        )
    }

    pub fn data_status(&self) -> DataStatus {
        let patient_complete = self.is_complete(0);
        let observation_indexes = (0..self.schema.step_count())
            .filter(|index| {
                self.schema
                    .step(*index)
                    .is_some_and(|step| !step.is_patient_step())
            })
            .collect::<Vec<_>>();
        let completed_steps = observation_indexes
            .iter()
            .filter(|index| self.is_complete(**index))
            .count();

        DataStatus {
            patient_complete,
            completed_steps,
            total_steps: observation_indexes.len(),
            verdict_saved: !self.store.verdict().trim().is_empty(),
        }
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn persistence_failed(&mut self, message: &str, err: &PersistenceError) {
        warn!(error = %err, "{message}");
        self.notices.push(Notice::error(message));
    }
}

fn step_complete<S: RecordStore>(
    schema: &AssessmentSchema,
    store: &AnswerStore<S>,
    index: usize,
) -> bool {
    schema
        .step(index)
        .and_then(|step| {
            store
                .record_for(step)
                .map(|record| record.is_complete_for(step))
        })
        .unwrap_or(false)
}
