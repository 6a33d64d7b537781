use crate::workflows::pariksha::domain::{FieldValues, ObservationRecord, StepRecord};
use crate::workflows::pariksha::inference::InferenceConfig;
use crate::workflows::pariksha::session::AssessmentSession;
use crate::workflows::pariksha::store::{MemoryRecordStore, PersistenceError, RecordStore};

pub(super) fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(super) fn record(pairs: &[(&str, &str)]) -> StepRecord {
    pairs.iter().copied().collect()
}

/// Answers that complete each standard step while scoring only `vata +1`.
pub(super) fn baseline_values(step_id: &str) -> FieldValues {
    match step_id {
        "patientInfo" => values(&[("name", "Asha Rao"), ("age", "42"), ("gender", "Female")]),
        "Collection" => values(&[
            ("collection_time", "Morning"),
            ("fasting_state", "Fasting"),
            ("quantity", "Moderate"),
            ("frequency", "Normal"),
            ("urgency", "None"),
            ("dysuria", "None"),
        ]),
        "Varna" => values(&[("varna", "Straw")]),
        "Gandha" => values(&[("gandha", "Mild"), ("burning", "None")]),
        "Rupa" => values(&[
            ("phenila", "Absent"),
            ("avila", "Clear"),
            ("sediment", "None"),
        ]),
        "Picchila" => values(&[
            ("picchila", "Absent"),
            ("snigdhatva", "Absent"),
            ("tantra", "Absent"),
        ]),
        "Additional" => values(&[("nocturia", "No"), ("pain", "None"), ("edema", "No")]),
        other => panic!("no baseline for step {other}"),
    }
}

pub(super) fn pitta_observations() -> ObservationRecord {
    [
        ("Varna", record(&[("varna", "Dark Yellow")])),
        ("Gandha", record(&[("gandha", "Foul"), ("burning", "Burning")])),
    ]
    .into_iter()
    .collect()
}

pub(super) fn session() -> AssessmentSession<MemoryRecordStore> {
    AssessmentSession::open(MemoryRecordStore::default(), InferenceConfig::default())
}

pub(super) fn session_with<S: RecordStore>(backend: S) -> AssessmentSession<S> {
    AssessmentSession::open(backend, InferenceConfig::default())
}

/// Submits the baseline answers for every step, ending on the summary.
pub(super) fn complete_walk<S: RecordStore>(session: &mut AssessmentSession<S>) {
    while let Some(step) = session.current_step() {
        let submission = baseline_values(step.id);
        session
            .submit_step(&submission)
            .expect("baseline submission succeeds");
    }
    assert!(session.is_at_summary());
}

pub(super) fn notice_messages<S: RecordStore>(session: &mut AssessmentSession<S>) -> Vec<String> {
    session
        .drain_notices()
        .into_iter()
        .map(|notice| notice.message)
        .collect()
}

/// Reads succeed empty; every write and removal fails.
pub(super) struct ReadOnlyRecordStore;

impl RecordStore for ReadOnlyRecordStore {
    fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _payload: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) struct UnreadableRecordStore;

impl RecordStore for UnreadableRecordStore {
    fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Unavailable("profile locked".to_string()))
    }

    fn write(&mut self, _key: &str, _payload: &str) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}
