//! Answer persistence: the in-memory authoritative copy of every record plus a
//! pluggable backing store that mirrors it on each save.

mod file;
mod memory;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use super::domain::{ObservationRecord, PatientRecord, StepRecord};
use super::schema::StepDefinition;
use super::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub const PATIENT_KEY: &str = "patientData";
pub const OBSERVATION_KEY: &str = "sarataData";
pub const VERDICT_KEY: &str = "finalVerdict";

/// Key-value backend holding serialized records.
pub trait RecordStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, key: &str, payload: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Error enumeration for backing store failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access stored '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("stored '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Patient, observation, and verdict records for one assessment.
#[derive(Debug)]
pub struct AnswerStore<S> {
    backend: S,
    patient: PatientRecord,
    observations: ObservationRecord,
    verdict: String,
}

impl<S: RecordStore> AnswerStore<S> {
    /// Loads all three records, substituting empty defaults for anything that
    /// is missing or unreadable. Read failures are returned, not raised.
    pub fn open(backend: S) -> (Self, Vec<PersistenceError>) {
        let mut failures = Vec::new();
        let patient = load_or_default(&backend, PATIENT_KEY, &mut failures);
        let observations = load_or_default(&backend, OBSERVATION_KEY, &mut failures);
        let verdict = load_or_default(&backend, VERDICT_KEY, &mut failures);

        let store = Self {
            backend,
            patient,
            observations,
            verdict,
        };
        (store, failures)
    }

    pub fn patient(&self) -> &PatientRecord {
        &self.patient
    }

    pub fn observations(&self) -> &ObservationRecord {
        &self.observations
    }

    pub fn verdict(&self) -> &str {
        &self.verdict
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Saved record backing `step`, if any.
    pub fn record_for(&self, step: &StepDefinition) -> Option<&StepRecord> {
        if step.is_patient_step() {
            Some(&self.patient).filter(|record| !record.is_empty())
        } else {
            self.observations.get(step.id)
        }
    }

    /// Replaces the record for `step`. Memory is updated before persisting,
    /// so a failed write still leaves the new record visible this session.
    pub fn put_step(
        &mut self,
        step: &StepDefinition,
        record: StepRecord,
    ) -> Result<(), PersistenceError> {
        if step.is_patient_step() {
            self.patient = record;
            persist(&mut self.backend, PATIENT_KEY, &self.patient)
        } else {
            self.observations.insert(step.id, record);
            persist(&mut self.backend, OBSERVATION_KEY, &self.observations)
        }
    }

    pub fn set_verdict(&mut self, verdict: String) -> Result<(), PersistenceError> {
        self.verdict = verdict;
        persist(&mut self.backend, VERDICT_KEY, &self.verdict)
    }

    /// Drops every record in memory and removes all persisted keys.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.patient = PatientRecord::default();
        self.observations = ObservationRecord::default();
        self.verdict.clear();

        let mut first_failure = None;
        for key in [PATIENT_KEY, OBSERVATION_KEY, VERDICT_KEY] {
            if let Err(err) = self.backend.remove(key) {
                warn!(key, error = %err, "failed to remove persisted record");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }

        first_failure.map_or(Ok(()), Err)
    }

    pub fn export_snapshot(&self, exported_at: DateTime<Utc>) -> Snapshot {
        Snapshot {
            patient_data: self.patient.clone(),
            sarata_data: self.observations.clone(),
            final_verdict: self.verdict.clone(),
            export_date: Some(exported_at),
        }
    }

    /// Replaces all three records with the snapshot contents and persists them.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), PersistenceError> {
        self.patient = snapshot.patient_data;
        self.observations = snapshot.sarata_data;
        self.verdict = snapshot.final_verdict;

        let results = [
            persist(&mut self.backend, PATIENT_KEY, &self.patient),
            persist(&mut self.backend, OBSERVATION_KEY, &self.observations),
            persist(&mut self.backend, VERDICT_KEY, &self.verdict),
        ];
        results.into_iter().collect::<Result<Vec<()>, _>>().map(|_| ())
    }
}

fn load_or_default<S, T>(backend: &S, key: &str, failures: &mut Vec<PersistenceError>) -> T
where
    S: RecordStore,
    T: DeserializeOwned + Default,
{
    let payload = match backend.read(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "falling back to empty record");
            failures.push(err);
            return T::default();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(value) => {
            debug!(key, "loaded persisted record");
            value
        }
        Err(source) => {
            let err = PersistenceError::Corrupt {
                key: key.to_string(),
                source,
            };
            warn!(key, error = %err, "falling back to empty record");
            failures.push(err);
            T::default()
        }
    }
}

fn persist<S, T>(backend: &mut S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    S: RecordStore,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value).map_err(|source| PersistenceError::Serialize {
        key: key.to_string(),
        source,
    })?;
    backend.write(key, &payload).inspect_err(|err| {
        warn!(key, error = %err, "failed to persist record");
    })
}
