use super::domain::{ObservationRecord, PatientRecord};
use super::store::{OBSERVATION_KEY, PATIENT_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Portable bundle of every record, exchanged as a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub patient_data: PatientRecord,
    pub sarata_data: ObservationRecord,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub final_verdict: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub export_date: Option<DateTime<Utc>>,
}

/// Rejection raised when an import payload is not a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum InvalidFormatError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("payload is missing required key '{0}'")]
    MissingKey(&'static str),
    #[error("payload has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl Snapshot {
    /// Validates and decodes an import payload. Both record keys must be
    /// present and non-null; `finalVerdict` and `exportDate` are optional.
    pub fn parse(payload: &str) -> Result<Self, InvalidFormatError> {
        let value: Value = serde_json::from_str(payload).map_err(InvalidFormatError::Json)?;
        let object = value.as_object().ok_or(InvalidFormatError::NotAnObject)?;

        for key in [PATIENT_KEY, OBSERVATION_KEY] {
            match object.get(key) {
                None | Some(Value::Null) => return Err(InvalidFormatError::MissingKey(key)),
                Some(_) => {}
            }
        }

        serde_json::from_value(value).map_err(InvalidFormatError::Shape)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn file_name(exported_at: DateTime<Utc>) -> String {
        format!(
            "mutra-pariksha-report-{}.json",
            exported_at.date_naive().format("%Y-%m-%d")
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_accepts_minimal_payload() {
        let snapshot = Snapshot::parse(r#"{"patientData": {}, "sarataData": {}}"#)
            .expect("minimal snapshot parses");
        assert!(snapshot.patient_data.is_empty());
        assert!(snapshot.sarata_data.is_empty());
        assert_eq!(snapshot.final_verdict, "");
        assert!(snapshot.export_date.is_none());
    }

    #[test]
    fn parse_treats_null_verdict_and_bad_dates_as_absent() {
        let snapshot = Snapshot::parse(
            r#"{"patientData": {"name": "Asha"}, "sarataData": {}, "finalVerdict": null, "exportDate": "yesterday"}"#,
        )
        .expect("snapshot parses");
        assert_eq!(snapshot.final_verdict, "");
        assert!(snapshot.export_date.is_none());
        assert_eq!(snapshot.patient_data.get("name"), Some("Asha"));
    }

    #[test]
    fn parse_rejects_missing_or_null_record_keys() {
        match Snapshot::parse(r#"{"patientData": {"name": "Asha"}}"#) {
            Err(InvalidFormatError::MissingKey(key)) => assert_eq!(key, "sarataData"),
            other => panic!("expected missing key, got {other:?}"),
        }
        match Snapshot::parse(r#"{"patientData": null, "sarataData": {}}"#) {
            Err(InvalidFormatError::MissingKey(key)) => assert_eq!(key, "patientData"),
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_non_json_and_wrong_shapes() {
        assert!(matches!(
            Snapshot::parse("not json"),
            Err(InvalidFormatError::Json(_))
        ));
        assert!(matches!(
            Snapshot::parse("[1, 2]"),
            Err(InvalidFormatError::NotAnObject)
        ));
        assert!(matches!(
            Snapshot::parse(r#"{"patientData": 4, "sarataData": {}}"#),
            Err(InvalidFormatError::Shape(_))
        ));
    }

    #[test]
    fn export_uses_camel_case_keys_and_dated_file_name() {
        let exported_at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 30, 0).unwrap();
        let snapshot = Snapshot {
            patient_data: PatientRecord::default(),
            sarata_data: ObservationRecord::default(),
            final_verdict: "Pitta aggravation".to_string(),
            export_date: Some(exported_at),
        };

        let json: Value =
            serde_json::from_str(&snapshot.to_json_pretty().expect("serializes")).expect("json");
        for key in ["patientData", "sarataData", "finalVerdict", "exportDate"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["exportDate"], "2025-03-09T14:30:00Z");
        assert_eq!(
            Snapshot::file_name(exported_at),
            "mutra-pariksha-report-2025-03-09.json"
        );
    }
}
