use super::common::{baseline_values, complete_walk, notice_messages, session, values};
use crate::workflows::pariksha::domain::{FieldErrorReason, NoticeLevel};
use crate::workflows::pariksha::session::{SubmissionError, VerdictError};
use crate::workflows::pariksha::snapshot::InvalidFormatError;
use crate::workflows::pariksha::store::{OBSERVATION_KEY, PATIENT_KEY, VERDICT_KEY};
use chrono::{TimeZone, Utc};

#[test]
fn submit_saves_record_and_advances() {
    let mut session = session();

    let outcome = session
        .submit_step(&values(&[
            ("name", "  Asha Rao "),
            ("age", "42"),
            ("gender", "Female"),
        ]))
        .expect("valid patient submission");

    assert_eq!(outcome.saved_step, "patientInfo");
    assert!(outcome.persisted);
    assert_eq!(outcome.current_index, 1);
    assert_eq!(session.store().patient().get("name"), Some("Asha Rao"));
    assert!(session.store().backend().contains(PATIENT_KEY));
    assert_eq!(
        notice_messages(&mut session),
        vec!["Data saved successfully".to_string()]
    );
}

#[test]
fn submit_rejects_missing_and_unknown_values() {
    let mut session = session();

    let err = session
        .submit_step(&values(&[("name", "Asha"), ("age", " "), ("gender", "Unknown")]))
        .expect_err("invalid submission");

    let SubmissionError::InvalidFields(errors) = err else {
        panic!("expected field errors");
    };
    let messages: Vec<_> = errors.iter().map(|error| error.message()).collect();
    assert_eq!(
        messages,
        vec![
            "Age is required".to_string(),
            "Gender must be one of: Male, Female, Other".to_string(),
        ]
    );
    assert_eq!(errors[0].reason, FieldErrorReason::Required);
    assert_eq!(session.current_index(), 0);
    assert!(session.store().patient().is_empty());

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Please fill all required fields");
}

#[test]
fn submit_on_summary_is_rejected() {
    let mut session = session();
    complete_walk(&mut session);

    let err = session
        .submit_step(&baseline_values("Additional"))
        .expect_err("summary has no form");
    assert_eq!(err, SubmissionError::AtSummary);
}

#[test]
fn resubmitting_a_step_replaces_its_record() {
    let mut session = session();
    complete_walk(&mut session);
    session.seek(2).expect("varna reachable");

    session
        .submit_step(&values(&[("varna", "Dark Yellow")]))
        .expect("varna resubmission");

    assert_eq!(
        session.store().observations().field_value("Varna", "varna"),
        "Dark Yellow"
    );
    assert_eq!(session.current_index(), 3);
    assert_eq!(session.inference().scores.pitta, 3);
}

#[test]
fn step_view_prefills_saved_values() {
    let mut session = session();
    session
        .submit_step(&baseline_values("patientInfo"))
        .expect("patient submission");

    let view = session.step_view(0).expect("patient view");
    assert!(view.complete);
    assert_eq!(view.title, "1. Patient Record");
    assert_eq!(view.fields[0].value.as_deref(), Some("Asha Rao"));
    assert_eq!(view.fields[2].options.as_deref(), Some(&["Male", "Female", "Other"][..]));

    let next = session.step_view(1).expect("collection view");
    assert!(!next.complete);
    assert!(next.fields.iter().all(|field| field.value.is_none()));
    assert!(session.step_view(7).is_none());
}

#[test]
fn verdict_is_trimmed_and_blank_is_rejected() {
    let mut session = session();

    assert_eq!(session.save_verdict("   "), Err(VerdictError::Blank));
    assert_eq!(
        notice_messages(&mut session),
        vec!["Please provide a final verdict".to_string()]
    );

    session
        .save_verdict("  Pitta aggravation, review diet  ")
        .expect("verdict saved");
    assert_eq!(session.store().verdict(), "Pitta aggravation, review diet");
    assert!(session.store().backend().contains(VERDICT_KEY));
    assert_eq!(
        notice_messages(&mut session),
        vec!["Final Verdict Saved Successfully!".to_string()]
    );
}

#[test]
fn reset_clears_records_and_returns_to_first_step() {
    let mut session = session();
    complete_walk(&mut session);
    session.save_verdict("Vata pattern").expect("verdict saved");
    session.drain_notices();

    session.reset();

    assert_eq!(session.current_index(), 0);
    assert!(!session.is_complete(0));
    assert!(session.store().patient().is_empty());
    assert!(session.store().observations().is_empty());
    assert!(session.store().verdict().is_empty());
    for key in [PATIENT_KEY, OBSERVATION_KEY, VERDICT_KEY] {
        assert!(!session.store().backend().contains(key));
    }
    assert_eq!(
        notice_messages(&mut session),
        vec!["All data cleared successfully".to_string()]
    );
}

#[test]
fn export_then_import_restores_identical_records() {
    let mut source = session();
    complete_walk(&mut source);
    source.save_verdict("Vata pattern").expect("verdict saved");
    let exported_at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
    let payload = source
        .export_snapshot(exported_at)
        .to_json_pretty()
        .expect("snapshot serializes");

    let mut target = session();
    target.import_snapshot(&payload).expect("import succeeds");

    assert_eq!(target.store().patient(), source.store().patient());
    assert_eq!(target.store().observations(), source.store().observations());
    assert_eq!(target.store().verdict(), "Vata pattern");
    assert_eq!(target.inference(), source.inference());
    assert!(target.store().backend().contains(OBSERVATION_KEY));
    assert_eq!(
        notice_messages(&mut target),
        vec!["Data imported successfully".to_string()]
    );
}

#[test]
fn import_without_observations_leaves_state_untouched() {
    let mut session = session();
    session
        .submit_step(&baseline_values("patientInfo"))
        .expect("patient submission");
    session.drain_notices();

    let err = session
        .import_snapshot(r#"{"patientData":{"name":"Someone Else"}}"#)
        .expect_err("missing sarataData");

    assert!(matches!(err, InvalidFormatError::MissingKey("sarataData")));
    assert_eq!(session.store().patient().get("name"), Some("Asha Rao"));
    assert_eq!(
        notice_messages(&mut session),
        vec!["Invalid file format or corrupted data".to_string()]
    );
}

#[test]
fn import_rejects_non_json_payloads() {
    let mut session = session();

    let err = session
        .import_snapshot("definitely not json")
        .expect_err("garbage payload");

    assert!(matches!(err, InvalidFormatError::Json(_)));
}

#[test]
fn imported_blank_values_leave_step_incomplete() {
    let mut session = session();

    session
        .import_snapshot(
            r#"{"patientData":{"name":"Asha","age":" ","gender":"Female"},"sarataData":{}}"#,
        )
        .expect("structurally valid import");

    assert!(!session.is_complete(0));
    assert_eq!(session.resume(), 0);
}

#[test]
fn data_status_counts_observation_steps() {
    let mut session = session();
    let status = session.data_status();
    assert!(!status.patient_complete);
    assert_eq!(status.completed_steps, 0);
    assert_eq!(status.total_steps, 6);
    assert!(!status.verdict_saved);

    complete_walk(&mut session);
    session.save_verdict("Vata pattern").expect("verdict saved");

    let status = session.data_status();
    assert!(status.patient_complete);
    assert_eq!(status.completed_steps, 6);
    assert!(status.verdict_saved);
}

#[test]
fn report_lists_observations_and_inference() {
    let mut session = session();
    session
        .import_snapshot(
            r#"{
                "patientData": {"name": "Asha Rao", "age": "42"},
                "sarataData": {
                    "Gandha": {"gandha": "Foul", "burning": "Burning"},
                    "Varna": {"varna": "Dark Yellow"}
                },
                "finalVerdict": null
            }"#,
        )
        .expect("import succeeds");

    let report = session.report();

    assert_eq!(
        report.patient_text(),
        "Name: Asha Rao\nAge: 42\nGender: N/A\n"
    );
    let text = report.observation_text();
    let varna = text.find("--- Varna ---").expect("varna section");
    let gandha = text.find("--- Gandha ---").expect("gandha section");
    assert!(varna < gandha);
    assert!(text.contains("  Odor: Foul\n"));
    assert!(text.contains("Dosha Inference: PITTA dominant pattern\n"));
    assert!(text.contains("Recommendations:"));
    assert!(report.render_text().contains("(not recorded)"));
}

#[test]
fn report_keeps_unknown_steps_after_known_ones() {
    let mut session = session();
    session
        .import_snapshot(
            r#"{"patientData":{},"sarataData":{"Sparsha":{"touch":"Warm"},"Varna":{"varna":"Straw"}}}"#,
        )
        .expect("import succeeds");

    let report = session.report();
    let ids: Vec<_> = report
        .sections
        .iter()
        .map(|section| section.step_id.as_str())
        .collect();
    assert_eq!(ids, ["Varna", "Sparsha"]);
    assert_eq!(report.sections[1].title, None);
    assert_eq!(report.sections[1].lines[0].label, "touch");
}
