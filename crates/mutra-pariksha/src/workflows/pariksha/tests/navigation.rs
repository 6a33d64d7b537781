use super::common::{baseline_values, complete_walk, notice_messages, session, session_with};
use crate::workflows::pariksha::navigator::NavigationError;
use crate::workflows::pariksha::store::{MemoryRecordStore, PATIENT_KEY};

#[test]
fn completeness_requires_every_field() {
    let empty = session();
    assert!(!empty.is_complete(0));

    let partial = session_with(
        MemoryRecordStore::default().with_entry(PATIENT_KEY, r#"{"name":"Asha","age":"42"}"#),
    );
    assert!(!partial.is_complete(0));

    let full = session_with(MemoryRecordStore::default().with_entry(
        PATIENT_KEY,
        r#"{"name":"Asha","age":"42","gender":"Female"}"#,
    ));
    assert!(full.is_complete(0));
}

#[test]
fn blank_values_do_not_count_toward_completeness() {
    let session = session_with(MemoryRecordStore::default().with_entry(
        PATIENT_KEY,
        r#"{"name":"Asha","age":"  ","gender":"Female"}"#,
    ));

    assert!(!session.is_complete(0));
}

#[test]
fn summary_and_out_of_range_indexes_are_never_complete() {
    let mut session = session();
    complete_walk(&mut session);

    assert!(!session.is_complete(session.schema().step_count()));
    assert!(!session.is_complete(42));
}

#[test]
fn forward_from_incomplete_step_is_refused() {
    let mut session = session();

    let result = session.navigate(1);

    assert_eq!(result, Err(NavigationError::IncompleteStep { index: 0 }));
    assert_eq!(session.current_index(), 0);
    assert_eq!(
        notice_messages(&mut session),
        vec!["Please complete the current page before moving forward".to_string()]
    );
}

#[test]
fn backward_at_first_step_stays_put() {
    let mut session = session();

    assert_eq!(session.navigate(-1), Ok(0));
    assert_eq!(session.current_index(), 0);
    assert!(session.drain_notices().is_empty());
}

#[test]
fn forward_on_summary_stays_put() {
    let mut session = session();
    complete_walk(&mut session);
    let terminal = session.current_index();

    assert_eq!(session.navigate(1), Ok(terminal));
    assert_eq!(session.current_index(), terminal);
}

#[test]
fn backward_moves_freely_over_incomplete_steps() {
    let mut session = session();
    session
        .submit_step(&baseline_values("patientInfo"))
        .expect("patient submission");
    assert_eq!(session.current_index(), 1);

    assert_eq!(session.navigate(-1), Ok(0));
    assert_eq!(session.navigate(1), Ok(1));
    assert_eq!(session.navigate(1), Err(NavigationError::IncompleteStep { index: 1 }));
}

#[test]
fn progress_tracks_position_over_step_count_plus_summary() {
    let mut session = session();
    assert_eq!(session.progress_pct(), 0.0);

    session
        .submit_step(&baseline_values("patientInfo"))
        .expect("patient submission");
    assert!((session.progress_pct() - 12.5).abs() < f32::EPSILON);

    complete_walk(&mut session);
    assert!((session.progress_pct() - 87.5).abs() < f32::EPSILON);
}

#[test]
fn seek_walks_through_complete_steps_only() {
    let mut session = session();
    session
        .submit_step(&baseline_values("patientInfo"))
        .expect("patient submission");
    session
        .submit_step(&baseline_values("Collection"))
        .expect("collection submission");
    session.navigate(-1).expect("retreat");
    session.navigate(-1).expect("retreat");

    assert_eq!(session.seek(2), Ok(2));
    assert_eq!(
        session.seek(5),
        Err(NavigationError::IncompleteStep { index: 2 })
    );
    assert_eq!(session.current_index(), 2);
}

#[test]
fn resume_stops_at_first_incomplete_step() {
    let mut session = session_with(MemoryRecordStore::default().with_entry(
        PATIENT_KEY,
        r#"{"name":"Asha","age":"42","gender":"Female"}"#,
    ));

    assert_eq!(session.resume(), 1);
    assert!(session.drain_notices().is_empty());
}
