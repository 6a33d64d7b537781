use mutra_pariksha::config::AppConfig;
use mutra_pariksha::error::AppError;
use mutra_pariksha::workflows::pariksha::{
    AssessmentSchema, AssessmentSession, FileRecordStore, RecordStore,
};
use std::io::Write;
use tracing::info;

pub(crate) fn open_session(
    config: &AppConfig,
) -> Result<AssessmentSession<FileRecordStore>, AppError> {
    let backend = FileRecordStore::open(&config.storage.data_dir)?;
    info!(data_dir = %config.storage.data_dir.display(), "opened assessment records");
    Ok(AssessmentSession::open(backend, config.inference.clone()))
}

/// Writes and clears pending notices, one `[level] message` line each.
pub(crate) fn write_notices<S: RecordStore, W: Write>(
    output: &mut W,
    session: &mut AssessmentSession<S>,
) -> std::io::Result<()> {
    for notice in session.drain_notices() {
        writeln!(output, "[{}] {}", notice.level.label(), notice.message)?;
    }
    Ok(())
}

/// Notices go to stderr so stdout stays usable for reports.
pub(crate) fn print_notices<S: RecordStore>(session: &mut AssessmentSession<S>) {
    let _ = write_notices(&mut std::io::stderr().lock(), session);
}

pub(crate) fn parse_field_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field id in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Resolves a step by id (case-insensitive) or 1-based position.
pub(crate) fn parse_step(raw: &str) -> Result<usize, String> {
    let schema = AssessmentSchema::standard();
    let raw = raw.trim();

    if let Ok(position) = raw.parse::<usize>() {
        return position
            .checked_sub(1)
            .filter(|index| *index < schema.step_count())
            .ok_or_else(|| format!("step number must be between 1 and {}", schema.step_count()));
    }

    schema
        .steps()
        .iter()
        .position(|step| step.id.eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            let ids: Vec<_> = schema.steps().iter().map(|step| step.id).collect();
            format!("unknown step '{raw}' (expected one of: {})", ids.join(", "))
        })
}
