use super::summary::AssessmentReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ObservationRow<'a> {
    step_id: &'a str,
    step_title: &'a str,
    field_id: &'a str,
    field_label: &'a str,
    value: &'a str,
}

/// Writes one CSV row per recorded observation value, in report order.
pub fn write_observations_csv<W: Write>(
    report: &AssessmentReport,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for section in &report.sections {
        for line in &section.lines {
            csv_writer.serialize(ObservationRow {
                step_id: &section.step_id,
                step_title: section.title.unwrap_or_default(),
                field_id: &line.field_id,
                field_label: &line.label,
                value: &line.value,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
