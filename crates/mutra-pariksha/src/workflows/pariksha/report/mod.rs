mod export;
mod summary;
pub mod views;

pub use export::write_observations_csv;
pub use summary::{AssessmentReport, ObservationSection, ReportLine};
