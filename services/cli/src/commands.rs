use crate::infra::{open_session, parse_field_value, parse_step, print_notices};
use crate::wizard::{self, WizardExit};
use chrono::Utc;
use clap::Args;
use mutra_pariksha::config::AppConfig;
use mutra_pariksha::error::AppError;
use mutra_pariksha::workflows::pariksha::{
    write_observations_csv, AssessmentReport, AssessmentSession, FieldValues, MemoryRecordStore,
    RecordStore, Snapshot, SubmissionError,
};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Step id or 1-based number. Defaults to the first incomplete step.
    #[arg(long, value_parser = parse_step)]
    pub(crate) step: Option<usize>,
    /// Field answer as FIELD=VALUE; repeat for each field of the step
    #[arg(long = "value", value_parser = parse_field_value)]
    pub(crate) values: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub(crate) struct VerdictArgs {
    /// Verdict text; surrounding whitespace is dropped
    pub(crate) text: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Also write the observations as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Destination file. Defaults to mutra-pariksha-report-YYYY-MM-DD.json
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Previously exported JSON file
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResetArgs {
    /// Confirm that every saved record should be deleted
    #[arg(long)]
    pub(crate) yes: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the exported snapshot after the report
    #[arg(long)]
    pub(crate) show_snapshot: bool,
    /// Print the per-rule score breakdown
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_wizard(config: &AppConfig) -> Result<(), AppError> {
    let mut session = open_session(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let exit = wizard::walk(&mut session, &mut stdin.lock(), &mut stdout.lock())?;
    if exit == WizardExit::Quit {
        println!("Answers saved. Run `mutra-pariksha wizard` to continue.");
    }
    Ok(())
}

pub(crate) fn run_steps(config: &AppConfig) -> Result<(), AppError> {
    let mut session = open_session(config)?;
    let current = session.resume();
    print_notices(&mut session);

    for index in 0..session.schema().step_count() {
        let Some(view) = session.step_view(index) else {
            continue;
        };
        let marker = if index == current { ">" } else { " " };
        let state = if view.complete { "✓" } else { "✗" };
        println!("{marker} {state} {} [{}]", view.title, view.id);

        for field in &view.fields {
            let value = field.value.as_deref().unwrap_or("-");
            match &field.options {
                Some(options) => println!(
                    "      {} ({}): {} [{}]",
                    field.label,
                    field.id,
                    value,
                    options.join(" | ")
                ),
                None => println!("      {} ({}): {}", field.label, field.id, value),
            }
        }
    }

    let marker = if session.is_at_summary() { ">" } else { " " };
    println!("{marker}   Summary");
    println!("Progress: {:.0}%", session.progress_pct());
    Ok(())
}

pub(crate) fn run_submit(args: SubmitArgs, config: &AppConfig) -> Result<(), AppError> {
    let SubmitArgs { step, values } = args;
    let mut session = open_session(config)?;

    let target = step.unwrap_or_else(|| session.resume());
    if let Err(err) = session.seek(target) {
        print_notices(&mut session);
        return Err(err.into());
    }

    let values: FieldValues = values.into_iter().collect();
    match session.submit_step(&values) {
        Ok(outcome) => {
            print_notices(&mut session);
            let next = session
                .current_step()
                .map(|step| step.title)
                .unwrap_or("Summary");
            println!("Saved {}. Next: {next}", outcome.saved_step);
            Ok(())
        }
        Err(err) => {
            print_notices(&mut session);
            if let SubmissionError::InvalidFields(errors) = &err {
                for error in errors {
                    eprintln!("  ! {}", error.message());
                }
            }
            Err(err.into())
        }
    }
}

pub(crate) fn run_verdict(args: VerdictArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut session = open_session(config)?;
    let result = session.save_verdict(&args.text);
    print_notices(&mut session);
    result?;
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut session = open_session(config)?;
    print_notices(&mut session);
    let report = session.report();

    if let Some(path) = &args.csv {
        write_observations_csv(&report, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), rows = report_rows(&report), "observations written as csv");
        eprintln!("Observations written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.view())?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs, config: &AppConfig) -> Result<(), AppError> {
    let session = open_session(config)?;
    let exported_at = Utc::now();
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(Snapshot::file_name(exported_at)));

    let snapshot = session.export_snapshot(exported_at);
    fs::write(&path, snapshot.to_json_pretty()?)?;
    info!(path = %path.display(), "assessment exported");
    println!("Exported assessment to {}", path.display());
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs, config: &AppConfig) -> Result<(), AppError> {
    let payload = fs::read_to_string(&args.path)?;
    let mut session = open_session(config)?;
    let result = session.import_snapshot(&payload);
    print_notices(&mut session);
    result?;

    print!("{}", session.data_status().render_text());
    Ok(())
}

pub(crate) fn run_status(config: &AppConfig) -> Result<(), AppError> {
    let mut session = open_session(config)?;
    print_notices(&mut session);

    print!("{}", session.data_status().render_text());
    println!("Records: {}", config.storage.data_dir.display());
    Ok(())
}

pub(crate) fn run_reset(args: ResetArgs, config: &AppConfig) -> Result<(), AppError> {
    if !args.yes {
        println!("Nothing cleared. Re-run with --yes to delete every saved record.");
        return Ok(());
    }

    let mut session = open_session(config)?;
    session.reset();
    print_notices(&mut session);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        show_snapshot,
        explain,
    } = args;

    println!("Mutra Pariksha demo (in-memory records)");
    let mut session =
        AssessmentSession::open(MemoryRecordStore::default(), config.inference.clone());
    run_scripted_assessment(&mut session)?;

    let report = session.report();
    println!();
    print!("{}", report.render_text());

    if explain {
        render_contributions(&report);
    }

    println!();
    print!("{}", session.data_status().render_text());

    if show_snapshot {
        let snapshot = session.export_snapshot(Utc::now());
        println!("\n{}", snapshot.to_json_pretty()?);
    }
    Ok(())
}

fn run_scripted_assessment<S: RecordStore>(
    session: &mut AssessmentSession<S>,
) -> Result<(), AppError> {
    for values in demo_answers() {
        let outcome = session.submit_step(&values)?;
        println!(
            "  saved {:<12} progress {:>3.0}%",
            outcome.saved_step,
            session.progress_pct()
        );
    }
    session.save_verdict("Pitta aggravation with mild vata involvement; cooling diet advised")?;
    Ok(())
}

fn demo_answers() -> Vec<FieldValues> {
    let answers = |pairs: &[(&str, &str)]| -> FieldValues {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    };

    vec![
        answers(&[("name", "Ravi Kumar"), ("age", "57"), ("gender", "Male")]),
        answers(&[
            ("collection_time", "Morning"),
            ("fasting_state", "Fasting"),
            ("quantity", "Scanty"),
            ("frequency", "High"),
            ("urgency", "Strong"),
            ("dysuria", "Mild"),
        ]),
        answers(&[("varna", "Dark Yellow")]),
        answers(&[("gandha", "Strong"), ("burning", "Burning")]),
        answers(&[
            ("phenila", "Persistent"),
            ("avila", "Clear"),
            ("sediment", "Minimal"),
        ]),
        answers(&[
            ("picchila", "Absent"),
            ("snigdhatva", "Absent"),
            ("tantra", "Present"),
        ]),
        answers(&[("nocturia", "No"), ("pain", "Mild"), ("edema", "No")]),
    ]
}

fn render_contributions(report: &AssessmentReport) {
    println!("\nScore breakdown");
    for entry in &report.inference.contributions {
        println!(
            "  +{} {:<5} {}.{} = {}",
            entry.points,
            entry.dosha.name(),
            entry.step_id,
            entry.field_id,
            entry.value
        );
    }
    let scores = report.inference.scores;
    println!(
        "  totals: vata {} / pitta {} / kapha {}",
        scores.vata, scores.pitta, scores.kapha
    );
}

fn report_rows(report: &AssessmentReport) -> usize {
    report.sections.iter().map(|section| section.lines.len()).sum()
}
