use crate::commands::{
    run_demo, run_export, run_import, run_report, run_reset, run_status, run_steps, run_submit,
    run_verdict, run_wizard, DemoArgs, ExportArgs, ImportArgs, ReportArgs, ResetArgs, SubmitArgs,
    VerdictArgs,
};
use clap::{Parser, Subcommand};
use mutra_pariksha::config::AppConfig;
use mutra_pariksha::error::AppError;
use mutra_pariksha::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "mutra-pariksha",
    about = "Record a Mutra Pariksha examination step by step and review the dosha inference",
    version
)]
struct Cli {
    /// Directory holding the saved records (overrides APP_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the questionnaire interactively (default command)
    Wizard,
    /// List every step with its completion state and saved answers
    Steps,
    /// Submit answers for one step without prompting
    Submit(SubmitArgs),
    /// Record the practitioner's final verdict
    Verdict(VerdictArgs),
    /// Print the assessment report
    Report(ReportArgs),
    /// Write every record to a portable JSON file
    Export(ExportArgs),
    /// Replace every record with the contents of an exported file
    Import(ImportArgs),
    /// Summarize which records are complete
    Status,
    /// Clear every saved record
    Reset(ResetArgs),
    /// Run a scripted assessment in memory and print the result
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, data_dir = %config.storage.data_dir.display(), "configuration loaded");

    match cli.command.unwrap_or(Command::Wizard) {
        Command::Wizard => run_wizard(&config),
        Command::Steps => run_steps(&config),
        Command::Submit(args) => run_submit(args, &config),
        Command::Verdict(args) => run_verdict(args, &config),
        Command::Report(args) => run_report(args, &config),
        Command::Export(args) => run_export(args, &config),
        Command::Import(args) => run_import(args, &config),
        Command::Status => run_status(&config),
        Command::Reset(args) => run_reset(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
