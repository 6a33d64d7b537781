//! Line-oriented terminal front end for an [`AssessmentSession`].
//!
//! Each form step is prompted field by field; select fields accept either the
//! option number or its text. `:b` returns to the previous step and `:q`
//! stops (answers already submitted stay saved).

use crate::infra::write_notices;
use mutra_pariksha::error::AppError;
use mutra_pariksha::workflows::pariksha::{
    AssessmentSession, FieldValues, RecordStore, StepView, SubmissionError,
};
use std::io::{self, BufRead, Write};

const BACK: &str = ":b";
const QUIT: &str = ":q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WizardExit {
    Finished,
    Quit,
}

enum StepInput {
    Values(FieldValues),
    Back,
    Quit,
}

pub(crate) fn walk<S, R, W>(
    session: &mut AssessmentSession<S>,
    input: &mut R,
    output: &mut W,
) -> Result<WizardExit, AppError>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    session.resume();
    writeln!(
        output,
        "Mutra Pariksha assessment ({BACK} = previous step, {QUIT} = stop)"
    )?;

    loop {
        write_notices(output, session)?;

        if session.is_at_summary() {
            if let Some(exit) = summary(session, input, output)? {
                write_notices(output, session)?;
                return Ok(exit);
            }
            continue;
        }

        let Some(view) = session.step_view(session.current_index()) else {
            return Ok(WizardExit::Finished);
        };
        writeln!(
            output,
            "\n{} ({:.0}% complete)",
            view.title,
            session.progress_pct()
        )?;

        match prompt_step(&view, input, output)? {
            StepInput::Quit => return Ok(WizardExit::Quit),
            StepInput::Back => {
                let _ = session.navigate(-1);
            }
            StepInput::Values(values) => {
                if let Err(SubmissionError::InvalidFields(errors)) = session.submit_step(&values) {
                    for error in &errors {
                        writeln!(output, "  ! {}", error.message())?;
                    }
                }
            }
        }
    }
}

fn summary<S, R, W>(
    session: &mut AssessmentSession<S>,
    input: &mut R,
    output: &mut W,
) -> Result<Option<WizardExit>, AppError>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n{}", session.report().render_text())?;
    write!(output, "Final verdict (blank keeps the saved one): ")?;
    output.flush()?;

    let Some(answer) = read_answer(input)? else {
        return Ok(Some(WizardExit::Quit));
    };
    match answer.as_str() {
        QUIT => Ok(Some(WizardExit::Quit)),
        BACK => {
            let _ = session.navigate(-1);
            Ok(None)
        }
        "" => Ok(Some(WizardExit::Finished)),
        verdict => {
            if let Err(err) = session.save_verdict(verdict) {
                writeln!(output, "  ! {err}")?;
            }
            Ok(Some(WizardExit::Finished))
        }
    }
}

fn prompt_step<R: BufRead, W: Write>(
    view: &StepView,
    input: &mut R,
    output: &mut W,
) -> Result<StepInput, AppError> {
    let mut values = FieldValues::new();

    for field in &view.fields {
        write!(output, "{}", field.label)?;
        if let Some(options) = &field.options {
            let choices: Vec<_> = options
                .iter()
                .enumerate()
                .map(|(index, option)| format!("{}) {option}", index + 1))
                .collect();
            write!(output, " [{}]", choices.join("  "))?;
        }
        if let Some(saved) = &field.value {
            write!(output, " (current: {saved})")?;
        }
        write!(output, ": ")?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(StepInput::Quit);
        };
        let value = match answer.as_str() {
            BACK => return Ok(StepInput::Back),
            QUIT => return Ok(StepInput::Quit),
            "" => field.value.clone().unwrap_or_default(),
            raw => resolve_choice(field.options.as_deref(), raw),
        };
        values.insert(field.id.to_string(), value);
    }

    Ok(StepInput::Values(values))
}

/// Maps an option number or case-insensitive option text to the canonical
/// option; anything else passes through for the session to reject.
fn resolve_choice(options: Option<&[&str]>, raw: &str) -> String {
    let Some(options) = options else {
        return raw.to_string();
    };

    raw.parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| options.get(index))
        .or_else(|| options.iter().find(|option| option.eq_ignore_ascii_case(raw)))
        .map(|option| option.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
