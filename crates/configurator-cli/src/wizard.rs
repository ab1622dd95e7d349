//! Terminal wizard driver.
//!
//! The interactive run reads one line per question from any `BufRead`, so
//! the same loop serves a terminal and piped input. The scripted run takes
//! all answers from an answers file and walks the session without prompting.

use std::{collections::BTreeMap, io::BufRead};

use anyhow::{bail, Context, Result};
use configurator_core::{
    display::{render_position, OperationStatus, SubmitResult},
    engine::Position,
    models::{AnswerValue, Answers, AppointmentSelection, ContactInfo, InputKind, Step},
    ConfiguratorService, WizardSession,
};
use log::debug;
use serde::Deserialize;

use crate::renderer::TerminalRenderer;

/// Typed instead of an answer to return to the previous question.
pub const BACK_COMMAND: &str = ":back";

/// Contents of a `--answers` file.
///
/// ```json
/// {
///   "answers": {"color": "black", "width": 500, "_more_customization": false},
///   "contact": {"name": "Ann", "email": "ann@example.com", "phone": "0612345678"},
///   "appointment": {"wanted": true, "date": "2026-11-03", "time": "10:30"}
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptedRun {
    #[serde(default)]
    pub answers: Answers,
    pub contact: ContactInfo,
    #[serde(default)]
    pub appointment: AppointmentSelection,
}

/// Owned copy of the session position, so the session can be mutated while
/// the current question is handled.
enum Current {
    Step(Step),
    Gateway,
    Contact,
}

fn current(session: &WizardSession) -> Current {
    match session.position() {
        Position::Step(step) => Current::Step(step.clone()),
        Position::Gateway => Current::Gateway,
        Position::Contact => Current::Contact,
    }
}

pub async fn run_interactive<R: BufRead>(
    service: &ConfiguratorService,
    renderer: &TerminalRenderer,
    mut session: WizardSession,
    mut input: R,
) -> Result<()> {
    let locale = service.locale().to_string();
    renderer.render(&format!("# {}\n\n", session.schema().name))?;

    loop {
        renderer.render(&render_position(&session, &locale))?;
        match current(&session) {
            Current::Contact => break,
            Current::Gateway => {
                let choice = read_line(renderer, &mut input, "Your choice:")?;
                match choice.to_lowercase().as_str() {
                    BACK_COMMAND => {
                        session.retreat();
                        continue;
                    }
                    "1" | "y" | "yes" => session.choose_more_customization(true),
                    "2" | "n" | "no" => session.choose_more_customization(false),
                    _ => {
                        warn(renderer, "Please answer 1 (yes) or 2 (no)")?;
                        continue;
                    }
                }
                // The choice can reveal a step under the cursor; ask it first
                if session.position() != Position::Gateway {
                    continue;
                }
            }
            Current::Step(step) => {
                let line = read_line(renderer, &mut input, "Your answer:")?;
                if line == BACK_COMMAND {
                    if !session.retreat() {
                        warn(renderer, "This is the first question")?;
                    }
                    continue;
                }
                // An empty line keeps the current answer
                if !line.is_empty() {
                    match parse_input(&step, &line) {
                        Ok(value) => session.set_answer(step.field_name.as_str(), value),
                        Err(message) => {
                            warn(renderer, &message)?;
                            continue;
                        }
                    }
                }
            }
        }

        if let Err(e) = session.advance() {
            warn(renderer, &e.to_string())?;
        }
    }

    let contact = ask_contact(renderer, &mut input)?;
    let appointment = ask_appointment(renderer, &mut input)?;
    finish(service, renderer, &session, contact, appointment).await
}

pub async fn run_scripted(
    service: &ConfiguratorService,
    renderer: &TerminalRenderer,
    mut session: WizardSession,
    run: ScriptedRun,
) -> Result<()> {
    for (field, value) in run.answers.iter() {
        session.set_answer(field.as_str(), value.clone());
    }

    while !session.is_complete() {
        // A missing gateway choice means no further customization
        if session.position() == Position::Gateway
            && session.answers().more_customization().is_none()
        {
            session.choose_more_customization(false);
        }
        session
            .advance()
            .context("The answers file does not complete the wizard")?;
    }
    debug!("Scripted run reached the contact step");

    finish(service, renderer, &session, run.contact, run.appointment).await
}

async fn finish(
    service: &ConfiguratorService,
    renderer: &TerminalRenderer,
    session: &WizardSession,
    contact: ContactInfo,
    appointment: AppointmentSelection,
) -> Result<()> {
    let submission = service.submit(session, contact, appointment).await?;
    renderer.render(&SubmitResult {
        submission: &submission,
    }
    .to_string())
}

/// Converts one line of user input into an answer for `step`.
///
/// Choice steps take option numbers (as listed in the prompt) or option
/// values; checkboxes take several, separated by commas. `dimensions` takes
/// `key=value` pairs or plain values in measurement order. Numbers that do
/// not parse are kept as text so the validator reports them.
pub fn parse_input(step: &Step, input: &str) -> std::result::Result<AnswerValue, String> {
    let input = input.trim();
    match &step.kind {
        InputKind::RadioImage { .. } | InputKind::Radio { .. } | InputKind::Select { .. } => {
            choose_option(step, input).map(AnswerValue::Text)
        }
        InputKind::Checkbox { .. } => split_list(input)
            .map(|part| choose_option(step, part))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(AnswerValue::Choices),
        InputKind::Number { .. } | InputKind::Dimension { .. } => Ok(match input.parse::<f64>() {
            Ok(number) => AnswerValue::Number(number),
            Err(_) => AnswerValue::Text(input.to_string()),
        }),
        InputKind::Dimensions { measurements } => {
            let mut values = BTreeMap::new();
            for (index, part) in split_list(input).enumerate() {
                let (key, raw) = match part.split_once('=') {
                    Some((key, raw)) => (key.trim(), raw.trim()),
                    None => match measurements.get(index) {
                        Some(measurement) => (measurement.key.as_str(), part),
                        None => return Err(format!("Too many values: '{part}'")),
                    },
                };
                if !measurements.iter().any(|m| m.key == key) {
                    return Err(format!("Unknown measurement '{key}'"));
                }
                let number = raw
                    .parse::<f64>()
                    .map_err(|_| format!("{key}: '{raw}' is not a number"))?;
                values.insert(key.to_string(), number);
            }
            Ok(AnswerValue::Measurements(values))
        }
        InputKind::Text { .. } | InputKind::Textarea => Ok(AnswerValue::Text(input.to_string())),
    }
}

/// Resolves a 1-based option number or an option value.
fn choose_option(step: &Step, input: &str) -> std::result::Result<String, String> {
    let active: Vec<_> = step.options().iter().filter(|o| o.active).collect();
    if let Ok(number) = input.parse::<usize>() {
        if let Some(option) = number.checked_sub(1).and_then(|i| active.get(i)) {
            return Ok(option.value.clone());
        }
    }
    active
        .iter()
        .find(|option| option.value == input)
        .map(|option| option.value.clone())
        .ok_or_else(|| format!("'{input}' is not one of the listed options"))
}

fn split_list(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|part| !part.is_empty())
}

fn ask_contact<R: BufRead>(renderer: &TerminalRenderer, input: &mut R) -> Result<ContactInfo> {
    renderer.render("## Contact details\n\n")?;
    let mut contact = ContactInfo::new(
        read_line(renderer, input, "Name:")?,
        read_line(renderer, input, "Email:")?,
        read_line(renderer, input, "Phone:")?,
    );

    loop {
        let missing = contact.missing_fields();
        if missing.is_empty() {
            break;
        }
        warn(renderer, &format!("Please fill in: {}", missing.join(", ")))?;
        for field in missing {
            let value = read_line(renderer, input, &format!("{}:", capitalize(field)))?;
            match field {
                "name" => contact.name = value,
                "email" => contact.email = value,
                _ => contact.phone = value,
            }
        }
    }

    contact.address = optional(read_line(renderer, input, "Address (optional):")?);
    contact.city = optional(read_line(renderer, input, "City (optional):")?);
    contact.notes = optional(read_line(renderer, input, "Notes (optional):")?);
    Ok(contact)
}

fn ask_appointment<R: BufRead>(
    renderer: &TerminalRenderer,
    input: &mut R,
) -> Result<AppointmentSelection> {
    let wanted = read_line(renderer, input, "Schedule an appointment? [y/N]:")?;
    if !matches!(wanted.to_lowercase().as_str(), "y" | "yes") {
        return Ok(AppointmentSelection::none());
    }

    let service_type = optional(read_line(renderer, input, "Appointment type (optional):")?);
    let date = loop {
        let date = read_line(renderer, input, "Date (YYYY-MM-DD):")?;
        match date.parse::<jiff::civil::Date>() {
            Ok(_) => break date,
            Err(_) => warn(renderer, "Enter the date as YYYY-MM-DD")?,
        }
    };
    let time = loop {
        let time = read_line(renderer, input, "Time (HH:MM):")?;
        match time.parse::<jiff::civil::Time>() {
            Ok(_) => break time,
            Err(_) => warn(renderer, "Enter the time as HH:MM")?,
        }
    };
    Ok(AppointmentSelection::requested(service_type, date, time))
}

fn read_line<R: BufRead>(renderer: &TerminalRenderer, input: &mut R, label: &str) -> Result<String> {
    renderer.prompt(label)?;
    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        bail!("Input ended before the wizard was finished");
    }
    Ok(line.trim().to_string())
}

fn warn(renderer: &TerminalRenderer, message: &str) -> Result<()> {
    renderer.render(&OperationStatus::warning(message).to_string())
}

fn optional(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
