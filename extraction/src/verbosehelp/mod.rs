//! Parsing of the task docstring that CASA prints for `help(<task>)`.
//!
//! The interesting part of the docstring is the block between the "Arguments" and "Returns"
//! headings. Each line in it carries a one character formatting marker, followed by either
//! `name: description`, `Default Value: literal`, `Allowed Values:` or a bare allowed value.


use crate::{
    description::{ParameterDescriptor, ParseOutcome},
    diagnostics::{Diagnostic, Problem},
    literal::{self, LiteralError, LiteralValue},
};

const ARGUMENTS_MARKER: &str = "Arguments";
const RETURNS_MARKER: &str = "Returns";
const DEFAULT_VALUE_LABEL: &str = "Default Value";
const ALLOWED_VALUES_LABEL: &str = "Allowed Values";

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum VerboseHelpError {
    #[error("no line containing {marker:?} found")]
    MissingMarker { marker: &'static str },
    #[error("line {line_number}: {label:?} appears before any parameter")]
    NoCurrentParameter { line_number: usize, label: String },
    #[error("line {line_number}: default value of parameter {parameter:?}")]
    Literal {
        line_number: usize,
        parameter: String,
        #[source]
        source: LiteralError,
    },
}

/// Parses the parameter descriptions out of `help(<task>)` output.
pub fn parse(text: &str) -> Result<ParseOutcome, VerboseHelpError> {
    let lines: Vec<&str> = text.lines().collect();
    let (first_line, region) = arguments_region(&lines)?;

    let state = region
        .iter()
        .enumerate()
        .map(|(idx, line)| (first_line + idx + 1, *line))
        .try_fold(ScanState::default(), ScanState::step)?;

    Ok(state.outcome)
}

/// Returns the lines strictly between the last "Arguments" line preceding the first "Returns"
/// line, and that "Returns" line. Also returns the 0-based index of the first returned line.
///
/// Markers are found by unanchored substring search, so a parameter description containing
/// either word can move the region boundaries.
fn arguments_region<'a, 'b>(
    lines: &'b [&'a str],
) -> Result<(usize, &'b [&'a str]), VerboseHelpError> {
    let mut start = None;
    let mut end = None;
    for (idx, line) in lines.iter().enumerate() {
        if line.contains(ARGUMENTS_MARKER) {
            start = Some(idx + 1);
        } else if line.contains(RETURNS_MARKER) {
            end = Some(idx);
            break;
        }
    }

    let start = start.ok_or(VerboseHelpError::MissingMarker {
        marker: ARGUMENTS_MARKER,
    })?;
    let end = end.ok_or(VerboseHelpError::MissingMarker {
        marker: RETURNS_MARKER,
    })?;
    log::debug!("Arguments region spans lines {}..{}.", start + 1, end + 1);

    Ok((start, &lines[start..end]))
}

/// Content of a single line of the arguments region.
#[derive(Debug, Eq, PartialEq)]
enum Line<'a> {
    Key { label: &'a str, value: &'a str },
    Value(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a raw line, returning `None` for blank lines.
    fn classify(raw: &'a str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        chars.next();
        let line = chars.as_str().trim();

        if line.is_empty() {
            return None;
        }

        Some(match line.split_once(':') {
            Some((label, value)) => Line::Key {
                label: label.trim(),
                value: value.trim(),
            },
            None => Line::Value(line),
        })
    }
}

/// Accumulator threaded through the lines of the arguments region.
#[derive(Default)]
struct ScanState {
    outcome: ParseOutcome,
    /// Parameter that subsequent default and allowed value lines apply to.
    current: Option<String>,
}

impl ScanState {
    fn step(mut self, (line_number, raw): (usize, &str)) -> Result<Self, VerboseHelpError> {
        let Some(line) = Line::classify(raw) else {
            return Ok(self);
        };
        log::debug!("{line_number}: {line:?}");

        match line {
            Line::Key { label, value } if label.contains(DEFAULT_VALUE_LABEL) => {
                let (name, param) = self.current_param(line_number, label)?;
                let default = match literal::parse_literal(value) {
                    Ok(default) => default,
                    Err(LiteralError::Syntax { .. }) => LiteralValue::from(value),
                    Err(source) => {
                        return Err(VerboseHelpError::Literal {
                            line_number,
                            parameter: name.to_owned(),
                            source,
                        });
                    }
                };
                param.set_default(default);
            }
            Line::Key { label, .. } if label.contains(ALLOWED_VALUES_LABEL) => {
                let (_, param) = self.current_param(line_number, label)?;
                param.choices = Some(Vec::new());
            }
            Line::Key { label, value } => {
                self.outcome.description.entry(label).info = value.to_owned();
                self.current = Some(label.to_owned());
            }
            Line::Value(value) => self.push_choice(line_number, value),
        }

        Ok(self)
    }

    fn current_param(
        &mut self,
        line_number: usize,
        label: &str,
    ) -> Result<(&str, &mut ParameterDescriptor), VerboseHelpError> {
        let param = match self.current.as_deref() {
            Some(name) => self
                .outcome
                .description
                .get_mut(name)
                .map(|param| (name, param)),
            None => None,
        };
        param.ok_or_else(|| VerboseHelpError::NoCurrentParameter {
            line_number,
            label: label.to_owned(),
        })
    }

    fn push_choice(&mut self, line_number: usize, value: &str) {
        let choices = match self.current.as_deref() {
            Some(name) => self
                .outcome
                .description
                .get_mut(name)
                .and_then(|param| param.choices.as_mut()),
            None => None,
        };

        match choices {
            Some(choices) => choices.push(value.to_owned()),
            None => {
                let diagnostic = Diagnostic {
                    line_number,
                    parameter: self.current.clone(),
                    text: value.to_owned(),
                    problem: Problem::UnexpectedValueLine,
                };
                diagnostic.log();
                self.outcome.diagnostics.push(diagnostic);
            }
        }
    }
}
