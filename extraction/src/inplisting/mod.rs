//! Parsing of the parameter listing that CASA prints for `inp(<task>)`.
//!
//! Each parameter is declared on a line of the form `name = literal # description`, optionally
//! followed by lines starting with `#` that continue the description.


use crate::{
    description::ParseOutcome,
    diagnostics::{Diagnostic, Problem},
    literal::{self, LiteralError},
};

const COMMENT_MARKER: char = '#';

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum InpListingError {
    #[error("line {line_number}: expected `name = value # description`, got {text:?}")]
    MalformedDeclaration { line_number: usize, text: String },
    #[error("line {line_number}: value of parameter {parameter:?}")]
    Literal {
        line_number: usize,
        parameter: String,
        #[source]
        source: LiteralError,
    },
}

/// Parses the parameter descriptions out of `inp(<task>)` output.
pub fn parse(text: &str) -> Result<ParseOutcome, InpListingError> {
    let state = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .try_fold(ScanState::default(), ScanState::step)?;

    Ok(state.outcome)
}

/// Accumulator threaded through the lines of the listing.
#[derive(Default)]
struct ScanState {
    outcome: ParseOutcome,
    /// Most recently declared parameter.
    current: Option<String>,
}

impl ScanState {
    fn step(mut self, (line_number, raw): (usize, &str)) -> Result<Self, InpListingError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(self);
        }
        log::debug!("{line_number}: {line}");

        match line.strip_prefix(COMMENT_MARKER) {
            Some(continuation) => self.continue_info(line_number, continuation.trim_start()),
            None => self.declare(line_number, line)?,
        }

        Ok(self)
    }

    fn declare(&mut self, line_number: usize, line: &str) -> Result<(), InpListingError> {
        let malformed = || InpListingError::MalformedDeclaration {
            line_number,
            text: line.to_owned(),
        };

        let (name, rest) = line.split_once('=').ok_or_else(malformed)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(malformed());
        }
        let (value, info) = rest.split_once(COMMENT_MARKER).ok_or_else(malformed)?;

        let default = literal::parse_literal(value).map_err(|source| InpListingError::Literal {
            line_number,
            parameter: name.to_owned(),
            source,
        })?;

        let param = self.outcome.description.entry(name);
        param.set_default(default);
        param.info = info.trim().to_owned();
        self.current = Some(name.to_owned());

        Ok(())
    }

    fn continue_info(&mut self, line_number: usize, text: &str) {
        let param = match self.current.as_deref() {
            Some(name) => self.outcome.description.get_mut(name),
            None => None,
        };

        match param {
            Some(param) => {
                param.info.push(' ');
                param.info.push_str(text);
            }
            None => {
                let diagnostic = Diagnostic {
                    line_number,
                    parameter: None,
                    text: text.to_owned(),
                    problem: Problem::OrphanContinuation,
                };
                diagnostic.log();
                self.outcome.diagnostics.push(diagnostic);
            }
        }
    }
}
