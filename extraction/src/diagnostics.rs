use std::fmt;

/// Malformed input line that was skipped without failing the parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number within the parsed text.
    pub line_number: usize,
    /// Parameter being described when the line was encountered.
    pub parameter: Option<String>,
    pub text: String,
    pub problem: Problem,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
pub enum Problem {
    #[strum(serialize = "value line without a preceding \"Allowed Values\" line")]
    UnexpectedValueLine,
    #[strum(serialize = "continuation line before any parameter declaration")]
    OrphanContinuation,
}

impl Diagnostic {
    /// Logs the diagnostic as a warning.
    pub fn log(&self) {
        log::warn!("{self}");
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(
                f,
                "line {}: {} at parameter {:?}: {:?}",
                self.line_number, self.problem, parameter, self.text
            ),
            None => write!(
                f,
                "line {}: {}: {:?}",
                self.line_number, self.problem, self.text
            ),
        }
    }
}
