use std::{fmt, str::FromStr};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("got {value:?} which is not {}", TaskName::EXPECTED)]
pub struct TaskNameError {
    pub value: String,
}

/// Name of a CASA task. Only valid Python identifiers are accepted, as the name is spliced into
/// the commands given to CASA.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TaskName(String);

impl TaskName {
    const EXPECTED: &str = "a task name matching ^[A-Za-z_][A-Za-z0-9_]*$";

    fn valid_regex() -> &'static lazy_regex::Regex {
        lazy_regex::regex!(r"^[A-Za-z_][A-Za-z0-9_]*$")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = TaskNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::valid_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(TaskNameError { value })
        }
    }
}

impl FromStr for TaskName {
    type Err = TaskNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_owned().try_into()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
