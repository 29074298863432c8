//! Sources of the raw help text that the parsers consume.


use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use anyhow::{Context, Result};

use crate::taskname::TaskName;

/// The two kinds of help text CASA can print for a task.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
pub enum HelpQuery {
    /// Task docstring, printed by `help(<task>)`.
    #[strum(serialize = "verbose help")]
    VerboseHelp,
    /// Current parameter values, printed by `inp(<task>)`.
    #[strum(serialize = "input listing")]
    InputListing,
}

impl HelpQuery {
    /// CASA command that prints this kind of help text for `task`, then exits.
    pub fn casa_command(self, task: &TaskName) -> String {
        match self {
            HelpQuery::VerboseHelp => format!("help({task}); quit()"),
            HelpQuery::InputListing => format!("inp({task}); quit()"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum HelpSourceError {
    #[error("no captured {query} text was provided")]
    NotCaptured { query: HelpQuery },
    #[error("{command:?} exited with {status}")]
    ProcessFailed { command: String, status: ExitStatus },
}

/// Provides the help text of a task.
#[cfg_attr(test, mockall::automock)]
pub trait HelpSource {
    fn fetch(&self, task: &TaskName, query: HelpQuery) -> Result<String>;
}

/// Runs CASA once per query, capturing what it prints.
#[derive(Debug)]
pub struct CasaProcess {
    executable: PathBuf,
    args: Vec<String>,
}

impl CasaProcess {
    pub const DEFAULT_EXECUTABLE: &str = "casa";
    /// Keeps CASA from opening its logger GUI or writing log files.
    pub const DEFAULT_ARGS: [&str; 3] = ["--nologger", "--log2term", "--nologfile"];

    /// `args` precede the `-c <command>` arguments on every invocation.
    pub fn new(executable: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }
}

impl Default for CasaProcess {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_EXECUTABLE,
            Self::DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl HelpSource for CasaProcess {
    fn fetch(&self, task: &TaskName, query: HelpQuery) -> Result<String> {
        let command = query.casa_command(task);

        let captured =
            tempfile::NamedTempFile::new().context("creating file to capture CASA output")?;
        let stdout = captured
            .reopen()
            .context("opening file to capture CASA output")?;

        log::info!("Running {:?} with command {command:?}.", self.executable);
        let status = Command::new(&self.executable)
            .args(&self.args)
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(stdout)
            .status()
            .with_context(|| format!("running {:?}", self.executable))?;

        if !status.success() {
            return Err(HelpSourceError::ProcessFailed { command, status }.into());
        }

        read_text(captured.path())
    }
}

/// Help text that was captured to files beforehand.
#[derive(Debug, Default)]
pub struct CapturedFiles {
    pub verbose_help: Option<PathBuf>,
    pub input_listing: Option<PathBuf>,
}

impl HelpSource for CapturedFiles {
    fn fetch(&self, _task: &TaskName, query: HelpQuery) -> Result<String> {
        let path = match query {
            HelpQuery::VerboseHelp => self.verbose_help.as_ref(),
            HelpQuery::InputListing => self.input_listing.as_ref(),
        };
        let path = path.ok_or(HelpSourceError::NotCaptured { query })?;
        read_text(path)
    }
}

/// Reads help text, replacing any invalid UTF-8.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading help text from {path:?}"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
