//! Extraction of a task's parameter descriptions, preferring the verbose help text and falling
//! back to the input listing.


use anyhow::{Context, Result};

use crate::{
    conventions,
    description::{ParseOutcome, TaskDescription},
    diagnostics::Diagnostic,
    helpsource::{HelpQuery, HelpSource},
    inplisting,
    taskname::TaskName,
    verbosehelp,
};

/// Successfully extracted parameter descriptions of a task.
#[derive(Debug, PartialEq)]
pub struct Extraction {
    pub task: TaskName,
    /// Kind of help text that the description was parsed from.
    pub format: HelpQuery,
    pub description: TaskDescription,
    /// Malformed lines that were skipped while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Extractor<'a> {
    source: &'a dyn HelpSource,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a dyn HelpSource) -> Self {
        Self { source }
    }

    /// Extracts the parameter descriptions of `task`.
    ///
    /// Any failure to obtain or parse the verbose help discards that attempt entirely and uses the
    /// input listing instead. A failure with the input listing is returned.
    pub fn extract(&self, task: &TaskName) -> Result<Extraction> {
        let (format, outcome) = match self.parse_verbose_help(task) {
            Ok(outcome) => (HelpQuery::VerboseHelp, outcome),
            Err(err) => {
                log::info!("Falling back to input listing for task {task}: {err:#}");
                let outcome = self
                    .parse_input_listing(task)
                    .with_context(|| format!("extracting parameters of task {task}"))?;
                (HelpQuery::InputListing, outcome)
            }
        };

        let ParseOutcome {
            mut description,
            diagnostics,
        } = outcome;
        conventions::apply(&mut description);

        log::info!(
            "Extracted {} parameters of task {task} from {format}, skipping {} malformed lines.",
            description.len(),
            diagnostics.len(),
        );

        Ok(Extraction {
            task: task.clone(),
            format,
            description,
            diagnostics,
        })
    }

    fn parse_verbose_help(&self, task: &TaskName) -> Result<ParseOutcome> {
        let text = self.source.fetch(task, HelpQuery::VerboseHelp)?;
        verbosehelp::parse(&text).context("parsing verbose help")
    }

    fn parse_input_listing(&self, task: &TaskName) -> Result<ParseOutcome> {
        let text = self.source.fetch(task, HelpQuery::InputListing)?;
        inplisting::parse(&text).context("parsing input listing")
    }
}
