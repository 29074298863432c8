use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use extraction::{
    cabfile,
    extractor::{Extraction, Extractor},
    helpsource::CapturedFiles,
    taskname::TaskName,
};

use super::OutputArgs;
use crate::config::Config;

/// Extracts the parameter descriptions of a task from help text captured
/// beforehand, without running CASA.
#[derive(Args, Debug)]
pub struct Command {
    /// Name of the CASA task that the help text describes.
    task: TaskName,

    /// File containing the output of `help(<task>)`.
    #[arg(long, required_unless_present = "input_listing")]
    verbose_help: Option<PathBuf>,

    /// File containing the output of `inp(<task>)`. Used if the verbose help
    /// is absent or cannot be parsed.
    #[arg(long)]
    input_listing: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    /// Writes the cab to standard output instead of into the output directory.
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command, config: &Config) -> Result<()> {
    let extraction = extract(cmd)?;

    if cmd.stdout {
        let yaml = cabfile::to_yaml_string(&extraction.description)?;
        std::io::stdout()
            .write_all(yaml.as_bytes())
            .with_context(|| "writing cab to stdout")?;
        return Ok(());
    }

    let output_dir = cmd.output.prepare_dir(config)?;
    let path = cabfile::write_cab(output_dir, &cmd.task, &extraction.description)?;
    log::info!("Wrote cab for task {} to {path:?}.", cmd.task);
    Ok(())
}

fn extract(cmd: &Command) -> Result<Extraction> {
    let source = CapturedFiles {
        verbose_help: cmd.verbose_help.clone(),
        input_listing: cmd.input_listing.clone(),
    };
    Extractor::new(&source).extract(&cmd.task)
}
