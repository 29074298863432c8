use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;

use crate::config::{self, Config};

mod cab;
mod parse;

/// Extracts the parameter descriptions of CASA tasks into YAML cab files.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,

    /// Path to the configuration file. Defaults to casacab/config.yaml in the
    /// XDG configuration directories, if one exists there.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    Cab(cab::Command),
    Parse(parse::Command),
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .with_context(|| "configuring logging")?;

    let config = config::load(args.config.as_deref())?;

    use Command::*;
    match &args.command {
        Cab(cmd) => cab::run(cmd, &config),
        Parse(cmd) => parse::run(cmd, &config),
    }
}

/// Options controlling where cab files are written.
#[derive(clap::Args, Debug, Default)]
struct OutputArgs {
    /// Directory to write cab files into. Overrides output_dir from the
    /// configuration file.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl OutputArgs {
    /// Returns the output directory, creating it if needed.
    fn prepare_dir<'a>(&'a self, config: &'a Config) -> Result<&'a Path> {
        let dir = self.output_dir.as_deref().unwrap_or(&config.output_dir);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {dir:?}"))?;
        Ok(dir)
    }
}
