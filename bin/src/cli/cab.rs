use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use extraction::{
    cabfile,
    extractor::Extractor,
    helpsource::CasaProcess,
    taskname::TaskName,
};

use super::OutputArgs;
use crate::config::Config;

/// Runs CASA to extract the parameter descriptions of tasks, writing a cab
/// file for each.
#[derive(Args, Debug)]
pub struct Command {
    /// Names of the CASA tasks.
    #[arg(required = true)]
    tasks: Vec<TaskName>,

    #[command(flatten)]
    output: OutputArgs,

    /// Path to the CASA executable. Overrides casa_executable from the
    /// configuration file.
    #[arg(long)]
    casa: Option<PathBuf>,
}

/// Runs the subcommand. Each task is attempted even if an earlier one failed.
pub fn run(cmd: &Command, config: &Config) -> Result<()> {
    let output_dir = cmd.output.prepare_dir(config)?;
    let executable = cmd.casa.as_ref().unwrap_or(&config.casa_executable);
    let source = CasaProcess::new(executable, config.casa_args.clone());
    let extractor = Extractor::new(&source);

    let mut failed: Vec<&TaskName> = Vec::new();
    for task in &cmd.tasks {
        if let Err(err) = extract_task(&extractor, output_dir, task) {
            log::error!("Failed to extract task {task}: {err:#}");
            failed.push(task);
        }
    }

    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(|task| task.to_string()).collect();
        bail!(
            "failed to extract {} of {} tasks: {}",
            failed.len(),
            cmd.tasks.len(),
            names.join(", ")
        );
    }
    Ok(())
}

fn extract_task(extractor: &Extractor<'_>, output_dir: &Path, task: &TaskName) -> Result<()> {
    let extraction = extractor.extract(task)?;
    let path = cabfile::write_cab(output_dir, task, &extraction.description)?;
    log::info!("Wrote cab for task {task} to {path:?}.");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use anyhow::Result;
    use extraction::cabfile::read_cab;
    use googletest::prelude::*;

    use super::*;

    /// Stands in for CASA, answering `help(...)` with `help_response` and
    /// `inp(...)` with `inp_response`. The task name is taken from the command.
    const FAKE_CASA: &str = r#"
command="$2"
task="${command#*(}"
task="${task%%)*}"
case "$command" in
  help*)
    if [ "$task" = broken ]; then exit 1; fi
    printf '  Arguments\n  | vis: Input for %s\n  |   Default Value: '"''"'\n  Returns\n' "$task"
    ;;
  inp*)
    exit 2
    ;;
esac
"#;

    fn fake_casa_config(dir: &Path) -> Result<Config> {
        let script = dir.join("fake_casa.sh");
        std::fs::write(&script, FAKE_CASA)?;
        Ok(Config {
            casa_executable: "sh".into(),
            casa_args: vec![script.to_string_lossy().into_owned()],
            output_dir: dir.join("cabs"),
        })
    }

    fn task_names(names: &[&str]) -> Vec<TaskName> {
        names
            .iter()
            .map(|name| name.parse().expect("expected valid TaskName value"))
            .collect()
    }

    #[gtest]
    #[test_log::test]
    fn test_writes_cab_per_task() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let config = fake_casa_config(tempdir.path())?;
        let cmd = Command {
            tasks: task_names(&["flagdata", "tclean"]),
            output: OutputArgs::default(),
            casa: None,
        };

        run(&cmd, &config)?;

        let tclean = read_cab(&config.output_dir.join("tclean.yaml"))?;
        expect_that!(
            tclean.get("vis").map(|p| p.info.as_str()),
            some(eq("Input for tclean"))
        );
        expect_true!(config.output_dir.join("flagdata.yaml").is_file());

        Ok(())
    }

    #[gtest]
    #[test_log::test]
    fn test_continues_past_failed_task() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let config = fake_casa_config(tempdir.path())?;
        let output_dir = tempdir.path().join("elsewhere");
        let cmd = Command {
            tasks: task_names(&["broken", "imview"]),
            output: OutputArgs {
                output_dir: Some(output_dir.clone()),
            },
            casa: None,
        };

        let result = run(&cmd, &config).map_err(|err| err.to_string());

        expect_that!(
            result,
            err(eq("failed to extract 1 of 2 tasks: broken"))
        );
        expect_false!(output_dir.join("broken.yaml").exists());
        expect_true!(output_dir.join("imview.yaml").is_file());

        Ok(())
    }
}
