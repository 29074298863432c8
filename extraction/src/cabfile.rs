//! Reading and writing of cab documents: block style YAML, one per task.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;

use crate::{description::TaskDescription, taskname::TaskName};

/// Path of the cab for `task` within `dir`.
pub fn cab_path(dir: &Path, task: &TaskName) -> PathBuf {
    dir.join(format!("{task}.yaml"))
}

pub fn to_yaml_string(desc: &TaskDescription) -> Result<String> {
    serde_yaml_ng::to_string(desc).context("serialising task description")
}

/// Writes the cab for `task` into `dir`, replacing any existing one atomically. Returns the path
/// written to.
pub fn write_cab(dir: &Path, task: &TaskName, desc: &TaskDescription) -> Result<PathBuf> {
    let path = cab_path(dir, task);

    let mut file =
        AtomicWriteFile::open(&path).with_context(|| format!("opening {path:?} for writing"))?;
    serde_yaml_ng::to_writer(&mut file, desc)
        .with_context(|| format!("writing task description to {path:?}"))?;
    file.commit()
        .with_context(|| format!("committing {path:?}"))?;

    log::debug!("Wrote cab for task {task} to {path:?}.");
    Ok(path)
}

pub fn read_cab(path: &Path) -> Result<TaskDescription> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {path:?}"))?;
    serde_yaml_ng::from_reader(file).with_context(|| format!("parsing cab {path:?}"))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use googletest::prelude::*;

    use super::*;
    use crate::{
        conventions, inplisting,
        literal::LiteralValue,
        testutil::{FLAGDATA_INPUT_LISTING, FLAGDATA_VERBOSE_HELP, task_name},
        verbosehelp,
    };

    #[gtest]
    fn test_serialises_in_block_style_and_source_order() -> Result<()> {
        let mut desc = inplisting::parse(
            "vis = 'data.ms' # Input measurement set\n\
             # continued docs\n\
             spw = ['0', '1'] # Spectral windows\n\
             gain = 0.1 # Loop gain\n",
        )?
        .description;
        conventions::apply(&mut desc);

        expect_that!(
            to_yaml_string(&desc)?,
            eq(r#"vis:
  info: Input measurement set continued docs
  default: data.ms
  dtype: MS
  required: true
spw:
  info: Spectral windows
  default:
  - '0'
  - '1'
  dtype: list
gain:
  info: Loop gain
  default: 0.1
  dtype: float
"#)
        );

        Ok(())
    }

    #[gtest]
    fn test_serialises_choices() -> Result<()> {
        let desc = verbosehelp::parse(FLAGDATA_VERBOSE_HELP)?.description;

        let yaml = to_yaml_string(&desc)?;

        expect_that!(
            yaml,
            contains_substring(
                "mode:\n  info: Flagging mode\n  default: manual\n  dtype: str\n  choices:\n  - manual\n  - clip\n  - tfcrop\n"
            )
        );

        Ok(())
    }

    #[gtest]
    fn test_write_then_read_round_trips() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        for text_desc in [
            verbosehelp::parse(FLAGDATA_VERBOSE_HELP)?.description,
            inplisting::parse(FLAGDATA_INPUT_LISTING)?.description,
        ] {
            let mut desc = text_desc;
            conventions::apply(&mut desc);

            let path = write_cab(tempdir.path(), &task_name("flagdata"), &desc)?;
            expect_that!(path, eq(&tempdir.path().join("flagdata.yaml")));

            let got = read_cab(&path)?;
            expect_that!(got.names().collect::<Vec<_>>(), eq(&desc.names().collect::<Vec<_>>()));
            expect_that!(got, eq(&desc));
        }

        Ok(())
    }

    #[gtest]
    fn test_round_trips_values_that_look_like_other_types() -> Result<()> {
        let mut desc = TaskDescription::new();
        desc.entry("a").set_default(LiteralValue::from("True"));
        desc.entry("b").set_default(LiteralValue::from("1"));
        desc.entry("c").set_default(LiteralValue::Float(1.0));
        desc.entry("d").set_default(LiteralValue::Int(-3));
        desc.entry("e").set_default(LiteralValue::List(vec![]));

        let got: TaskDescription = serde_yaml_ng::from_str(&to_yaml_string(&desc)?)?;

        expect_that!(got, eq(&desc));

        Ok(())
    }

    #[gtest]
    fn test_write_replaces_existing_cab() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = cab_path(tempdir.path(), &task_name("imview"));
        std::fs::write(&path, "stale: true\n")?;

        let mut desc = TaskDescription::new();
        desc.entry("raster").info = "Raster filename".into();
        write_cab(tempdir.path(), &task_name("imview"), &desc)?;

        expect_that!(
            std::fs::read_to_string(&path)?,
            eq("raster:\n  info: Raster filename\n")
        );

        Ok(())
    }
}
