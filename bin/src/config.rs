//! Optional user configuration, read from a YAML file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use extraction::helpsource::CasaProcess;
use serde::Deserialize;

const XDG_PREFIX: &str = "casacab";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Settings used wherever the command line does not override them.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub casa_executable: PathBuf,
    /// Arguments passed to CASA ahead of the command that it runs.
    pub casa_args: Vec<String>,
    /// Directory that cab files are written into.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            casa_executable: CasaProcess::DEFAULT_EXECUTABLE.into(),
            casa_args: CasaProcess::DEFAULT_ARGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Loads the configuration from `path` if given, otherwise from `casacab/config.yaml` in the XDG
/// configuration directories. Defaults are used if no configuration file is found there.
pub fn load(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_file(path);
    }

    let xdg_dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX);
    match xdg_dirs.find_config_file(CONFIG_FILE_NAME) {
        Some(path) => load_file(&path),
        None => {
            log::debug!("No {CONFIG_FILE_NAME} found in XDG configuration directories.");
            Ok(Config::default())
        }
    }
}

fn load_file(path: &Path) -> Result<Config> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening configuration file {path:?}"))?;
    let config: YamlConfig = serde_yaml_ng::from_reader(file)
        .with_context(|| format!("parsing configuration file {path:?}"))?;
    log::debug!("Loaded configuration from {path:?}.");

    Ok(config.prepare())
}

/// Configuration as read from a `config.yaml`, where every field is optional.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    casa_executable: Option<PathBuf>,
    casa_args: Option<Vec<String>>,
    output_dir: Option<PathBuf>,
}

impl YamlConfig {
    /// Creates a `Config` from self, filling in defaults.
    fn prepare(self) -> Config {
        let default = Config::default();
        Config {
            casa_executable: self.casa_executable.unwrap_or(default.casa_executable),
            casa_args: self.casa_args.unwrap_or(default.casa_args),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use googletest::prelude::*;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> Result<PathBuf> {
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    #[gtest]
    fn test_loads_all_fields() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = write_config(
            &tempdir,
            "casa_executable: /opt/casa/bin/casa\n\
             casa_args: [--nogui]\n\
             output_dir: cabs\n",
        )?;

        let config = load(Some(&path))?;

        expect_that!(
            config,
            eq(&Config {
                casa_executable: "/opt/casa/bin/casa".into(),
                casa_args: vec!["--nogui".into()],
                output_dir: "cabs".into(),
            })
        );

        Ok(())
    }

    #[gtest]
    fn test_missing_fields_take_defaults() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = write_config(&tempdir, "output_dir: /tmp/cabs\n")?;

        let config = load(Some(&path))?;

        expect_that!(
            config,
            eq(&Config {
                output_dir: "/tmp/cabs".into(),
                ..Config::default()
            })
        );
        expect_that!(
            config.casa_args,
            eq(&vec![
                "--nologger".to_string(),
                "--log2term".into(),
                "--nologfile".into(),
            ])
        );

        Ok(())
    }

    #[gtest]
    fn test_rejects_unknown_field() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = write_config(&tempdir, "casa_exe: casa\n")?;

        expect_that!(
            load(Some(&path)).map_err(|err| format!("{err:#}")),
            err(contains_substring("unknown field `casa_exe`"))
        );

        Ok(())
    }

    #[gtest]
    fn test_explicit_path_must_exist() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = tempdir.path().join("absent.yaml");

        expect_that!(
            load(Some(&path)).map_err(|err| err.to_string()),
            err(eq(&format!("opening configuration file {path:?}")))
        );

        Ok(())
    }
}
