use crate::Error;
use modelgen_build::{emit::EmitOptions, sink::FileSink};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// GeneratorConfig
///
/// Where artifacts go and how they are written. Relative directories in a
/// config file resolve against the file's own directory.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub source_dir: PathBuf,

    /// Defaults to `<source_dir>/test`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub emit_tests: bool,

    #[serde(default = "default_true")]
    pub overwrite: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_header: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            test_dir: None,
            emit_tests: true,
            overwrite: true,
            license_header: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::json("generator config", e))?;
        config.validate()?;

        Ok(config)
    }

    /// Read a config file, resolving relative directories against it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut config = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            config.source_dir = base.join(&config.source_dir);
            config.test_dir = config.test_dir.map(|dir| base.join(dir));
        }

        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(Error::Config("source_dir is empty".to_string()));
        }
        if let Some(dir) = &self.test_dir
            && dir.as_os_str().is_empty()
        {
            return Err(Error::Config("test_dir is empty".to_string()));
        }

        Ok(())
    }

    #[must_use]
    pub fn test_dir(&self) -> PathBuf {
        self.test_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join("test"))
    }

    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            emit_tests: self.emit_tests,
            license_header: self.license_header.clone(),
        }
    }

    #[must_use]
    pub fn file_sink(&self) -> FileSink {
        FileSink::new(&self.source_dir)
            .with_test_dir(self.test_dir())
            .with_overwrite(self.overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_everything_but_the_source_dir() {
        let config = GeneratorConfig::from_json_str(r#"{ "source_dir": "out" }"#).unwrap();

        assert_eq!(config, GeneratorConfig::new("out"));
        assert_eq!(config.test_dir(), PathBuf::from("out").join("test"));
        assert_eq!(config.emit_options(), EmitOptions::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GeneratorConfig::from_json_str(r#"{ "source_dir": "out", "overwite": false }"#)
            .unwrap_err();

        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn empty_source_dir_is_a_config_error() {
        let err = GeneratorConfig::from_json_str(r#"{ "source_dir": "" }"#).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_resolves_against_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelgen.json");
        fs::write(
            &path,
            r#"{ "source_dir": "src", "test_dir": "tests", "overwrite": false }"#,
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();

        assert_eq!(config.source_dir, dir.path().join("src"));
        assert_eq!(config.test_dir(), dir.path().join("tests"));
        assert!(!config.overwrite);
        assert_eq!(config.file_sink().test_dir(), dir.path().join("tests"));
    }
}
