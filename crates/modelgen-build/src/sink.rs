use crate::{
    emit::{Artifact, ArtifactKind, EmittedUnit},
    error::SinkError,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

///
/// Sink
///
/// Destination for emitted units. Only ever handed complete units.
///

pub trait Sink {
    fn write(&mut self, unit: &EmittedUnit) -> Result<(), SinkError>;
}

///
/// MemorySink
///

#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    units: Vec<EmittedUnit>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn units(&self) -> &[EmittedUnit] {
        &self.units
    }

    #[must_use]
    pub fn into_units(self) -> Vec<EmittedUnit> {
        self.units
    }
}

impl Sink for MemorySink {
    fn write(&mut self, unit: &EmittedUnit) -> Result<(), SinkError> {
        self.units.push(unit.clone());

        Ok(())
    }
}

///
/// FileSink
///
/// Writes sources and headers to `source_dir` and test files to `test_dir`.
/// A unit is written whole or not at all: every artifact is staged in a
/// temporary file in its target directory, then renamed into place.
///

#[derive(Clone, Debug)]
pub struct FileSink {
    source_dir: PathBuf,
    test_dir: PathBuf,
    overwrite: bool,
}

impl FileSink {
    /// Sink rooted at `source_dir`, with tests under `source_dir/test`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let test_dir = source_dir.join("test");

        Self {
            source_dir,
            test_dir,
            overwrite: true,
        }
    }

    #[must_use]
    pub fn with_test_dir(mut self, test_dir: impl Into<PathBuf>) -> Self {
        self.test_dir = test_dir.into();
        self
    }

    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    #[must_use]
    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    /// Target path of an artifact.
    #[must_use]
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        let dir = match artifact.kind {
            ArtifactKind::Test => &self.test_dir,
            ArtifactKind::PublicHeader | ArtifactKind::ImplHeader | ArtifactKind::Source => {
                &self.source_dir
            }
        };

        dir.join(&artifact.file_name)
    }

    // stage
    // contents land in a temporary file beside the target
    fn stage(path: &Path, contents: &str) -> Result<NamedTempFile, SinkError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| SinkError::io(dir, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| SinkError::io(path, e))?;

        Ok(file)
    }

    // roll_back
    // best effort; the persist error is what gets reported
    fn roll_back(persisted: Vec<(PathBuf, Option<Vec<u8>>)>) {
        for (path, previous) in persisted.into_iter().rev() {
            let restored = match previous {
                Some(bytes) => fs::write(&path, bytes),
                None => fs::remove_file(&path),
            };
            if let Err(e) = restored {
                tracing::warn!(path = %path.display(), error = %e, "failed to roll back artifact");
            }
        }
    }
}

impl Sink for FileSink {
    /// Stages every artifact before any of them is renamed into place. If a
    /// rename fails, artifacts already in place are removed or restored to
    /// their previous contents.
    fn write(&mut self, unit: &EmittedUnit) -> Result<(), SinkError> {
        let targets: Vec<(PathBuf, &Artifact)> = unit
            .artifacts
            .iter()
            .map(|artifact| (self.path_for(artifact), artifact))
            .collect();

        if !self.overwrite
            && let Some((path, _)) = targets.iter().find(|(path, _)| path.exists())
        {
            return Err(SinkError::Exists { path: path.clone() });
        }

        let mut staged = Vec::with_capacity(targets.len());
        for (path, artifact) in targets {
            let file = Self::stage(&path, &artifact.contents)?;
            let previous = if path.is_file() {
                Some(fs::read(&path).map_err(|e| SinkError::io(&path, e))?)
            } else {
                None
            };
            staged.push((path, file, previous));
        }

        let mut persisted = Vec::with_capacity(staged.len());
        for (path, file, previous) in staged {
            if let Err(e) = file.persist(&path) {
                Self::roll_back(persisted);
                return Err(SinkError::io(path, e.error));
            }

            tracing::debug!(path = %path.display(), "wrote artifact");
            persisted.push((path, previous));
        }

        Ok(())
    }
}
