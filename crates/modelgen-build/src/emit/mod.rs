mod frame;
mod slot;

pub use frame::Frame;
pub use slot::{FRAGMENT_ORDER, FragmentSlot, Section, Surface};

use crate::{error::EmissionError, unit::GeneratedUnit};
use derive_more::Display;
use serde::Serialize;
use std::collections::HashSet;

///
/// EmitOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmitOptions {
    pub emit_tests: bool,
    pub license_header: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            emit_tests: true,
            license_header: None,
        }
    }
}

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ArtifactKind {
    PublicHeader,
    ImplHeader,
    Source,
    Test,
}

///
/// Artifact
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub contents: String,
}

///
/// EmittedUnit
///
/// Fully rendered unit, buffered in memory. Sinks only ever see complete
/// units.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EmittedUnit {
    pub object: String,
    pub slots: Vec<(FragmentSlot, String)>,
    pub artifacts: Vec<Artifact>,
}

impl EmittedUnit {
    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

///
/// Emitter
///

#[derive(Clone, Debug, Default)]
pub struct Emitter {
    options: EmitOptions,
}

impl Emitter {
    #[must_use]
    pub const fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Concatenate a unit's fragments in `FRAGMENT_ORDER`.
    ///
    /// Every slot of the order must be present and no others; empty
    /// fragments keep their place.
    pub fn emit(&self, unit: GeneratedUnit) -> Result<EmittedUnit, EmissionError> {
        let object = unit.header().class_name.clone();

        let known: HashSet<&FragmentSlot> = FRAGMENT_ORDER.iter().collect();
        if let Some(slot) = unit.slots().keys().find(|slot| !known.contains(slot)) {
            return Err(EmissionError::UnexpectedSlot {
                object,
                slot: *slot,
            });
        }
        if let Some(slot) = FRAGMENT_ORDER
            .iter()
            .find(|slot| !unit.slots().contains_key(*slot))
        {
            return Err(EmissionError::MissingSlot {
                object,
                slot: *slot,
            });
        }

        let frame = Frame::new(unit.header());
        let render = |surface: Surface| {
            let mut text = String::new();
            for slot in FRAGMENT_ORDER.iter().filter(|s| s.surface == surface) {
                text.push_str(&frame.lead(surface, slot.section));
                text.push_str(unit.slots().get(slot).map_or("", String::as_str));
            }
            text.push_str(&frame.close(surface));
            text
        };

        let class = &object;
        let mut artifacts = vec![
            self.artifact(
                ArtifactKind::PublicHeader,
                format!("{class}.hpp"),
                render(Surface::Declaration),
            ),
            self.artifact(
                ArtifactKind::ImplHeader,
                format!("{class}_Impl.hpp"),
                render(Surface::ImplDeclaration),
            ),
            self.artifact(
                ArtifactKind::Source,
                format!("{class}.cpp"),
                render(Surface::ImplDefinition) + &render(Surface::Definition),
            ),
        ];

        let tests = render(Surface::Test);
        if self.options.emit_tests && !tests.trim().is_empty() {
            artifacts.push(self.artifact(
                ArtifactKind::Test,
                format!("{class}_GTest.cpp"),
                tests,
            ));
        }

        tracing::debug!(object = %object, artifacts = artifacts.len(), "emitted unit");

        Ok(EmittedUnit {
            slots: unit.into_slots().into_iter().collect(),
            object,
            artifacts,
        })
    }

    fn artifact(&self, kind: ArtifactKind, file_name: String, body: String) -> Artifact {
        let contents = match &self.options.license_header {
            Some(license) if !license.is_empty() => {
                let sep = if license.ends_with('\n') { "\n" } else { "\n\n" };
                format!("{license}{sep}{body}")
            }
            _ => body,
        };

        Artifact {
            kind,
            file_name,
            contents,
        }
    }
}
