use crate::{
    emit::{EmitOptions, EmittedUnit, Emitter},
    error::GenerateError,
    naming::{CamelCaseNaming, NamingConvention},
    sink::Sink,
    unit::{GeneratedUnit, UnitGenerator},
};
use modelgen_schema::object::ObjectSchema;
use tracing::{info, warn};

///
/// UnitFailure
///
/// A unit that was skipped, with the object and (when known) the field
/// that stopped it.
///

#[derive(Debug)]
pub struct UnitFailure {
    pub object: String,
    pub field: Option<String>,
    pub error: GenerateError,
}

impl From<GenerateError> for UnitFailure {
    fn from(error: GenerateError) -> Self {
        Self {
            object: error.object().to_string(),
            field: error.field().map(ToString::to_string),
            error,
        }
    }
}

///
/// BatchReport
///

#[derive(Debug, Default)]
pub struct BatchReport {
    pub units: Vec<EmittedUnit>,
    pub failures: Vec<UnitFailure>,
}

impl BatchReport {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the objects that emitted, in schema order.
    #[must_use]
    pub fn emitted(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.object.as_str()).collect()
    }
}

///
/// Generator
///
/// Runs the full pipeline for one or many objects. Units share nothing,
/// so a failure in one never affects another.
///

#[derive(Clone, Debug, Default)]
pub struct Generator<N: NamingConvention = CamelCaseNaming> {
    naming: N,
    emitter: Emitter,
}

impl Generator {
    #[must_use]
    pub const fn new(options: EmitOptions) -> Self {
        Self {
            naming: CamelCaseNaming,
            emitter: Emitter::new(options),
        }
    }
}

impl<N: NamingConvention> Generator<N> {
    #[must_use]
    pub fn with_naming<M: NamingConvention>(self, naming: M) -> Generator<M> {
        Generator {
            naming,
            emitter: self.emitter,
        }
    }

    #[must_use]
    pub const fn naming(&self) -> &N {
        &self.naming
    }

    /// Classify, plan and assemble one object.
    pub fn generate_unit(&self, schema: &ObjectSchema) -> Result<GeneratedUnit, GenerateError> {
        let unit = UnitGenerator::new(schema, &self.naming)
            .classify()?
            .plan()?
            .assemble();

        Ok(unit)
    }

    /// Generate and render one object.
    pub fn emit_unit(&self, schema: &ObjectSchema) -> Result<EmittedUnit, GenerateError> {
        let unit = self.generate_unit(schema)?;

        Ok(self.emitter.emit(unit)?)
    }

    /// Emit every object, collecting failures instead of stopping.
    #[tracing::instrument(level = "debug", skip_all, fields(objects = schemas.len()))]
    pub fn run_batch(&self, schemas: &[ObjectSchema]) -> BatchReport {
        let mut report = BatchReport::default();

        for schema in schemas {
            match self.emit_unit(schema) {
                Ok(unit) => {
                    info!(object = %unit.object, artifacts = unit.artifacts.len(), "generated unit");
                    report.units.push(unit);
                }
                Err(e) => {
                    warn!(object = %schema.name(), error = %e, "skipped unit");
                    report.failures.push(e.into());
                }
            }
        }

        report
    }

    /// Emit every object and hand each complete unit to `sink`.
    ///
    /// A unit the sink rejects becomes a failure like any other; the
    /// report's `units` holds only what was written.
    #[tracing::instrument(level = "debug", skip_all, fields(objects = schemas.len()))]
    pub fn write_batch(&self, schemas: &[ObjectSchema], sink: &mut dyn Sink) -> BatchReport {
        let BatchReport { units, mut failures } = self.run_batch(schemas);
        let mut written = Vec::with_capacity(units.len());

        for unit in units {
            match sink.write(&unit) {
                Ok(()) => written.push(unit),
                Err(e) => {
                    warn!(object = %unit.object, error = %e, "unit not written");
                    failures.push(GenerateError::sink(&unit.object, e).into());
                }
            }
        }

        BatchReport {
            units: written,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SinkError, sink::MemorySink};
    use modelgen_schema::{field::FieldDescriptor, types::FieldKind};
    use std::path::PathBuf;

    fn good(name: &str) -> ObjectSchema {
        ObjectSchema::new(name).with_field(
            FieldDescriptor::new("Fan Efficiency", FieldKind::Real)
                .required()
                .with_bounds(0.0, 1.0),
        )
    }

    fn bad(name: &str) -> ObjectSchema {
        ObjectSchema::new(name).with_field(FieldDescriptor::new("!!!", FieldKind::Real))
    }

    #[test]
    fn failures_do_not_stop_other_units() {
        let generator = Generator::new(EmitOptions::default());
        let report = generator.run_batch(&[good("FanA"), bad("FanB"), good("FanC")]);

        assert_eq!(report.emitted(), vec!["FanA", "FanC"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].object, "FanB");
        assert_eq!(report.failures[0].field.as_deref(), Some("!!!"));
        assert!(!report.is_clean());
    }

    #[test]
    fn sink_receives_only_emitted_units() {
        let generator = Generator::new(EmitOptions::default());
        let mut sink = MemorySink::new();

        let report = generator.write_batch(&[bad("FanB"), good("FanA")], &mut sink);

        assert_eq!(report.units.len(), 1);
        assert_eq!(sink.units().len(), 1);
        assert_eq!(sink.units()[0].object, "FanA");
    }

    ///
    /// RejectingSink
    ///

    struct RejectingSink {
        reject: &'static str,
        inner: MemorySink,
    }

    impl Sink for RejectingSink {
        fn write(&mut self, unit: &EmittedUnit) -> Result<(), SinkError> {
            if unit.object == self.reject {
                return Err(SinkError::Exists {
                    path: PathBuf::from(format!("{}.hpp", unit.object)),
                });
            }

            self.inner.write(unit)
        }
    }

    #[test]
    fn sink_failures_do_not_stop_other_units() {
        let generator = Generator::new(EmitOptions::default());
        let mut sink = RejectingSink {
            reject: "FanA",
            inner: MemorySink::new(),
        };

        let report = generator.write_batch(&[good("FanA"), bad("FanB"), good("FanC")], &mut sink);

        assert_eq!(report.emitted(), vec!["FanC"]);
        assert_eq!(sink.inner.units().len(), 1);
        assert_eq!(sink.inner.units()[0].object, "FanC");

        let objects: Vec<&str> = report.failures.iter().map(|f| f.object.as_str()).collect();
        assert_eq!(objects, vec!["FanB", "FanA"]);

        let rejected = &report.failures[1];
        assert_eq!(rejected.field, None);
        assert!(matches!(
            rejected.error,
            GenerateError::Sink {
                source: SinkError::Exists { .. },
                ..
            }
        ));
    }
}
