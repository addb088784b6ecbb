//! Accessor-class generation: plans accessors for classified fields,
//! assembles per-role fragment slots and renders them into header, source
//! and test artifacts.
//!
//! ## Crate layout
//! - `plan`: the `AccessorPlanner` and the accessor contract it produces.
//! - `unit`: the `UnitGenerator` typestate pipeline and role strategies.
//! - `emit`: fragment slots, the fixed emission order and the `Emitter`.
//! - `batch`: the `Generator`, running many units and collecting failures.
//! - `sink`: destinations for emitted units (memory or filesystem).
//! - `naming`: the injected `NamingConvention`.

pub mod batch;
pub mod emit;
pub mod error;
pub mod naming;
pub mod plan;
pub mod sink;
pub mod unit;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        batch::{BatchReport, Generator, UnitFailure},
        emit::{
            Artifact, ArtifactKind, EmitOptions, EmittedUnit, Emitter, FragmentSlot, Section,
            Surface,
        },
        error::{EmissionError, GenerateError, PlanningError, SinkError},
        naming::{CamelCaseNaming, NamingConvention},
        plan::{AccessorPlan, AccessorPlanner, ReturnType, ValueType},
        sink::{FileSink, MemorySink, Sink},
        unit::{GeneratedUnit, RoleStrategy, RoleStrategyExt, UnitGenerator},
    };
}
