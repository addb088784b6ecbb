//! ## Crate layout
//! - `schema`: field descriptors, classification and object schemas.
//! - `build`: accessor planning, unit assembly, emission and sinks.
//! - `config`: `GeneratorConfig`, loaded from JSON.
//! - `error`: the public `Error`.
//! - `macros`: the `build!` helper for build scripts.
//!
//! The `prelude` re-exports what a caller needs to run a batch.

pub use modelgen_build as build;
pub use modelgen_schema as schema;

pub mod config;
pub mod error;
mod macros;

pub use config::GeneratorConfig;
pub use error::Error;

use modelgen_build::batch::{BatchReport, Generator};
use modelgen_schema::object::SchemaDocument;
use std::{fs, path::Path, sync::Once};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Parse a schema document from disk.
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaDocument, Error> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    SchemaDocument::from_json_str(&json).map_err(|e| Error::json(path.display().to_string(), e))
}

/// Generate every object of `document` into the configured directories.
///
/// Units that fail to generate or to write are reported, not raised.
pub fn generate(config: &GeneratorConfig, document: &SchemaDocument) -> Result<BatchReport, Error> {
    let generator = Generator::new(config.emit_options());
    let mut sink = config.file_sink();

    let report = generator.write_batch(&document.objects, &mut sink);
    tracing::info!(
        emitted = report.units.len(),
        skipped = report.failures.len(),
        source_dir = %config.source_dir.display(),
        "generation finished"
    );

    Ok(report)
}

/// Load a config file and a schema document, then generate.
pub fn generate_from_files(
    config_path: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
) -> Result<BatchReport, Error> {
    init_tracing();

    let config = GeneratorConfig::load(config_path)?;
    let document = load_schema(schema_path)?;

    generate(&config, &document)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, GeneratorConfig, generate, generate_from_files, load_schema};
    pub use modelgen_build::prelude::*;
    pub use modelgen_schema::prelude::*;
}
