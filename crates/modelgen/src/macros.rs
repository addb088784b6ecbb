//! Build-script helper that runs generation from a config file and a
//! schema document.

/// Run generation from `build.rs`.
///
/// Prints cargo rerun directives for both inputs, writes every unit that
/// generates and surfaces skipped units as cargo warnings. Evaluates to the
/// `BatchReport`; errors propagate with `?`, so the enclosing function must
/// return a compatible `Result`.
#[macro_export]
macro_rules! build {
    ($config:expr, $schema:expr) => {{
        let config_path: &str = $config;
        let schema_path: &str = $schema;

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={config_path}");
        println!("cargo:rerun-if-changed={schema_path}");

        //
        // GENERATE
        //

        let report = ::modelgen::generate_from_files(config_path, schema_path)?;
        for failure in &report.failures {
            println!("cargo:warning=modelgen skipped {}: {}", failure.object, failure.error);
        }

        report
    }};
}
