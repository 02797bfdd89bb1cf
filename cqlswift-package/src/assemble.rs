//! Package assembly pipeline.

use crate::config::PackageConfig;
use crate::error::PackageError;
use crate::layout::PackageLayout;
use crate::manifest::update_manifest;
use crate::runtime::{NativeSources, copy_file, copy_into, install_native_library};
use crate::tools::{CqlCompiler, ToolRunner, init_swift_package, resolve_program};
use cqlswift_codegen::GeneratorOptions;
use cqlswift_schema::Schema;
use std::fs;

/// Drives the compiler and the Swift toolchain to produce a package.
pub struct PackageAssembler<'a, R: ToolRunner + ?Sized> {
    config: &'a PackageConfig,
    runner: &'a R,
}

impl<'a, R: ToolRunner + ?Sized> PackageAssembler<'a, R> {
    /// Creates an assembler for the given configuration.
    #[must_use]
    pub fn new(config: &'a PackageConfig, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Runs the whole pipeline and returns the layout of the package.
    ///
    /// Any failure aborts the run; artifacts written so far are left in
    /// place.
    ///
    /// # Errors
    /// Returns `PackageError` if the configuration is invalid or any step
    /// fails.
    pub fn assemble(&self) -> Result<PackageLayout, PackageError> {
        let config = self.config;
        config.validate()?;

        let out_dir = std::path::absolute(&config.out_dir)?;
        tracing::info!("Generating project {}", out_dir.display());
        fs::create_dir_all(&out_dir)?;

        let stem = config.input_stem()?;
        // The C step runs inside the out dir.
        let cql = resolve_program(&config.cql_compiler)?;
        let compiler = CqlCompiler::new(&cql, self.runner);

        // Only the C step needs an absolute input path.
        let schema_file = compiler.json_schema(&config.input, &out_dir, &stem)?;
        let c = compiler.c_sources(&config.input, &out_dir, &stem)?;
        let objc_header = compiler.objc_header(&config.input, &out_dir, &stem)?;

        let schema = cqlswift_schema::parse_schema_file(&schema_file)?;
        tracing::debug!(
            "Loaded {} declarations from {}",
            schema.len(),
            schema_file.display()
        );

        let layout = PackageLayout::new(&out_dir, &config.package_name);
        init_swift_package(self.runner, layout.root())?;

        install_native_library(
            &layout,
            &config.runtime_dir,
            &NativeSources { c, objc_header },
        )?;
        update_manifest(layout.root(), &config.package_name, config.has_tests())?;

        self.write_swift_target(&layout, &schema)?;
        self.write_tests(&layout)?;
        write_readme(&layout, &config.package_name)?;

        tracing::info!("Generated package {}", layout.root().display());
        Ok(layout)
    }

    fn write_swift_target(&self, layout: &PackageLayout, schema: &Schema) -> Result<(), PackageError> {
        let path = layout.swift_file();
        tracing::info!("Generating swift code {}", path.display());

        let options = GeneratorOptions::new(self.config.lib_name());
        let code = cqlswift_codegen::generate_from_schema(schema, &options)?;

        fs::create_dir_all(layout.swift_dir())?;
        fs::write(&path, code)?;
        Ok(())
    }

    /// The first test file replaces the scaffolded one; the rest keep their
    /// names.
    fn write_tests(&self, layout: &PackageLayout) -> Result<(), PackageError> {
        let Some((first, rest)) = self.config.test_files.split_first() else {
            return Ok(());
        };
        tracing::info!(
            "Generating swift test target {} with {} files",
            self.config.tests_name(),
            self.config.test_files.len()
        );

        let tests_dir = layout.tests_dir();
        fs::create_dir_all(&tests_dir)?;
        copy_file(first, &layout.main_test_file())?;
        for test_file in rest {
            copy_into(test_file, &tests_dir)?;
        }

        Ok(())
    }
}

/// Writes the package `README.md`.
fn write_readme(layout: &PackageLayout, package_name: &str) -> Result<(), PackageError> {
    tracing::debug!("Generating README.md for {}", package_name);
    let readme = format!(
        "# {package_name}\n\nA set of stored procedures. Generated by cqlswift.\n"
    );
    fs::write(layout.readme(), readme)?;
    Ok(())
}
