//! cqlswift Binary
//!
//! Run with: `cqlswift [COMMAND]`

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cqlswift::codegen::{GeneratorOptions, generate_from_file};
use cqlswift::package::config::DEFAULT_OUT_DIR;
use cqlswift::package::{PackageConfig, assemble_package};

#[derive(Parser, Debug)]
#[command(name = "cqlswift")]
#[command(about = "Swift bindings and Swift packages from CG-SQL stored procedures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Build a Swift package from a CG-SQL source file
    Package {
        /// Path to the CQL compiler
        #[arg(short = 'c', long = "cql-compiler", value_name = "PATH")]
        cql_compiler: PathBuf,

        /// Read CG-SQL runtime sources from this directory
        #[arg(short = 'd', long = "cgsql-sources", value_name = "DIR")]
        cgsql_sources: PathBuf,

        /// Read CG-SQL input from this file
        #[arg(short = 'i', long = "in", value_name = "FILE")]
        input: PathBuf,

        /// Directory to generate code to
        #[arg(short = 'o', long = "out", value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
        out: PathBuf,

        /// Swift package name
        #[arg(short = 'p', long = "package-name", value_name = "NAME")]
        package_name: String,

        /// Swift package unit test file (repeatable)
        #[arg(short = 't', long = "test", value_name = "FILE")]
        tests: Vec<PathBuf>,
    },

    /// Generate Swift bindings from a JSON schema
    Generate {
        /// JSON schema emitted by the CQL compiler
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Native module imported by the generated code
        #[arg(long, value_name = "NAME")]
        module: String,

        /// Output file (default: stdout)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Package {
            cql_compiler,
            cgsql_sources,
            input,
            out,
            package_name,
            tests,
        } => {
            let config = PackageConfig::new(cql_compiler, cgsql_sources, input, package_name)
                .out_dir(out)
                .test_files(tests);
            cmd_package(&config)
        }
        Commands::Generate {
            input,
            module,
            output,
        } => cmd_generate(&input, &module, output.as_deref()),
    }
}

fn cmd_package(config: &PackageConfig) -> Result<()> {
    let layout = assemble_package(config)
        .with_context(|| format!("Failed to generate package {}", config.package_name))?;
    info!("Package ready at {}", layout.root().display());
    Ok(())
}

fn cmd_generate(input: &Path, module: &str, output: Option<&Path>) -> Result<()> {
    let options = GeneratorOptions::new(module);
    let code = generate_from_file(input, &options)
        .with_context(|| format!("Failed to generate Swift from {}", input.display()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
