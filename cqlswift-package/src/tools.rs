//! External tool invocations.
//!
//! Every process the assembler starts goes through a [`ToolRunner`], so the
//! whole pipeline can be driven without the CQL compiler or the Swift
//! toolchain installed.

use crate::error::PackageError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runtime header the generated C code includes.
pub const CQLRT_HEADER: &str = "cqlrt_cf.h";

/// Artifact produced by an external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// JSON schema of the declarations.
    JsonSchema,
    /// C header and implementation.
    CSources,
    /// Objective-C result-set header.
    ObjcHeader,
    /// Scaffolded Swift package.
    SwiftPackage,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::JsonSchema => "JSON schema",
            Self::CSources => "C sources",
            Self::ObjcHeader => "Objective-C header",
            Self::SwiftPackage => "Swift package",
        };
        f.write_str(name)
    }
}

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// What the invocation produces.
    pub artifact: Artifact,
    /// Program to run.
    pub program: PathBuf,
    /// Arguments in order.
    pub args: Vec<OsString>,
    /// Working directory, or the current one.
    pub current_dir: Option<PathBuf>,
}

impl ToolInvocation {
    /// Creates an invocation of `program` without arguments.
    pub fn new(artifact: Artifact, program: impl Into<PathBuf>) -> Self {
        Self {
            artifact,
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Returns the value following `flag`, if present.
    #[must_use]
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map(OsString::as_os_str)
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external tools.
pub trait ToolRunner {
    /// Runs the invocation to completion.
    ///
    /// # Errors
    /// Returns `PackageError::ToolSpawn` if the process cannot be started and
    /// `PackageError::ToolFailed` if it exits unsuccessfully.
    fn run(&self, invocation: &ToolInvocation) -> Result<(), PackageError>;
}

/// Runs tools as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), PackageError> {
        tracing::debug!("Running {}", invocation);

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|source| PackageError::ToolSpawn {
            tool: invocation.program.display().to_string(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(PackageError::ToolFailed {
                artifact: invocation.artifact,
                code: status.code(),
            })
        }
    }
}

/// Makes a program path independent of the working directory.
///
/// A bare name is left alone so it is still looked up on `PATH`; anything
/// with a directory component is made absolute.
///
/// # Errors
/// Returns `PackageError::Io` if the current directory cannot be read.
pub fn resolve_program(path: &Path) -> Result<PathBuf, PackageError> {
    if path.components().count() > 1 {
        Ok(std::path::absolute(path)?)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Paths of the C sources produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSources {
    /// `<stem>.h`
    pub header: PathBuf,
    /// `<stem>.c`
    pub implementation: PathBuf,
}

/// The CQL compiler driven through a [`ToolRunner`].
pub struct CqlCompiler<'a, R: ToolRunner + ?Sized> {
    path: &'a Path,
    runner: &'a R,
}

impl<'a, R: ToolRunner + ?Sized> CqlCompiler<'a, R> {
    /// Creates a compiler driver.
    #[must_use]
    pub fn new(path: &'a Path, runner: &'a R) -> Self {
        Self { path, runner }
    }

    /// Builds the JSON schema invocation.
    #[must_use]
    pub fn json_schema_invocation(&self, input: &Path, out_dir: &Path, stem: &str) -> ToolInvocation {
        ToolInvocation::new(Artifact::JsonSchema, self.path)
            .arg("--in")
            .arg(input)
            .arg("--rt")
            .arg("json_schema")
            .arg("--cg")
            .arg(out_dir.join(format!("{stem}.json")))
    }

    /// Builds the C sources invocation. It runs inside `out_dir`, so the
    /// input must be absolute.
    #[must_use]
    pub fn c_sources_invocation(
        &self,
        absolute_input: &Path,
        out_dir: &Path,
        stem: &str,
    ) -> ToolInvocation {
        ToolInvocation::new(Artifact::CSources, self.path)
            .arg("--in")
            .arg(absolute_input)
            .arg("--cg")
            .arg(format!("{stem}.h"))
            .arg(format!("{stem}.c"))
            .arg("--cqlrt")
            .arg(CQLRT_HEADER)
            .current_dir(out_dir)
    }

    /// Builds the Objective-C header invocation.
    #[must_use]
    pub fn objc_header_invocation(&self, input: &Path, out_dir: &Path, stem: &str) -> ToolInvocation {
        ToolInvocation::new(Artifact::ObjcHeader, self.path)
            .arg("--in")
            .arg(input)
            .arg("--cg")
            .arg(out_dir.join(format!("{stem}_objc.h")))
            .arg("--rt")
            .arg("objc_mit")
            .arg("--objc_c_include_path")
            .arg(format!("{stem}.h"))
            .arg("--cqlrt")
            .arg(CQLRT_HEADER)
    }

    /// Generates `<out_dir>/<stem>.json`.
    ///
    /// # Errors
    /// Returns `PackageError` if the compiler fails.
    pub fn json_schema(&self, input: &Path, out_dir: &Path, stem: &str) -> Result<PathBuf, PackageError> {
        tracing::info!("Generating JSON schema from {}", input.display());
        self.runner
            .run(&self.json_schema_invocation(input, out_dir, stem))?;
        Ok(out_dir.join(format!("{stem}.json")))
    }

    /// Generates `<out_dir>/<stem>.h` and `<out_dir>/<stem>.c`.
    ///
    /// # Errors
    /// Returns `PackageError` if the input cannot be resolved or the compiler
    /// fails.
    pub fn c_sources(&self, input: &Path, out_dir: &Path, stem: &str) -> Result<CSources, PackageError> {
        tracing::info!("Generating C from {}", input.display());
        let absolute_input = std::fs::canonicalize(input)?;
        self.runner
            .run(&self.c_sources_invocation(&absolute_input, out_dir, stem))?;
        Ok(CSources {
            header: out_dir.join(format!("{stem}.h")),
            implementation: out_dir.join(format!("{stem}.c")),
        })
    }

    /// Generates `<out_dir>/<stem>_objc.h`.
    ///
    /// # Errors
    /// Returns `PackageError` if the compiler fails.
    pub fn objc_header(&self, input: &Path, out_dir: &Path, stem: &str) -> Result<PathBuf, PackageError> {
        tracing::info!("Generating Obj-C from {}", input.display());
        self.runner
            .run(&self.objc_header_invocation(input, out_dir, stem))?;
        Ok(out_dir.join(format!("{stem}_objc.h")))
    }
}

/// Builds the `swift package init` invocation for `package_dir`.
#[must_use]
pub fn swift_package_init_invocation(package_dir: &Path) -> ToolInvocation {
    ToolInvocation::new(Artifact::SwiftPackage, "swift")
        .arg("package")
        .arg("init")
        .current_dir(package_dir)
}

/// Scaffolds a Swift package in `package_dir`, creating the directory.
///
/// # Errors
/// Returns `PackageError` if the directory cannot be created or the Swift
/// toolchain fails.
pub fn init_swift_package<R: ToolRunner + ?Sized>(
    runner: &R,
    package_dir: &Path,
) -> Result<(), PackageError> {
    tracing::info!("Initializing Swift package in {}", package_dir.display());
    std::fs::create_dir_all(package_dir)?;
    runner.run(&swift_package_init_invocation(package_dir))
}
