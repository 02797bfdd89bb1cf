//! # cqlswift Package
//!
//! Assembly of a Swift package around CG-SQL generated bindings.
//!
//! This crate provides:
//! - Invocation of the CQL compiler and the Swift toolchain
//! - Population of the native library target
//! - `Package.swift` patching
//! - Emission of the Swift bindings, tests and README

pub mod assemble;
pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod runtime;
pub mod tools;

pub use assemble::PackageAssembler;
pub use config::PackageConfig;
pub use error::PackageError;
pub use layout::PackageLayout;
pub use manifest::splice_manifest;
pub use tools::{Artifact, ProcessRunner, ToolInvocation, ToolRunner};

/// Assembles a package by running the real external tools.
///
/// # Errors
/// Returns `PackageError` if the configuration is invalid or any step fails.
pub fn assemble_package(config: &PackageConfig) -> Result<PackageLayout, PackageError> {
    PackageAssembler::new(config, &ProcessRunner).assemble()
}
