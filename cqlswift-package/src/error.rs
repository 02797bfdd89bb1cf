//! Error types for package assembly.

use crate::tools::Artifact;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for package assembly operations.
#[derive(Debug, Error)]
pub enum PackageError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] cqlswift_schema::ParseError),

    /// Swift generation error.
    #[error("codegen error: {0}")]
    Codegen(#[from] cqlswift_codegen::CodegenError),

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },

    /// An external tool could not be started.
    #[error("could not run {tool}: {source}")]
    ToolSpawn {
        /// Program that failed to start.
        tool: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited unsuccessfully.
    #[error("could not generate {artifact}: {}", exit_status(.code))]
    ToolFailed {
        /// Artifact the tool was producing.
        artifact: Artifact,
        /// Exit code, if the tool was not killed by a signal.
        code: Option<i32>,
    },

    /// A file could not be copied into the package.
    #[error("could not copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The package manifest has no anchor for the target.
    #[error("could not splice target '{target}' into Package.swift")]
    ManifestSplice {
        /// Target name.
        target: String,
    },
}

impl PackageError {
    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("return code {code}"),
        None => "terminated by signal".to_string(),
    }
}
