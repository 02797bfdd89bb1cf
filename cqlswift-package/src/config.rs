//! Package assembly configuration.

use crate::error::PackageError;
use std::path::PathBuf;

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "out";

/// Configuration of one package assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Path to the CQL compiler.
    pub cql_compiler: PathBuf,
    /// CG-SQL runtime sources directory.
    pub runtime_dir: PathBuf,
    /// Input `.sql` file.
    pub input: PathBuf,
    /// Directory the artifacts and the package are generated into.
    pub out_dir: PathBuf,
    /// Swift package name.
    pub package_name: String,
    /// Swift test sources copied into the test target.
    pub test_files: Vec<PathBuf>,
}

impl PackageConfig {
    /// Creates a configuration with the default output directory and no
    /// test files.
    pub fn new(
        cql_compiler: impl Into<PathBuf>,
        runtime_dir: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            cql_compiler: cql_compiler.into(),
            runtime_dir: runtime_dir.into(),
            input: input.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            package_name: package_name.into(),
            test_files: Vec::new(),
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Adds a test source file.
    #[must_use]
    pub fn test_file(mut self, test_file: impl Into<PathBuf>) -> Self {
        self.test_files.push(test_file.into());
        self
    }

    /// Sets the test source files.
    #[must_use]
    pub fn test_files(mut self, test_files: Vec<PathBuf>) -> Self {
        self.test_files = test_files;
        self
    }

    /// Returns true if a test target is generated.
    #[must_use]
    pub fn has_tests(&self) -> bool {
        !self.test_files.is_empty()
    }

    /// Name of the native library target.
    #[must_use]
    pub fn lib_name(&self) -> String {
        format!("lib{}", self.package_name)
    }

    /// Name of the test target.
    #[must_use]
    pub fn tests_name(&self) -> String {
        format!("{}Tests", self.package_name)
    }

    /// File stem of the input, shared by every generated artifact.
    ///
    /// # Errors
    /// Returns `PackageError::InvalidConfig` if the input has no usable stem.
    pub fn input_stem(&self) -> Result<String, PackageError> {
        self.input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                PackageError::invalid_config(format!(
                    "sql input has no file name: {}",
                    self.input.display()
                ))
            })
    }

    /// Validates the configuration before any tool runs.
    ///
    /// # Errors
    /// Returns `PackageError::InvalidConfig` describing the first problem.
    pub fn validate(&self) -> Result<(), PackageError> {
        validate_package_name(&self.package_name)?;

        if !self.runtime_dir.is_dir() {
            return Err(PackageError::invalid_config(format!(
                "CG-SQL sources directory does not exist: {}",
                self.runtime_dir.display()
            )));
        }

        if !self.input.is_file() {
            return Err(PackageError::invalid_config(format!(
                "sql input is not a file: {}",
                self.input.display()
            )));
        }
        self.input_stem()?;

        for test_file in &self.test_files {
            if !test_file.is_file() {
                return Err(PackageError::invalid_config(format!(
                    "test input is not a file: {}",
                    test_file.display()
                )));
            }
        }

        Ok(())
    }
}

/// Package names become Swift module and directory names.
fn validate_package_name(name: &str) -> Result<(), PackageError> {
    if name.is_empty() {
        return Err(PackageError::invalid_config("package name must not be empty"));
    }

    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(PackageError::invalid_config(format!(
            "package name is not a valid module name: {name}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, PackageConfig) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let runtime = dir.path().join("sources");
        fs::create_dir(&runtime).expect("Failed to create runtime dir");
        let input = dir.path().join("todo.sql");
        fs::write(&input, "-- todo\n").expect("Failed to write input");

        let config = PackageConfig::new("cql", runtime, input, "Todo");
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let config = PackageConfig::new("cql", "src", "todo.sql", "Todo");
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(!config.has_tests());
        assert_eq!(config.lib_name(), "libTodo");
        assert_eq!(config.tests_name(), "TodoTests");
        assert_eq!(config.input_stem().expect("stem"), "todo");
    }

    #[test]
    fn test_builder() {
        let config = PackageConfig::new("cql", "src", "todo.sql", "Todo")
            .out_dir("build")
            .test_file("a.swift")
            .test_file("b.swift");
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(
            config.test_files,
            vec![PathBuf::from("a.swift"), PathBuf::from("b.swift")]
        );
        assert!(config.has_tests());
    }

    #[test]
    fn test_validate_ok() {
        let (_dir, config) = fixture();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_runtime_dir() {
        let (dir, mut config) = fixture();
        config.runtime_dir = dir.path().join("missing");
        let err = config.validate().expect_err("missing runtime dir");
        assert!(err.to_string().contains("CG-SQL sources directory does not exist"));
    }

    #[test]
    fn test_validate_missing_input() {
        let (dir, mut config) = fixture();
        config.input = dir.path().join("missing.sql");
        let err = config.validate().expect_err("missing input");
        assert!(err.to_string().contains("sql input is not a file"));
    }

    #[test]
    fn test_validate_missing_test_file() {
        let (dir, config) = fixture();
        let config = config.test_file(dir.path().join("missing.swift"));
        assert!(matches!(
            config.validate(),
            Err(PackageError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("Todo").is_ok());
        assert!(validate_package_name("_todo2").is_ok());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("2todo").is_err());
        assert!(validate_package_name("my-package").is_err());
        assert!(validate_package_name("a/b").is_err());
    }
}
