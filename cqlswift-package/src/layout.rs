//! Paths inside a generated Swift package.

use std::path::{Path, PathBuf};

/// Layout of the package directory `<out>/<package>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    root: PathBuf,
    package_name: String,
}

impl PackageLayout {
    /// Creates the layout of `package_name` inside `out_dir`.
    pub fn new(out_dir: &Path, package_name: impl Into<String>) -> Self {
        let package_name = package_name.into();
        Self {
            root: out_dir.join(&package_name),
            package_name,
        }
    }

    /// Package root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Package.swift`
    #[must_use]
    pub fn manifest(&self) -> PathBuf {
        self.root.join("Package.swift")
    }

    /// `README.md`
    #[must_use]
    pub fn readme(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// `Sources/lib<package>`
    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.root
            .join("Sources")
            .join(format!("lib{}", self.package_name))
    }

    /// `Sources/lib<package>/include`
    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.lib_dir().join("include")
    }

    /// `Sources/<package>`
    #[must_use]
    pub fn swift_dir(&self) -> PathBuf {
        self.root.join("Sources").join(&self.package_name)
    }

    /// `Sources/<package>/<package>.swift`
    #[must_use]
    pub fn swift_file(&self) -> PathBuf {
        self.swift_dir().join(format!("{}.swift", self.package_name))
    }

    /// `Tests/<package>Tests`
    #[must_use]
    pub fn tests_dir(&self) -> PathBuf {
        self.root
            .join("Tests")
            .join(format!("{}Tests", self.package_name))
    }

    /// `Tests/<package>Tests/<package>Tests.swift`, the scaffolded test file.
    #[must_use]
    pub fn main_test_file(&self) -> PathBuf {
        self.tests_dir()
            .join(format!("{}Tests.swift", self.package_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = PackageLayout::new(Path::new("/out"), "Todo");
        assert_eq!(layout.root(), Path::new("/out/Todo"));
        assert_eq!(layout.manifest(), PathBuf::from("/out/Todo/Package.swift"));
        assert_eq!(layout.readme(), PathBuf::from("/out/Todo/README.md"));
        assert_eq!(layout.lib_dir(), PathBuf::from("/out/Todo/Sources/libTodo"));
        assert_eq!(
            layout.include_dir(),
            PathBuf::from("/out/Todo/Sources/libTodo/include")
        );
        assert_eq!(
            layout.swift_file(),
            PathBuf::from("/out/Todo/Sources/Todo/Todo.swift")
        );
        assert_eq!(
            layout.main_test_file(),
            PathBuf::from("/out/Todo/Tests/TodoTests/TodoTests.swift")
        );
    }
}
