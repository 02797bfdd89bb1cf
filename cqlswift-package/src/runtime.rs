//! Native library target population.

use crate::error::PackageError;
use crate::layout::PackageLayout;
use crate::tools::CSources;
use std::path::{Path, PathBuf};

/// Runtime implementation files, relative to the runtime sources directory.
pub const RUNTIME_SOURCES: [&str; 3] = [
    "cqlrt_common.c",
    "cqlrt_cf/cqlholder.m",
    "cqlrt_cf/cqlrt_cf.c",
];

/// Runtime headers, relative to the runtime sources directory.
pub const RUNTIME_HEADERS: [&str; 2] = ["cqlrt_common.h", "cqlrt_cf/cqlrt_cf.h"];

/// Generated native sources copied into the library target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSources {
    /// C header and implementation.
    pub c: CSources,
    /// Objective-C result-set header.
    pub objc_header: PathBuf,
}

/// Copies `from` to `to`.
pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<(), PackageError> {
    tracing::debug!("Copying {} to {}", from.display(), to.display());
    std::fs::copy(from, to).map_err(|source| PackageError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Copies `from` into `to_dir`, keeping its file name.
pub(crate) fn copy_into(from: &Path, to_dir: &Path) -> Result<PathBuf, PackageError> {
    let to = match from.file_name() {
        Some(name) => to_dir.join(name),
        None => {
            return Err(PackageError::invalid_config(format!(
                "not a file: {}",
                from.display()
            )));
        }
    };
    copy_file(from, &to)?;
    Ok(to)
}

/// Creates `Sources/lib<package>` and its `include` directory and copies the
/// generated and runtime native sources into them.
///
/// # Errors
/// Returns `PackageError` if a directory cannot be created or a file cannot
/// be copied.
pub fn install_native_library(
    layout: &PackageLayout,
    runtime_dir: &Path,
    sources: &NativeSources,
) -> Result<Vec<PathBuf>, PackageError> {
    tracing::info!("Populating {}", layout.lib_dir().display());

    let lib_dir = layout.lib_dir();
    let include_dir = layout.include_dir();
    std::fs::create_dir_all(&include_dir)?;

    let lib_files = std::iter::once(sources.c.implementation.clone())
        .chain(RUNTIME_SOURCES.iter().map(|file| runtime_dir.join(file)));
    let include_files = [sources.c.header.clone(), sources.objc_header.clone()]
        .into_iter()
        .chain(RUNTIME_HEADERS.iter().map(|file| runtime_dir.join(file)));

    let mut installed = Vec::new();
    for file in lib_files {
        installed.push(copy_into(&file, &lib_dir)?);
    }
    for file in include_files {
        installed.push(copy_into(&file, &include_dir)?);
    }

    Ok(installed)
}
