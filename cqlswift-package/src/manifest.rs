//! `Package.swift` patching.
//!
//! The scaffolded manifest is edited line-wise: the package target gains a
//! dependency on the native library target, which is declared right after
//! it, and both targets (plus the test target, if any) get the define that
//! exposes the Objective-C result-set classes to Swift.

use crate::error::PackageError;
use std::path::Path;

/// Define exposing the Objective-C result-set interfaces.
const OBJC_INTERFACES_SETTING: &str =
    "            cSettings: [.define(\"CQL_EMIT_OBJC_INTERFACES\")]),";

/// Finds the `dependencies: [` line of the target named `name` declared with
/// `keyword`.
fn find_target_dependencies(lines: &[String], keyword: &str, name: &str) -> Option<usize> {
    let name_line = format!("name: \"{name}\",");

    let index = lines.windows(3).position(|window| {
        window[0].trim().starts_with(keyword)
            && window[1].trim().starts_with(&name_line)
            && window[2].trim().starts_with("dependencies: [")
    })?;
    Some(index + 2)
}

/// Splices the native library target into the manifest text.
///
/// # Errors
/// Returns `PackageError::ManifestSplice` if a target anchor is missing or
/// the package target already declares dependencies.
pub fn splice_manifest(
    contents: &str,
    package_name: &str,
    with_tests: bool,
) -> Result<String, PackageError> {
    let lib_name = format!("lib{package_name}");
    let mut lines: Vec<String> = contents.split('\n').map(str::to_string).collect();

    let index = find_target_dependencies(&lines, ".target(", package_name).ok_or_else(|| {
        PackageError::ManifestSplice {
            target: package_name.to_string(),
        }
    })?;
    if !lines[index].contains("[])") {
        return Err(PackageError::ManifestSplice {
            target: package_name.to_string(),
        });
    }
    lines[index] = lines[index].replace("[])", &format!("[\"{lib_name}\"]"));
    let library_target = [
        OBJC_INTERFACES_SETTING.to_string(),
        "        .target(".to_string(),
        format!("            name: \"{lib_name}\","),
        "            dependencies: [],".to_string(),
        "            // cqlrt_common.c is included inside cqlrt_cf.c".to_string(),
        "            exclude: [\"cqlrt_common.c\"],".to_string(),
        OBJC_INTERFACES_SETTING.to_string(),
    ];
    lines.splice(index + 1..index + 1, library_target);

    if with_tests {
        let tests_name = format!("{package_name}Tests");
        let index = find_target_dependencies(&lines, ".testTarget(", &tests_name)
            .ok_or(PackageError::ManifestSplice { target: tests_name })?;
        lines[index] = lines[index].replace("]),", "],");
        lines.insert(index + 1, OBJC_INTERFACES_SETTING.to_string());
    }

    Ok(lines.join("\n"))
}

/// Patches the `Package.swift` of `package_dir` in place.
///
/// # Errors
/// Returns `PackageError` if the manifest cannot be read, spliced, or written.
pub fn update_manifest(
    package_dir: &Path,
    package_name: &str,
    with_tests: bool,
) -> Result<(), PackageError> {
    tracing::info!("Updating Package.swift for {}", package_name);

    let path = package_dir.join("Package.swift");
    let contents = std::fs::read_to_string(&path)?;
    std::fs::write(&path, splice_manifest(&contents, package_name, with_tests)?)?;
    Ok(())
}
