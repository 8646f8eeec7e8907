//! Operation: list installed packages that are not build-time tooling.
//!
//! The moral inverse of the merge run: instead of folding declared
//! requirements, it asks the environment what is actually installed and
//! subtracts everything declared as development tooling.

use std::collections::BTreeSet;
use std::path::Path;

use pipcat_core::manifest::Manifest;
use pipcat_util::process::CommandBuilder;

/// Packages always excluded from the frozen listing.
const MASKED: &[&str] = &["virtualenv", "setuptools", "pipenv", "pip"];

/// The mask set for a project: built-in tooling plus every declared
/// dev-package.
pub fn mask_set(manifest: Option<&Manifest>) -> BTreeSet<String> {
    let mut masked: BTreeSet<String> = MASKED.iter().map(|s| s.to_string()).collect();
    if let Some(manifest) = manifest {
        for name in manifest.dev_packages.keys() {
            masked.insert(name.clone());
        }
    }
    masked
}

/// Reduce `pip freeze` lines to unmasked package names.
pub fn filter_frozen(lines: &[String], masked: &BTreeSet<String>) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.split("==").next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && !masked.contains(*name))
        .map(|name| name.to_string())
        .collect()
}

/// List the installed runtime packages of a project.
///
/// Reads the project `Pipfile` (if present) for the mask set, then runs
/// `pipenv run pip freeze`. A non-zero exit is fatal with the captured
/// stderr surfaced.
pub fn freeze(project_dir: &Path) -> miette::Result<Vec<String>> {
    let pipfile = project_dir.join("Pipfile");
    let manifest = if pipfile.is_file() {
        Some(Manifest::from_path(&pipfile)?)
    } else {
        None
    };
    let masked = mask_set(manifest.as_ref());

    let lines = CommandBuilder::new("pipenv")
        .args(["run", "pip", "freeze"])
        .cwd(project_dir.to_string_lossy())
        .capture_lines()?;

    Ok(filter_frozen(&lines, &masked))
}
