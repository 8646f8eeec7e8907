//! Emitters: canonical Pipfile text and the flattened dependency list.
//!
//! Merged versions render as compatible-release constraints
//! (`~=major.minor`); the wildcard stays `"*"`.

use pipcat_core::merge::{MergeLog, MergeState, SkippedEntry};
use pipcat_core::package::PackageSpec;
use pipcat_core::python::PYTHON_VERSION_KEY;
use pipcat_core::version::{compatible_release, WILDCARD};
use pipcat_core::{DEFAULT_INDEX_NAME, DEFAULT_INDEX_URL};

/// Render the merged state as a canonical Pipfile.
pub fn render_pipfile(state: &MergeState) -> String {
    let mut out = String::new();

    out.push_str("[[source]]\n");
    out.push_str(&format!("url = \"{DEFAULT_INDEX_URL}\"\n"));
    out.push_str("verify_ssl = true\n");
    out.push_str(&format!("name = \"{DEFAULT_INDEX_NAME}\"\n"));

    for (name, source) in &state.sources {
        out.push('\n');
        out.push_str("[[source]]\n");
        out.push_str(&format!("url = \"{}\"\n", source.url()));
        out.push_str(&format!("verify_ssl = {}\n", source.verify_ssl));
        out.push_str(&format!("name = \"{name}\"\n"));
    }

    out.push_str("\n[packages]\n");
    for spec in state.packages.values() {
        out.push_str(&render_package_line(spec));
    }

    out.push_str("\n[dev-packages]\n");
    for spec in state.dev_packages.values() {
        out.push_str(&render_package_line(spec));
    }

    out.push_str("\n[requires]\n");
    if let Some(python) = &state.python {
        out.push_str(&format!("{PYTHON_VERSION_KEY} = \"{python}\"\n"));
    }
    for (name, value) in &state.requires {
        out.push_str(&format!("{name} = \"{value}\"\n"));
    }

    out
}

fn render_package_line(spec: &PackageSpec) -> String {
    let constraint = rendered_constraint(&spec.version);
    if spec.index == DEFAULT_INDEX_NAME {
        format!("{} = \"{constraint}\"\n", spec.name)
    } else {
        format!(
            "{} = {{ version = \"{constraint}\", index = \"{}\" }}\n",
            spec.name, spec.index
        )
    }
}

/// Render the merged runtime packages as a flattened dependency list,
/// one `name~=major.minor` requirement per line.
///
/// Packages pinned to a non-public index cannot appear in distribution
/// metadata; they are omitted and the omission is recorded. The
/// interpreter version never appears in this form.
pub fn render_dist(state: &MergeState, log: &mut MergeLog) -> String {
    let mut out = String::new();

    for spec in state.packages.values() {
        if spec.index != DEFAULT_INDEX_NAME {
            log.add_skipped(SkippedEntry {
                module: "distribution".to_string(),
                name: spec.name.clone(),
                reason: format!(
                    "omitted from the dependency list: index '{}' is not '{DEFAULT_INDEX_NAME}'",
                    spec.index
                ),
            });
            continue;
        }
        let constraint = rendered_constraint(&spec.version);
        if constraint == WILDCARD {
            out.push_str(&format!("{}\n", spec.name));
        } else {
            out.push_str(&format!("{}{constraint}\n", spec.name));
        }
    }

    out
}

fn rendered_constraint(version: &str) -> String {
    compatible_release(version).unwrap_or_else(|_| version.to_string())
}
