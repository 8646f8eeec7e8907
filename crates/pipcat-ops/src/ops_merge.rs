//! Operation: the merge run across module manifests.

use std::path::PathBuf;

use pipcat_core::manifest::Manifest;
use pipcat_core::merge::{MergeLog, MergeState};
use pipcat_core::properties::{load_env_file, BASELINE_PYTHON_KEY};
use pipcat_core::python::{self, VersionOracle, PYTHON_VERSION_KEY};

/// Default manifest filename looked up in each module directory.
pub const DEFAULT_MANIFEST_NAME: &str = "Pipfile";

/// Options for the merge run.
#[derive(Default)]
pub struct CompileOptions {
    /// Alternate manifest filename to look for instead of `Pipfile`.
    pub overlay: Option<String>,
    /// Baseline env file; `.pipcat.env` in the working directory if unset.
    pub env_file: Option<PathBuf>,
}

/// Fold every module's manifest into fresh accumulators, in the given
/// order.
///
/// A module without a manifest file is skipped with a warning. The
/// effective Python version is reconciled after each manifest that
/// declares one; if the whole run produced none, the oracle fallback
/// runs once at the end.
pub fn compile(
    modules: &[PathBuf],
    opts: &CompileOptions,
    oracle: &dyn VersionOracle,
) -> miette::Result<(MergeState, MergeLog)> {
    let env_path = opts
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(".pipcat.env"));
    let env = load_env_file(&env_path)?;
    let baseline = env.get(BASELINE_PYTHON_KEY).map(String::as_str);

    let manifest_name = opts.overlay.as_deref().unwrap_or(DEFAULT_MANIFEST_NAME);

    let mut state = MergeState::new();
    let mut log = MergeLog::new();

    for module in modules {
        let path = module.join(manifest_name);
        if !path.is_file() {
            tracing::warn!(
                "module spec: {} does not resolve to {} - skipping",
                module.display(),
                path.display()
            );
            continue;
        }

        let manifest = Manifest::from_path(&path)?;
        let module_id = module.display().to_string();
        state.fold_manifest(&module_id, &manifest, &mut log);

        if let Some(declared) = manifest.requires.get(PYTHON_VERSION_KEY) {
            let effective =
                python::reconcile(&module_id, Some(declared.as_str()), baseline, oracle, &mut log)?;
            state.python = Some(effective);
        }
    }

    if state.python.is_none() {
        let effective = python::reconcile("(none)", None, baseline, oracle, &mut log)?;
        state.python = Some(effective);
    }

    Ok((state, log))
}
