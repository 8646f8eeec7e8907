//! Python target-version reconciliation.
//!
//! One effective "major.minor" feature version is computed from the
//! configured baseline and each module's declared `python_version`
//! requirement. When neither exists, an injected oracle lists the
//! interpreters known on the machine.

use pipcat_util::errors::PipcatError;

use crate::merge::{MergeLog, MergeNote};
use crate::version::{feature_version, strip_operators, PipVersion, WILDCARD};

/// The `[requires]` key carrying a module's interpreter constraint.
pub const PYTHON_VERSION_KEY: &str = "python_version";

/// Lists known interpreter versions, newest first.
///
/// The process-backed implementation lives in `pipcat-ops`; tests inject
/// a stub so reconciliation never spawns a process.
pub trait VersionOracle {
    fn list_versions(&self) -> Result<Vec<String>, PipcatError>;
}

/// Compute the effective "major.minor" Python version for one module.
///
/// With no declared constraint the baseline decides; with no baseline
/// either, the oracle's newest version decides and its failure is fatal.
/// A declared constraint is overridden only by a strictly greater
/// baseline, which is recorded in the log. A declared `"*"` counts as no
/// constraint.
pub fn reconcile(
    module: &str,
    declared: Option<&str>,
    baseline: Option<&str>,
    oracle: &dyn VersionOracle,
    log: &mut MergeLog,
) -> Result<String, PipcatError> {
    let declared = match declared {
        Some(spec) if spec != WILDCARD => Some(strip_operators(spec)?),
        _ => None,
    };

    let Some(declared) = declared else {
        if let Some(base) = baseline {
            return Ok(feature_version(base));
        }
        return latest_known(oracle);
    };

    let Some(base) = baseline else {
        return Ok(feature_version(&declared));
    };

    let base_version = PipVersion::parse(base)?;
    let declared_version = PipVersion::parse(&declared)?;
    if base_version > declared_version {
        log.add_note(MergeNote {
            module: module.to_string(),
            name: PYTHON_VERSION_KEY.to_string(),
            kept: feature_version(base),
            discarded: declared.clone(),
            detail: format!("baseline python {base} overrides the request of module '{module}'"),
        });
        Ok(feature_version(base))
    } else {
        Ok(feature_version(&declared))
    }
}

/// The newest interpreter the oracle knows, reduced to its feature
/// version. No usable line is a fatal tool failure.
fn latest_known(oracle: &dyn VersionOracle) -> Result<String, PipcatError> {
    let versions = oracle.list_versions()?;
    let first = versions
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .ok_or_else(|| PipcatError::Tool {
            message: "interpreter listing produced no versions".to_string(),
        })?;
    Ok(feature_version(&strip_operators(first)?))
}
