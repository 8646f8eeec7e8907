use std::collections::BTreeMap;
use std::path::Path;

use pipcat_util::errors::PipcatError;

/// Env-file key holding the baseline Python feature version.
pub const BASELINE_PYTHON_KEY: &str = "PYTHON_VERSION";

/// Loads a `.pipcat.env` file (shell-style `KEY=value` format).
///
/// Holds merge-run configuration such as the baseline Python version.
/// Comments (`#`) and blank lines are ignored; any other line without
/// `=` fails validation naming the offending line.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(PipcatError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(PipcatError::Validation {
                message: format!("malformed line in {}: '{trimmed}'", path.display()),
            }
            .into());
        };
        map.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(map)
}
