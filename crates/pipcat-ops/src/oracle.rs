//! Process-backed interpreter version oracle.

use pipcat_core::python::VersionOracle;
use pipcat_util::errors::PipcatError;
use pipcat_util::process::CommandBuilder;

/// Lists interpreters known to `pyenv`, via `pyenv versions --bare`.
///
/// Only consulted when neither a baseline nor any module declares a
/// Python version; a spawn failure or non-zero exit is fatal on that
/// path.
#[derive(Debug, Default)]
pub struct PyenvOracle;

impl VersionOracle for PyenvOracle {
    fn list_versions(&self) -> Result<Vec<String>, PipcatError> {
        CommandBuilder::new("pyenv")
            .args(["versions", "--bare"])
            .capture_lines()
    }
}
