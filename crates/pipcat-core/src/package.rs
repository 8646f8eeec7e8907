use pipcat_util::errors::PipcatError;

use crate::manifest::PackageEntry;
use crate::version::strip_operators;
use crate::DEFAULT_INDEX_NAME;

/// A normalized package requirement held in the merged accumulators.
///
/// The version is always either `"*"` or a bare dotted numeric string;
/// relational operators never survive normalization. The index defaults
/// to the canonical public one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: String,
    pub index: String,
}

impl PackageEntry {
    /// Reduce a raw manifest entry to a canonical `(version, index)` pair.
    ///
    /// A detailed entry without a version, or a constraint with no numeric
    /// run, fails validation naming the offending module and entry.
    pub fn resolve(&self, name: &str, module: &str) -> Result<PackageSpec, PipcatError> {
        let (raw, index) = match self {
            PackageEntry::Simple(spec) => (spec.as_str(), None),
            PackageEntry::Detailed(detailed) => {
                let version =
                    detailed
                        .version
                        .as_deref()
                        .ok_or_else(|| PipcatError::Validation {
                            message: format!(
                                "module {module}: package '{name}' has no 'version' field"
                            ),
                        })?;
                (version, detailed.index.as_deref())
            }
        };

        let version = strip_operators(raw).map_err(|_| PipcatError::Validation {
            message: format!("module {module}: package '{name}' has no numeric version in '{raw}'"),
        })?;

        Ok(PackageSpec {
            name: name.to_string(),
            version,
            index: index.unwrap_or(DEFAULT_INDEX_NAME).to_string(),
        })
    }
}
