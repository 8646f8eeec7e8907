//! Pipfile version parsing, normalization, and comparison.
//!
//! Pipfile constraints are simpler than semver: a version is either the
//! wildcard `"*"` (unconstrained, compares greater than everything) or a
//! dotted numeric string. Comparison happens on a zero-padded
//! representation of at least three components, so `"1.2"` and `"1.2.0"`
//! are the same version.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use pipcat_util::errors::PipcatError;

/// The wildcard constraint meaning "unconstrained / latest".
pub const WILDCARD: &str = "*";

/// First dotted numeric run in a constraint string, e.g. `1.2` in `>=1.2`.
static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+){1,2}").unwrap());

/// A parsed package version with total ordering.
///
/// The wildcard compares greater than every finite version and equal to
/// another wildcard. Finite versions are padded with zero components up to
/// three; components beyond the third are kept and participate in
/// comparison.
#[derive(Debug, Clone)]
pub struct PipVersion {
    original: String,
    parts: Option<Vec<u64>>,
}

impl PipVersion {
    /// Parse `"*"` or a dotted numeric version string.
    pub fn parse(version: &str) -> Result<Self, PipcatError> {
        if version == WILDCARD {
            return Ok(Self {
                original: version.to_string(),
                parts: None,
            });
        }

        let mut parts = Vec::new();
        for token in version.split('.') {
            let n = token.parse::<u64>().map_err(|_| PipcatError::Version {
                message: format!("invalid version component '{token}' in '{version}'"),
            })?;
            parts.push(n);
        }
        while parts.len() < 3 {
            parts.push(0);
        }

        Ok(Self {
            original: version.to_string(),
            parts: Some(parts),
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.parts.is_none()
    }

    /// The normalized dotted form: `"1.2"` expands to `"1.2.0"`, the
    /// wildcard stays `"*"`. Components past the third are never dropped.
    pub fn expanded(&self) -> String {
        match &self.parts {
            None => WILDCARD.to_string(),
            Some(parts) => parts
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join("."),
        }
    }
}

impl fmt::Display for PipVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for PipVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parts, &other.parts) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let max_len = a.len().max(b.len());
                for i in 0..max_len {
                    let x = a.get(i).copied().unwrap_or(0);
                    let y = b.get(i).copied().unwrap_or(0);
                    let ord = x.cmp(&y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            }
        }
    }
}

impl PartialOrd for PipVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PipVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PipVersion {}

/// Strip any leading relational operator (`==`, `>=`, `~=`, ...) from a
/// constraint string by taking its first dotted numeric run.
///
/// The wildcard passes through unchanged. A non-wildcard spec with no
/// numeric run is a version error.
pub fn strip_operators(spec: &str) -> Result<String, PipcatError> {
    if spec == WILDCARD {
        return Ok(WILDCARD.to_string());
    }
    match NUMERIC_RUN.find(spec) {
        Some(m) => Ok(m.as_str().to_string()),
        None => Err(PipcatError::Version {
            message: format!("no numeric version in '{spec}'"),
        }),
    }
}

/// The "major.minor" reduction of a dotted version.
///
/// Empty input yields an empty string; a single component passes through.
pub fn feature_version(version: &str) -> String {
    if version.is_empty() {
        return String::new();
    }
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Rewrite a constraint as a compatible-release constraint
/// (`"~=major.minor"`). The wildcard passes through unchanged.
pub fn compatible_release(spec: &str) -> Result<String, PipcatError> {
    let stripped = strip_operators(spec)?;
    if stripped == WILDCARD {
        return Ok(stripped);
    }
    Ok(format!("~={}", feature_version(&stripped)))
}
