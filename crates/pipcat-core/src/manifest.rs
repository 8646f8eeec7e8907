use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The parsed representation of one module's `Pipfile`.
///
/// All sections are optional; section entries keep their declared order so
/// the merged output is stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub source: IndexMap<String, SourceEntry>,

    #[serde(default)]
    pub packages: IndexMap<String, PackageEntry>,

    #[serde(default, rename = "dev-packages")]
    pub dev_packages: IndexMap<String, PackageEntry>,

    #[serde(default)]
    pub requires: IndexMap<String, String>,
}

/// A package requirement, either a bare constraint string or a detailed
/// record naming the source index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageEntry {
    Simple(String),
    Detailed(DetailedPackage),
}

/// A package requirement with an explicit version and optional index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedPackage {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
}

/// An extra package-index descriptor from `[source.<name>]`.
///
/// The index name is the table key; the URL is assembled from host and
/// optional port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_verify_ssl() -> bool {
    true
}

impl SourceEntry {
    /// The simple-index URL for this source.
    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("https://{}:{}/simple", self.host, port),
            None => format!("https://{}/simple", self.host),
        }
    }
}

impl Manifest {
    /// Load and parse a `Pipfile` from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            pipcat_util::errors::PipcatError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Pipfile` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            pipcat_util::errors::PipcatError::Manifest {
                message: format!("Failed to parse Pipfile: {e}"),
            }
            .into()
        })
    }
}
