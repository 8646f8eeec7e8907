//! The merge engine: per-category accumulators and the conflict policy.
//!
//! Manifests fold in caller order, one at a time. Accumulators only grow:
//! a name, once recorded, is never removed. Explicit-version conflicts
//! resolve to the numerically greater side; a wildcard, once recorded,
//! dominates every later explicit version.

use std::cmp::Ordering;
use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::manifest::{Manifest, PackageEntry, SourceEntry};
use crate::package::PackageSpec;
use crate::python::PYTHON_VERSION_KEY;
use crate::version::{PipVersion, WILDCARD};
use crate::DEFAULT_INDEX_NAME;

/// A single conflict resolution where one side was discarded.
#[derive(Debug, Clone)]
pub struct MergeNote {
    pub module: String,
    pub name: String,
    pub kept: String,
    pub discarded: String,
    pub detail: String,
}

/// An entry dropped from the merge because it failed validation.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub module: String,
    pub name: String,
    pub reason: String,
}

/// Structured record of everything the merge policy discarded.
///
/// Collected instead of printed so operators can audit non-obvious
/// outcomes and tests can assert without capturing standard output.
#[derive(Debug, Default)]
pub struct MergeLog {
    pub notes: Vec<MergeNote>,
    pub skipped: Vec<SkippedEntry>,
}

impl MergeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&mut self, note: MergeNote) {
        self.notes.push(note);
    }

    pub fn add_skipped(&mut self, entry: SkippedEntry) {
        self.skipped.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len() + self.skipped.len()
    }
}

impl fmt::Display for MergeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No merge conflicts.");
        }
        if !self.notes.is_empty() {
            writeln!(f, "Merge conflicts ({}):", self.notes.len())?;
            for n in &self.notes {
                writeln!(
                    f,
                    "  {}: kept {} over {} ({})",
                    n.name, n.kept, n.discarded, n.detail
                )?;
            }
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped entries ({}):", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {}: {}", s.name, s.reason)?;
            }
        }
        Ok(())
    }
}

/// The running merged state for one run, one accumulator per category.
///
/// Threaded through the run explicitly; there is no process-wide state.
#[derive(Debug, Default)]
pub struct MergeState {
    pub packages: IndexMap<String, PackageSpec>,
    pub dev_packages: IndexMap<String, PackageSpec>,
    pub requires: IndexMap<String, String>,
    pub sources: IndexMap<String, SourceEntry>,
    /// Effective "major.minor" Python version, once reconciled.
    pub python: Option<String>,
}

impl MergeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one module's manifest into the accumulators.
    ///
    /// The `python_version` key of `[requires]` is owned by the
    /// reconciler and not folded here.
    pub fn fold_manifest(&mut self, module: &str, manifest: &Manifest, log: &mut MergeLog) {
        merge_packages(&mut self.packages, module, &manifest.packages, log);
        merge_packages(&mut self.dev_packages, module, &manifest.dev_packages, log);

        let variables = manifest
            .requires
            .iter()
            .filter(|(name, _)| name.as_str() != PYTHON_VERSION_KEY);
        merge_variables(&mut self.requires, module, variables, log);

        merge_sources(&mut self.sources, module, &manifest.source);
    }
}

/// Fold a section of package entries into an accumulator, in declared
/// order. Entries that fail validation are skipped; the run continues.
pub fn merge_packages(
    accumulator: &mut IndexMap<String, PackageSpec>,
    module: &str,
    entries: &IndexMap<String, PackageEntry>,
    log: &mut MergeLog,
) {
    for (name, entry) in entries {
        let incoming = match entry.resolve(name, module) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::warn!("skipping package entry: {e}");
                log.add_skipped(SkippedEntry {
                    module: module.to_string(),
                    name: name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match accumulator.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                resolve_conflict(slot.get_mut(), incoming, module, log);
            }
        }
    }
}

/// Apply the conflict policy to a package recorded under the same name.
fn resolve_conflict(
    existing: &mut PackageSpec,
    incoming: PackageSpec,
    module: &str,
    log: &mut MergeLog,
) {
    let existing_wild = existing.version == WILDCARD;
    let incoming_wild = incoming.version == WILDCARD;

    if existing_wild && incoming_wild {
        return;
    }

    if incoming_wild {
        log.add_note(MergeNote {
            module: module.to_string(),
            name: existing.name.clone(),
            kept: WILDCARD.to_string(),
            discarded: existing.version.clone(),
            detail: format!("wildcard from module '{module}' overrides the recorded version"),
        });
        existing.version = WILDCARD.to_string();
        // The index follows the wildcard only when it arrived with an
        // explicit index of its own; a bare wildcard keeps the recorded one.
        if incoming.index != DEFAULT_INDEX_NAME && incoming.index != existing.index {
            existing.index = incoming.index;
        }
        return;
    }

    if existing_wild {
        log.add_note(MergeNote {
            module: module.to_string(),
            name: existing.name.clone(),
            kept: WILDCARD.to_string(),
            discarded: incoming.version,
            detail: format!("wildcard pin retained, ignoring module '{module}'"),
        });
        return;
    }

    match compare_specs(&existing.version, &incoming.version) {
        None => {
            log.add_skipped(SkippedEntry {
                module: module.to_string(),
                name: existing.name.clone(),
                reason: format!(
                    "cannot compare '{}' with '{}'",
                    existing.version, incoming.version
                ),
            });
        }
        Some(Ordering::Greater) => {
            // The surprising direction: a later module asked for an older
            // version than what is already recorded.
            log.add_note(MergeNote {
                module: module.to_string(),
                name: existing.name.clone(),
                kept: existing.version.clone(),
                discarded: incoming.version,
                detail: format!("module '{module}' superseded by a newer recorded version"),
            });
        }
        Some(Ordering::Less) => {
            existing.version = incoming.version;
            existing.index = incoming.index;
        }
        Some(Ordering::Equal) => {}
    }
}

/// Fold plain name→value variables (no index) with the same
/// monotonic-maximum and wildcard policy.
pub fn merge_variables<'a>(
    accumulator: &mut IndexMap<String, String>,
    module: &str,
    entries: impl IntoIterator<Item = (&'a String, &'a String)>,
    log: &mut MergeLog,
) {
    for (name, value) in entries {
        match accumulator.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing == value {
                    continue;
                }
                if existing == WILDCARD {
                    log.add_note(MergeNote {
                        module: module.to_string(),
                        name: name.clone(),
                        kept: WILDCARD.to_string(),
                        discarded: value.clone(),
                        detail: format!("wildcard pin retained, ignoring module '{module}'"),
                    });
                    continue;
                }
                if value == WILDCARD {
                    log.add_note(MergeNote {
                        module: module.to_string(),
                        name: name.clone(),
                        kept: WILDCARD.to_string(),
                        discarded: existing.clone(),
                        detail: format!(
                            "wildcard from module '{module}' overrides the recorded value"
                        ),
                    });
                    *existing = WILDCARD.to_string();
                    continue;
                }
                match compare_specs(existing, value) {
                    None => {
                        log.add_skipped(SkippedEntry {
                            module: module.to_string(),
                            name: name.clone(),
                            reason: format!("cannot compare '{existing}' with '{value}'"),
                        });
                    }
                    Some(Ordering::Greater) => {
                        log.add_note(MergeNote {
                            module: module.to_string(),
                            name: name.clone(),
                            kept: existing.clone(),
                            discarded: value.clone(),
                            detail: format!(
                                "module '{module}' superseded by a newer recorded value"
                            ),
                        });
                    }
                    Some(Ordering::Less) => {
                        *existing = value.clone();
                    }
                    Some(Ordering::Equal) => {}
                }
            }
        }
    }
}

/// Collect extra index descriptors, first definition wins.
pub fn merge_sources(
    accumulator: &mut IndexMap<String, SourceEntry>,
    module: &str,
    sources: &IndexMap<String, SourceEntry>,
) {
    for (name, entry) in sources {
        match accumulator.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
            }
            Entry::Occupied(slot) => {
                if slot.get() != entry {
                    tracing::warn!(
                        "module {module}: source '{name}' differs from its first definition, keeping the original"
                    );
                }
            }
        }
    }
}

fn compare_specs(a: &str, b: &str) -> Option<Ordering> {
    let a = PipVersion::parse(a).ok()?;
    let b = PipVersion::parse(b).ok()?;
    Some(a.cmp(&b))
}
