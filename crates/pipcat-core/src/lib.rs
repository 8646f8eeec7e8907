//! Core data types and merge logic for pipcat.
//!
//! This crate defines the pieces that turn a set of per-module `Pipfile`s
//! into one canonical manifest: Pipfile parsing, package spec
//! normalization, version comparison, the merge engine with its conflict
//! policy, Python target-version reconciliation, and baseline
//! configuration.
//!
//! This crate is intentionally free of subprocess and network I/O; the
//! interpreter-listing collaborator is injected behind
//! [`python::VersionOracle`].

/// Name of the canonical public package index.
pub const DEFAULT_INDEX_NAME: &str = "pypi";

/// URL of the canonical public package index.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.python.org/simple";

pub mod manifest;
pub mod merge;
pub mod package;
pub mod properties;
pub mod python;
pub mod version;
