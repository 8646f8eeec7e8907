//! Command: merge module manifests and print the canonical document.

use std::path::PathBuf;

use pipcat_ops::ops_emit;
use pipcat_ops::ops_merge::{compile, CompileOptions};
use pipcat_ops::oracle::PyenvOracle;

pub fn exec(
    modules: &[PathBuf],
    pipfile: Option<&str>,
    dist: bool,
    env: PathBuf,
    verbose: bool,
) -> miette::Result<()> {
    let opts = CompileOptions {
        overlay: pipfile.map(|s| s.to_string()),
        env_file: Some(env),
    };
    let oracle = PyenvOracle;

    let (state, mut log) = compile(modules, &opts, &oracle)?;

    let rendered = if dist {
        ops_emit::render_dist(&state, &mut log)
    } else {
        ops_emit::render_pipfile(&state)
    };
    print!("{rendered}");

    if !log.is_empty() {
        eprintln!("{log}");
    }
    if verbose {
        eprintln!(
            "Merged {} packages, {} dev-packages from {} module(s)",
            state.packages.len(),
            state.dev_packages.len(),
            modules.len()
        );
    }

    Ok(())
}
