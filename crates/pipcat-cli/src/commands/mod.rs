//! Command dispatch and handler modules.

mod freeze;
mod merge;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge {
            modules,
            pipfile,
            dist,
            env,
        } => merge::exec(&modules, pipfile.as_deref(), dist, env, cli.verbose),
        Command::Freeze { dir } => freeze::exec(&dir),
    }
}
