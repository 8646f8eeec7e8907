//! Command: print installed runtime packages.

use std::path::Path;

use pipcat_ops::ops_freeze;

pub fn exec(dir: &Path) -> miette::Result<()> {
    for name in ops_freeze::freeze(dir)? {
        println!("{name}");
    }
    Ok(())
}
