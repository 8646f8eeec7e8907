pub mod ops_emit;
pub mod ops_freeze;
pub mod ops_merge;
pub mod oracle;
