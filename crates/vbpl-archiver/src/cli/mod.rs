//! CLI subcommand implementations for the vbpl-archiver binary.

pub mod doctor;
pub mod harvest_cmd;
pub mod run_cmd;
