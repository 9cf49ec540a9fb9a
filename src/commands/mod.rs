//! CLI subcommands
//!
//! Each command writes its report to the given writer so the binary can
//! hand it stdout and tests can hand it a buffer.

pub mod check;
pub mod list;
pub mod new;
pub mod show;
pub mod tags;
