//! wavpatch CLI library.
//!
//! Commands, configuration loading and logging setup for the `wavpatch`
//! binary. Kept in a library so the commands can be tested without spawning
//! a process.

pub mod commands;
pub mod config;
pub mod logging;
