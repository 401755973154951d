//! Command-line front-end: one invocation performs one user action

pub mod commands;
pub mod format;

pub use commands::{Cli, Commands, resolve_selector, run};
