//! Subcommand implementations.

pub mod classify;
pub mod completion;
pub mod inspect;
