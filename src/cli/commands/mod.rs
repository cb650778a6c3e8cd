//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Rendering lives in [`display`]
//! so it can be tested without touching the filesystem.

pub mod dispatcher;
pub mod display;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use show::ShowCommand;
