//! Command-line interface for wanpc.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AddTemplateArgs, Cli, Commands, CompletionsArgs, ConfigAction, ConfigArgs, CreateArgs,
    ListArgs, RemoveDefaultArgs, RemoveGlobalDefaultArgs, RemoveTemplateArgs, SetDefaultArgs,
    SetDescriptionArgs, SetGlobalDefaultArgs, ShowArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
