//! CLI module for coffeeconnection - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for a matching run, a
//! read-only status view and a manual history reset.

pub mod commands;

pub use commands::Cli;
