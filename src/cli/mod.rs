//! Command-line interface
//!
//! Argument definitions and command handlers for the `envschema` binary.

pub mod args;
pub mod commands;
