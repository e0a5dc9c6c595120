//! # Rolegate CLI
//!
//! Command implementations and the demo module host behind the `rolegate` binary.

pub mod commands;
pub mod demo;
