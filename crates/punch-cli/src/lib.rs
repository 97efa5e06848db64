//! punch CLI library.
//!
//! This crate provides the command-line interface for the punch time tracker.

mod cli;
pub mod commands;
mod config;
pub mod editor;
pub mod paint;

pub use cli::{Cli, Commands};
pub use config::Config;
