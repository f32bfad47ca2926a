//! Command line shell: arguments, settings, errors and the runner

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;
