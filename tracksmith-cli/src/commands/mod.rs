//! Command implementations for the CLI.
//!
//! Tracksmith has a single command; it lives in `run`.

pub mod run;
