// src/exec/mod.rs

//! Subprocess execution helper.
//!
//! Task bodies that shell out can use [`Cmd`] to run a process with its
//! stdout/stderr streamed line-by-line and an optional timeout. The core
//! task machinery never calls into this module; it is a standalone
//! convenience in the same crate.

pub mod command;

pub use command::{Cmd, CmdOutput};
