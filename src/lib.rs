// src/lib.rs

//! `taskdag` — a declarative task runner with dependency ordering.
//!
//! Register named tasks with dependency edges and typed parameters, then
//! hand the process arguments to [`TaskSet::invoke`]: the requested tasks
//! plus all transitive dependencies run exactly once each, dependencies
//! first, with each parameter bound from a dynamically generated
//! command-line option.
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! use taskdag::{Param, TaskSet};
//!
//! fn main() -> ExitCode {
//!     let mut tasks = TaskSet::new();
//!     tasks.create("build").describe("Compile everything").run(|| {
//!         println!("building");
//!     });
//!     tasks
//!         .create("publish")
//!         .describe("Push a release")
//!         .depends_on(["build"])
//!         .run_with(vec![Param::str("channel"), Param::bool("dry_run")], |args| {
//!             println!("publishing to {} (dry run: {})", args.str(0)?, args.flag(1)?);
//!             Ok(())
//!         });
//!     tasks.invoke(std::env::args().skip(1))
//! }
//! ```

pub mod errors;
pub mod exec;
pub mod logging;
pub mod param;
pub mod task;

mod dag;
mod invocation;
mod opts;
mod set;

pub use errors::{Result, TaskError};
pub use exec::{Cmd, CmdOutput};
pub use param::{Args, Param, Value, ValueKind};
pub use set::TaskSet;
pub use task::Task;
