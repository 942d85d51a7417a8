// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Every failure the library can report is a variant of [`TaskError`];
//! nothing in the crate panics on bad user input. The convenience entry
//! point `TaskSet::invoke` downgrades these to a printed message plus an
//! exit status, and treats [`TaskError::HelpRequested`] as success.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// Two tasks in the set share a name.
    #[error("multiple tasks with the name \"{0}\" found")]
    DuplicateTaskName(String),

    /// A task was registered but never given a body via `.run(...)`.
    #[error("task \"{0}\" is missing a call to .run(...)")]
    MissingInvocation(String),

    /// A declared dependency does not name any registered task.
    #[error("task \"{task}\": unable to find dependency \"{dependency}\"")]
    DependencyNotFound { task: String, dependency: String },

    /// A dependency cycle reachable from a requested task.
    ///
    /// `path` is the full walk that rediscovered an in-progress node: the
    /// first entry is the task the walk entered the cycle through, and the
    /// last entry repeats the task where the cycle closed.
    #[error("recursive dependency found: {}", path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    /// A requested task name does not exist.
    #[error("unable to find task \"{0}\"")]
    TaskNotFound(String),

    /// No task names were requested and no task named "default" exists.
    #[error("no task name specified (and no task named \"default\" exists)")]
    NoTaskSpecified,

    /// Tokens that no task in the run recognised.
    #[error("unknown option{}: {}", plural(options), quote_list(options))]
    UnknownOptions { options: Vec<String> },

    /// Required options that no argument supplied, grouped by formatted
    /// option name with every task that requires it.
    #[error("missing option{}: {}", plural(groups), format_missing(groups))]
    MissingOptions { groups: Vec<(String, Vec<String>)> },

    /// A value-style option appeared with no value to consume.
    #[error("task \"{task}\": missing required value for option \"{option}\"")]
    MissingOptionValue { task: String, option: String },

    /// A supplied value could not be converted to the parameter's type.
    #[error("task \"{task}\": option \"{option}\": {message}")]
    InvalidOptionValue {
        task: String,
        option: String,
        message: String,
    },

    /// The user asked for help; the payload is the rendered text.
    #[error("help requested")]
    HelpRequested(String),

    /// A task body returned an error; the rest of the run is abandoned.
    #[error("task \"{task}\" failed")]
    TaskFailed {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    /// A process run through [`crate::exec::Cmd`] exited non-zero.
    #[error("command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    /// A process run through [`crate::exec::Cmd`] outlived its timeout.
    #[error("command '{command}' timed out after {timeout:?}")]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;

fn plural<T>(items: &[T]) -> &'static str {
    if items.len() == 1 { "" } else { "s" }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_missing(groups: &[(String, Vec<String>)]) -> String {
    groups
        .iter()
        .map(|(option, tasks)| format!("\"{option}\" (required by {})", quote_list(tasks)))
        .collect::<Vec<_>>()
        .join(", ")
}
