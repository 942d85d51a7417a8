// src/set.rs

//! The task set facade: registration plus the two run entry points.
//!
//! `invoke_advanced` is the fallible core; `invoke` is the thin
//! catch-and-print wrapper a build script's `main` delegates to.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::process::ExitCode;

use tracing::{debug, info};

use crate::dag::{self, Arena, TaskInvocation};
use crate::errors::{Result, TaskError};
use crate::opts::{OptDef, OptionSet, format_option, option_body};
use crate::task::Task;

/// Tags for the shared options evaluated when no task name is requested.
const SHARED_HELP: usize = 0;
const SHARED_LIST: usize = 1;

/// An ordered registry of tasks with one shared command line.
#[derive(Debug, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task and return its handle for chaining `describe`,
    /// `depends_on`, and `run` / `run_with` calls.
    ///
    /// Names are not checked here; a duplicate surfaces when a run entry
    /// point is called.
    pub fn create(&mut self, name: impl Into<String>) -> &mut Task {
        let idx = self.tasks.len();
        self.tasks.push(Task::new(name.into()));
        &mut self.tasks[idx]
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run the tasks selected by `args`, propagating every failure in the
    /// taxonomy (including the help-requested signal).
    ///
    /// Leading non-option tokens are requested task names; the rest of
    /// the argument list is bound against the options of every task in
    /// the resolved run, validated as a whole, and the run list is then
    /// invoked in dependency order, each task exactly once.
    pub fn invoke_advanced<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut arena = Arena::build(&self.tasks)?;

        // Leading non-option tokens are requested task names.
        let mut roots = Vec::new();
        let mut split = 0;
        for token in &args {
            if option_body(token).is_some() {
                break;
            }
            let Some(&idx) = arena.index.get(token.as_str()) else {
                return Err(TaskError::TaskNotFound(token.clone()));
            };
            roots.push(idx);
            split += 1;
        }
        let rest = &args[split..];

        if roots.is_empty() {
            self.check_shared_options(&arena, rest)?;
            match arena.index.get("default") {
                Some(&idx) => roots.push(idx),
                None => return Err(TaskError::NoTaskSpecified),
            }
        }

        debug!(roots = ?roots.iter().map(|&i| arena.nodes[i].name()).collect::<Vec<_>>(),
               "requested tasks");
        let order = dag::resolve(&arena.nodes, &roots)?;

        // Every task takes its own pass over the shared argument list.
        let mut residuals: Vec<HashSet<String>> = Vec::with_capacity(order.len());
        for &idx in &order {
            let node = &mut arena.nodes[idx];
            let outcome = node.bind_args(rest)?;
            if outcome.help {
                let node = &arena.nodes[idx];
                return Err(TaskError::HelpRequested(render_task_help(node)));
            }
            residuals.push(outcome.residual.into_iter().collect());
        }

        // Only tokens unmatched by every task are genuinely unknown.
        let mut seen = HashSet::new();
        let unknown: Vec<String> = rest
            .iter()
            .filter(|t| residuals.iter().all(|r| r.contains(*t)))
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(TaskError::UnknownOptions { options: unknown });
        }

        // Required parameters never supplied, grouped per formatted option
        // name across the whole run.
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for &idx in &order {
            let node = &arena.nodes[idx];
            for param in node.missing_params() {
                let option = format_option(param.name());
                match groups.iter_mut().find(|(name, _)| *name == option) {
                    Some((_, tasks)) => tasks.push(node.name().to_string()),
                    None => groups.push((option, vec![node.name().to_string()])),
                }
            }
        }
        if !groups.is_empty() {
            return Err(TaskError::MissingOptions { groups });
        }

        for &idx in &order {
            let node = &arena.nodes[idx];
            info!(task = %node.name(), "running task");
            node.invoke().map_err(|source| TaskError::TaskFailed {
                task: node.name().to_string(),
                source,
            })?;
        }

        Ok(())
    }

    /// Convenience entry point: never lets a failure escape.
    ///
    /// Help and list-tasks output goes to stdout and counts as success;
    /// every other failure is printed to stderr with its cause chain and
    /// becomes a failing exit status.
    pub fn invoke<I, S>(&self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.invoke_advanced(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(TaskError::HelpRequested(message)) => {
                println!("{message}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                let mut source = std::error::Error::source(&err);
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }
                ExitCode::FAILURE
            }
        }
    }

    /// With no task names requested, `-h`/`--help` and `-T`/`--list-tasks`
    /// take priority over the `default` task; either renders its output
    /// and aborts the run through the help-requested signal.
    fn check_shared_options(&self, arena: &Arena<'_>, rest: &[String]) -> Result<()> {
        let shared = shared_options();
        // Presence-only tables cannot fail to parse.
        let Ok(outcome) = shared.parse(rest) else {
            return Ok(());
        };
        for matched in outcome.matches {
            match matched.tag {
                SHARED_HELP => return Err(TaskError::HelpRequested(render_help(arena, &shared))),
                SHARED_LIST => return Err(TaskError::HelpRequested(render_task_list(arena))),
                _ => {}
            }
        }
        Ok(())
    }
}

fn shared_options() -> OptionSet {
    let mut set = OptionSet::new();
    set.add(OptDef::presence(SHARED_HELP, &["h", "help"]).describe("Show help"));
    set.add(OptDef::presence(SHARED_LIST, &["T", "list-tasks"]).describe("List tasks"));
    set
}

fn sorted_nodes<'s, 'a>(arena: &'s Arena<'a>) -> Vec<&'s TaskInvocation<'a>> {
    let mut nodes: Vec<_> = arena.nodes.iter().collect();
    nodes.sort_by_key(|n| n.name());
    nodes
}

/// Full help: usage, the shared options, and every task with its option
/// descriptions, sorted by task name.
fn render_help(arena: &Arena<'_>, shared: &OptionSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Usage: <task>... [options]");
    let _ = writeln!(out);
    let _ = writeln!(out, "Common options:");
    out.push_str(&shared.render_descriptions());
    let _ = writeln!(out);
    let _ = writeln!(out, "Commands:");
    for node in sorted_nodes(arena) {
        let _ = writeln!(
            out,
            "  {:<26} {}",
            node.name(),
            node.task.description().unwrap_or("")
        );
        let options = node.option_set().render_descriptions();
        if !options.is_empty() {
            out.push_str(&options);
        }
        let _ = writeln!(out);
    }
    out
}

/// One line per task, no option detail.
fn render_task_list(arena: &Arena<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Commands:");
    for node in sorted_nodes(arena) {
        let _ = writeln!(
            out,
            "  {:<26} {}",
            node.name(),
            node.task.description().unwrap_or("")
        );
    }
    out
}

/// Task-scoped help: just this task's line and options.
fn render_task_help(node: &TaskInvocation<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<26} {}",
        node.name(),
        node.task.description().unwrap_or("")
    );
    out.push_str(&node.option_set().render_descriptions());
    out
}
