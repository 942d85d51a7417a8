// src/dag/node.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{Result, TaskError};
use crate::invocation::Invocation;
use crate::opts::{OptDef, OptParseError, OptionSet, RawValue, format_option};
use crate::param::{Param, Value, ValueKind};
use crate::task::Task;

/// Tag for the hidden per-task help option; parameter tags are indices so
/// this sentinel can never collide with one.
pub(crate) const HELP_TAG: usize = usize::MAX;

/// Run-scoped node wrapping one task: prerequisite back-pointers into the
/// arena, the mutable argument-value array pre-seeded with defaults, and
/// the parallel supplied-bitset. Built fresh for every run entry-point
/// call and discarded when it returns.
#[derive(Debug)]
pub(crate) struct TaskInvocation<'a> {
    pub task: &'a Task,
    invocation: &'a Invocation,
    pub prereqs: Vec<usize>,
    values: Vec<Value>,
    supplied: Vec<bool>,
}

/// What one task's parsing pass over the shared argument list produced.
#[derive(Debug)]
pub(crate) struct BindOutcome {
    /// Tokens this task's option table did not claim.
    pub residual: Vec<String>,
    /// The hidden task-scoped help option was hit.
    pub help: bool,
}

impl<'a> TaskInvocation<'a> {
    fn new(task: &'a Task, invocation: &'a Invocation) -> Self {
        let params = invocation.params();
        Self {
            task,
            invocation,
            prereqs: Vec::new(),
            values: params.iter().map(Param::seed).collect(),
            supplied: params.iter().map(Param::is_optional).collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// The option table generated from this task's parameter descriptors,
    /// plus the hidden help option. Boolean parameters register as
    /// presence-style options, everything else as value-style.
    pub fn option_set(&self) -> OptionSet {
        let mut set = OptionSet::new();
        set.add(
            OptDef::presence(HELP_TAG, &["help", "h"])
                .describe("Show help")
                .hidden(),
        );
        for (i, param) in self.invocation.params().iter().enumerate() {
            let def = match param.kind() {
                ValueKind::Bool => OptDef::presence(i, &[param.name()]),
                _ => OptDef::value(i, &[param.name()]),
            };
            let def = match param.description() {
                Some(d) => def.describe(d),
                None => def,
            };
            set.add(def);
        }
        set
    }

    /// Parse the shared argument list against this task's option table and
    /// apply every match to the argument slots.
    pub fn bind_args(&mut self, args: &[String]) -> Result<BindOutcome> {
        let outcome = self.option_set().parse(args).map_err(|err| match err {
            OptParseError::MissingValue { option } => TaskError::MissingOptionValue {
                task: self.task.name().to_string(),
                option,
            },
        })?;

        let mut help = false;
        for matched in outcome.matches {
            if matched.tag == HELP_TAG {
                help = true;
                continue;
            }
            let param = &self.invocation.params()[matched.tag];
            let value = match matched.value {
                RawValue::Flag(on) => Value::Bool(on),
                RawValue::Text(raw) => param.kind().convert(&raw).map_err(|message| {
                    TaskError::InvalidOptionValue {
                        task: self.task.name().to_string(),
                        option: format_option(param.name()),
                        message,
                    }
                })?,
            };
            self.values[matched.tag] = value;
            self.supplied[matched.tag] = true;
        }

        debug!(task = %self.task.name(), residual = ?outcome.residual, "parsed options");
        Ok(BindOutcome {
            residual: outcome.residual,
            help,
        })
    }

    /// Parameters with no supplied value and no usable default.
    pub fn missing_params(&self) -> impl Iterator<Item = &Param> {
        self.invocation
            .params()
            .iter()
            .zip(&self.supplied)
            .filter(|(_, supplied)| !**supplied)
            .map(|(param, _)| param)
    }

    /// Dispatch to the task body with the bound argument array.
    pub fn invoke(&self) -> anyhow::Result<()> {
        self.invocation.invoke(&self.values)
    }
}

/// The per-run node table: one [`TaskInvocation`] per registered task,
/// with a name index for root lookup and prerequisite edges resolved to
/// arena indices.
#[derive(Debug)]
pub(crate) struct Arena<'a> {
    pub nodes: Vec<TaskInvocation<'a>>,
    pub index: HashMap<&'a str, usize>,
}

impl<'a> Arena<'a> {
    /// Materialise the node table.
    ///
    /// Fails if two tasks share a name, a task has no invocation, or a
    /// dependency names no registered task.
    pub fn build(tasks: &'a [Task]) -> Result<Self> {
        let mut nodes = Vec::with_capacity(tasks.len());
        let mut index = HashMap::with_capacity(tasks.len());

        for (i, task) in tasks.iter().enumerate() {
            let Some(invocation) = task.invocation() else {
                return Err(TaskError::MissingInvocation(task.name().to_string()));
            };
            if index.insert(task.name(), i).is_some() {
                return Err(TaskError::DuplicateTaskName(task.name().to_string()));
            }
            nodes.push(TaskInvocation::new(task, invocation));
        }

        for (i, task) in tasks.iter().enumerate() {
            let prereqs = task
                .dependencies()
                .iter()
                .map(|dep| {
                    index.get(dep.as_str()).copied().ok_or_else(|| {
                        TaskError::DependencyNotFound {
                            task: task.name().to_string(),
                            dependency: dep.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            nodes[i].prereqs = prereqs;
        }

        Ok(Self { nodes, index })
    }
}
