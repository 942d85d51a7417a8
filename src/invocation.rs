// src/invocation.rs

//! The late-bound body attached to a task: an erased callable plus the
//! ordered parameter list describing the positional arguments it reads.

use crate::param::{Args, Param, Value};

pub(crate) type TaskFn = Box<dyn Fn(&Args) -> anyhow::Result<()>>;

/// A task body with explicit arity. Parameter descriptors line up
/// positionally with the slots the callable reads through [`Args`].
pub struct Invocation {
    params: Vec<Param>,
    call: TaskFn,
}

impl Invocation {
    pub(crate) fn new(params: Vec<Param>, call: TaskFn) -> Self {
        Self { params, call }
    }

    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    /// Dispatch to the callable with a fully bound argument array.
    pub(crate) fn invoke(&self, values: &[Value]) -> anyhow::Result<()> {
        (self.call)(&Args::new(values))
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
