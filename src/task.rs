// src/task.rs

//! Task definitions: name, description, dependency edges, and the bound
//! invocation. Tasks are built through chained calls on the `&mut Task`
//! handle returned by `TaskSet::create`; nothing is validated until a run
//! entry point is called.

use crate::invocation::Invocation;
use crate::param::{Args, Param};

/// A named, independently invokable unit of work with declared
/// dependencies.
#[derive(Debug)]
pub struct Task {
    name: String,
    description: Option<String>,
    dependencies: Vec<String>,
    invocation: Option<Invocation>,
}

impl Task {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            description: None,
            dependencies: Vec::new(),
            invocation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn invocation(&self) -> Option<&Invocation> {
        self.invocation.as_ref()
    }

    /// Set the description shown by help and list-tasks output.
    pub fn describe(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Declare that the named tasks must run before this one.
    ///
    /// Names are resolved when a run entry point is called; an unknown
    /// name surfaces there as a dependency-not-found error.
    pub fn depends_on<I, S>(&mut self, dependencies: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    /// Bind a parameterless, infallible body.
    pub fn run(&mut self, body: impl Fn() + 'static) -> &mut Self {
        self.invocation = Some(Invocation::new(
            Vec::new(),
            Box::new(move |_| {
                body();
                Ok(())
            }),
        ));
        self
    }

    /// Bind a fallible body together with its ordered parameter list.
    ///
    /// Each [`Param`] becomes one command-line option; the body reads the
    /// bound values positionally through [`Args`].
    pub fn run_with(
        &mut self,
        params: Vec<Param>,
        body: impl Fn(&Args) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.invocation = Some(Invocation::new(params, Box::new(body)));
        self
    }
}
