// src/dag/mod.rs

//! Dependency resolution over run-scoped task nodes.
//!
//! - [`node`] materialises one [`node::TaskInvocation`] per registered task
//!   into an arena indexed by name, and binds parsed options into each
//!   node's argument slots.
//! - [`resolver`] computes the ordered closure of the requested roots with
//!   depth-first topological sorting and full-path cycle reporting.

pub(crate) mod node;
pub(crate) mod resolver;

pub(crate) use node::{Arena, TaskInvocation};
pub(crate) use resolver::resolve;
