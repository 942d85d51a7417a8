// src/dag/resolver.rs

//! Depth-first topological resolution of the requested roots.
//!
//! Each root is walked depth-first with a three-state mark per node.
//! Finished nodes are appended after all their prerequisites, so the
//! output runs dependencies strictly before dependents, each node exactly
//! once, with independent roots kept in DFS discovery order. Revisiting a
//! node that is still on the stack is a cycle; the error unwinds through
//! the ancestor frames, each prepending its own name, so the reported
//! path is the complete walk back to the re-visited node (for edges
//! A→B→C→B the path reads `A, B, C, B`).

use tracing::debug;

use crate::dag::node::TaskInvocation;
use crate::errors::{Result, TaskError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Resolve `roots` into the ordered run list: indices of the roots plus
/// all transitive prerequisites, dependencies first.
pub(crate) fn resolve(nodes: &[TaskInvocation<'_>], roots: &[usize]) -> Result<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut order = Vec::new();

    for &root in roots {
        visit(nodes, &mut marks, &mut order, root)?;
    }

    debug!(
        order = ?order.iter().map(|&i| nodes[i].name()).collect::<Vec<_>>(),
        "resolved run order"
    );
    Ok(order)
}

fn visit(
    nodes: &[TaskInvocation<'_>],
    marks: &mut [Mark],
    order: &mut Vec<usize>,
    idx: usize,
) -> Result<()> {
    match marks[idx] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            return Err(TaskError::CircularDependency {
                path: vec![nodes[idx].name().to_string()],
            });
        }
        Mark::Unvisited => {}
    }

    marks[idx] = Mark::InProgress;

    for &prereq in &nodes[idx].prereqs {
        if let Err(err) = visit(nodes, marks, order, prereq) {
            return Err(match err {
                TaskError::CircularDependency { mut path } => {
                    path.insert(0, nodes[idx].name().to_string());
                    TaskError::CircularDependency { path }
                }
                other => other,
            });
        }
    }

    marks[idx] = Mark::Done;
    order.push(idx);
    Ok(())
}
