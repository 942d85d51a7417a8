use std::collections::HashSet;

use proptest::prelude::*;
use taskdag::TaskSet;

mod common;
use common::{record, recorder};

/// Random DAG shape: `deps[i]` holds candidate dependency indices for task
/// `i`, sanitised to `< i` so the graph is acyclic by construction, plus a
/// root-selection mask.
fn dag_strategy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<bool>)> {
    (1..12usize).prop_flat_map(|n| {
        (
            proptest::collection::vec(proptest::collection::vec(0..n, 0..4), n),
            proptest::collection::vec(any::<bool>(), n),
        )
    })
}

fn dep_indices(i: usize, candidates: &[usize]) -> Vec<usize> {
    if i == 0 {
        return Vec::new();
    }
    let mut deps: Vec<usize> = candidates.iter().map(|&c| c % i).collect();
    deps.sort_unstable();
    deps.dedup();
    deps
}

proptest! {
    #[test]
    fn resolution_runs_the_closure_once_with_dependencies_first(
        (raw_deps, root_mask) in dag_strategy(),
    ) {
        let n = raw_deps.len();
        let deps: Vec<Vec<usize>> = raw_deps
            .iter()
            .enumerate()
            .map(|(i, candidates)| dep_indices(i, candidates))
            .collect();

        let mut roots: Vec<usize> = (0..n).filter(|&i| root_mask[i]).collect();
        if roots.is_empty() {
            roots.push(n - 1);
        }

        let log = recorder();
        let mut set = TaskSet::new();
        for i in 0..n {
            let name = format!("task_{i}");
            let dep_names: Vec<String> = deps[i].iter().map(|d| format!("task_{d}")).collect();
            set.create(&name)
                .depends_on(dep_names)
                .run(record(&log, &name));
        }

        let root_names: Vec<String> = roots.iter().map(|r| format!("task_{r}")).collect();
        set.invoke_advanced(root_names).expect("acyclic set should resolve and run");

        // Expected closure: roots plus transitive dependencies.
        let mut closure = HashSet::new();
        let mut stack = roots.clone();
        while let Some(i) = stack.pop() {
            if closure.insert(i) {
                stack.extend(&deps[i]);
            }
        }

        let executed = log.borrow();
        let executed_set: HashSet<usize> = executed
            .iter()
            .map(|name| {
                name.trim_start_matches("task_")
                    .parse::<usize>()
                    .expect("task name suffix is an index")
            })
            .collect();

        // Exactly the closure, each task once.
        prop_assert_eq!(executed.len(), closure.len());
        prop_assert_eq!(&executed_set, &closure);

        // Every dependency runs before its dependent.
        let position = |i: usize| {
            executed
                .iter()
                .position(|name| name == &format!("task_{i}"))
        };
        for &i in &closure {
            let at = position(i).expect("task in closure was executed");
            for &d in &deps[i] {
                let dep_at = position(d).expect("dependency in closure was executed");
                prop_assert!(dep_at < at, "task_{} ran at {} but its dependency task_{} ran at {}", i, at, d, dep_at);
            }
        }
    }
}
