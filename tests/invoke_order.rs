use std::error::Error;

use anyhow::anyhow;
use taskdag::{TaskError, TaskSet};

mod common;
use common::{record, recorder};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn invokes_tasks_in_requested_order() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("Task1").run(record(&log, "Task1"));
    set.create("Task2").run(record(&log, "Task2"));

    set.invoke_advanced(["Task1", "Task2"])?;

    assert_eq!(*log.borrow(), ["Task1", "Task2"]);
    Ok(())
}

#[test]
fn does_not_invoke_same_task_twice() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("Task1").run(record(&log, "Task1"));

    set.invoke_advanced(["Task1", "Task1"])?;

    assert_eq!(*log.borrow(), ["Task1"]);
    Ok(())
}

#[test]
fn invokes_dependency_before_dependent() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("Task1").run(record(&log, "Task1"));
    set.create("Task2")
        .depends_on(["Task1"])
        .run(record(&log, "Task2"));

    set.invoke_advanced(["Task2"])?;

    assert_eq!(*log.borrow(), ["Task1", "Task2"]);
    Ok(())
}

#[test]
fn runs_shared_dependency_once_in_a_diamond() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("base").run(record(&log, "base"));
    set.create("left")
        .depends_on(["base"])
        .run(record(&log, "left"));
    set.create("right")
        .depends_on(["base"])
        .run(record(&log, "right"));
    set.create("top")
        .depends_on(["left", "right"])
        .run(record(&log, "top"));

    set.invoke_advanced(["top"])?;

    assert_eq!(*log.borrow(), ["base", "left", "right", "top"]);
    Ok(())
}

#[test]
fn requesting_a_dependency_explicitly_does_not_rerun_it() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("Task1").run(record(&log, "Task1"));
    set.create("Task2")
        .depends_on(["Task1"])
        .run(record(&log, "Task2"));
    set.create("Task3")
        .depends_on(["Task1", "Task2"])
        .run(record(&log, "Task3"));

    set.invoke_advanced(["Task3", "Task1"])?;

    assert_eq!(*log.borrow(), ["Task1", "Task2", "Task3"]);
    Ok(())
}

#[test]
fn failing_task_halts_the_rest_of_the_run() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("broken")
        .run_with(Vec::new(), |_| Err(anyhow!("boom")));
    set.create("after")
        .depends_on(["broken"])
        .run(record(&log, "after"));

    let err = set.invoke_advanced(["after"]).unwrap_err();

    match err {
        TaskError::TaskFailed { task, .. } => assert_eq!(task, "broken"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(log.borrow().is_empty());
    Ok(())
}
