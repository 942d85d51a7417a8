use std::error::Error;

use taskdag::{Param, TaskError, TaskSet};

mod common;
use common::{record, recorder};

type TestResult = Result<(), Box<dyn Error>>;

fn sample_set() -> TaskSet {
    let mut set = TaskSet::new();
    set.create("Task1")
        .describe("This is the first task")
        .run_with(
            vec![
                Param::int("bar"),
                Param::str("foo").nullable().describe("Description"),
            ],
            |_| Ok(()),
        );
    set.create("Task2")
        .describe("This is the second task")
        .run(|| {});
    set
}

fn help_message(set: &TaskSet, args: &[&str]) -> String {
    match set.invoke_advanced(args.to_vec()).unwrap_err() {
        TaskError::HelpRequested(message) => message,
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn global_help_lists_every_task_with_options() -> TestResult {
    let set = sample_set();
    let message = help_message(&set, &["--help"]);

    assert!(message.contains("Common options:"));
    assert!(message.contains("--list-tasks"));
    assert!(message.contains("Task1"));
    assert!(message.contains("This is the first task"));
    assert!(message.contains("Task2"));
    assert!(message.contains("--bar=VALUE"));
    assert!(message.contains("--foo=VALUE"));
    assert!(message.contains("Description"));
    Ok(())
}

#[test]
fn short_help_flag_is_equivalent() -> TestResult {
    let set = sample_set();
    assert_eq!(help_message(&set, &["-h"]), help_message(&set, &["--help"]));
    Ok(())
}

#[test]
fn list_tasks_has_one_line_per_task_without_option_detail() -> TestResult {
    let set = sample_set();
    let message = help_message(&set, &["--list-tasks"]);

    assert!(message.contains("Task1"));
    assert!(message.contains("This is the first task"));
    assert!(message.contains("Task2"));
    assert!(!message.contains("--bar"));
    assert_eq!(message, help_message(&set, &["-T"]));
    Ok(())
}

#[test]
fn task_scoped_help_shows_only_that_task() -> TestResult {
    let set = sample_set();
    let message = help_message(&set, &["Task1", "--help"]);

    assert!(message.contains("Task1"));
    assert!(message.contains("--bar=VALUE"));
    assert!(!message.contains("Task2"));
    Ok(())
}

#[test]
fn task_scoped_help_does_not_run_the_task() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("Task1").run(record(&log, "Task1"));

    let _ = help_message(&set, &["Task1", "--help"]);

    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn global_help_wins_over_the_default_task() -> TestResult {
    let log = recorder();
    let mut set = TaskSet::new();
    set.create("default").run(record(&log, "default"));

    let message = help_message(&set, &["--help"]);

    assert!(message.contains("default"));
    assert!(log.borrow().is_empty());
    Ok(())
}
