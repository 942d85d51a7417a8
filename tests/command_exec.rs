#![cfg(unix)]

use std::error::Error;
use std::time::Duration;

use taskdag::{Cmd, TaskError};

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> Cmd {
    Cmd::new("sh").arg("-c").arg(script).quiet()
}

#[tokio::test]
async fn captures_stdout_lines() -> TestResult {
    let out = sh("echo one; echo two").run().await?;
    assert_eq!(out.code, 0);
    assert_eq!(out.stdout, ["one", "two"]);
    assert!(out.stderr.is_empty());
    Ok(())
}

#[tokio::test]
async fn captures_stderr_lines() -> TestResult {
    let out = sh("echo oops >&2").run().await?;
    assert_eq!(out.stderr, ["oops"]);
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_is_an_error_by_default() -> TestResult {
    let err = sh("exit 3").run().await.unwrap_err();
    match err {
        TaskError::CommandFailed { command, code } => {
            assert_eq!(command, "sh");
            assert_eq!(code, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_is_reported_when_unchecked() -> TestResult {
    let out = sh("exit 3").check(false).run().await?;
    assert_eq!(out.code, 3);
    Ok(())
}

#[tokio::test]
async fn timeout_kills_the_process() -> TestResult {
    let err = sh("sleep 5")
        .timeout(Duration::from_millis(200))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::CommandTimedOut { .. }));
    Ok(())
}

#[tokio::test]
async fn runs_in_the_given_working_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    sh("echo hi > marker.txt")
        .current_dir(dir.path())
        .run()
        .await?;
    assert!(dir.path().join("marker.txt").exists());
    Ok(())
}
