// src/exec/command.rs

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::{Result, TaskError};

/// Builder for running one external process.
///
/// By default the command line is echoed, output is forwarded to the
/// terminal as it arrives, and a non-zero exit code is an error.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
    check: bool,
    echo: bool,
}

/// What a finished process produced.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Exit code, `-1` if the process was terminated by a signal.
    pub code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
            check: true,
            echo: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Working directory to start the process in.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Kill the process and fail with [`TaskError::CommandTimedOut`] if it
    /// runs longer than this.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a non-zero exit code is an error (default `true`). With
    /// `false`, the exit code is reported in [`CmdOutput::code`] instead.
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Don't echo the command line or forward process output to the
    /// terminal; output is still captured in [`CmdOutput`].
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Run the process to completion.
    pub async fn run(&self) -> Result<CmdOutput> {
        if self.echo {
            println!("{} {}", self.program, self.args.join(" "));
        }
        info!(command = %self.program, args = ?self.args, "starting process");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;

        let stdout_lines = read_lines(child.stdout.take(), self.echo, false);
        let stderr_lines = read_lines(child.stderr.take(), self.echo, true);

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(TaskError::CommandTimedOut {
                        command: self.program.clone(),
                        timeout: limit,
                    });
                }
            },
            None => child.wait().await?,
        };

        let stdout = stdout_lines.await.unwrap_or_default();
        let stderr = stderr_lines.await.unwrap_or_default();

        let code = status.code().unwrap_or(-1);
        info!(command = %self.program, exit_code = code, "process exited");

        if self.check && code != 0 {
            return Err(TaskError::CommandFailed {
                command: self.program.clone(),
                code,
            });
        }

        Ok(CmdOutput {
            code,
            stdout,
            stderr,
        })
    }
}

/// Consume one output stream line-by-line so the child's pipe buffers
/// never fill, forwarding to the terminal when `echo` is set.
fn read_lines<R>(stream: Option<R>, echo: bool, is_stderr: bool) -> JoinHandle<Vec<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut collected = Vec::new();
        let Some(stream) = stream else {
            return collected;
        };
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(stderr = is_stderr, "process output: {}", line);
            if echo {
                if is_stderr {
                    eprintln!("{line}");
                } else {
                    println!("{line}");
                }
            }
            collected.push(line);
        }
        collected
    })
}
