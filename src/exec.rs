//! External command execution with deadlines
//!
//! Admin commands (`useradd`, `systemctl`, ...) are expected to answer
//! quickly; the release build is not. Both go through the same poll loop
//! so a wedged command can never hang the tool. Build output is routed
//! to a log file instead of a pipe, which keeps the single-threaded wait
//! loop safe from pipe back-pressure.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use console::Style;

use crate::error::{Result, SetupError};

/// Deadline for short administrative commands.
pub const ADMIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for the release build.
pub const BUILD_TIMEOUT: Duration = Duration::from_secs(600);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How many trailing log lines a failed build surfaces.
const LOG_TAIL_LINES: usize = 30;

/// Runs external commands synchronously, echoing them when verbose.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    pub verbose: bool,
}

impl Runner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run with captured output, returning it whatever the exit status.
    /// Errors only when the command cannot be started, dies to a signal
    /// race, or exceeds the deadline.
    pub fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<Output> {
        self.echo(program, args);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let child = cmd.spawn().map_err(|e| spawn_failed(program, &e))?;
        let child = wait_with_deadline(child, program, timeout)?;
        child.wait_with_output().map_err(|e| SetupError::IoError {
            message: format!("failed to collect output of {program}: {e}"),
        })
    }

    /// Run to completion with captured output; non-zero exit is an error
    /// carrying trimmed stderr.
    pub fn run_checked(&self, program: &str, args: &[&str], timeout: Duration) -> Result<Output> {
        let output = self.run(program, args, None, timeout)?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(command_failed(program, &output))
        }
    }

    /// Run with stdout and stderr appended to a log file, surfacing the
    /// log tail on failure. Suits commands whose output can outgrow a
    /// pipe buffer while nobody is reading it.
    pub fn run_logged(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<()> {
        self.echo(program, args);
        let log = tempfile::NamedTempFile::new()?;
        // Append mode so the two streams interleave instead of clobbering
        let out = OpenOptions::new().append(true).open(log.path())?;
        let err = OpenOptions::new().append(true).open(log.path())?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(out))
            .stderr(Stdio::from(err));
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let child = cmd.spawn().map_err(|e| spawn_failed(program, &e))?;
        let mut child = wait_with_deadline(child, program, timeout)?;
        let status = child.wait().map_err(|e| SetupError::IoError {
            message: format!("failed to collect status of {program}: {e}"),
        })?;

        if status.success() {
            return Ok(());
        }

        let text = std::fs::read_to_string(log.path()).unwrap_or_default();
        Err(SetupError::CommandFailed {
            program: program.to_string(),
            status: status.to_string(),
            stderr: tail(&text, LOG_TAIL_LINES),
        })
    }

    fn echo(&self, program: &str, args: &[&str]) {
        if self.verbose {
            let line = format!("+ {} {}", program, args.join(" "));
            println!("{}", Style::new().dim().apply_to(line.trim_end()));
        }
    }
}

/// Trimmed stdout of a captured command.
pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Trimmed stderr of a captured command.
pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn command_failed(program: &str, output: &Output) -> SetupError {
    let stderr = stderr_text(output);
    let stderr = if stderr.is_empty() {
        stdout_text(output)
    } else {
        stderr
    };
    SetupError::CommandFailed {
        program: program.to_string(),
        status: output.status.to_string(),
        stderr,
    }
}

fn spawn_failed(program: &str, err: &std::io::Error) -> SetupError {
    SetupError::CommandFailed {
        program: program.to_string(),
        status: "failed to start".to_string(),
        stderr: err.to_string(),
    }
}

/// Poll the child until it exits or the deadline passes; a child past
/// its deadline is killed before the error is returned.
fn wait_with_deadline(mut child: Child, program: &str, timeout: Duration) -> Result<Child> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return Ok(child),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SetupError::CommandTimeout {
                        program: program.to_string(),
                        limit_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(SetupError::IoError {
                    message: format!("failed waiting for {program}: {e}"),
                });
            }
        }
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n").trim().to_string()
}
