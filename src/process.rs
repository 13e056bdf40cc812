//! Blocking subprocess execution.
//!
//! Every external invocation (the stub tool and each language checker) goes
//! through [`run_process`], which captures output, feeds optional standard
//! input, and kills the child once its timeout elapses.

use crate::error::{Result, StubcheckError};
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of one finished (or killed) process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code of the process (None if killed or terminated by a signal).
    pub exit_code: Option<i32>,
    /// Raw standard output, exactly as the child wrote it.
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded; only used for diagnostics.
    pub stderr: String,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
    pub duration: Duration,
}

impl ProcessOutput {
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Standard output decoded for display.
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// One-line explanation of why the process did not succeed.
    pub fn status_line(&self) -> String {
        if self.timed_out {
            format!("timed out after {:.1}s", self.duration.as_secs_f64())
        } else {
            match self.exit_code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            }
        }
    }
}

/// Split a configured command line into argv without invoking a shell.
pub fn parse_command(command: &str, what: &str) -> Result<Vec<String>> {
    let args = shell_words::split(command).map_err(|e| {
        StubcheckError::UserError(format!(
            "failed to parse {} '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences.",
            what, command, e
        ))
    })?;

    if args.is_empty() {
        return Err(StubcheckError::UserError(format!(
            "{} is empty after parsing: '{}'",
            what, command
        )));
    }

    Ok(args)
}

/// Run `argv` to completion or until `timeout` elapses.
///
/// Stdout and stderr are captured through anonymous temp files so a child
/// producing lots of output never stalls on a full pipe. Standard input is
/// written from a helper thread for the same reason. On Unix the child leads
/// its own process group and the whole group is killed on timeout, so
/// grandchildren (`cc1` under `gcc`, the body of `sh -c`) cannot outlive the
/// deadline. Returns an error only when the process cannot be started at all.
pub fn run_process(
    argv: &[String],
    stdin: Option<&[u8]>,
    current_dir: Option<&Path>,
    timeout: Duration,
) -> Result<ProcessOutput> {
    let Some((program, args)) = argv.split_first() else {
        return Err(StubcheckError::UserError("command is empty".to_string()));
    };

    let stdout_file = capture_file()?;
    let stderr_file = capture_file()?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdout(Stdio::from(clone_handle(&stdout_file)?))
        .stderr(Stdio::from(clone_handle(&stderr_file)?))
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
    if let Some(dir) = current_dir {
        command.current_dir(dir);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let start_time = Instant::now();
    let mut child = command.spawn().map_err(|e| {
        StubcheckError::UserError(format!(
            "failed to execute '{}': {}\n\
             Fix: ensure the command is installed and in PATH.",
            program, e
        ))
    })?;

    let writer = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => {
            let input = input.to_vec();
            Some(std::thread::spawn(move || {
                // A checker may exit before reading all of its input.
                if let Err(e) = pipe.write_all(&input) {
                    tracing::debug!(error = %e, "stdin write to child ended early");
                }
            }))
        }
        _ => None,
    };

    let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout)?;
    let duration = start_time.elapsed();

    if let Some(handle) = writer {
        if !handle.is_finished() {
            // Leftover group members still hold the stdin pipe open.
            kill_process_group(&child);
        }
        if timed_out {
            // The writer ends with EPIPE once the group is gone; never wait on it
            // past the deadline.
            drop(handle);
        } else {
            let _ = handle.join();
        }
    }

    Ok(ProcessOutput {
        exit_code,
        stdout: read_capture(stdout_file)?,
        stderr: String::from_utf8_lossy(&read_capture(stderr_file)?).into_owned(),
        timed_out,
        duration,
    })
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok((None, true));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                kill_process(child);
                return Err(StubcheckError::UserError(format!(
                    "failed to check process status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and its group, then wait for it to terminate.
fn kill_process(child: &mut Child) {
    kill_process_group(child);
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

/// SIGKILL every process in the group led by `child`.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: kill(2) takes plain integers and has no memory preconditions.
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::trace!(pgid, "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

fn capture_file() -> Result<File> {
    tempfile::tempfile().map_err(|e| {
        StubcheckError::UserError(format!("failed to create output capture file: {}", e))
    })
}

fn clone_handle(file: &File) -> Result<File> {
    file.try_clone().map_err(|e| {
        StubcheckError::UserError(format!("failed to duplicate capture file handle: {}", e))
    })
}

fn read_capture(mut file: File) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut bytes))
        .map_err(|e| {
            StubcheckError::UserError(format!("failed to read captured output: {}", e))
        })?;
    Ok(bytes)
}
