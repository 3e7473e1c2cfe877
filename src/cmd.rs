use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::command::Invocation;
use crate::error::{PublishError, PublishResult};

/// Run a command and capture its output. Fails if the command
/// returns a non-zero exit code, carrying its stderr.
pub fn run(invocation: &Invocation) -> PublishResult<String> {
    capture(invocation, &mut command(invocation))
}

/// Run a command that pipes its stdin from a byte slice.
pub fn run_with_stdin(invocation: &Invocation, stdin_data: &[u8]) -> PublishResult<String> {
    capture_with_stdin(invocation, &mut command(invocation), stdin_data)
}

/// Run a command with stdin and stdout inherited so its progress
/// reaches the operator. Stderr is copied to the terminal as it
/// arrives and kept for the error on failure.
pub fn run_streaming(invocation: &Invocation, cwd: Option<&Path>) -> PublishResult<()> {
    let mut cmd = command(invocation);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    stream(invocation, &mut cmd)
}

fn command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(invocation.tool.binary());
    cmd.args(&invocation.args);
    cmd
}

fn capture(invocation: &Invocation, cmd: &mut Command) -> PublishResult<String> {
    debug!("Executing: {invocation}");

    let output = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(invocation, e))?;

    finish(invocation, &output)
}

fn capture_with_stdin(
    invocation: &Invocation,
    cmd: &mut Command,
    stdin_data: &[u8],
) -> PublishResult<String> {
    debug!("Executing: {invocation} (with stdin)");

    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(invocation, e))?;

    // The child may exit before reading its input; its exit status
    // and stderr take precedence over the broken pipe.
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(stdin_data));

    let output = child.wait_with_output()?;
    if output.status.success() {
        written?;
    }
    finish(invocation, &output)
}

fn stream(invocation: &Invocation, cmd: &mut Command) -> PublishResult<()> {
    debug!("Executing: {invocation}");

    let mut child = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(invocation, e))?;

    let tee = child.stderr.take().map(|pipe| thread::spawn(move || tee_stderr(pipe)));
    let status = child.wait()?;
    let stderr = tee
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        Err(failed(invocation, status, stderr))
    }
}

/// Copy `pipe` to our stderr until EOF, returning everything read.
fn tee_stderr(mut pipe: impl Read) -> Vec<u8> {
    let mut captured = Vec::new();
    let mut buf = [0u8; 8192];
    let mut terminal = io::stderr();
    loop {
        match pipe.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let _ = terminal.write_all(&buf[..n]);
                captured.extend_from_slice(&buf[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
    captured
}

fn finish(invocation: &Invocation, output: &Output) -> PublishResult<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!("stderr: {stderr}");
        Err(failed(invocation, output.status, stderr))
    }
}

fn failed(invocation: &Invocation, status: ExitStatus, stderr: String) -> PublishError {
    PublishError::ToolFailed {
        command: invocation.to_string(),
        code: status.code(),
        stderr,
    }
}

fn spawn_error(invocation: &Invocation, e: io::Error) -> PublishError {
    if e.kind() == io::ErrorKind::NotFound {
        PublishError::ToolNotInstalled {
            tool: invocation.tool.display_name().to_string(),
        }
    } else {
        PublishError::Io(e)
    }
}
