use std::path::Path;

use crate::cmd;
use crate::command::Invocation;
use crate::error::PublishResult;

/// Executes external commands on behalf of the registry
/// operations.
///
/// [`SystemRunner`] spawns real processes; tests substitute a
/// double that replays canned results. Implementations must be
/// reentrant: no buffers shared between invocations.
pub trait CommandRunner {
    /// Run and capture stdout (trimmed).
    fn output(&self, invocation: &Invocation) -> PublishResult<String>;

    /// Run with `input` piped to stdin and capture stdout.
    fn output_with_stdin(&self, invocation: &Invocation, input: &[u8]) -> PublishResult<String>;

    /// Run with stdout passed through to the operator.
    fn stream(&self, invocation: &Invocation, cwd: Option<&Path>) -> PublishResult<()>;
}

/// Production [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, invocation: &Invocation) -> PublishResult<String> {
        cmd::run(invocation)
    }

    fn output_with_stdin(&self, invocation: &Invocation, input: &[u8]) -> PublishResult<String> {
        cmd::run_with_stdin(invocation, input)
    }

    fn stream(&self, invocation: &Invocation, cwd: Option<&Path>) -> PublishResult<()> {
        cmd::run_streaming(invocation, cwd)
    }
}
