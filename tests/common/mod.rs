//! Scripted `CommandRunner` double shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use ecr_publish::command::Invocation;
use ecr_publish::{CommandRunner, PublishError, PublishResult};

pub const ACCOUNT: &str = "123456789012";

pub const CALLER_IDENTITY: &str = r#"{
    "UserId": "AIDAEXAMPLE",
    "Account": "123456789012",
    "Arn": "arn:aws:iam::123456789012:user/deploy"
}"#;

pub const NOT_FOUND: &str = "An error occurred (RepositoryNotFoundException) when calling the \
                             DescribeRepositories operation: The repository with name \
                             'orders-prod' does not exist in the registry with id '123456789012'";

pub const DELETE_NOT_FOUND: &str = "An error occurred (RepositoryNotFoundException) when \
                                    calling the DeleteRepository operation: The repository with \
                                    name 'orders-prod' does not exist in the registry with id \
                                    '123456789012'";

pub const ACCESS_DENIED: &str = "An error occurred (AccessDeniedException) when calling the \
                                 DescribeRepositories operation: User is not authorized";

pub const PASSWORD: &str = "eyJwYXlsb2FkIjoiZmFrZSJ9";

#[must_use]
pub fn describe_output(repository: &str) -> String {
    format!(
        r#"{{"repositories": [{{
            "registryId": "{ACCOUNT}",
            "repositoryName": "{repository}",
            "repositoryUri": "{ACCOUNT}.dkr.ecr.us-east-1.amazonaws.com/{repository}"
        }}]}}"#
    )
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Ok(String),
    Fail(String),
    Missing,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub invocation: Invocation,
    pub stdin: Option<Vec<u8>>,
    pub cwd: Option<PathBuf>,
    pub streamed: bool,
}

impl Call {
    #[must_use]
    pub fn line(&self) -> String {
        self.invocation.to_string()
    }
}

/// Replays outcomes keyed by command-line prefix, e.g.
/// `"aws ecr describe-repositories"`. The last outcome queued for a
/// prefix repeats; unscripted commands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    script: RefCell<HashMap<String, VecDeque<Outcome>>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(self, prefix: &str, outcome: Outcome) -> Self {
        self.script
            .borrow_mut()
            .entry(prefix.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::line).collect()
    }

    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }

    fn respond(
        &self,
        invocation: &Invocation,
        stdin: Option<&[u8]>,
        cwd: Option<&Path>,
        streamed: bool,
    ) -> PublishResult<String> {
        self.calls.borrow_mut().push(Call {
            invocation: invocation.clone(),
            stdin: stdin.map(<[u8]>::to_vec),
            cwd: cwd.map(Path::to_path_buf),
            streamed,
        });

        let line = invocation.to_string();
        let mut script = self.script.borrow_mut();
        let outcome = script
            .iter_mut()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .and_then(|(_, queue)| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
            .unwrap_or(Outcome::Ok(String::new()));

        match outcome {
            Outcome::Ok(stdout) => Ok(stdout),
            Outcome::Fail(stderr) => Err(PublishError::ToolFailed {
                command: line,
                code: Some(254),
                stderr,
            }),
            Outcome::Missing => Err(PublishError::ToolNotInstalled {
                tool: invocation.tool.display_name().to_string(),
            }),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn output(&self, invocation: &Invocation) -> PublishResult<String> {
        self.respond(invocation, None, None, false)
    }

    fn output_with_stdin(&self, invocation: &Invocation, input: &[u8]) -> PublishResult<String> {
        self.respond(invocation, Some(input), None, false)
    }

    fn stream(&self, invocation: &Invocation, cwd: Option<&Path>) -> PublishResult<()> {
        self.respond(invocation, None, cwd, true).map(|_| ())
    }
}

/// A runner where the repository exists and every call succeeds.
#[must_use]
pub fn healthy(repository: &str) -> FakeRunner {
    FakeRunner::new()
        .on("aws sts get-caller-identity", Outcome::Ok(CALLER_IDENTITY.into()))
        .on(
            "aws ecr describe-repositories",
            Outcome::Ok(describe_output(repository)),
        )
        .on("aws ecr get-login-password", Outcome::Ok(PASSWORD.into()))
        .on("docker login", Outcome::Ok("Login Succeeded".into()))
}
