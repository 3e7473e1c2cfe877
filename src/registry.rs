use std::fmt;

use serde::Deserialize;
use tracing::{debug, info};

use crate::command::{AwsCommand, AwsScope};
use crate::error::{PublishError, PublishResult};
use crate::runner::CommandRunner;

/// Username ECR expects alongside a `get-login-password` token.
pub const ECR_USERNAME: &str = "AWS";

/// Short-lived credentials for one `docker login`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredential {
    pub username: String,
    pub password: String,
    pub endpoint: String,
}

impl fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Outcome of [`Registry::ensure_repository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    Existing,
}

/// Outcome of [`Registry::delete_repository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    AlreadyGone,
}

#[derive(Deserialize)]
struct DescribeRepositories {
    repositories: Vec<RepositoryRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryRecord {
    repository_uri: String,
}

/// ECR repository operations through the `aws` CLI.
pub struct Registry<'a> {
    runner: &'a dyn CommandRunner,
    scope: AwsScope,
}

impl<'a> Registry<'a> {
    #[must_use]
    pub const fn new(runner: &'a dyn CommandRunner, scope: AwsScope) -> Self {
        Self { runner, scope }
    }

    /// Obtain a login credential for `repository`.
    ///
    /// The endpoint comes from the repository record, so this fails
    /// with `RepositoryNotFoundException` when the repository does
    /// not exist.
    pub fn login_credential(&self, repository: &str) -> PublishResult<LoginCredential> {
        let describe = AwsCommand::DescribeRepository {
            name: repository.to_string(),
        }
        .invocation(&self.scope);
        let stdout = self.runner.output(&describe)?;
        let endpoint = endpoint_from_describe(&stdout).map_err(|reason| {
            PublishError::UnexpectedOutput {
                command: describe.to_string(),
                reason,
            }
        })?;

        let password = self
            .runner
            .output(&AwsCommand::GetLoginPassword.invocation(&self.scope))?;
        if password.is_empty() {
            return Err(PublishError::UnexpectedOutput {
                command: AwsCommand::GetLoginPassword
                    .invocation(&self.scope)
                    .to_string(),
                reason: "empty password".into(),
            });
        }

        Ok(LoginCredential {
            username: ECR_USERNAME.to_string(),
            password,
            endpoint,
        })
    }

    /// Create `name` unless it already exists.
    ///
    /// Existence is checked with [`Self::login_credential`]; only a
    /// not-found failure leads to creation. Two concurrent callers
    /// may both attempt the create, and the loser's
    /// `RepositoryAlreadyExistsException` is returned as an error.
    pub fn ensure_repository(&self, name: &str) -> PublishResult<Provisioned> {
        match self.login_credential(name) {
            Ok(_) => {
                debug!("ECR repository {name} already exists");
                Ok(Provisioned::Existing)
            }
            Err(e) if e.is_not_found() => {
                self.runner.output(
                    &AwsCommand::CreateRepository {
                        name: name.to_string(),
                    }
                    .invocation(&self.scope),
                )?;
                info!("Creating {name} ECR...");
                Ok(Provisioned::Created)
            }
            Err(e) => Err(e),
        }
    }

    /// Force-delete `name`, images included. A repository that is
    /// already gone counts as deleted.
    pub fn delete_repository(&self, name: &str) -> PublishResult<Removal> {
        let invocation = AwsCommand::DeleteRepository {
            name: name.to_string(),
            force: true,
        }
        .invocation(&self.scope);

        match self.runner.output(&invocation) {
            Ok(_) => {
                info!("Deleting {name} ECR...");
                Ok(Removal::Deleted)
            }
            Err(e) if e.is_not_found() => {
                info!("ECR Repository already deleted");
                Ok(Removal::AlreadyGone)
            }
            Err(e) => Err(e),
        }
    }
}

/// `https://<host>` of the first repository in a
/// `describe-repositories` document.
fn endpoint_from_describe(stdout: &str) -> Result<String, String> {
    let parsed: DescribeRepositories = serde_json::from_str(stdout).map_err(|e| e.to_string())?;
    let uri = parsed
        .repositories
        .first()
        .map(|r| r.repository_uri.as_str())
        .ok_or("no repositories in response")?;
    let host = uri
        .split('/')
        .next()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| format!("malformed repositoryUri '{uri}'"))?;
    Ok(format!("https://{host}"))
}
