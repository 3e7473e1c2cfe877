use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use tracing::debug;

use crate::command::{AwsCommand, AwsScope};
use crate::error::{PublishError, PublishResult};
use crate::runner::CommandRunner;

#[derive(Deserialize)]
struct CallerIdentity {
    #[serde(rename = "Account")]
    account: String,
}

/// Looks up the caller's AWS account id once and remembers it.
///
/// The id is never re-fetched for the lifetime of the resolver,
/// even if the underlying credentials change. Construct one per
/// session and share it by reference.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    scope: AwsScope,
    account: Mutex<Option<String>>,
}

impl IdentityResolver {
    #[must_use]
    pub const fn new(scope: AwsScope) -> Self {
        Self {
            scope,
            account: Mutex::new(None),
        }
    }

    /// Return the account id, calling `aws sts get-caller-identity`
    /// only if it has not been resolved yet. The lock is held
    /// across the lookup so concurrent callers trigger one call.
    pub fn resolve(&self, runner: &dyn CommandRunner) -> PublishResult<String> {
        let mut account = self.account.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(id) = account.as_ref() {
            return Ok(id.clone());
        }

        let invocation = AwsCommand::GetCallerIdentity.invocation(&self.scope);
        let stdout = runner.output(&invocation)?;
        let id = parse_account(&stdout).map_err(|reason| PublishError::UnexpectedOutput {
            command: invocation.to_string(),
            reason,
        })?;

        debug!("Resolved AWS account id {id}");
        *account = Some(id.clone());
        Ok(id)
    }

    /// The cached id, if any lookup has succeeded.
    #[must_use]
    pub fn cached(&self) -> Option<String> {
        self.account
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn parse_account(stdout: &str) -> Result<String, String> {
    let identity: CallerIdentity = serde_json::from_str(stdout).map_err(|e| e.to_string())?;
    if identity.account.is_empty() {
        return Err("empty Account field".into());
    }
    Ok(identity.account)
}
