use tracing::info;

use crate::command::DockerCommand;
use crate::error::PublishResult;
use crate::naming::ImageReference;
use crate::registry::{LoginCredential, Registry};
use crate::runner::CommandRunner;

/// Pushes locally built images to ECR with `docker`.
pub struct Publisher<'a> {
    runner: &'a dyn CommandRunner,
    registry: &'a Registry<'a>,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub const fn new(runner: &'a dyn CommandRunner, registry: &'a Registry<'a>) -> Self {
        Self { runner, registry }
    }

    /// Log docker into the registry that hosts `image_name`, then
    /// push it. Neither step is retried; a failed push has to be
    /// started over by the caller.
    pub fn publish(&self, image_name: &str) -> PublishResult<()> {
        let reference = ImageReference::parse(image_name)?;

        info!("Logging into ECR...");
        let credential = self.registry.login_credential(&reference.repository)?;
        self.login(&credential)?;

        info!("Uploading to ECR...");
        self.runner.stream(
            &DockerCommand::Push {
                reference: image_name.to_string(),
            }
            .invocation(),
            None,
        )
    }

    /// Authenticate the local docker session with `credential`.
    pub fn login(&self, credential: &LoginCredential) -> PublishResult<()> {
        let invocation = DockerCommand::Login {
            username: credential.username.clone(),
            endpoint: credential.endpoint.clone(),
        }
        .invocation();
        self.runner
            .output_with_stdin(&invocation, credential.password.as_bytes())?;
        Ok(())
    }
}
