use std::fmt;

use crate::build;
use crate::config::Config;
use crate::error::PublishResult;
use crate::identity::IdentityResolver;
use crate::naming;
use crate::publish::Publisher;
use crate::registry::{Provisioned, Registry, Removal};
use crate::runner::CommandRunner;

/// Ties a service's [`Config`] to the registry operations of each
/// deployment phase: `setup` before deploy, `build`/`deploy`
/// during it, `remove` on teardown.
pub struct Workflow<'a> {
    config: Config,
    runner: &'a dyn CommandRunner,
    identity: IdentityResolver,
}

/// Identifiers the surrounding deployment template refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub logical_id: String,
    pub repository: String,
    pub repository_url: String,
    pub image: String,
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logical ID: {}", self.logical_id)?;
        writeln!(f, "Repository: {}", self.repository)?;
        writeln!(f, "Repository URL: {}", self.repository_url)?;
        write!(f, "Image: {}", self.image)
    }
}

impl<'a> Workflow<'a> {
    #[must_use]
    pub fn new(config: Config, runner: &'a dyn CommandRunner) -> Self {
        let identity = IdentityResolver::new(config.aws_scope());
        Self {
            config,
            runner,
            identity,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> Registry<'a> {
        Registry::new(self.runner, self.config.aws_scope())
    }

    pub fn repository_url(&self) -> PublishResult<String> {
        let account = self.identity.resolve(self.runner)?;
        Ok(naming::repository_url(
            &account,
            &self.config.region,
            &self.config.repository_name(),
        ))
    }

    pub fn image_name(&self) -> PublishResult<String> {
        Ok(naming::image_name(&self.repository_url()?))
    }

    /// Make sure the service's repository exists.
    pub fn setup(&self) -> PublishResult<Provisioned> {
        self.registry()
            .ensure_repository(&self.config.repository_name())
    }

    /// Generate the Dockerfile and build the image locally.
    pub fn build(&self) -> PublishResult<()> {
        let image = self.image_name()?;
        build::build_image(
            self.runner,
            &self.config.build_spec(),
            &self.config.package_dir(),
            &image,
        )
    }

    /// Build (unless `skip_build`) and push the image. The
    /// repository must already exist.
    pub fn deploy(&self, skip_build: bool) -> PublishResult<()> {
        if !skip_build {
            self.build()?;
        }
        let image = self.image_name()?;
        let registry = self.registry();
        Publisher::new(self.runner, &registry).publish(&image)
    }

    /// Delete the service's repository and every image in it.
    pub fn remove(&self) -> PublishResult<Removal> {
        self.registry()
            .delete_repository(&self.config.repository_name())
    }

    pub fn info(&self) -> PublishResult<Info> {
        let repository_url = self.repository_url()?;
        Ok(Info {
            logical_id: naming::LOGICAL_ID.to_string(),
            repository: self.config.repository_name(),
            image: naming::image_name(&repository_url),
            repository_url,
        })
    }
}
