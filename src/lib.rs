//! Provision an ECR repository, build a container image and push
//! it, by driving the `aws` and `docker` command-line tools.
//!
//! Every operation is a synchronous call to one of those binaries.
//! Failures are classified from the provider's stderr, which is how
//! repository creation and deletion stay idempotent.
//!
//! # Overview
//!
//! - [`IdentityResolver`] looks up the caller's account id once per
//!   session
//! - [`Registry`] creates a repository only when it is missing, and
//!   deletes it tolerating one that is already gone
//! - [`Publisher`] logs docker into the registry and pushes an image
//! - [`Workflow`] wires them to a service [`Config`] for each
//!   deployment phase
//!
//! All subprocesses go through a [`CommandRunner`]. Use
//! [`SystemRunner`] for real work and a scripted double in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use ecr_publish::{Config, SystemRunner, Workflow};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::new("orders")
//!         .stage("prod")
//!         .region("eu-west-1")
//!         .docker_command("RUN pip install boto3");
//!
//!     let runner = SystemRunner::new();
//!     let workflow = Workflow::new(config, &runner);
//!
//!     // Environment setup
//!     workflow.setup()?;
//!
//!     // Deploy: build from .serverless/ and push <url>:latest
//!     workflow.deploy(false)?;
//!
//!     // Teardown
//!     workflow.remove()?;
//!     Ok(())
//! }
//! ```
//!
//! The `ecr-publish` binary exposes the same phases:
//!
//! ```sh
//! ecr-publish setup --stage prod
//! ecr-publish deploy --stage prod
//! ecr-publish remove --stage prod
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod build;
pub mod classify;
pub mod cli;
pub mod cmd;
pub mod command;
pub mod config;
pub mod dockerfile;
pub mod error;
pub mod identity;
pub mod naming;
pub mod publish;
pub mod registry;
pub mod runner;
pub mod workflow;

pub use classify::FailureKind;
pub use config::Config;
pub use error::{PublishError, PublishResult};
pub use identity::IdentityResolver;
pub use publish::Publisher;
pub use registry::{LoginCredential, Provisioned, Registry, Removal};
pub use runner::{CommandRunner, SystemRunner};
pub use workflow::Workflow;
