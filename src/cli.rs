use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{CONFIG_FILE, Config};
use crate::error::PublishResult;
use crate::registry::Provisioned;
use crate::runner::CommandRunner;
use crate::workflow::Workflow;

#[derive(Debug, Parser)]
#[command(name = "ecr-publish")]
#[command(about = "Provision an ECR repository and publish the service image to it")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the deployment stage
    #[arg(long, global = true)]
    pub stage: Option<String>,

    /// Override the AWS region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// AWS CLI profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the ECR repository if it does not exist
    Setup,

    /// Build the image from the packaged service
    Build,

    /// Build and push the image
    Deploy {
        /// Push the existing local image without rebuilding
        #[arg(long)]
        skip_build: bool,
    },

    /// Delete the ECR repository and its images
    Remove,

    /// Print the repository identifiers
    Info,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> PublishResult<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(stage) = &self.stage {
            config = config.stage(stage);
        }
        if let Some(region) = &self.region {
            config = config.region(region);
        }
        if let Some(profile) = &self.profile {
            config = config.profile(profile);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run `command` against `config`.
pub fn dispatch(
    command: &Command,
    config: Config,
    runner: &dyn CommandRunner,
) -> PublishResult<()> {
    let workflow = Workflow::new(config, runner);

    match command {
        Command::Setup => {
            if workflow.setup()? == Provisioned::Existing {
                info!(
                    "ECR repository {} already exists",
                    workflow.config().repository_name()
                );
            }
        }
        Command::Build => workflow.build()?,
        Command::Deploy { skip_build } => workflow.deploy(*skip_build)?,
        Command::Remove => {
            workflow.remove()?;
        }
        Command::Info => println!("{}", workflow.info()?),
    }

    Ok(())
}
