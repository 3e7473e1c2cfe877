use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::command::AwsScope;
use crate::dockerfile::{BuildSpec, DEFAULT_WORKING_DIR};
use crate::error::{PublishError, PublishResult};
use crate::naming;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "ecr-publish.toml";

/// Staging directory the framework packages the service into.
pub const PACKAGE_DIR: &str = ".serverless";

/// Service settings, usually read from `ecr-publish.toml`:
///
/// ```toml
/// service = "orders"
/// stage = "prod"
/// region = "eu-west-1"
/// runtime = "python3.8"
/// additional_docker_commands = ["RUN pip install boto3"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub service: String,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default = "default_runtime")]
    pub runtime: String,
    #[serde(default)]
    pub base_image: Option<String>,
    #[serde(default)]
    pub additional_docker_commands: Vec<String>,
    #[serde(default = "default_working_dir")]
    pub working_dir: String,
    #[serde(default = "default_service_path")]
    pub service_path: PathBuf,
}

fn default_stage() -> String {
    "dev".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_runtime() -> String {
    "python3.8".to_string()
}

fn default_working_dir() -> String {
    DEFAULT_WORKING_DIR.to_string()
}

fn default_service_path() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    #[must_use]
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            stage: default_stage(),
            region: default_region(),
            profile: None,
            runtime: default_runtime(),
            base_image: None,
            additional_docker_commands: Vec::new(),
            working_dir: default_working_dir(),
            service_path: default_service_path(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> PublishResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> PublishResult<Self> {
        if !path.exists() {
            return Err(PublishError::FileNotFound(path.display().to_string()));
        }
        info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn stage(mut self, stage: &str) -> Self {
        self.stage = stage.to_string();
        self
    }

    #[must_use]
    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    #[must_use]
    pub fn profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    #[must_use]
    pub fn runtime(mut self, runtime: &str) -> Self {
        self.runtime = runtime.to_string();
        self
    }

    #[must_use]
    pub fn base_image(mut self, image: &str) -> Self {
        self.base_image = Some(image.to_string());
        self
    }

    #[must_use]
    pub fn docker_command(mut self, line: &str) -> Self {
        self.additional_docker_commands.push(line.to_string());
        self
    }

    #[must_use]
    pub fn service_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_path = path.into();
        self
    }

    pub fn validate(&self) -> PublishResult<()> {
        for (field, value) in [
            ("service", &self.service),
            ("stage", &self.stage),
            ("region", &self.region),
        ] {
            if value.trim().is_empty() {
                return Err(PublishError::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn repository_name(&self) -> String {
        naming::repository_name(&self.service, &self.stage)
    }

    #[must_use]
    pub fn aws_scope(&self) -> AwsScope {
        AwsScope::new(Some(&self.region), self.profile.as_deref())
    }

    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.service_path.join(PACKAGE_DIR)
    }

    #[must_use]
    pub fn build_spec(&self) -> BuildSpec {
        let mut spec = BuildSpec::new(&self.service, &self.runtime).working_dir(&self.working_dir);
        if let Some(image) = &self.base_image {
            spec = spec.base_image(image);
        }
        spec.additional_commands
            .clone_from(&self.additional_docker_commands);
        spec
    }
}
