//! Typed argv for every `aws` and `docker` subcommand this crate
//! issues.

use std::env;
use std::fmt;

/// An external tool driven by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Aws,
    Docker,
}

impl Tool {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Docker => "docker",
        }
    }

    /// Name used when telling the operator to install the tool.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Aws => "aws cli",
            Self::Docker => "docker",
        }
    }

    /// Binary to execute: `$AWS_BIN` / `$DOCKER_BIN` when set,
    /// otherwise the bare name resolved through `PATH`.
    #[must_use]
    pub fn binary(self) -> String {
        let var = format!("{}_BIN", self.name().to_uppercase());
        env::var(var)
            .ok()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| self.name().to_string())
    }
}

/// A fully assembled command line, ready to be handed to a
/// [`CommandRunner`](crate::runner::CommandRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub const fn new(tool: Tool, args: Vec<String>) -> Self {
        Self { tool, args }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool.name())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Region and profile appended to every `aws` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsScope {
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl AwsScope {
    #[must_use]
    pub fn new(region: Option<&str>, profile: Option<&str>) -> Self {
        Self {
            region: region.map(str::to_string),
            profile: profile.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwsCommand {
    GetCallerIdentity,
    DescribeRepository { name: String },
    GetLoginPassword,
    CreateRepository { name: String },
    DeleteRepository { name: String, force: bool },
}

impl AwsCommand {
    #[must_use]
    pub fn invocation(&self, scope: &AwsScope) -> Invocation {
        let mut args: Vec<String> = match self {
            Self::GetCallerIdentity => vec![
                "sts".into(),
                "get-caller-identity".into(),
                "--output".into(),
                "json".into(),
            ],
            Self::DescribeRepository { name } => vec![
                "ecr".into(),
                "describe-repositories".into(),
                "--repository-names".into(),
                name.clone(),
                "--output".into(),
                "json".into(),
            ],
            Self::GetLoginPassword => vec!["ecr".into(), "get-login-password".into()],
            Self::CreateRepository { name } => vec![
                "ecr".into(),
                "create-repository".into(),
                "--repository-name".into(),
                name.clone(),
                "--output".into(),
                "json".into(),
            ],
            Self::DeleteRepository { name, force } => {
                let mut args = vec![
                    "ecr".to_string(),
                    "delete-repository".to_string(),
                    "--repository-name".to_string(),
                    name.clone(),
                ];
                if *force {
                    args.push("--force".into());
                }
                args.push("--output".into());
                args.push("json".into());
                args
            }
        };

        if let Some(region) = &scope.region {
            args.push("--region".into());
            args.push(region.clone());
        }
        if let Some(profile) = &scope.profile {
            args.push("--profile".into());
            args.push(profile.clone());
        }

        Invocation::new(Tool::Aws, args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerCommand {
    /// `docker login`; the password goes through stdin.
    Login { username: String, endpoint: String },
    Build {
        dockerfile: String,
        tag: String,
        context: String,
    },
    Push { reference: String },
}

impl DockerCommand {
    #[must_use]
    pub fn invocation(&self) -> Invocation {
        let args = match self {
            Self::Login { username, endpoint } => vec![
                "login".to_string(),
                "--username".to_string(),
                username.clone(),
                "--password-stdin".to_string(),
                endpoint.clone(),
            ],
            Self::Build {
                dockerfile,
                tag,
                context,
            } => vec![
                "build".to_string(),
                "-f".to_string(),
                dockerfile.clone(),
                "-t".to_string(),
                tag.clone(),
                context.clone(),
            ],
            Self::Push { reference } => vec!["push".to_string(), reference.clone()],
        };

        Invocation::new(Tool::Docker, args)
    }
}
