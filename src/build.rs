use std::path::{Path, PathBuf};

use tracing::info;

use crate::command::DockerCommand;
use crate::dockerfile::{self, BuildSpec};
use crate::error::{PublishError, PublishResult};
use crate::runner::CommandRunner;

/// File name of the generated Dockerfile inside the staging
/// directory.
pub const DOCKERFILE: &str = "Dockerfile";

/// Write the generated Dockerfile into `package_dir`, returning its
/// path.
pub fn write_dockerfile(spec: &BuildSpec, package_dir: &Path) -> PublishResult<PathBuf> {
    if !package_dir.is_dir() {
        return Err(PublishError::FileNotFound(format!(
            "{} not found. Package the service first",
            package_dir.display()
        )));
    }

    let path = package_dir.join(DOCKERFILE);
    std::fs::write(&path, dockerfile::render(spec))?;
    Ok(path)
}

/// Build `tag` from the staging directory, which must already hold
/// the deployment archive. Build output goes straight to the
/// operator.
pub fn build_image(
    runner: &dyn CommandRunner,
    spec: &BuildSpec,
    package_dir: &Path,
    tag: &str,
) -> PublishResult<()> {
    info!("Building docker image: \"{tag}\"...");

    write_dockerfile(spec, package_dir)?;

    let invocation = DockerCommand::Build {
        dockerfile: DOCKERFILE.to_string(),
        tag: tag.to_string(),
        context: ".".to_string(),
    }
    .invocation();

    runner.stream(&invocation, Some(package_dir))
}
