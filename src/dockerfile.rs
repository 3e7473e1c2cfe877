/// Default working directory of the Lambda base images.
pub const DEFAULT_WORKING_DIR: &str = "/var/task";

/// Inputs of the generated Dockerfile.
///
/// # Example
///
/// ```
/// use ecr_publish::dockerfile::BuildSpec;
///
/// let spec = BuildSpec::new("orders", "python3.8")
///     .command("RUN pip install boto3");
///
/// assert_eq!(spec.base_image, "lambci/lambda:python3.8");
/// assert_eq!(spec.working_dir, "/var/task");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub service: String,
    pub base_image: String,
    pub working_dir: String,
    pub additional_commands: Vec<String>,
}

impl BuildSpec {
    /// Spec for `service` on the `lambci/lambda:<runtime>` base
    /// image.
    #[must_use]
    pub fn new(service: &str, runtime: &str) -> Self {
        Self {
            service: service.to_string(),
            base_image: format!("lambci/lambda:{runtime}"),
            working_dir: DEFAULT_WORKING_DIR.to_string(),
            additional_commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn base_image(mut self, image: &str) -> Self {
        self.base_image = image.to_string();
        self
    }

    #[must_use]
    pub fn working_dir(mut self, dir: &str) -> Self {
        self.working_dir = dir.to_string();
        self
    }

    /// Append a literal Dockerfile line, emitted before the
    /// package is copied in.
    #[must_use]
    pub fn command(mut self, line: &str) -> Self {
        self.additional_commands.push(line.to_string());
        self
    }

    /// Name of the deployment archive in the build context.
    #[must_use]
    pub fn archive(&self) -> String {
        format!("{}.zip", self.service)
    }
}

/// Render the Dockerfile that unpacks the deployment archive into
/// the working directory.
///
/// The layout (leading newline, four-space indent, whitespace-only
/// separator lines, trailing indent) matches what the deployment
/// framework writes, byte for byte.
#[must_use]
pub fn render(spec: &BuildSpec) -> String {
    let archive = spec.archive();
    let target = spec.working_dir.trim_end_matches('/');

    let mut commands = String::new();
    for line in &spec.additional_commands {
        commands.push_str(line);
        commands.push('\n');
    }

    format!(
        concat!(
            "\n",
            "    FROM {base}\n",
            "    USER root\n",
            "    WORKDIR {workdir}\n",
            "    \n",
            "    {commands}\n",
            "\n",
            "    COPY {archive} /tmp\n",
            "    RUN cd /tmp && unzip {archive} && rm {archive}     ",
            "&& cp -r /tmp/* {target}/ && rm -rf /tmp/*\n",
            "    ",
        ),
        base = spec.base_image,
        workdir = spec.working_dir,
        commands = commands,
        archive = archive,
        target = target,
    )
}
