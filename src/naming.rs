use crate::error::{PublishError, PublishResult};

/// Logical resource name of the repository in the deployment
/// template.
pub const LOGICAL_ID: &str = "ECRRepository";

/// Tag used for every image built by this crate.
pub const DEFAULT_TAG: &str = "latest";

/// `<service>-<stage>`
#[must_use]
pub fn repository_name(service: &str, stage: &str) -> String {
    format!("{service}-{stage}")
}

/// Registry host for an account in a region.
#[must_use]
pub fn registry_host(account: &str, region: &str) -> String {
    format!("{account}.dkr.ecr.{region}.amazonaws.com")
}

/// `<account>.dkr.ecr.<region>.amazonaws.com/<repository>`
#[must_use]
pub fn repository_url(account: &str, region: &str, repository: &str) -> String {
    format!("{}/{repository}", registry_host(account, region))
}

/// `<repository url>:latest`
#[must_use]
pub fn image_name(repository_url: &str) -> String {
    format!("{repository_url}:{DEFAULT_TAG}")
}

/// A fully qualified image reference split into its parts.
///
/// ```
/// use ecr_publish::naming::ImageReference;
///
/// let r = ImageReference::parse("123456789012.dkr.ecr.us-east-1.amazonaws.com/orders-prod:v2")
///     .unwrap();
/// assert_eq!(r.registry, "123456789012.dkr.ecr.us-east-1.amazonaws.com");
/// assert_eq!(r.repository, "orders-prod");
/// assert_eq!(r.tag, "v2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: String,
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    /// Parse `<registry>/<repository>[:<tag>]`. A missing tag
    /// means `latest`. Digest references (`@sha256:...`) are
    /// rejected; images are pushed by tag.
    pub fn parse(reference: &str) -> PublishResult<Self> {
        let invalid = || PublishError::InvalidReference(reference.to_string());

        let (registry, rest) = reference.split_once('/').ok_or_else(invalid)?;
        if registry.is_empty() || rest.is_empty() || rest.contains('@') {
            return Err(invalid());
        }

        // A colon inside the last path segment separates the tag.
        let last_segment_start = rest.rfind('/').map_or(0, |i| i + 1);
        let (repository, tag) = match rest[last_segment_start..].rfind(':') {
            Some(i) => {
                let split = last_segment_start + i;
                (&rest[..split], &rest[split + 1..])
            }
            None => (rest, DEFAULT_TAG),
        };

        if repository.is_empty() || tag.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            registry: registry.to_string(),
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }
}
