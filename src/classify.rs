//! Classification of provider error text.
//!
//! The `aws` CLI reports service exceptions on stderr as
//! `An error occurred (<ExceptionName>) when calling ...`. The
//! exception name is matched as a substring of the whole payload,
//! so an unrelated failure whose text happens to mention the
//! exception is classified the same way.

/// ECR's exception for a repository that does not exist.
pub const REPOSITORY_NOT_FOUND: &str = "RepositoryNotFoundException";

/// ECR's exception for creating a repository that already exists.
pub const REPOSITORY_ALREADY_EXISTS: &str = "RepositoryAlreadyExistsException";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Conflict,
    Unknown,
}

/// Classify the captured stderr of a failed provider call.
#[must_use]
pub fn classify(stderr: &str) -> FailureKind {
    if stderr.contains(REPOSITORY_NOT_FOUND) {
        FailureKind::NotFound
    } else if stderr.contains(REPOSITORY_ALREADY_EXISTS) {
        FailureKind::Conflict
    } else {
        FailureKind::Unknown
    }
}
