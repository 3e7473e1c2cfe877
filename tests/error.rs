use ecr_publish::{FailureKind, PublishError};

fn tool_failed(stderr: &str) -> PublishError {
    PublishError::ToolFailed {
        command: "aws ecr describe-repositories".into(),
        code: Some(254),
        stderr: stderr.into(),
    }
}

#[test]
fn display_tool_not_installed() {
    let err = PublishError::ToolNotInstalled {
        tool: "aws cli".into(),
    };
    assert_eq!(err.to_string(), "aws cli not found! Please install it.");
}

#[test]
fn display_tool_failed_carries_stderr() {
    let err = tool_failed("boom");
    assert_eq!(
        err.to_string(),
        "command failed: aws ecr describe-repositories: boom"
    );
}

#[test]
fn display_unexpected_output() {
    let err = PublishError::UnexpectedOutput {
        command: "aws sts get-caller-identity".into(),
        reason: "empty Account field".into(),
    };
    assert_eq!(
        err.to_string(),
        "unexpected output from aws sts get-caller-identity: empty Account field"
    );
}

#[test]
fn display_invalid_reference() {
    let err = PublishError::InvalidReference("orders".into());
    assert_eq!(err.to_string(), "invalid image reference: orders");
}

#[test]
fn display_config() {
    let err = PublishError::Config("service must not be empty".into());
    assert_eq!(
        err.to_string(),
        "configuration error: service must not be empty"
    );
}

#[test]
fn display_file_not_found() {
    let err = PublishError::FileNotFound(".serverless".into());
    assert_eq!(err.to_string(), "file not found: .serverless");
}

#[test]
fn classification_only_for_tool_failures() {
    assert_eq!(
        tool_failed("An error occurred (RepositoryNotFoundException)").failure_kind(),
        Some(FailureKind::NotFound)
    );
    assert_eq!(
        tool_failed("throttled").failure_kind(),
        Some(FailureKind::Unknown)
    );
    assert_eq!(
        PublishError::ToolNotInstalled {
            tool: "docker".into()
        }
        .failure_kind(),
        None
    );
}

#[test]
fn not_found_anywhere_in_payload() {
    let err = tool_failed(
        "Traceback: botocore.errorfactory.RepositoryNotFoundException while retrying",
    );
    assert!(err.is_not_found());
}

#[test]
fn external_tool_family() {
    assert!(tool_failed("x").is_external_tool());
    assert!(
        PublishError::ToolNotInstalled {
            tool: "docker".into()
        }
        .is_external_tool()
    );
    assert!(!PublishError::Config("x".into()).is_external_tool());
}

#[test]
fn from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err: PublishError = io_err.into();
    assert!(matches!(err, PublishError::Io(_)));
}

#[test]
fn from_json_error() {
    let json_err = serde_json::from_str::<Vec<u64>>("invalid").unwrap_err();
    let err: PublishError = json_err.into();
    assert!(matches!(err, PublishError::Json(_)));
}
