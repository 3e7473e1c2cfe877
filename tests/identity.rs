mod common;

use common::{ACCOUNT, CALLER_IDENTITY, FakeRunner, Outcome};
use ecr_publish::command::AwsScope;
use ecr_publish::{IdentityResolver, PublishError};

#[test]
fn resolves_once_for_many_calls() {
    let runner = FakeRunner::new().on(
        "aws sts get-caller-identity",
        Outcome::Ok(CALLER_IDENTITY.into()),
    );
    let resolver = IdentityResolver::new(AwsScope::default());

    let ids: Vec<String> = (0..5).map(|_| resolver.resolve(&runner).unwrap()).collect();

    assert!(ids.iter().all(|id| id == ACCOUNT));
    assert_eq!(runner.count("aws sts get-caller-identity"), 1);
    assert_eq!(runner.calls().len(), 1);
    assert_eq!(resolver.cached().as_deref(), Some(ACCOUNT));
}

#[test]
fn cached_value_survives_provider_changes() {
    let runner = FakeRunner::new()
        .on("aws sts get-caller-identity", Outcome::Ok(CALLER_IDENTITY.into()))
        .on(
            "aws sts get-caller-identity",
            Outcome::Ok(r#"{"Account": "999999999999"}"#.into()),
        );
    let resolver = IdentityResolver::new(AwsScope::default());

    assert_eq!(resolver.resolve(&runner).unwrap(), ACCOUNT);
    assert_eq!(resolver.resolve(&runner).unwrap(), ACCOUNT);
    assert_eq!(runner.count("aws sts"), 1);
}

#[test]
fn passes_profile_and_region() {
    let runner = FakeRunner::new().on(
        "aws sts get-caller-identity",
        Outcome::Ok(CALLER_IDENTITY.into()),
    );
    let resolver = IdentityResolver::new(AwsScope::new(Some("eu-west-1"), Some("deploy")));

    resolver.resolve(&runner).unwrap();

    assert_eq!(
        runner.lines(),
        vec![
            "aws sts get-caller-identity --output json --region eu-west-1 --profile deploy"
                .to_string()
        ]
    );
}

#[test]
fn missing_cli_is_not_installed() {
    let runner = FakeRunner::new().on("aws", Outcome::Missing);
    let resolver = IdentityResolver::new(AwsScope::default());

    let err = resolver.resolve(&runner).unwrap_err();

    assert!(matches!(err, PublishError::ToolNotInstalled { .. }));
    assert_eq!(err.to_string(), "aws cli not found! Please install it.");
    assert!(resolver.cached().is_none());
}

#[test]
fn failed_lookup_is_not_cached() {
    let runner = FakeRunner::new()
        .on(
            "aws sts get-caller-identity",
            Outcome::Fail("Unable to locate credentials".into()),
        )
        .on(
            "aws sts get-caller-identity",
            Outcome::Ok(CALLER_IDENTITY.into()),
        );
    let resolver = IdentityResolver::new(AwsScope::default());

    let err = resolver.resolve(&runner).unwrap_err();
    assert!(matches!(
        &err,
        PublishError::ToolFailed { stderr, .. } if stderr == "Unable to locate credentials"
    ));

    assert_eq!(resolver.resolve(&runner).unwrap(), ACCOUNT);
    assert_eq!(runner.count("aws sts"), 2);
}

#[test]
fn unparsable_output_is_an_external_tool_error() {
    let runner = FakeRunner::new().on(
        "aws sts get-caller-identity",
        Outcome::Ok("<html>captive portal</html>".into()),
    );
    let resolver = IdentityResolver::new(AwsScope::default());

    let err = resolver.resolve(&runner).unwrap_err();

    assert!(matches!(err, PublishError::UnexpectedOutput { .. }));
    assert!(err.is_external_tool());
}
