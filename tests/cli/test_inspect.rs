//! Tests for the rules, show-config and verify-search CLI commands

use crate::common::{create_test_services, test_config, StubGenerator, StubSearch};
use gemini_relay::cli::commands::{config, rules, verify};
use gemini_relay::cli::OutputFormat;

/// Test rules for all features and for a single tag
#[tokio::test]
async fn test_rules_command() {
    let (services, _generator, _search) = create_test_services(
        test_config(),
        StubGenerator::new(),
        StubSearch::with_hits(vec![]),
    );

    let all = rules::execute(rules::RulesArgs { feature: None }, &services, OutputFormat::Human).await;
    assert!(all.is_ok());

    let one = rules::execute(
        rules::RulesArgs {
            feature: Some("code-test".to_string()),
        },
        &services,
        OutputFormat::Json,
    )
    .await;
    assert!(one.is_ok());
}

/// Test show-config in both formats
#[tokio::test]
async fn test_show_config_command() {
    let (services, _generator, _search) = create_test_services(
        test_config(),
        StubGenerator::new(),
        StubSearch::with_hits(vec![]),
    );

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = config::execute(config::ConfigArgs { all: true }, &services, format).await;
        assert!(result.is_ok(), "show-config should succeed: {:?}", result.err());
    }
}

/// Test verify-search without credentials
#[tokio::test]
async fn test_verify_search_unconfigured() {
    let (services, _generator, _search) = create_test_services(
        test_config(),
        StubGenerator::new(),
        StubSearch::with_hits(vec![]),
    );

    let lenient = verify::execute(
        verify::VerifyArgs { strict: false },
        &services,
        OutputFormat::Json,
    )
    .await;
    assert!(lenient.is_ok());

    let strict = verify::execute(
        verify::VerifyArgs { strict: true },
        &services,
        OutputFormat::Human,
    )
    .await;
    assert!(strict.is_err(), "Strict verification should fail without credentials");
}
