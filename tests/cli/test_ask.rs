//! Tests for the ask CLI command

use crate::common::{create_test_services, test_config, Reply, StubGenerator, StubSearch};
use gemini_relay::cli::commands::ask::{execute, AskArgs};
use gemini_relay::cli::OutputFormat;
use gemini_relay::core::generation::Tier;

fn args(message: &str) -> AskArgs {
    AskArgs {
        message: message.to_string(),
        feature: None,
        force_search: false,
        site: None,
    }
}

/// Test ask with a first-tier answer in human format
#[tokio::test]
async fn test_ask_human() {
    let (services, generator, _search) = create_test_services(
        test_config(),
        StubGenerator::new().direct(Reply::text("answer")),
        StubSearch::with_hits(vec![]),
    );

    let result = execute(args("question"), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Ask should succeed: {:?}", result.err());
    assert_eq!(generator.calls(Tier::Direct), 1);
}

/// Test ask in JSON format after fallback
#[tokio::test]
async fn test_ask_json_after_fallback() {
    let (services, generator, _search) = create_test_services(
        test_config(),
        StubGenerator::new()
            .direct(Reply::fail("down"))
            .chat(Reply::text("from chat")),
        StubSearch::with_hits(vec![]),
    );

    let mut ask = args("question");
    ask.feature = Some("chat".to_string());
    let result = execute(ask, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Ask should succeed: {:?}", result.err());
    assert_eq!(generator.calls(Tier::ChatSession), 1);
}

/// Test ask surfaces exhaustion as an error
#[tokio::test]
async fn test_ask_exhausted() {
    let (services, _generator, _search) = create_test_services(
        test_config(),
        StubGenerator::failing(),
        StubSearch::with_hits(vec![]),
    );

    let result = execute(args("question"), &services, OutputFormat::Human).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("trouble generating a response"));
}

/// Test forced search passes the site through
#[tokio::test]
async fn test_ask_forced_search() {
    let (services, _generator, search) = create_test_services(
        test_config(),
        StubGenerator::new().direct(Reply::text("found")),
        StubSearch::with_hits(vec![]),
    );

    let mut ask = args("serde flatten");
    ask.force_search = true;
    ask.site = Some("serde.rs".to_string());
    let result = execute(ask, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Ask should succeed: {:?}", result.err());
    assert_eq!(
        search.calls(),
        vec![("serde flatten".to_string(), Some("serde.rs".to_string()))]
    );
}
