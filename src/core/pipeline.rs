//! Generation pipeline.
//!
//! Drives one request from rules to streamed answer:
//!
//! ```text
//! compose prompt -> direct -> chat-session -> simplified -> exhausted
//!                      \           |             /
//!                       +--> scan for <<SEARCH: ...>> --> search --> follow-up
//! ```
//!
//! Forced-search requests take a separate path: search first, then a
//! single direct call, with no tier fallback.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};

use crate::core::config::GenerationConfig;
use crate::core::directive::{extract_forced_query, scan_for_directive, SearchDirective};
use crate::core::error::{Result, RelayError};
use crate::core::generation::{
    attempt_tier, GenerationAttempt, GenerationBackend, SamplingParams, Tier,
};
use crate::core::prompt::{
    compose, followup_history, forced_search_prompt, Prompt, FOLLOWUP_SEPARATOR,
};
use crate::core::rules::RuleCatalog;
use crate::core::search::{SearchBackend, MISSING_QUERY};
use crate::core::types::{ChatRequest, Feature, Turn};

/// Lazy, finite, non-restartable sequence of answer fragments
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Result of a successful walk down the tiers
#[derive(Debug, Clone)]
pub struct FallbackOutcome {
    /// Tier that produced the text
    pub tier: Tier,
    pub text: String,
    /// Every tier tried, in order, including the successful one
    pub attempts: Vec<GenerationAttempt>,
}

/// Orchestrates rules, tiers, and search augmentation for a request
///
/// Cloning is cheap; all collaborators are shared read-only.
#[derive(Clone)]
pub struct GenerationPipeline {
    rules: Arc<RuleCatalog>,
    generator: Arc<dyn GenerationBackend>,
    search: Arc<dyn SearchBackend>,
    params: SamplingParams,
    tier_timeout: Duration,
}

impl GenerationPipeline {
    pub fn new(
        rules: Arc<RuleCatalog>,
        generator: Arc<dyn GenerationBackend>,
        search: Arc<dyn SearchBackend>,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            rules,
            generator,
            search,
            params: SamplingParams::from(config),
            tier_timeout: config.tier_timeout(),
        }
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }

    /// Entry point for an inbound request
    ///
    /// Errors are returned before any fragment is produced, so the
    /// caller can still choose a failure status.
    pub async fn respond(&self, request: &ChatRequest) -> Result<TextStream> {
        if request.force_search {
            self.forced_search(&request.message, request.current_site.as_deref())
                .await
        } else {
            self.generate(request.resolved_feature(), &request.message)
                .await
        }
    }

    /// Rule-based generation with tier fallback and directive follow-up
    pub async fn generate(&self, feature: Feature, message: &str) -> Result<TextStream> {
        let rules = self.rules.rules_for(feature);
        let prompt = compose(rules, message);
        tracing::debug!(feature = %feature, rules = rules.len(), "Composed prompt");

        let outcome = self.generate_with_fallback(&prompt).await?;
        Ok(self.post_process(prompt, outcome.text))
    }

    /// Try each tier in order until one yields non-empty text
    pub async fn generate_with_fallback(&self, prompt: &Prompt) -> Result<FallbackOutcome> {
        let mut attempts = Vec::with_capacity(Tier::FALLBACK_ORDER.len());

        for tier in Tier::FALLBACK_ORDER {
            tracing::info!(tier = %tier, "Attempting generation");
            let result = attempt_tier(
                self.generator.as_ref(),
                tier,
                prompt,
                &self.params,
                self.tier_timeout,
            )
            .await;

            match result {
                Ok(text) => {
                    attempts.push(GenerationAttempt {
                        tier,
                        outcome: Ok(text.clone()),
                    });
                    return Ok(FallbackOutcome {
                        tier,
                        text,
                        attempts,
                    });
                }
                Err(err) => {
                    if err.is_tier_failure() {
                        tracing::warn!(tier = %tier, error = %err, "Generation tier failed");
                    } else {
                        tracing::error!(tier = %tier, error = %err, "Unexpected error from generation tier");
                    }
                    attempts.push(GenerationAttempt {
                        tier,
                        outcome: Err(err.to_string()),
                    });
                }
            }
        }

        tracing::error!(attempts = attempts.len(), "All generation tiers failed");
        Err(RelayError::PipelineExhausted)
    }

    /// Stream the first-round text, then a search-backed follow-up if
    /// the text carries a directive
    fn post_process(&self, prompt: Prompt, first_round: String) -> TextStream {
        let pipeline = self.clone();

        Box::pin(async_stream::stream! {
            let directive = scan_for_directive(&first_round);
            yield first_round.clone();

            if let Some(directive) = directive {
                match pipeline.follow_up(&prompt, &first_round, &directive).await {
                    Ok(followup) => {
                        yield format!("{FOLLOWUP_SEPARATOR}{followup}");
                    }
                    Err(err) => {
                        tracing::warn!(
                            query = %directive.query,
                            search_failed = err.is_search_failure(),
                            error = %err,
                            "Search follow-up failed, delivering first-round text only"
                        );
                    }
                }
            }
        })
    }

    /// Serve a directive: search, then one more direct call
    async fn follow_up(
        &self,
        prompt: &Prompt,
        first_round: &str,
        directive: &SearchDirective,
    ) -> Result<String> {
        tracing::info!(query = %directive.query, "Backend requested a search");

        // In-band directives are never site-scoped
        let results = self.search.search(&directive.query, None).await?;
        let history = followup_history(prompt, first_round, &directive.query, &results);
        self.direct_once(history).await
    }

    /// Search first, then answer with a single direct call
    pub async fn forced_search(
        &self,
        message: &str,
        current_site: Option<&str>,
    ) -> Result<TextStream> {
        let query = extract_forced_query(message);
        tracing::info!(query = %query, site = ?current_site, "Forced search");

        let prompt = match self.search.search(&query, current_site).await {
            Ok(results) => {
                tracing::info!(hits = results.hits.len(), "Search completed, generating response");
                forced_search_prompt(&query, current_site, &results)
            }
            Err(RelayError::InvalidQuery(reason)) => {
                tracing::warn!(reason = %reason, "Forced search without a query");
                forced_search_prompt(&query, current_site, &MISSING_QUERY)
            }
            Err(err) => {
                tracing::error!(
                    search_failed = err.is_search_failure(),
                    error = %err,
                    "Forced search failed"
                );
                return Err(err);
            }
        };
        let text = self.direct_once(vec![prompt.as_turn()]).await?;
        Ok(Box::pin(futures::stream::once(async move { text })))
    }

    /// One bounded direct call with no fallback
    async fn direct_once(&self, history: Vec<Turn>) -> Result<String> {
        let text = tokio::time::timeout(
            self.tier_timeout,
            self.generator.direct(&history, &self.params),
        )
        .await
        .map_err(|_| RelayError::GenerationTimeout(self.tier_timeout))??;

        if text.trim().is_empty() {
            return Err(RelayError::MalformedResponse(
                "direct call returned empty text".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Drain a stream into one string
pub async fn collect_text(stream: TextStream) -> String {
    stream.collect::<Vec<String>>().await.concat()
}
