// Scripted backends for pipeline and adapter tests

use async_trait::async_trait;
use gemini_relay::core::error::{RelayError, Result};
use gemini_relay::core::generation::{GenerationBackend, SamplingParams, Tier};
use gemini_relay::core::search::{shape_query, SearchBackend, SearchHit, SearchResult};
use gemini_relay::core::types::Turn;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One scripted reply from a generation tier
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    /// Never completes; only a timeout ends the call
    Hang,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    pub fn fail(s: &str) -> Self {
        Self::Fail(s.to_string())
    }
}

/// Replies are consumed in order; the last one repeats forever
#[derive(Debug, Default)]
struct Script {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl Script {
    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn next(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or_else(|| Reply::fail("unscripted"))
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn play(reply: Reply) -> Result<String> {
    match reply {
        Reply::Text(text) => Ok(text),
        Reply::Fail(message) => Err(RelayError::Generation(message)),
        Reply::Hang => {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }
}

/// Generation backend with a script per tier
#[derive(Debug, Default)]
pub struct StubGenerator {
    direct: Script,
    chat: Script,
    simplified: Script,
    direct_histories: Mutex<Vec<Vec<Turn>>>,
    chat_messages: Mutex<Vec<String>>,
    simplified_prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direct(self, reply: Reply) -> Self {
        self.direct.push(reply);
        self
    }

    pub fn chat(self, reply: Reply) -> Self {
        self.chat.push(reply);
        self
    }

    pub fn simplified(self, reply: Reply) -> Self {
        self.simplified.push(reply);
        self
    }

    /// Every tier fails
    pub fn failing() -> Self {
        Self::new()
            .direct(Reply::fail("direct down"))
            .chat(Reply::fail("chat down"))
            .simplified(Reply::fail("simplified down"))
    }

    pub fn calls(&self, tier: Tier) -> usize {
        match tier {
            Tier::Direct => self.direct.calls(),
            Tier::ChatSession => self.chat.calls(),
            Tier::Simplified => self.simplified.calls(),
        }
    }

    pub fn direct_histories(&self) -> Vec<Vec<Turn>> {
        self.direct_histories.lock().unwrap().clone()
    }

    pub fn chat_messages(&self) -> Vec<String> {
        self.chat_messages.lock().unwrap().clone()
    }

    pub fn simplified_prompts(&self) -> Vec<String> {
        self.simplified_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for StubGenerator {
    async fn direct(&self, history: &[Turn], _params: &SamplingParams) -> Result<String> {
        self.direct_histories.lock().unwrap().push(history.to_vec());
        let reply = self.direct.next();
        play(reply).await
    }

    async fn chat_session(&self, message: &str, _params: &SamplingParams) -> Result<String> {
        self.chat_messages.lock().unwrap().push(message.to_string());
        let reply = self.chat.next();
        play(reply).await
    }

    async fn simplified(&self, prompt: &str) -> Result<String> {
        self.simplified_prompts
            .lock()
            .unwrap()
            .push(prompt.to_string());
        let reply = self.simplified.next();
        play(reply).await
    }
}

/// How the stub search backend answers
#[derive(Debug, Clone)]
pub enum SearchScript {
    Hits(Vec<SearchHit>),
    Unconfigured,
    Backend(u16, String),
}

/// Search backend returning a fixed answer and recording calls
#[derive(Debug)]
pub struct StubSearch {
    script: SearchScript,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

#[allow(dead_code)]
impl StubSearch {
    pub fn new(script: SearchScript) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self::new(SearchScript::Hits(hits))
    }

    pub fn unconfigured() -> Self {
        Self::new(SearchScript::Unconfigured)
    }

    /// Recorded `(query, current_site)` pairs
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for StubSearch {
    async fn search(&self, query: &str, current_site: Option<&str>) -> Result<SearchResult> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), current_site.map(str::to_string)));

        match &self.script {
            SearchScript::Unconfigured => Err(RelayError::SearchUnconfigured(
                "no credentials".to_string(),
            )),
            SearchScript::Backend(status, message) => Err(RelayError::SearchBackend {
                status: *status,
                message: message.clone(),
            }),
            SearchScript::Hits(_) if query.trim().is_empty() => Err(RelayError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            )),
            SearchScript::Hits(hits) => Ok(SearchResult::new(
                shape_query(query, current_site),
                hits.clone(),
            )),
        }
    }
}

/// A single plausible search hit
#[allow(dead_code)]
pub fn sample_hit() -> SearchHit {
    SearchHit {
        title: "Tokio tutorial".to_string(),
        link: "https://tokio.rs/tokio/tutorial".to_string(),
        snippet: "Tokio is an asynchronous runtime for Rust.".to_string(),
    }
}
