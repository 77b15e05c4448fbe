//! Scripted chat model for deterministic tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatModel, ModelError, Result};

/// One scripted turn: a canned reply or a simulated provider failure.
#[derive(Debug, Clone)]
enum ScriptedTurn {
    Reply(String),
    Failure(String),
}

/// A [`ChatModel`] that replays a script of canned turns.
///
/// Each call to [`complete`](ChatModel::complete) consumes the next turn.
/// When the script runs out, the model keeps returning `fallback_reply`
/// (default `"ok"`). Use [`push_failure`](MockChatModel::push_failure) to
/// simulate a provider outage at a specific point in the pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_model::MockChatModel;
///
/// let model = MockChatModel::new();
/// model.push_reply("yes");
/// model.push_reply("The fund is called Example Growth Fund.");
/// ```
#[derive(Debug)]
pub struct MockChatModel {
    script: Mutex<VecDeque<ScriptedTurn>>,
    fallback_reply: String,
    calls: AtomicUsize,
}

impl MockChatModel {
    /// Create a mock with an empty script and `"ok"` as the fallback reply.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback_reply: "ok".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns `reply` once the script is empty.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback_reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a canned reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.script.lock().unwrap().push_back(ScriptedTurn::Reply(reply.into()));
    }

    /// Queue a simulated provider failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script.lock().unwrap().push_back(ScriptedTurn::Failure(message.into()));
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let turn = self.script.lock().unwrap().pop_front();
        match turn {
            Some(ScriptedTurn::Reply(reply)) => Ok(reply),
            Some(ScriptedTurn::Failure(message)) => {
                Err(ModelError::Unavailable { provider: "mock".to_string(), message })
            }
            None => Ok(self.fallback_reply.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_in_order_then_falls_back() {
        let model = MockChatModel::new();
        model.push_reply("first");
        model.push_failure("boom");

        assert_eq!(model.complete("p").await.unwrap(), "first");
        assert!(matches!(
            model.complete("p").await.unwrap_err(),
            ModelError::Unavailable { .. }
        ));
        assert_eq!(model.complete("p").await.unwrap(), "ok");
        assert_eq!(model.calls(), 3);
    }
}
