//! Testing utilities.
//!
//! `MockResponder` replaces the live model with a scripted reply queue so
//! whole games run deterministically without network access. The handle is
//! clonable: keep one copy in the test to queue replies after the session
//! has taken ownership of the other.

use crate::conversation::ChatMessage;
use crate::responder::{Responder, ResponderError, SamplingConfig};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Reply returned once the scripted queue is exhausted.
pub const EXHAUSTED_REPLY: &str = "I have nothing further to say.";

/// A responder that returns scripted replies in order.
#[derive(Clone, Default)]
pub struct MockResponder {
    script: Arc<Mutex<VecDeque<String>>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reply.
    pub fn push(&self, reply: impl Into<String>) {
        self.script.lock().unwrap().push_back(reply.into());
    }

    /// Queue several replies in order.
    pub fn extend<I, S>(&self, replies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut script = self.script.lock().unwrap();
        for reply in replies {
            script.push_back(reply.into());
        }
    }

    /// Replies still queued.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(
        &self,
        _conversation: &[ChatMessage],
        _sampling: &SamplingConfig,
    ) -> Result<String, ResponderError> {
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| EXHAUSTED_REPLY.to_string()))
    }
}

/// A responder that always fails, for exercising the error-text path.
pub struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn respond(
        &self,
        _conversation: &[ChatMessage],
        _sampling: &SamplingConfig,
    ) -> Result<String, ResponderError> {
        Err(ResponderError::Provider("connection refused".to_string()))
    }
}

/// A scripted statement with token private reasoning attached.
pub fn scripted_speech(text: impl Into<String>) -> String {
    format!("<think>keeping my word hidden</think>\n{}", text.into())
}

/// A scripted ballot for the named player.
pub fn scripted_vote(target: &str) -> String {
    format!("<think>they seemed evasive</think>\n###Vote: {target}")
}

/// A scripted explicit abstention.
pub fn scripted_abstain() -> String {
    "<think>nobody stands out yet</think>\n###Vote: None".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockResponder::new();
        mock.extend(["one", "two"]);

        assert_eq!(
            mock.respond(&[], &SamplingConfig::default()).await.unwrap(),
            "one"
        );
        assert_eq!(
            mock.respond(&[], &SamplingConfig::default()).await.unwrap(),
            "two"
        );
        assert_eq!(
            mock.respond(&[], &SamplingConfig::default()).await.unwrap(),
            EXHAUSTED_REPLY
        );
    }

    #[tokio::test]
    async fn test_clone_shares_the_queue() {
        let mock = MockResponder::new();
        let handle = mock.clone();
        handle.push("shared");

        assert_eq!(mock.remaining(), 1);
        assert_eq!(
            mock.respond(&[], &SamplingConfig::default()).await.unwrap(),
            "shared"
        );
        assert_eq!(handle.remaining(), 0);
    }

    #[test]
    fn test_scripted_helpers_match_protocol() {
        use crate::protocol::{extract_reasoning, parse_vote, VoteIntent};

        let (private, public) = extract_reasoning(&scripted_vote("Player_X"));
        assert!(private.is_some());
        assert_eq!(parse_vote(&public), VoteIntent::Target("Player_X".to_string()));
        assert_eq!(
            parse_vote(&extract_reasoning(&scripted_abstain()).1),
            VoteIntent::Abstain
        );
    }
}
