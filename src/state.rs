//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is handed to every widget. It holds the AI client and the score
//! log behind trait objects so the CLI wires real implementations while tests
//! inject scripted ones. Widgets share nothing else.

use std::sync::Arc;

use crate::llm::LlmGenerate;
use crate::scores::ScoreStore;

/// Clone is cheap: every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmGenerate>,
    pub scores: Arc<dyn ScoreStore>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmGenerate>, scores: Arc<dyn ScoreStore>) -> Self {
        Self { llm, scores }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::*;
    use crate::llm::{Content, LlmError};
    use crate::scores::MemoryScoreStore;

    /// Scripted LLM: replies are consumed in order, every request is recorded.
    pub struct MockLlm {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        requests: Mutex<Vec<Vec<Content>>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies), requests: Mutex::new(Vec::new()) }
        }

        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        #[must_use]
        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        #[must_use]
        pub fn last_request(&self) -> Option<Vec<Content>> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait::async_trait]
    impl LlmGenerate for MockLlm {
        async fn generate(&self, contents: &[Content]) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(contents.to_vec());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(LlmError::ApiRequest("no scripted reply".into()))
            } else {
                replies.remove(0)
            }
        }
    }

    /// App state over a mock LLM and an in-memory score log.
    #[must_use]
    pub fn test_app_state(llm: Arc<MockLlm>) -> (AppState, Arc<MemoryScoreStore>) {
        let scores = Arc::new(MemoryScoreStore::new());
        (AppState::new(llm, scores.clone()), scores)
    }
}
