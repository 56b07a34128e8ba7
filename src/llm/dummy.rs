use super::LLM;
use crate::LLMError;
use anyhow::anyhow;
use std::sync::Mutex;

/// Replies with a canned answer (or fails when there is none) and remembers every input.
#[derive(Default)]
pub struct DummyLLM {
    pub reply: Option<String>,
    pub received: Mutex<Vec<(String, String)>>,
}

impl DummyLLM {
    pub fn replying(reply: &str) -> Self {
        DummyLLM {
            reply: Some(reply.to_owned()),
            ..Default::default()
        }
    }

    pub fn received(&self) -> Vec<(String, String)> {
        self.received.lock().unwrap().clone()
    }
}

impl LLM for DummyLLM {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, LLMError> {
        self.received
            .lock()
            .unwrap()
            .push((text.to_owned(), target_language.to_owned()));
        self.reply
            .clone()
            .ok_or_else(|| LLMError::ApiError(anyhow!("Deployment not found")))
    }
}
