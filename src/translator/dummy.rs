use super::{BatchOutcome, BatchTranslator};
use crate::TranslationError;
use crate::parser::Segment;
use std::cell::Cell;

/// Upper-cases every non-blank segment and counts how often it was called.
#[derive(Default)]
pub struct DummyTranslator {
    pub fail_open: bool,
    pub calls: Cell<usize>,
}

impl BatchTranslator for DummyTranslator {
    async fn translate_batch(&self, segments: &[Segment]) -> Result<BatchOutcome, TranslationError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_open {
            return Ok(BatchOutcome::Fallback {
                original: segments.to_vec(),
                cause: TranslationError::ServiceError {
                    status: 503,
                    body: "Service unavailable".to_owned(),
                },
            });
        }
        Ok(BatchOutcome::Translated(
            segments
                .iter()
                .filter(|s| !s.is_blank())
                .map(|s| Segment(s.0.to_uppercase()))
                .collect(),
        ))
    }
}
