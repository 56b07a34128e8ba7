pub mod azure;
#[cfg(test)]
pub mod dummy;

use crate::TranslationError;
use crate::parser::Segment;
use serde::Deserialize;

/// What to hand back when a batch call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Return the caller's input untranslated, flagged as [`BatchOutcome::Fallback`].
    #[default]
    FailOpen,
    /// Propagate the error.
    FailClosed,
}

#[derive(Debug)]
pub enum BatchOutcome {
    Translated(Vec<Segment>),
    Fallback {
        original: Vec<Segment>,
        cause: TranslationError,
    },
}

impl BatchOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BatchOutcome::Fallback { .. })
    }

    pub fn into_segments(self) -> Vec<Segment> {
        match self {
            BatchOutcome::Translated(segments) => segments,
            BatchOutcome::Fallback { original, .. } => original,
        }
    }
}

pub trait BatchTranslator {
    /// Translates the non-blank `segments` in one request, preserving their order.
    async fn translate_batch(&self, segments: &[Segment]) -> Result<BatchOutcome, TranslationError>;
}
