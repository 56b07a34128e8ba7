use crate::ArticleError;
use crate::extract::ArticleExtractor;
use crate::llm::LLM;
use crate::utils::substr_up_to_len;

/// Keeps requests below the model's input limit.
pub const MAX_CHARS: usize = crate::config::DEFAULT_MAX_CHARS;

pub struct ArticleTranslationService<L> {
    pub extractor: ArticleExtractor,
    pub llm: L,
    pub max_chars: usize,
    pub target_language: String,
}

impl<L: LLM> ArticleTranslationService<L> {
    /// Extract, truncate, translate. Stops at the first failure without retrying.
    pub async fn run(&self, url: &str) -> Result<String, ArticleError> {
        log::info!("Extracting content from {}", url);
        let text = self
            .extractor
            .extract_text_from_url(url)
            .await
            .map_err(ArticleError::Extraction)?;
        if text.is_empty() {
            return Err(ArticleError::EmptyContent);
        }

        let text = substr_up_to_len(&text, self.max_chars);

        log::info!("Translating (target: {})", self.target_language);
        let translated = self
            .llm
            .translate(&text, &self.target_language)
            .await
            .map_err(ArticleError::Translation)?;
        if translated.trim().is_empty() {
            return Err(ArticleError::EmptyTranslation);
        }

        Ok(translated)
    }
}
