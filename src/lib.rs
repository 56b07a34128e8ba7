pub mod article;
pub mod config;
pub mod document;
pub mod docx;
pub mod extract;
pub mod generator;
pub mod llm;
pub mod parser;
pub mod translator;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

use crate::article::ArticleTranslationService;
use crate::config::{ArticleConfig, DocumentConfig};
use crate::document::DocumentTranslationService;
use crate::extract::ArticleExtractor;
use crate::generator::docx::DocxGeneratorBuilder;
use crate::llm::LLMBuilder;
use crate::llm::azure::AzureChatBuilder;
use crate::parser::docx::DocxParser;
use crate::translator::azure::AzureTranslator;
use std::fmt::Display;
use std::path::PathBuf;

/// Translates the configured `.docx` file paragraph by paragraph, returning the path of the
/// translated copy.
pub async fn translate_document(cfg: &DocumentConfig) -> Result<PathBuf, TranslationError> {
    let translator = AzureTranslator::new(cfg.translator.clone())?;

    let service = DocumentTranslationService {
        parser: DocxParser,
        generator_builder: DocxGeneratorBuilder,
        translator,
        target_lang: cfg.translator.target_lang.clone(),
    };
    service.process_document(&cfg.document_path).await
}

/// Fetches the configured article, extracts its readable text and translates it with the chat
/// model.
pub async fn translate_article(cfg: &ArticleConfig) -> Result<String, ArticleError> {
    let extractor = ArticleExtractor::new(cfg.fetch_timeout)
        .map_err(|err| ArticleError::Setup(err.to_string()))?;
    let llm = AzureChatBuilder::new(cfg.chat.clone())
        .build()
        .map_err(|err| ArticleError::Setup(err.to_string()))?;

    let service = ArticleTranslationService {
        extractor,
        llm,
        max_chars: cfg.max_chars,
        target_language: cfg.target_language.clone(),
    };
    service.run(&cfg.url).await
}

#[derive(Debug)]
pub enum ConfigurationError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
    Load(::config::ConfigError),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::Missing(key) => {
                write!(f, "{} environment variable not set", key)
            }
            ConfigurationError::Invalid { key, reason } => {
                write!(f, "Invalid value for {}: {}", key, reason)
            }
            ConfigurationError::Load(e) => {
                write!(f, "Could not load configuration: {}", e)
            }
        }
    }
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigurationError::Load(err)
    }
}

#[derive(Debug)]
pub enum ParseError {
    UnsupportedFormatError { supported_formats: Vec<String> },
    OtherError(anyhow::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnsupportedFormatError { supported_formats } => {
                write!(
                    f,
                    "Unsupported format. Supported formats: {:?}",
                    supported_formats
                )
            }
            ParseError::OtherError(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

#[derive(Debug)]
pub enum TranslationError {
    ConfigError(ConfigurationError),
    ParseError(ParseError),
    IoError(std::io::Error),
    /// Translator answered with a non-2xx status.
    ServiceError { status: u16, body: String },
    ConnectionError(anyhow::Error),
    MalformedResponse(anyhow::Error),
    OtherError(anyhow::Error),
}

impl Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::ConfigError(e) => {
                write!(f, "Configuration error: {}", e)
            }
            TranslationError::ParseError(e) => {
                write!(f, "Parsing failed: {}", e)
            }
            TranslationError::IoError(e) => {
                write!(f, "IO error: {}", e)
            }
            TranslationError::ServiceError { status, body } => {
                write!(f, "Service returned HTTP {}: {}", status, body)
            }
            TranslationError::ConnectionError(e) => {
                write!(f, "Connection error: {}", e)
            }
            TranslationError::MalformedResponse(e) => {
                write!(f, "Malformed response: {}", e)
            }
            TranslationError::OtherError(e) => {
                write!(f, "Error: {}", e)
            }
        }
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(err: std::io::Error) -> Self {
        TranslationError::IoError(err)
    }
}

#[derive(Debug)]
pub enum LLMError {
    ConfigError(String),
    ConnectionError(anyhow::Error),
    ApiError(anyhow::Error),
    InteractionError(anyhow::Error),
    OtherError(anyhow::Error),
}

impl Display for LLMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            LLMError::ConnectionError(e) => write!(f, "Connection error: {}", e),
            LLMError::ApiError(e) => write!(f, "API error: {}", e),
            LLMError::InteractionError(e) => write!(f, "Unexpected response: {}", e),
            LLMError::OtherError(e) => write!(f, "Error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(url::ParseError),
    ConnectionError(reqwest::Error),
    HttpStatus(u16),
    OtherError(anyhow::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            FetchError::ConnectionError(e) => write!(f, "Request failed: {}", e),
            FetchError::HttpStatus(status) => write!(f, "HTTP status {}", status),
            FetchError::OtherError(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub enum ArticleError {
    /// A client could not be constructed.
    Setup(String),
    Extraction(FetchError),
    EmptyContent,
    Translation(LLMError),
    EmptyTranslation,
}

impl Display for ArticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticleError::Setup(msg) => write!(f, "{}", msg),
            ArticleError::Extraction(e) => write!(f, "Extraction failed: {}", e),
            ArticleError::EmptyContent => write!(f, "No readable content found"),
            ArticleError::Translation(e) => write!(f, "Translation failed: {}", e),
            ArticleError::EmptyTranslation => write!(f, "Model returned an empty translation"),
        }
    }
}
