//! Settings for both pipelines, read once from an optional TOML file and the process
//! environment. Environment variables win over the file; keys are matched case-insensitively.

use crate::ConfigurationError;
use crate::translator::FailurePolicy;

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Names the TOML file to read; `polyglot.toml` in the working directory otherwise.
pub const CONFIG_PATH_VAR: &str = "POLYGLOT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "polyglot.toml";

pub const DEFAULT_TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";
pub const DEFAULT_REGION: &str = "eastus2";
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_DEPLOYMENT: &str = "gpt-5-nano";
pub const DEFAULT_MAX_CHARS: usize = 6000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const DEFAULT_DOCUMENT_PATH: &str = "Niccolo Machiavelli by Matthew Wills.docx";
const DEFAULT_ARTICLE_URL: &str = "https://dev.to/gde/gemini-cli-google-developer-knowledge-api-and-mcp-server-equipping-your-ai-assistant-with-an-3gee";

#[derive(Debug, Deserialize)]
struct RawSettings {
    azure_translator_key: Option<String>,
    azure_translator_endpoint: String,
    azure_location: String,
    source_lang: String,
    target_lang: String,
    failure_policy: FailurePolicy,
    document_path: PathBuf,

    azure_endpoint: Option<String>,
    azure_api_key: Option<String>,
    azure_api_version: String,
    azure_deployment: String,
    article_url: String,
    article_language: String,
    max_chars: usize,
    fetch_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub subscription_key: String,
    pub endpoint: String,
    pub region: String,
    pub source_lang: String,
    pub target_lang: String,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub translator: TranslatorConfig,
    pub document_path: PathBuf,
}

/// Presence of the endpoint and key is only checked when the client gets built.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: String,
    pub deployment: String,
}

#[derive(Debug, Clone)]
pub struct ArticleConfig {
    pub chat: ChatConfig,
    pub url: String,
    pub target_language: String,
    pub max_chars: usize,
    pub fetch_timeout: Duration,
}

/// Reads the config file named by [`CONFIG_PATH_VAR`] (if it exists) and the environment.
pub fn load() -> Result<Config, ConfigurationError> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
    let config = with_defaults(Config::builder())?
        .add_source(File::new(&path, FileFormat::Toml).required(false))
        .add_source(environment())
        .build()?;
    Ok(config)
}

/// Values stay strings until deserialized, so keys and paths keep leading zeros.
fn environment() -> Environment {
    Environment::default()
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigurationError> {
    Ok(builder
        .set_default("azure_translator_endpoint", DEFAULT_TRANSLATOR_ENDPOINT)?
        .set_default("azure_location", DEFAULT_REGION)?
        .set_default("source_lang", "en")?
        .set_default("target_lang", "pt-br")?
        .set_default("failure_policy", "fail-open")?
        .set_default("document_path", DEFAULT_DOCUMENT_PATH)?
        .set_default("azure_api_version", DEFAULT_API_VERSION)?
        .set_default("azure_deployment", DEFAULT_DEPLOYMENT)?
        .set_default("article_url", DEFAULT_ARTICLE_URL)?
        .set_default("article_language", "Portuguese (Brazil)")?
        .set_default("max_chars", DEFAULT_MAX_CHARS as u64)?
        .set_default("fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?)
}

fn raw_settings(config: &Config) -> Result<RawSettings, ConfigurationError> {
    Ok(config.clone().try_deserialize::<RawSettings>()?)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl DocumentConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let raw = raw_settings(config)?;
        let subscription_key = non_blank(raw.azure_translator_key)
            .ok_or(ConfigurationError::Missing("AZURE_TRANSLATOR_KEY"))?;

        Ok(DocumentConfig {
            translator: TranslatorConfig {
                subscription_key,
                endpoint: raw.azure_translator_endpoint,
                region: raw.azure_location,
                source_lang: raw.source_lang,
                target_lang: raw.target_lang,
                failure_policy: raw.failure_policy,
            },
            document_path: raw.document_path,
        })
    }
}

impl ArticleConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let raw = raw_settings(config)?;
        if raw.max_chars == 0 {
            return Err(ConfigurationError::Invalid {
                key: "MAX_CHARS",
                reason: "must be positive".to_owned(),
            });
        }

        Ok(ArticleConfig {
            chat: ChatConfig {
                endpoint: non_blank(raw.azure_endpoint),
                api_key: non_blank(raw.azure_api_key),
                api_version: raw.azure_api_version,
                deployment: raw.azure_deployment,
            },
            url: raw.article_url,
            target_language: raw.article_language,
            max_chars: raw.max_chars,
            fetch_timeout: Duration::from_secs(raw.fetch_timeout_secs),
        })
    }
}
