use super::{BatchOutcome, BatchTranslator, FailurePolicy};
use crate::config::TranslatorConfig;
use crate::parser::Segment;
use crate::{ConfigurationError, TranslationError};

use anyhow::anyhow;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const API_VERSION: &str = "3.0";

/// Documented per-call element limit of the Translator v3 API. Not enforced.
pub const MAX_BATCH_ELEMENTS: usize = 100;

#[derive(Debug, Serialize)]
struct RequestItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponseItem {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
struct TranslationItem {
    text: String,
}

/// Client for the Azure AI Translator `/translate` endpoint.
pub struct AzureTranslator {
    http: Client,
    url: Url,
    subscription_key: String,
    region: String,
    source_lang: String,
    target_lang: String,
    policy: FailurePolicy,
}

impl AzureTranslator {
    pub fn new(cfg: TranslatorConfig) -> Result<Self, TranslationError> {
        if cfg.subscription_key.trim().is_empty() {
            return Err(TranslationError::ConfigError(ConfigurationError::Missing(
                "AZURE_TRANSLATOR_KEY",
            )));
        }

        let base = cfg.endpoint.trim_end_matches('/');
        let url = Url::parse(&format!("{}/translate", base)).map_err(|e| {
            TranslationError::ConfigError(ConfigurationError::Invalid {
                key: "AZURE_TRANSLATOR_ENDPOINT",
                reason: e.to_string(),
            })
        })?;

        let http = Client::builder()
            .build()
            .map_err(|e| TranslationError::OtherError(e.into()))?;

        Ok(AzureTranslator {
            http,
            url,
            subscription_key: cfg.subscription_key,
            region: cfg.region,
            source_lang: cfg.source_lang,
            target_lang: cfg.target_lang,
            policy: cfg.failure_policy,
        })
    }

    async fn request(&self, body: &[RequestItem<'_>]) -> Result<Vec<Segment>, TranslationError> {
        let response = self
            .http
            .post(self.url.clone())
            .query(&[
                ("api-version", API_VERSION),
                ("from", self.source_lang.as_str()),
                ("to", self.target_lang.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(body)
            .send()
            .await
            .map_err(|e| TranslationError::ConnectionError(e.into()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TranslationError::ConnectionError(e.into()))?;
        if !status.is_success() {
            return Err(TranslationError::ServiceError {
                status: status.as_u16(),
                body: text,
            });
        }

        let items: Vec<ResponseItem> = serde_json::from_str(&text)
            .map_err(|e| TranslationError::MalformedResponse(e.into()))?;

        if items.len() != body.len() {
            // Alignment is assumed by callers, not checked.
            log::warn!(
                "Sent {} segments but received {} translations",
                body.len(),
                items.len()
            );
        }

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                item.translations
                    .into_iter()
                    .next()
                    .map(|t| Segment(t.text))
                    .ok_or_else(|| {
                        TranslationError::MalformedResponse(anyhow!(
                            "Item {} has no translations",
                            idx
                        ))
                    })
            })
            .collect()
    }
}

impl BatchTranslator for AzureTranslator {
    async fn translate_batch(&self, segments: &[Segment]) -> Result<BatchOutcome, TranslationError> {
        let body = segments
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| RequestItem { text: &s.0 })
            .collect::<Vec<_>>();

        if body.is_empty() {
            return Ok(BatchOutcome::Translated(vec![]));
        }
        if body.len() > MAX_BATCH_ELEMENTS {
            log::warn!(
                "Batch of {} segments exceeds the service limit of {}",
                body.len(),
                MAX_BATCH_ELEMENTS
            );
        }

        log::info!(
            "Translating {} segments ({} -> {})",
            body.len(),
            self.source_lang,
            self.target_lang
        );

        match self.request(&body).await {
            Ok(translated) => Ok(BatchOutcome::Translated(translated)),
            Err(err) => {
                log::error!("Translation Error: {}", err);
                match self.policy {
                    FailurePolicy::FailOpen => Ok(BatchOutcome::Fallback {
                        original: segments.to_vec(),
                        cause: err,
                    }),
                    FailurePolicy::FailClosed => Err(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, unreachable_url};

    fn config(endpoint: &str, policy: FailurePolicy) -> TranslatorConfig {
        TranslatorConfig {
            subscription_key: "secret".to_owned(),
            endpoint: endpoint.to_owned(),
            region: "eastus2".to_owned(),
            source_lang: "en".to_owned(),
            target_lang: "pt-br".to_owned(),
            failure_policy: policy,
        }
    }

    fn segments(texts: &[&str]) -> Vec<Segment> {
        texts.iter().map(|t| Segment::from(*t)).collect()
    }

    #[tokio::test]
    async fn translates_in_request_order() {
        let (url, server) = serve_once(
            200,
            "application/json",
            r#"[{"translations":[{"text":"Olá","to":"pt-br"}]},{"translations":[{"text":"Mundo","to":"pt-br"}]}]"#,
        )
        .await;
        let translator = AzureTranslator::new(config(&url, FailurePolicy::FailOpen)).unwrap();

        let outcome = translator
            .translate_batch(&segments(&["Hello", "   ", "World"]))
            .await
            .unwrap();

        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_segments(), segments(&["Olá", "Mundo"]));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /translate?api-version=3.0&from=en&to=pt-br "));
        let lowercase = request.to_lowercase();
        assert!(lowercase.contains("ocp-apim-subscription-key: secret"));
        assert!(lowercase.contains("ocp-apim-subscription-region: eastus2"));
        assert!(lowercase.contains("content-type: application/json"));
        assert!(request.ends_with(r#"[{"text":"Hello"},{"text":"World"}]"#));
    }

    #[tokio::test]
    async fn blank_input_skips_the_network() {
        let translator =
            AzureTranslator::new(config(&unreachable_url(), FailurePolicy::FailOpen)).unwrap();

        let outcome = translator
            .translate_batch(&segments(&["", "  ", "\n\t"]))
            .await
            .unwrap();

        assert!(!outcome.is_fallback());
        assert!(outcome.into_segments().is_empty());
    }

    #[tokio::test]
    async fn server_error_falls_back_to_input() {
        let (url, _server) = serve_once(500, "text/plain", "boom").await;
        let translator = AzureTranslator::new(config(&url, FailurePolicy::FailOpen)).unwrap();
        let input = segments(&["Hello", "", "World"]);

        let outcome = translator.translate_batch(&input).await.unwrap();

        match outcome {
            BatchOutcome::Fallback { original, cause } => {
                assert_eq!(original, input);
                assert!(matches!(cause, TranslationError::ServiceError { status: 500, .. }));
            }
            other => panic!("Expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_failure_falls_back_to_input() {
        let translator =
            AzureTranslator::new(config(&unreachable_url(), FailurePolicy::FailOpen)).unwrap();
        let input = segments(&["Hello"]);

        let outcome = translator.translate_batch(&input).await.unwrap();

        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_segments(), input);
    }

    #[tokio::test]
    async fn malformed_body_falls_back_to_input() {
        let (url, _server) =
            serve_once(200, "application/json", r#"[{"translations":[]}]"#).await;
        let translator = AzureTranslator::new(config(&url, FailurePolicy::FailOpen)).unwrap();
        let input = segments(&["Hello"]);

        let outcome = translator.translate_batch(&input).await.unwrap();

        match outcome {
            BatchOutcome::Fallback { original, cause } => {
                assert_eq!(original, input);
                assert!(matches!(cause, TranslationError::MalformedResponse(_)));
            }
            other => panic!("Expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fail_closed_surfaces_the_error() {
        let (url, _server) = serve_once(401, "application/json", r#"{"error":{}}"#).await;
        let translator = AzureTranslator::new(config(&url, FailurePolicy::FailClosed)).unwrap();

        let result = translator.translate_batch(&segments(&["Hello"])).await;

        assert!(matches!(
            result,
            Err(TranslationError::ServiceError { status: 401, .. })
        ));
    }

    #[test]
    fn blank_key_is_rejected_at_construction() {
        let mut cfg = config("https://api.cognitive.microsofttranslator.com", FailurePolicy::FailOpen);
        cfg.subscription_key = "  ".to_owned();

        let result = AzureTranslator::new(cfg);

        assert!(matches!(
            result,
            Err(TranslationError::ConfigError(ConfigurationError::Missing("AZURE_TRANSLATOR_KEY")))
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        let result = AzureTranslator::new(config("not a url", FailurePolicy::FailOpen));

        assert!(matches!(
            result,
            Err(TranslationError::ConfigError(ConfigurationError::Invalid { .. }))
        ));
    }
}
