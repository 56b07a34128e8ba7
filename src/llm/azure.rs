use super::{LLM, LLMBuilder};
use crate::LLMError;
use crate::config::ChatConfig;

use anyhow::anyhow;
use async_openai::Client;
use async_openai::config::AzureConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use backoff::ExponentialBackoffBuilder;
use std::error::Error;
use std::time::Duration;

/// Builder for Azure OpenAI chat deployments
pub struct AzureChatBuilder {
    cfg: ChatConfig,
}

impl AzureChatBuilder {
    pub fn new(cfg: ChatConfig) -> Self {
        AzureChatBuilder { cfg }
    }
}

impl LLMBuilder for AzureChatBuilder {
    type Built = AzureChat;

    fn build(&self) -> Result<Self::Built, LLMError> {
        let endpoint = self
            .cfg
            .endpoint
            .as_deref()
            .ok_or_else(|| LLMError::ConfigError("AZURE_ENDPOINT is not set".to_owned()))?;
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::ConfigError("AZURE_API_KEY is not set".to_owned()))?;

        let config = AzureConfig::new()
            .with_api_base(endpoint)
            .with_api_key(api_key)
            .with_api_version(&self.cfg.api_version)
            .with_deployment_id(&self.cfg.deployment);

        // One attempt per call, no rate-limit retries.
        let no_retries = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(config).with_backoff(no_retries);

        Ok(AzureChat {
            client,
            deployment: self.cfg.deployment.clone(),
        })
    }
}

pub struct AzureChat {
    client: Client<AzureConfig>,
    deployment: String,
}

impl AzureChat {
    async fn complete(&self, text: &str, target_language: &str) -> Result<String, LLMError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(super::system_prompt(target_language))
            .build()?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(text)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.deployment)
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .build()?;

        log::info!(
            r#"Sending {} characters to "{}""#,
            text.chars().count(),
            self.deployment
        );
        let response = self.client.chat().create(request).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            LLMError::InteractionError(anyhow!("Response contains no choices"))
        })?;
        choice.message.content.ok_or_else(|| {
            LLMError::InteractionError(anyhow!(
                "Response has no text content (finish reason: {:?})",
                choice.finish_reason
            ))
        })
    }
}

impl LLM for AzureChat {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, LLMError> {
        self.complete(text, target_language)
            .await
            .inspect_err(|e| log::error!("Translation error: {}", e))
    }
}

impl From<OpenAIError> for LLMError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(e) => LLMError::ConnectionError(if let Some(e) = e.source() {
                anyhow!("{e}")
            } else {
                e.into()
            }),
            OpenAIError::ApiError(e) => LLMError::ApiError(anyhow!("{e}")),
            OpenAIError::JSONDeserialize(e) => LLMError::InteractionError(e.into()),
            OpenAIError::FileSaveError(e) => LLMError::OtherError(anyhow!("{e}")),
            OpenAIError::FileReadError(e) => LLMError::OtherError(anyhow!("{e}")),
            OpenAIError::StreamError(e) => LLMError::ConnectionError(anyhow!("{e}")),
            OpenAIError::InvalidArgument(e) => LLMError::OtherError(anyhow!("{e}")),
        }
    }
}
