//! Text-generation backends the consult can run on.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use futures::future::BoxFuture;
use tracing::info;

use crate::error::ConsultError;

/// Sampling temperature for consult answers.
pub const TEMPERATURE: f32 = 0.2;

/// A one-shot system + user prompt to text completion.
pub trait ConsultBackend: Send + Sync {
    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>>;

    /// False when the backend can never answer, e.g. no model was set up.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Amazon Bedrock through the Converse API.
pub struct BedrockConsult {
    client: Client,
    model_id: String,
    max_tokens: i32,
}

impl BedrockConsult {
    pub fn new(client: Client, model_id: impl Into<String>, max_tokens: i32) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn converse(&self, system_prompt: &str, user_message: &str) -> Result<String, ConsultError> {
        let inference = InferenceConfiguration::builder()
            .temperature(TEMPERATURE)
            .max_tokens(self.max_tokens)
            .build();

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(user_message.to_string()))
                    .build()
                    .map_err(|e| ConsultError::Invocation(e.to_string()))?,
            )
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| ConsultError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| ConsultError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            info!(
                model = %self.model_id,
                input_tokens = usage.input_tokens(),
                output_tokens = usage.output_tokens(),
                "consult completed"
            );
        }

        Ok(text)
    }
}

impl ConsultBackend for BedrockConsult {
    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>> {
        Box::pin(self.converse(system_prompt, user_message))
    }
}

/// Stands in when consults are switched off or no model is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledConsult;

impl ConsultBackend for DisabledConsult {
    fn generate<'a>(
        &'a self,
        _system_prompt: &'a str,
        _user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>> {
        Box::pin(async { Err(ConsultError::NotConfigured) })
    }

    fn is_configured(&self) -> bool {
        false
    }
}
