use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};

use super::Client;
use crate::{
    error::{StoryError, StoryResult},
    TextGenerator,
};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Writes the story text through the chat completion endpoint.
#[derive(Clone)]
pub struct StoryWriter {
    client: Client,
    model: String,
}

impl StoryWriter {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        StoryWriter {
            client,
            model: model.into(),
        }
    }
}

impl TextGenerator for StoryWriter {
    async fn complete(&self, prompt: &str) -> StoryResult<String> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .temperature(0.0_f32)
            .messages(vec![message])
            .build()?;

        tracing::info!(model = %self.model, "requesting story");
        let resp = self.client.inner().chat().create(request).await?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| StoryError::generation("completion came back without any text"))
    }
}
