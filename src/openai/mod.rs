use async_openai::config::OpenAIConfig;

use crate::{config::api_key, error::StoryResult};

pub mod images;
pub mod story;

pub use images::ImageGenerator;
pub use story::StoryWriter;

pub const API_KEY_VARS: &[&str] = &["CHATGPT_API_KEY", "OPENAI_API_KEY"];

#[derive(Clone)]
pub struct Client(async_openai::Client<OpenAIConfig>);

impl Client {
    pub fn from_env() -> StoryResult<Self> {
        let key = api_key(API_KEY_VARS)?;

        Ok(Self::new(OpenAIConfig::new().with_api_key(key)))
    }

    pub fn new(config: OpenAIConfig) -> Self {
        Client(async_openai::Client::with_config(config))
    }

    pub fn inner(&self) -> &async_openai::Client<OpenAIConfig> {
        &self.0
    }
}
