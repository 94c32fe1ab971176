use async_openai::types::{
    CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize,
};
use base64::Engine;

use super::Client;
use crate::error::{StoryError, StoryResult};

/// DALL-E backed [`crate::ImageGenerator`].
#[derive(Clone)]
pub struct ImageGenerator {
    client: Client,
}

impl ImageGenerator {
    pub fn new(client: Client) -> Self {
        ImageGenerator { client }
    }
}

impl crate::ImageGenerator for ImageGenerator {
    async fn generate(&self, description: &str) -> StoryResult<Vec<u8>> {
        let request = CreateImageRequestArgs::default()
            .prompt(description)
            .model(ImageModel::DallE2)
            .n(1_u8)
            .size(ImageSize::S1024x1024)
            .response_format(ImageResponseFormat::B64Json)
            .build()?;

        tracing::info!("generating image for {description:?}");
        let resp = self.client.inner().images().create(request).await?;

        let image = resp
            .data
            .first()
            .ok_or_else(|| StoryError::generation("image response had no data"))?;

        let Image::B64Json { b64_json, .. } = image.as_ref() else {
            return Err(StoryError::generation("got image response in wrong format"));
        };

        base64::prelude::BASE64_STANDARD
            .decode(b64_json.as_bytes())
            .map_err(StoryError::generation)
    }
}
