use reqwest::header::HeaderValue;

use crate::{
    config::api_key,
    error::{StoryError, StoryResult},
    ImageGenerator,
};

pub const DEFAULT_BASE_URL: &str = "https://api.deepai.org";
pub const API_KEY_VAR: &str = "DEEPAI_API_KEY";

#[derive(Debug, serde::Deserialize)]
struct Text2ImgResponse {
    output_url: Option<String>,
}

/// DeepAI `text2img` backed [`ImageGenerator`].
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    key: HeaderValue,
    base_url: String,
}

impl Client {
    pub fn from_env() -> StoryResult<Self> {
        Self::new(&api_key(&[API_KEY_VAR])?, DEFAULT_BASE_URL)
    }

    pub fn new(key: &str, base_url: &str) -> StoryResult<Self> {
        let mut key = HeaderValue::from_str(key)
            .map_err(|_| StoryError::Config("DeepAI api key is not a valid header".into()))?;
        key.set_sensitive(true);

        Ok(Client {
            http: reqwest::Client::new(),
            key,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl ImageGenerator for Client {
    async fn generate(&self, description: &str) -> StoryResult<Vec<u8>> {
        tracing::info!("generating image for {description:?}");

        let resp = self
            .http
            .post(format!("{}/api/text2img", self.base_url))
            .header("api-key", self.key.clone())
            .form(&[("text", description), ("grid_size", "1")])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(StoryError::generation(format!(
                "text2img returned {status}: {body}"
            )));
        }

        let output_url = serde_json::from_str::<Text2ImgResponse>(&body)
            .ok()
            .and_then(|resp| resp.output_url)
            .ok_or_else(|| {
                StoryError::generation(format!("text2img response has no output_url: {body}"))
            })?;

        tracing::debug!(%output_url, "downloading image");
        let image = self.http.get(&output_url).send().await?.error_for_status()?;

        Ok(image.bytes().await?.to_vec())
    }
}
