#![allow(async_fn_in_trait)]

pub mod config;
pub mod deepai;
pub mod error;
pub mod gif_gen;
pub mod openai;
pub mod story;
pub mod storyboard;
pub mod workspace;

pub use error::{StoryError, StoryResult};

/// Something that can continue a prompt with text.
pub trait TextGenerator {
    async fn complete(&self, prompt: &str) -> StoryResult<String>;
}

/// Something that can paint a picture of a description. Returns the encoded
/// image file (PNG, JPEG, ...).
pub trait ImageGenerator {
    async fn generate(&self, description: &str) -> StoryResult<Vec<u8>>;
}
