use std::path::PathBuf;

use crate::{
    config::RenderConfig,
    error::{StoryError, StoryResult},
    gif_gen::{
        frame::{load_font, Compositor},
        subtitle, Animation,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryFrame {
    pub image: PathBuf,
    pub caption: String,
}

/// Paragraphs matched to their pictures, in display order.
#[derive(Debug, Clone, Default)]
pub struct Storyboard {
    frames: Vec<StoryFrame>,
}

impl Storyboard {
    pub fn pair(paragraphs: Vec<String>, images: Vec<PathBuf>) -> StoryResult<Self> {
        if paragraphs.len() != images.len() {
            return Err(StoryError::InputShape {
                paragraphs: paragraphs.len(),
                images: images.len(),
            });
        }

        let frames = paragraphs
            .into_iter()
            .zip(images)
            .map(|(caption, image)| StoryFrame { image, caption })
            .collect();

        Ok(Storyboard { frames })
    }

    pub fn frames(&self) -> &[StoryFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[tracing::instrument(skip_all, fields(frames = self.frames.len()))]
    pub fn render(&self, config: &RenderConfig) -> StoryResult<Animation> {
        config.validate()?;

        let font = load_font(&config.font_path)?;
        let compositor = Compositor::new(font, config.font_size, config.min_section_height);

        let mut frames = Vec::with_capacity(self.frames.len());
        for (idx, frame) in self.frames.iter().enumerate() {
            let image = image::open(&frame.image)
                .map_err(|err| StoryError::resource(&frame.image, err))?
                .to_rgba8();
            let lines = subtitle::split(&frame.caption, config.max_line_len);

            tracing::debug!(idx, lines = lines.len(), "compositing {}", frame.image.display());

            frames.push(compositor.composite(image, &lines));
        }

        Animation::assemble(frames, config.frame_duration, config.looping)?
            .with_encoder_speed(config.encoder_speed)
    }
}
