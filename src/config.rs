use std::{path::PathBuf, time::Duration};

use crate::{
    error::{StoryError, StoryResult},
    gif_gen::{DEFAULT_ENCODER_SPEED, DEFAULT_FRAME_DURATION},
};

pub const DEFAULT_FONT_PATH: &str = "font/DejaVuSansCondensed-Bold.ttf";
pub const DEFAULT_FONT_SIZE: u32 = 15;
pub const DEFAULT_MAX_LINE_LEN: usize = 75;
pub const DEFAULT_MIN_SECTION_HEIGHT: u32 = 100;

/// Everything the caption and animation stages need to know.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub max_line_len: usize,
    pub font_path: PathBuf,
    pub font_size: u32,
    pub frame_duration: Duration,
    pub min_section_height: u32,
    pub looping: bool,
    pub encoder_speed: i32,
}

impl RenderConfig {
    pub fn validate(&self) -> StoryResult<()> {
        if self.max_line_len == 0 {
            return Err(StoryError::Config("max line length must be positive".into()));
        }
        if self.font_size == 0 {
            return Err(StoryError::Config("font size must be positive".into()));
        }
        if !(1..=30).contains(&self.encoder_speed) {
            return Err(StoryError::Config(format!(
                "encoder speed must be within 1..=30, got {}",
                self.encoder_speed
            )));
        }

        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            font_path: DEFAULT_FONT_PATH.into(),
            font_size: DEFAULT_FONT_SIZE,
            frame_duration: DEFAULT_FRAME_DURATION,
            min_section_height: DEFAULT_MIN_SECTION_HEIGHT,
            looping: true,
            encoder_speed: DEFAULT_ENCODER_SPEED,
        }
    }
}

/// Knobs of a whole run on top of [`RenderConfig`].
#[derive(Debug, Clone)]
pub struct StoryOptions {
    pub output_dir: PathBuf,
    pub output: PathBuf,
    pub clear_output_dir: bool,
    pub render: RenderConfig,
}

impl Default for StoryOptions {
    fn default() -> Self {
        StoryOptions {
            output_dir: "output".into(),
            output: "output.gif".into(),
            clear_output_dir: true,
            render: RenderConfig::default(),
        }
    }
}

/// Reads the first of `keys` that is set in the environment.
pub fn api_key(keys: &[&str]) -> StoryResult<String> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| StoryError::Config(format!("none of {} is set", keys.join(", "))))
}
