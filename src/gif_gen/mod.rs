pub mod frame;
pub mod subtitle;

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
    time::Duration,
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, RgbaImage,
};

use crate::error::{StoryError, StoryResult};

pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(5000);
pub const DEFAULT_ENCODER_SPEED: i32 = 10;

/// An ordered set of captioned frames that all share one display duration.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<RgbaImage>,
    frame_duration: Duration,
    looping: bool,
    encoder_speed: i32,
}

impl Animation {
    pub fn assemble(
        frames: Vec<RgbaImage>,
        frame_duration: Duration,
        looping: bool,
    ) -> StoryResult<Self> {
        if frames.is_empty() {
            return Err(StoryError::encoding("an animation needs at least one frame"));
        }

        Ok(Animation {
            frames,
            frame_duration,
            looping,
            encoder_speed: DEFAULT_ENCODER_SPEED,
        })
    }

    /// NeuQuant sampling speed, `1` (best) to `30` (fastest).
    pub fn with_encoder_speed(mut self, speed: i32) -> StoryResult<Self> {
        if !(1..=30).contains(&speed) {
            return Err(StoryError::Config(format!(
                "encoder speed must be within 1..=30, got {speed}"
            )));
        }

        self.encoder_speed = speed;
        Ok(self)
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn encode<W: Write>(self, writer: W) -> StoryResult<()> {
        let mut encoder = GifEncoder::new_with_speed(writer, self.encoder_speed);

        if self.looping {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(StoryError::encoding)?;
        }

        let delay = Delay::from_saturating_duration(self.frame_duration);
        for (idx, frame) in self.frames.into_iter().enumerate() {
            tracing::debug!(idx, "encoding frame");

            encoder
                .encode_frame(Frame::from_parts(frame, 0, 0, delay))
                .map_err(StoryError::encoding)?;
        }

        Ok(())
    }

    /// Writes the GIF to `path`, replacing whatever is there.
    ///
    /// The file only appears once encoding has fully succeeded.
    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn persist(self, path: &Path) -> StoryResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.encode(&mut writer)?;
            writer.flush()?;
        }

        tmp.persist(path)
            .map_err(|err| StoryError::encoding(err.error))?;

        tracing::info!("wrote {}", path.display());

        Ok(())
    }
}
