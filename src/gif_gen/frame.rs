use std::path::Path;

use glam::IVec2;
use image::{imageops, Rgba, RgbaImage};
use rusttype::{Font, Scale};

use crate::error::{StoryError, StoryResult};

pub const OVERLAY_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);
pub const CAPTION_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// Left margin of the caption and its distance from the bottom edge.
const CAPTION_ANCHOR: IVec2 = IVec2::new(5, 100);
const LINE_GAP: i32 = 2;

pub fn load_font(path: impl AsRef<Path>) -> StoryResult<Font<'static>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|err| StoryError::resource(path, err))?;

    Font::try_from_vec(data)
        .ok_or_else(|| StoryError::resource(path, "not a TrueType or OpenType font"))
}

/// Composites a black layer of opacity `alpha` over every pixel.
///
/// Integer "over" blending, so opaque pixels stay fully opaque.
fn darken(frame: &mut RgbaImage, alpha: u8) {
    let alpha = alpha as u32;
    let keep = 255 - alpha;

    for px in frame.pixels_mut() {
        let base = px[3] as u32;
        let out = alpha + (base * keep + 127) / 255;
        if out == 0 {
            continue;
        }

        let den = 255 * out;
        for c in &mut px.0[..3] {
            *c = ((*c as u32 * base * keep + den / 2) / den) as u8;
        }
        px[3] = out as u8;
    }
}

/// Burns caption lines into frames.
#[derive(Debug, Clone)]
pub struct Compositor {
    font: Font<'static>,
    font_size: u32,
    min_section_height: u32,
}

impl Compositor {
    pub fn new(font: Font<'static>, font_size: u32, min_section_height: u32) -> Self {
        Compositor {
            font,
            font_size,
            min_section_height,
        }
    }

    /// Darkens the whole image with a half transparent black layer and draws
    /// `lines` on top of it, starting 100px above the bottom edge.
    ///
    /// Images shorter than the minimum section height are stretched to it
    /// first so the caption block stays inside the frame.
    pub fn composite(&self, image: RgbaImage, lines: &[String]) -> RgbaImage {
        let mut frame = if image.height() < self.min_section_height {
            imageops::resize(
                &image,
                image.width(),
                self.min_section_height,
                imageops::FilterType::Lanczos3,
            )
        } else {
            image
        };

        darken(&mut frame, OVERLAY_COLOR[3]);

        let scale = Scale::uniform(self.font_size as f32);
        let mut cursor = IVec2::new(CAPTION_ANCHOR.x, frame.height() as i32 - CAPTION_ANCHOR.y);

        for line in lines {
            imageproc::drawing::draw_text_mut(
                &mut frame,
                CAPTION_COLOR,
                cursor.x,
                cursor.y,
                scale,
                &self.font,
                line,
            );
            cursor.y += self.font_size as i32 + LINE_GAP;
        }

        frame
    }
}
