#![allow(dead_code)]

use std::{io::Cursor, path::PathBuf, time::Duration};

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;
use story_gif::config::{RenderConfig, StoryOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("font/DejaVuSansCondensed-Bold.ttf")
}

pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba(color))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 160, 90]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

/// Fast settings so encoding stays cheap in debug builds.
pub fn options(root: &std::path::Path) -> StoryOptions {
    StoryOptions {
        output_dir: root.join("output"),
        output: root.join("output.gif"),
        clear_output_dir: true,
        render: RenderConfig {
            font_path: font_path(),
            frame_duration: Duration::from_millis(200),
            encoder_speed: 30,
            ..Default::default()
        },
    }
}

pub fn chat_completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000u32,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub async fn mock_chat(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(content)))
        .mount(server)
        .await;
}

pub async fn mock_deepai(server: &MockServer, image: Vec<u8>) {
    Mock::given(method("POST"))
        .and(path("/api/text2img"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1b2",
            "output_url": format!("{}/media/result.png", server.uri())
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/result.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image))
        .mount(server)
        .await;
}
