use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use story_gif::{
    config::{
        RenderConfig, StoryOptions, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, DEFAULT_MAX_LINE_LEN,
        DEFAULT_MIN_SECTION_HEIGHT,
    },
    deepai, openai,
    story::Story,
    ImageGenerator, StoryResult,
};
use tracing_subscriber::EnvFilter;

/// Generate a captioned GIF from an adventure story prompt.
#[derive(Parser, Debug)]
#[command(name = "story-gif", version)]
struct Cli {
    /// The prompt text for the adventure story.
    #[arg(long)]
    prompt: String,

    /// Where to write the GIF.
    #[arg(long, default_value = "output.gif")]
    output: PathBuf,

    /// Directory for the per-paragraph images.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Keep whatever is already in the output directory.
    #[arg(long)]
    disable_delete: bool,

    /// Do not generate images, reuse `0.png`, `1.png`, ... from the output directory.
    #[arg(long)]
    disable_image: bool,

    /// Shorthand for `--disable-delete --disable-image`.
    #[arg(long)]
    disable_both: bool,

    #[arg(long, value_enum, default_value_t = Provider::Deepai)]
    image_provider: Provider,

    /// Chat model used to write the story.
    #[arg(long, default_value = openai::story::DEFAULT_MODEL)]
    model: String,

    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: u32,

    /// Caption lines are wrapped at this many characters.
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// How long every frame is shown, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    duration_ms: u64,

    /// Shorter images are stretched to this height before captioning.
    #[arg(long, default_value_t = DEFAULT_MIN_SECTION_HEIGHT)]
    min_section_height: u32,

    /// Play the animation once instead of looping forever.
    #[arg(long)]
    no_loop: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Provider {
    Openai,
    Deepai,
}

enum Painter {
    OpenAi(openai::ImageGenerator),
    DeepAi(deepai::Client),
}

impl ImageGenerator for Painter {
    async fn generate(&self, description: &str) -> StoryResult<Vec<u8>> {
        match self {
            Painter::OpenAi(painter) => painter.generate(description).await,
            Painter::DeepAi(painter) => painter.generate(description).await,
        }
    }
}

impl Cli {
    fn options(&self) -> StoryOptions {
        StoryOptions {
            output_dir: self.output_dir.clone(),
            output: self.output.clone(),
            clear_output_dir: !(self.disable_delete || self.disable_both),
            render: RenderConfig {
                max_line_len: self.max_line_len,
                font_path: self.font.clone(),
                font_size: self.font_size,
                frame_duration: Duration::from_millis(self.duration_ms),
                min_section_height: self.min_section_height,
                looping: !self.no_loop,
                ..Default::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {err}");
    }

    let cli = Cli::parse();

    let openai_client = openai::Client::from_env().context("OpenAI credentials are required")?;
    let writer = openai::StoryWriter::new(openai_client.clone(), cli.model.clone());

    let painter = if cli.disable_image || cli.disable_both {
        None
    } else {
        Some(match cli.image_provider {
            Provider::Openai => Painter::OpenAi(openai::ImageGenerator::new(openai_client)),
            Provider::Deepai => Painter::DeepAi(
                deepai::Client::from_env().context("DeepAI credentials are required")?,
            ),
        })
    };

    let start = std::time::Instant::now();
    let output = Story::new(writer, painter, cli.options())
        .run(&cli.prompt)
        .await
        .context("failed to make the story gif")?;

    tracing::info!("made {} in {:?}", output.display(), start.elapsed());

    Ok(())
}
