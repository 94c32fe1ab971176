use std::path::PathBuf;

use crate::{
    config::StoryOptions,
    error::{StoryError, StoryResult},
    storyboard::Storyboard,
    workspace::Workspace,
    ImageGenerator, TextGenerator,
};

const PROMPT_SUFFIX: &str =
    ". Mention the prompt details in each sentence. Output each sentence in a JSON list.";

pub fn story_prompt(prompt: &str) -> String {
    format!("{}{PROMPT_SUFFIX}", prompt.trim().trim_end_matches('.'))
}

/// Pulls the JSON list of paragraphs out of a completion. Text around the
/// list (code fences, chatter) is ignored.
pub fn parse_paragraphs(raw: &str) -> StoryResult<Vec<String>> {
    let json = match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    };

    let paragraphs: Vec<String> = serde_json::from_str(json).map_err(|err| {
        StoryError::generation(format!("story is not a JSON list of strings ({err}): {raw}"))
    })?;

    let paragraphs: Vec<String> = paragraphs
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(StoryError::generation("story has no paragraphs"));
    }

    Ok(paragraphs)
}

/// One prompt in, one GIF out.
///
/// Without a painter the images already sitting in the output directory are
/// used instead of generating new ones.
pub struct Story<T, I> {
    writer: T,
    painter: Option<I>,
    options: StoryOptions,
}

impl<T: TextGenerator, I: ImageGenerator> Story<T, I> {
    pub fn new(writer: T, painter: Option<I>, options: StoryOptions) -> Self {
        Story {
            writer,
            painter,
            options,
        }
    }

    pub async fn paragraphs(&self, prompt: &str) -> StoryResult<Vec<String>> {
        let raw = self.writer.complete(&story_prompt(prompt)).await?;
        parse_paragraphs(&raw)
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, prompt: &str) -> StoryResult<PathBuf> {
        self.options.render.validate()?;

        let workspace = Workspace::prepare(&self.options.output_dir)?;
        if self.options.clear_output_dir {
            tracing::info!("clearing {}", workspace.dir().display());
            workspace.clear()?;
        }

        let paragraphs = self.paragraphs(prompt).await?;
        tracing::info!("story has {} paragraphs", paragraphs.len());

        // Leftover jpegs first, so freshly generated frames replace them.
        workspace.convert_images()?;

        if let Some(painter) = &self.painter {
            for (idx, paragraph) in paragraphs.iter().enumerate() {
                let bytes = painter.generate(paragraph).await?;
                workspace.save_png(idx, &bytes)?;
            }
        }

        let mut images = workspace.existing_frames();
        images.truncate(paragraphs.len());

        let animation = Storyboard::pair(paragraphs, images)?.render(&self.options.render)?;
        animation.persist(&self.options.output)?;

        Ok(self.options.output.clone())
    }
}
