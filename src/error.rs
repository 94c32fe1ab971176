use std::path::PathBuf;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("failed to load {}: {reason}", path.display())]
    Resource { path: PathBuf, reason: String },

    #[error("failed to encode animation: {0}")]
    Encoding(String),

    #[error("got {paragraphs} paragraphs but {images} images")]
    InputShape { paragraphs: usize, images: usize },

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StoryError {
    pub fn resource(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Resource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encoding(msg: impl ToString) -> Self {
        Self::Encoding(msg.to_string())
    }

    pub fn generation(msg: impl ToString) -> Self {
        Self::Generation(msg.to_string())
    }
}

impl From<reqwest::Error> for StoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Generation(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for StoryError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Self::Generation(err.to_string())
    }
}
