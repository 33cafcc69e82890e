use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no slide files found (expected slides.md, 01-slides.md, slides-topic.md or 01-slides-topic.md)")]
    NoSlides,

    #[error("refusing to use {} as output directory: it contains the project root {}", out.display(), root.display())]
    UnsafeOutDir { out: PathBuf, root: PathBuf },

    #[error("command is empty: {0}")]
    EmptyCommand(String),

    #[error("failed to spawn '{program}': {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    ToolFailed { command: String, status: String },

    #[error("port {base} + {count} decks exceeds 65535")]
    PortRange { base: u16, count: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
