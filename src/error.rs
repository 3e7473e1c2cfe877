use crate::classify::{self, FailureKind};

pub type PublishResult<T> = Result<T, PublishError>;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("{tool} not found! Please install it.")]
    ToolNotInstalled { tool: String },

    #[error("command failed: {command}: {stderr}")]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from {command}: {reason}")]
    UnexpectedOutput { command: String, reason: String },

    #[error("invalid image reference: {0}")]
    InvalidReference(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl PublishError {
    /// Whether this error came from an external tool, either
    /// because it is missing or because it misbehaved.
    #[must_use]
    pub const fn is_external_tool(&self) -> bool {
        matches!(
            self,
            Self::ToolNotInstalled { .. } | Self::ToolFailed { .. } | Self::UnexpectedOutput { .. }
        )
    }

    /// Classification of a failed tool's stderr. `None` for every
    /// error that is not [`PublishError::ToolFailed`].
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::ToolFailed { stderr, .. } => Some(classify::classify(stderr)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.failure_kind() == Some(FailureKind::NotFound)
    }
}
