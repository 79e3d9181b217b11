use thiserror::Error;

/// Errors raised while configuring or driving a [`crate::TransitionController`].
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition configuration: {0}")]
    Configuration(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Failure reported by a [`crate::TextureLoader`] for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to load texture from {source_id}: {reason}")]
    Failed { source_id: String, reason: String },
    #[error("texture loader for {0} disconnected before returning a result")]
    Disconnected(String),
}

impl LoadError {
    pub fn failed(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Failed {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn source_id(&self) -> &str {
        match self {
            LoadError::Failed { source_id, .. } => source_id,
            LoadError::Disconnected(source_id) => source_id,
        }
    }
}
