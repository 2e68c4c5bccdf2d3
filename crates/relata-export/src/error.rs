use serde::Serialize;
use thiserror::Error;

use relata_core::error::CoreError;

use crate::document::ResourceOrigin;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid render input: {0}")]
    Input(String),

    #[error("invalid style configuration: {field}: {reason}")]
    Style { field: &'static str, reason: String },

    #[error("document assembly failed: {0}")]
    TemplateRender(String),

    #[error("render engine failed{}: {message}", origin_suffix(.origin))]
    RenderEngine {
        origin: Option<ResourceOrigin>,
        message: String,
    },

    #[error("render engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn origin_suffix(origin: &Option<ResourceOrigin>) -> String {
    origin
        .as_ref()
        .map(|o| format!(" ({o})"))
        .unwrap_or_default()
}

/// Coarse failure class reported to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    Style,
    RenderEngine,
    Internal,
}

/// Serializable error body handed back instead of PDF bytes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Input(_) | ExportError::Serialization(_) => ErrorKind::Input,
            ExportError::Style { .. } => ErrorKind::Style,
            ExportError::RenderEngine { .. } | ExportError::EngineUnavailable(_) => {
                ErrorKind::RenderEngine
            }
            ExportError::TemplateRender(_) | ExportError::Io(_) => ErrorKind::Internal,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        // Tera keeps the useful part of the message in the source chain.
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        ExportError::TemplateRender(message)
    }
}

impl From<CoreError> for ExportError {
    fn from(e: CoreError) -> Self {
        ExportError::Input(e.to_string())
    }
}
