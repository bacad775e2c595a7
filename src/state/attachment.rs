//! ID card attachment validation and preview rendering

use crate::error::{RegistrationError, RegistrationResult};
use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

/// Largest accepted ID card image (5 MiB)
pub const MAX_ID_CARD_BYTES: u64 = 5 * 1024 * 1024;

/// A candidate ID card image and its declared metadata
#[derive(Clone, PartialEq, Eq)]
pub struct IdCardFile {
    file_name: String,
    media_type: String,
    data: Bytes,
}

impl IdCardFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing its media type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(file_name, media_type, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl std::fmt::Debug for IdCardFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCardFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Check size first, then declared type
pub fn validate_id_card(file: &IdCardFile) -> RegistrationResult<()> {
    let size = file.size();
    if size > MAX_ID_CARD_BYTES {
        return Err(RegistrationError::FileTooLarge {
            size,
            limit: MAX_ID_CARD_BYTES,
        });
    }
    if !file.media_type().starts_with("image/") {
        return Err(RegistrationError::UnsupportedType(
            file.media_type().to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("file has no content to preview")]
    Empty,
    #[error("preview task failed: {0}")]
    Task(String),
}

/// What the shell should show in place of the ID card thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    #[default]
    None,
    Loading,
    Ready(String),
    /// Rendering failed; the attachment itself is still valid
    Unavailable,
}

/// Preview work handed to the shell after a file is attached
#[derive(Debug)]
pub struct PreviewJob {
    generation: u64,
    file: IdCardFile,
}

/// Output of a finished [`PreviewJob`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    pub generation: u64,
    pub result: Result<String, PreviewError>,
}

impl PreviewJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Encode the image as a data URL off the async executor
    pub async fn render(self) -> RenderedPreview {
        let generation = self.generation;
        let result = tokio::task::spawn_blocking(move || data_url(&self.file))
            .await
            .unwrap_or_else(|e| Err(PreviewError::Task(e.to_string())));
        RenderedPreview { generation, result }
    }
}

fn data_url(file: &IdCardFile) -> Result<String, PreviewError> {
    if file.data().is_empty() {
        return Err(PreviewError::Empty);
    }
    Ok(format!(
        "data:{};base64,{}",
        file.media_type(),
        STANDARD.encode(file.data())
    ))
}

/// Tracks the preview for the current attachment.
///
/// Every attach or detach starts a new generation, so a render that
/// finishes after its file was replaced is discarded.
#[derive(Debug, Clone, Default)]
pub struct PreviewTracker {
    generation: u64,
    state: PreviewState,
}

impl PreviewTracker {
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn begin(&mut self, file: IdCardFile) -> PreviewJob {
        self.generation += 1;
        self.state = PreviewState::Loading;
        PreviewJob {
            generation: self.generation,
            file,
        }
    }

    /// Apply a finished render; returns false when it was stale
    pub fn apply(&mut self, rendered: RenderedPreview) -> bool {
        if rendered.generation != self.generation || self.state != PreviewState::Loading {
            tracing::debug!(generation = rendered.generation, "discarding stale preview");
            return false;
        }
        self.state = match rendered.result {
            Ok(url) => PreviewState::Ready(url),
            Err(e) => {
                tracing::warn!("ID card preview unavailable: {e}");
                PreviewState::Unavailable
            }
        };
        true
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = PreviewState::None;
    }
}
