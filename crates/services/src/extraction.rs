use tracing::info;

use crate::backend::QuizBackend;
use crate::error::ExtractionError;

/// Where the article text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Url(String),
    Pdf { file_name: String, bytes: Vec<u8> },
}

impl ContentSource {
    /// Human-readable origin, sent to the generator as `source_label`.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ContentSource::Url(url) => url.trim(),
            ContentSource::Pdf { file_name, .. } => file_name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ContentSource::Url(_) => "URL",
            ContentSource::Pdf { .. } => "PDF",
        }
    }

    /// Local checks that never touch the network.
    ///
    /// # Errors
    ///
    /// Returns `MissingUrl`, `MissingFile` or `NotPdf`.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        match self {
            ContentSource::Url(url) if url.trim().is_empty() => Err(ExtractionError::MissingUrl),
            ContentSource::Url(_) => Ok(()),
            ContentSource::Pdf { file_name, bytes } => {
                if file_name.trim().is_empty() || bytes.is_empty() {
                    return Err(ExtractionError::MissingFile);
                }
                if !file_name.to_ascii_lowercase().ends_with(".pdf") {
                    return Err(ExtractionError::NotPdf {
                        file_name: file_name.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Extract article text for quiz generation.
///
/// # Errors
///
/// Returns a validation variant of `ExtractionError` without calling the
/// backend, or `ExtractionError::Backend` when the backend call fails.
pub async fn extract_content(
    backend: &dyn QuizBackend,
    source: ContentSource,
) -> Result<String, ExtractionError> {
    source.validate()?;
    let kind = source.kind();
    let content = match source {
        ContentSource::Url(url) => backend.extract_from_url(url.trim()).await?,
        ContentSource::Pdf { file_name, bytes } => {
            backend.extract_from_pdf(&file_name, bytes).await?
        }
    };
    info!(source = kind, chars = content.chars().count(), "content extracted");
    Ok(content)
}
