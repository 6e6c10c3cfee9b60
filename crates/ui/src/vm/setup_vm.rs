use std::path::Path;

use quiz_core::model::{Difficulty, QuestionCount, QuizSettings};
use services::{BackendError, ContentSource, ExtractionError, SessionError};

const BACKEND_HINT: &str = "Ensure the quiz backend is reachable.";

//
// ─── STATUS LINES ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Info => "status status--info",
            StatusKind::Success => "status status--success",
            StatusKind::Error => "status status--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Backend failure. Rejections carry the backend's detail verbatim;
    /// transport failures get a reachability hint.
    #[must_use]
    pub fn from_backend(err: &BackendError) -> Self {
        if err.is_transport() {
            Self::error(format!("Request failed: {err}. {BACKEND_HINT}"))
        } else {
            Self::error(err.to_string())
        }
    }

    #[must_use]
    pub fn from_extraction(err: &ExtractionError) -> Self {
        match err {
            ExtractionError::Backend(err) => Self::from_backend(err),
            other => Self::error(other.to_string()),
        }
    }

    /// `None` for outcomes the user should not see (a response that arrived
    /// after the session moved on).
    #[must_use]
    pub fn from_session(err: &SessionError) -> Option<Self> {
        match err {
            SessionError::Stale(_) => None,
            SessionError::Backend(err) => Some(Self::from_backend(err)),
            other => Some(Self::error(other.to_string())),
        }
    }
}

//
// ─── SETUP FORM ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    #[default]
    Url,
    Pdf,
}

impl SourceKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Url => "Article URL",
            SourceKind::Pdf => "PDF file",
        }
    }
}

/// Raw inputs of the setup screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupForm {
    pub source_kind: SourceKind,
    pub url: String,
    pub pdf_path: String,
    pub settings: QuizSettings,
}

impl SetupForm {
    pub fn set_difficulty(&mut self, raw: &str) {
        if let Some(difficulty) = Difficulty::ALL.into_iter().find(|d| d.as_str() == raw) {
            self.settings.difficulty = difficulty;
        }
    }

    /// Unparseable or out-of-range values leave the count unchanged.
    pub fn set_question_count(&mut self, raw: &str) {
        let parsed = raw.trim().parse::<u32>().ok();
        if let Some(count) = parsed.and_then(|value| QuestionCount::new(value).ok()) {
            self.settings.question_count = count;
        }
    }

    /// Resolve the selected source, reading the PDF from disk when needed.
    ///
    /// # Errors
    ///
    /// Returns `MissingUrl`, `MissingFile` or `NotPdf` for unusable inputs.
    pub async fn content_source(&self) -> Result<ContentSource, ExtractionError> {
        match self.source_kind {
            SourceKind::Url => Ok(ContentSource::Url(self.url.clone())),
            SourceKind::Pdf => read_pdf(self.pdf_path.trim()).await,
        }
    }
}

async fn read_pdf(path: &str) -> Result<ContentSource, ExtractionError> {
    if path.is_empty() {
        return Err(ExtractionError::MissingFile);
    }
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ExtractionError::NotPdf { file_name });
    }
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        tracing::warn!(error = %err, "could not read PDF");
        ExtractionError::MissingFile
    })?;
    Ok(ContentSource::Pdf { file_name, bytes })
}

/// Option rows for the difficulty selector: `(value, title, description)`.
#[must_use]
pub fn difficulty_choices() -> Vec<(&'static str, &'static str, &'static str)> {
    Difficulty::ALL
        .into_iter()
        .map(|d| (d.as_str(), d.title(), d.description()))
        .collect()
}
