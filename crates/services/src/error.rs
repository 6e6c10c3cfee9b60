//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use quiz_core::model::{ParseIdError, QuestionError};

use crate::sessions::{Operation, Phase};

/// Errors emitted by `QuizBackend` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Non-success response. `detail` is the backend's own message.
    #[error("{detail}")]
    Rejected {
        status: StatusCode,
        detail: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("backend returned an invalid question: {0}")]
    InvalidQuiz(#[from] QuestionError),
    #[error("backend returned an invalid quiz id: {0}")]
    InvalidId(#[from] ParseIdError),
    #[error("backend returned a quiz without questions")]
    NoQuestions,
    #[error("invalid backend address: {0}")]
    InvalidBaseUrl(String),
}

impl BackendError {
    /// True when the request never produced a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }
}

/// Errors emitted while extracting article content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    #[error("Please enter a URL.")]
    MissingUrl,
    #[error("Please choose a PDF file.")]
    MissingFile,
    #[error("File must be a PDF.")]
    NotPdf { file_name: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("Please answer at least one question.")]
    NoAnswers,
    #[error("Please extract content first.")]
    EmptyContent,
    #[error("{operation} is not available while the session is {phase}")]
    WrongPhase { operation: Operation, phase: Phase },
    #[error("{0} is already in progress")]
    Busy(Operation),
    #[error("{0} response discarded: the session changed while it was in flight")]
    Stale(Operation),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
