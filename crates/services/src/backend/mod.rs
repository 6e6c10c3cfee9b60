mod http;
mod wire;

use async_trait::async_trait;

use quiz_core::model::{AnswerLedger, Question, QuizId, QuizSettings, ScoreResult};

use crate::error::BackendError;

pub use http::HttpQuizBackend;
pub use reqwest::StatusCode;

/// Parameters for a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub content: String,
    pub source_label: Option<String>,
    pub settings: QuizSettings,
}

/// A quiz as the client sees it: identifier plus questions, no answers.
///
/// Always holds at least one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub quiz_id: QuizId,
    pub questions: Vec<Question>,
}

/// Payload for the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub quiz_id: QuizId,
    pub answers: AnswerLedger,
}

/// Contract for the remote quiz backend (extraction, generation, scoring).
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Extract article text from a web page.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on rejection or transport failure.
    async fn extract_from_url(&self, url: &str) -> Result<String, BackendError>;

    /// Extract text from an uploaded PDF.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on rejection or transport failure.
    async fn extract_from_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BackendError>;

    /// Generate a new quiz from extracted content.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on rejection, transport failure, or a malformed quiz.
    async fn generate_quiz(&self, request: &GenerateRequest) -> Result<GeneratedQuiz, BackendError>;

    /// Fetch a previously generated quiz (options only).
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the id is unknown.
    async fn fetch_quiz(&self, quiz_id: &QuizId) -> Result<GeneratedQuiz, BackendError>;

    /// Score the given answers.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on rejection or transport failure.
    async fn submit_quiz(&self, request: &SubmitRequest) -> Result<ScoreResult, BackendError>;
}
