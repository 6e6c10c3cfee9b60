use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use quiz_core::model::{QuizId, ScoreResult};

use super::wire::{ContentBody, ErrorBody, GenerateBody, QuizBody, SubmitBody, UploadUrlBody};
use super::{GenerateRequest, GeneratedQuiz, QuizBackend, SubmitRequest};
use crate::config::BackendConfig;
use crate::error::BackendError;

/// `source_type` sent with every generation request; content is always
/// extracted text by the time it reaches the generator.
const SOURCE_TYPE_TEXT: &str = "text";

/// `QuizBackend` over the backend's JSON/HTTP API.
#[derive(Clone)]
pub struct HttpQuizBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpQuizBackend {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

/// Decode a success body, or turn a failure into `BackendError::Rejected`
/// carrying the backend's `detail` (or `fallback` when it sent none).
async fn read_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_detail)
            .unwrap_or_else(|| fallback.to_string());
        debug!(%status, "backend rejected request");
        return Err(BackendError::Rejected { status, detail });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl QuizBackend for HttpQuizBackend {
    async fn extract_from_url(&self, url: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/upload/url"))
            .json(&UploadUrlBody { url })
            .send()
            .await?;
        let body: ContentBody = read_json(response, "Extraction failed.").await?;
        Ok(body.content)
    }

    async fn extract_from_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BackendError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str("application/pdf")?;
        let response = self
            .client
            .post(self.endpoint("/upload/pdf"))
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        let body: ContentBody = read_json(response, "Extraction failed.").await?;
        Ok(body.content)
    }

    async fn generate_quiz(&self, request: &GenerateRequest) -> Result<GeneratedQuiz, BackendError> {
        let payload = GenerateBody {
            content: &request.content,
            source_type: SOURCE_TYPE_TEXT,
            source_label: request.source_label.as_deref(),
            difficulty: request.settings.difficulty,
            num_questions: request.settings.question_count,
        };
        let response = self
            .client
            .post(self.endpoint("/generate-quiz"))
            .json(&payload)
            .send()
            .await?;
        let body: QuizBody = read_json(response, "Quiz generation failed.").await?;
        body.into_quiz()
    }

    async fn fetch_quiz(&self, quiz_id: &QuizId) -> Result<GeneratedQuiz, BackendError> {
        let endpoint = self.endpoint("/quiz");
        let mut url = Url::parse(&endpoint)
            .map_err(|_| BackendError::InvalidBaseUrl(endpoint.clone()))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidBaseUrl(endpoint.clone()))?
            .push(quiz_id.as_str());
        let response = self.client.get(url).send().await?;
        let body: QuizBody = read_json(response, "Quiz not found.").await?;
        body.into_quiz()
    }

    async fn submit_quiz(&self, request: &SubmitRequest) -> Result<ScoreResult, BackendError> {
        let payload = SubmitBody {
            quiz_id: request.quiz_id.as_str(),
            answers: &request.answers,
        };
        let response = self
            .client
            .post(self.endpoint("/submit-quiz"))
            .json(&payload)
            .send()
            .await?;
        read_json(response, "Submit failed.").await
    }
}
