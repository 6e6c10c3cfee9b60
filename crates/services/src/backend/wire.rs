//! JSON shapes exchanged with the backend.
//!
//! Questions are normalized here: options may arrive as a list or as a
//! letter-keyed map, and leave this module as one ordered list. Correct answers
//! sent alongside freshly generated questions are dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quiz_core::model::{AnswerLedger, Difficulty, OptionLetter, Question, QuestionCount, QuizId};

use super::GeneratedQuiz;
use crate::error::BackendError;

#[derive(Debug, Serialize)]
pub(super) struct UploadUrlBody<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentBody {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerateBody<'a> {
    pub content: &'a str,
    pub source_type: &'static str,
    pub source_label: Option<&'a str>,
    pub difficulty: Difficulty,
    pub num_questions: QuestionCount,
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitBody<'a> {
    pub quiz_id: &'a str,
    pub answers: &'a AnswerLedger,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuizBody {
    quiz_id: String,
    #[serde(default)]
    questions: Vec<QuestionBody>,
}

#[derive(Debug, Deserialize)]
struct QuestionBody {
    question: String,
    options: OptionsBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionsBody {
    List(Vec<String>),
    Lettered(BTreeMap<String, String>),
}

impl OptionsBody {
    fn into_ordered(self) -> Vec<String> {
        match self {
            OptionsBody::List(options) => options,
            OptionsBody::Lettered(mut by_letter) => OptionLetter::ALL
                .into_iter()
                .filter_map(|letter| {
                    by_letter
                        .remove(letter.as_str())
                        .or_else(|| by_letter.remove(&letter.as_str().to_ascii_lowercase()))
                })
                .collect(),
        }
    }
}

impl QuizBody {
    pub(super) fn into_quiz(self) -> Result<GeneratedQuiz, BackendError> {
        let quiz_id = QuizId::new(self.quiz_id)?;
        let questions = self
            .questions
            .into_iter()
            .map(|q| Question::new(q.question, q.options.into_ordered()))
            .collect::<Result<Vec<_>, _>>()?;
        if questions.is_empty() {
            return Err(BackendError::NoQuestions);
        }
        Ok(GeneratedQuiz { quiz_id, questions })
    }
}

/// Error payload. FastAPI sends `detail` as a string for handled errors and as
/// a list of `{ msg }` objects for request validation failures.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(super) fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
            serde_json::Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .map(str::to_owned)
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}
