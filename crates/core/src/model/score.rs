use serde::{Deserialize, Deserializer, Serialize};

use crate::model::OptionLetter;

/// Scoring response for a submitted quiz.
///
/// Produced by the backend and only ever read on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    #[serde(default, rename = "results")]
    pub per_question: Vec<QuestionReview>,
}

/// Per-question outcome, including the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub index: usize,
    #[serde(rename = "question")]
    pub question_text: String,
    pub is_correct: bool,
    #[serde(
        default,
        rename = "selected_answer",
        deserialize_with = "blank_as_none"
    )]
    pub selected_letter: Option<OptionLetter>,
    #[serde(default, rename = "selected_option")]
    pub selected_option_text: Option<String>,
    #[serde(rename = "correct_answer")]
    pub correct_letter: OptionLetter,
    #[serde(rename = "correct_option")]
    pub correct_option_text: String,
}

impl ScoreResult {
    /// Reviews for questions that were answered wrongly or left blank, in
    /// question order.
    pub fn incorrect(&self) -> impl Iterator<Item = &QuestionReview> {
        self.per_question.iter().filter(|review| !review.is_correct)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<OptionLetter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_backend_payload() {
        let json = r#"{
            "score": 1,
            "total": 2,
            "percentage": 50.0,
            "results": [
                {"index": 0, "question": "Q1", "is_correct": true,
                 "selected_answer": "A", "selected_option": "one",
                 "correct_answer": "A", "correct_option": "one"},
                {"index": 1, "question": "Q2", "is_correct": false,
                 "selected_answer": null, "selected_option": null,
                 "correct_answer": "c", "correct_option": "three"}
            ]
        }"#;
        let result: ScoreResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.per_question.len(), 2);

        let wrong: Vec<_> = result.incorrect().collect();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].selected_letter, None);
        assert_eq!(wrong[0].correct_letter, OptionLetter::C);
    }

    #[test]
    fn missing_results_and_blank_selection_are_tolerated() {
        let bare: ScoreResult =
            serde_json::from_str(r#"{"score": 3, "total": 5, "percentage": 60.0}"#).unwrap();
        assert!(bare.per_question.is_empty());

        let review: QuestionReview = serde_json::from_str(
            r#"{"index": 4, "question": "Q", "is_correct": false,
                "selected_answer": "", "correct_answer": "B", "correct_option": "two"}"#,
        )
        .unwrap();
        assert_eq!(review.selected_letter, None);
        assert_eq!(review.selected_option_text, None);
    }
}
