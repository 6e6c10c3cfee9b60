use quiz_core::model::{OptionLetter, QuestionReview, ScoreResult};

/// Score band shown above the review list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Great,
    GoodEffort,
    KeepPracticing,
}

impl Tier {
    /// Bands are inclusive at the lower bound.
    #[must_use]
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Tier::Excellent,
            70..=89 => Tier::Great,
            50..=69 => Tier::GoodEffort,
            _ => Tier::KeepPracticing,
        }
    }

    /// Stable key, also used as a CSS modifier.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Great => "great",
            Tier::GoodEffort => "good-effort",
            Tier::KeepPracticing => "keep-practicing",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent work!",
            Tier::Great => "Great job!",
            Tier::GoodEffort => "Good effort!",
            Tier::KeepPracticing => "Keep practicing!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub question_line: String,
    pub your_answer_line: String,
    pub correct_answer_line: String,
}

impl From<&QuestionReview> for ReviewVm {
    fn from(review: &QuestionReview) -> Self {
        let your_answer = match review.selected_letter {
            Some(letter) => lettered(letter, review.selected_option_text.as_deref()),
            None => "Not answered".to_string(),
        };
        Self {
            question_line: format!("Q{}. {}", review.index + 1, review.question_text),
            your_answer_line: format!("Your answer: {your_answer}"),
            correct_answer_line: format!(
                "Correct answer: {}",
                lettered(review.correct_letter, Some(&review.correct_option_text))
            ),
        }
    }
}

fn lettered(letter: OptionLetter, text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => format!("{letter}. {text}"),
        _ => letter.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage: u32,
    pub score_line: String,
    pub tier: Tier,
    pub incorrect_reviews: Vec<ReviewVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn tier_message(&self) -> &'static str {
        self.tier.message()
    }

    #[must_use]
    pub fn percentage_text(&self) -> String {
        format!("{}%", self.percentage)
    }
}

/// Results screen model. Incorrect reviews keep question order.
#[must_use]
pub fn present_results(result: &ScoreResult) -> ResultsVm {
    let percentage = percentage(result);
    ResultsVm {
        percentage,
        score_line: format!("{}/{}", result.score, result.total),
        tier: Tier::for_percentage(percentage),
        incorrect_reviews: result.incorrect().map(ReviewVm::from).collect(),
    }
}

// Falls back to the backend's own figure when there is nothing to divide by.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(result: &ScoreResult) -> u32 {
    let raw = if result.total == 0 {
        result.percentage
    } else {
        f64::from(result.score) / f64::from(result.total) * 100.0
    };
    raw.round().clamp(0.0, 100.0) as u32
}
