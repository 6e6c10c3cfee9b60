use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be between {min} and {max}, got {value}")]
    QuestionCountOutOfRange { value: u32, min: u32, max: u32 },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty requested from the question generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Wire value, as accepted by the generation endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Straightforward recall questions",
            Difficulty::Medium => "Requires understanding concepts",
            Difficulty::Hard => "Analytical & tricky questions",
        }
    }
}

//
// ─── QUESTION COUNT ────────────────────────────────────────────────────────────
//

/// Number of questions to generate, bounded by what the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 50;

    /// Counts offered on the setup screen.
    pub const PRESETS: [QuestionCount; 4] = [
        QuestionCount(5),
        QuestionCount(10),
        QuestionCount(15),
        QuestionCount(20),
    ];

    /// # Errors
    ///
    /// Returns `SettingsError::QuestionCountOutOfRange` outside `5..=50`.
    pub fn new(value: u32) -> Result<Self, SettingsError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SettingsError::QuestionCountOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(10)
    }
}

/// Generation knobs chosen on the setup screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizSettings {
    pub difficulty: Difficulty,
    pub question_count: QuestionCount,
}
