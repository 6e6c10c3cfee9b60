mod ids;
mod ledger;
mod question;
mod score;
mod settings;

pub use ids::{ParseIdError, QuizId};
pub use ledger::AnswerLedger;
pub use question::{MAX_OPTIONS, OptionLetter, ParseLetterError, Question, QuestionError};
pub use score::{QuestionReview, ScoreResult};
pub use settings::{Difficulty, QuestionCount, QuizSettings, SettingsError};
