#![forbid(unsafe_code)]

pub mod model;
pub mod share_link;

pub use model::{AnswerLedger, OptionLetter, Question, QuizId, ScoreResult};
