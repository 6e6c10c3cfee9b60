use std::fmt;

use quiz_core::model::{AnswerLedger, OptionLetter, Question, QuizId, ScoreResult};

use crate::backend::GeneratedQuiz;

/// Coarse lifecycle stage of a quiz attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Setup,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "in setup",
            Phase::InProgress => "in progress",
            Phase::Completed => "completed",
        })
    }
}

/// Everything known about the current attempt.
///
/// Invariants, upheld by the transition methods below:
/// - `current_index < questions.len()` while `phase == InProgress`
/// - `quiz_id` is set whenever `phase != Setup`
/// - `answers` starts empty on every Setup → InProgress transition
/// - `last_result` is set only on InProgress → Completed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    phase: Phase,
    quiz_id: Option<QuizId>,
    questions: Vec<Question>,
    current_index: usize,
    answers: AnswerLedger,
    last_result: Option<ScoreResult>,
}

impl SessionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn quiz_id(&self) -> Option<&QuizId> {
        self.quiz_id.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerLedger {
        &self.answers
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }

    /// Setup → InProgress with a fresh, unanswered attempt.
    pub(super) fn start(&mut self, quiz: GeneratedQuiz) {
        debug_assert!(!quiz.questions.is_empty());
        *self = Self {
            phase: Phase::InProgress,
            quiz_id: Some(quiz.quiz_id),
            questions: quiz.questions,
            ..Self::default()
        };
    }

    pub(super) fn select(&mut self, letter: OptionLetter) {
        debug_assert!(
            self.current_question()
                .is_some_and(|q| q.option(letter).is_some()),
            "letter {letter} is not offered for question {}",
            self.current_index
        );
        self.answers.set(self.current_index, letter);
    }

    /// Move by `delta`; returns false (and changes nothing) when the target
    /// falls outside the question list.
    pub(super) fn step(&mut self, delta: isize) -> bool {
        match self.current_index.checked_add_signed(delta) {
            Some(next) if next < self.questions.len() && next != self.current_index => {
                self.current_index = next;
                true
            }
            _ => false,
        }
    }

    pub(super) fn complete(&mut self, result: ScoreResult) {
        self.phase = Phase::Completed;
        self.last_result = Some(result);
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(len: usize) -> GeneratedQuiz {
        GeneratedQuiz {
            quiz_id: QuizId::new("q").unwrap(),
            questions: (0..len)
                .map(|i| Question::new(format!("Q{i}"), vec!["a".into(), "b".into()]).unwrap())
                .collect(),
        }
    }

    #[test]
    fn start_seeds_fresh_attempt() {
        let mut state = SessionState::default();
        state.start(quiz(3));
        state.select(OptionLetter::B);
        state.step(1);

        state.start(quiz(2));
        assert_eq!(state.phase(), Phase::InProgress);
        assert_eq!(state.current_index(), 0);
        assert!(state.answers().is_empty());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn step_stays_in_range() {
        let mut state = SessionState::default();
        state.start(quiz(3));

        assert!(!state.step(-1));
        assert_eq!(state.current_index(), 0);
        assert!(state.step(2));
        assert_eq!(state.current_index(), 2);
        assert!(!state.step(1));
        assert!(!state.step(isize::MAX));
        assert!(!state.step(isize::MIN));
        assert_eq!(state.current_index(), 2);
        assert!(state.step(-1));
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = SessionState::default();
        state.start(quiz(2));
        state.select(OptionLetter::A);
        state.complete(ScoreResult {
            score: 1,
            total: 2,
            percentage: 50.0,
            per_question: Vec::new(),
        });
        assert_eq!(state.phase(), Phase::Completed);

        state.reset();
        assert_eq!(state, SessionState::default());
    }
}
