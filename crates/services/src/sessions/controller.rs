use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use quiz_core::model::{OptionLetter, QuizId, QuizSettings, ScoreResult};
use quiz_core::share_link;

use super::state::{Phase, SessionState};
use super::ticket::{Operation, Ticket};
use crate::address_bar::AddressBar;
use crate::backend::{GenerateRequest, GeneratedQuiz, QuizBackend, SubmitRequest};
use crate::error::{BackendError, SessionError};

/// What a controller call did to the session, so adapters know when to
/// recompute display models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    /// A phase transition happened (possibly to the same phase, with new data).
    Phase(Phase),
    Selection,
    Navigation,
    Unchanged,
}

impl StateChange {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, StateChange::Unchanged)
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the lifecycle of a single quiz attempt.
///
/// Backend calls are split into `begin_*` (check preconditions, mark the
/// operation in flight, hand out a [`Ticket`]) and `finish_*` (apply or
/// discard the response). No borrow of the controller is needed while the
/// request is pending. `generate`, `restore_on_load` and `submit` chain both
/// halves around a backend for callers that can hold `&mut self` across the
/// await.
pub struct SessionController {
    state: SessionState,
    address: Arc<dyn AddressBar>,
    epoch: u64,
    /// Serial of the pending ticket per operation.
    in_flight: HashMap<Operation, u64>,
    next_serial: u64,
}

impl SessionController {
    #[must_use]
    pub fn new(address: Arc<dyn AddressBar>) -> Self {
        Self {
            state: SessionState::default(),
            address,
            epoch: 0,
            in_flight: HashMap::new(),
            next_serial: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Whether the control that triggers `operation` should be disabled.
    #[must_use]
    pub fn is_in_flight(&self, operation: Operation) -> bool {
        self.in_flight.contains_key(&operation)
    }

    /// Current address with the quiz id encoded, for copying.
    #[must_use]
    pub fn share_url(&self) -> Option<String> {
        let quiz_id = self.state.quiz_id()?;
        share_link::encode(&self.address.href(), quiz_id)
    }

    #[must_use]
    pub fn address(&self) -> String {
        self.address.href()
    }

    // ─── Generation ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// `WrongPhase` outside Setup, `EmptyContent` for blank content, `Busy`
    /// while a generation is already pending.
    pub fn begin_generate(
        &mut self,
        content: String,
        source_label: Option<String>,
        settings: QuizSettings,
    ) -> Result<Ticket<GenerateRequest>, SessionError> {
        self.require_phase(Operation::Generate, Phase::Setup)?;
        if content.trim().is_empty() {
            return Err(SessionError::EmptyContent);
        }
        let request = GenerateRequest {
            content,
            source_label,
            settings,
        };
        let ticket = self.dispatch(Operation::Generate, request)?;
        info!(
            difficulty = settings.difficulty.as_str(),
            questions = settings.question_count.value(),
            "generating quiz"
        );
        Ok(ticket)
    }

    /// # Errors
    ///
    /// `Stale` when the session moved on since dispatch, `Backend` when the
    /// backend call failed. The session stays in Setup in both cases.
    pub fn finish_generate(
        &mut self,
        ticket: Ticket<GenerateRequest>,
        result: Result<GeneratedQuiz, BackendError>,
    ) -> Result<StateChange, SessionError> {
        self.land(&ticket)?;
        let quiz = result.inspect_err(|err| warn!(error = %err, "quiz generation failed"))?;
        Ok(self.start(quiz))
    }

    /// # Errors
    ///
    /// See [`Self::begin_generate`] and [`Self::finish_generate`].
    pub async fn generate(
        &mut self,
        backend: &dyn QuizBackend,
        content: String,
        source_label: Option<String>,
        settings: QuizSettings,
    ) -> Result<StateChange, SessionError> {
        let ticket = self.begin_generate(content, source_label, settings)?;
        let result = backend.generate_quiz(ticket.request()).await;
        self.finish_generate(ticket, result)
    }

    // ─── Shared-link restore ───────────────────────────────────────────────────

    /// Returns a ticket when the address carries a quiz id and the session
    /// is still in Setup. Never fails: a missing id simply means nothing to do.
    pub fn begin_restore(&mut self) -> Option<Ticket<QuizId>> {
        if self.phase() != Phase::Setup {
            return None;
        }
        let quiz_id = share_link::decode(&self.address.href())?;
        match self.dispatch(Operation::Restore, quiz_id.clone()) {
            Ok(ticket) => {
                info!(%quiz_id, "restoring shared quiz");
                Some(ticket)
            }
            Err(_) => None,
        }
    }

    /// Apply a restored quiz. Failures (unknown id, transport, stale) leave
    /// the session in Setup and are only logged.
    pub fn finish_restore(
        &mut self,
        ticket: Ticket<QuizId>,
        result: Result<GeneratedQuiz, BackendError>,
    ) -> StateChange {
        let quiz_id = ticket.request().clone();
        if self.land(&ticket).is_err() {
            return StateChange::Unchanged;
        }
        match result {
            Ok(quiz) => self.start(quiz),
            Err(err) => {
                debug!(%quiz_id, error = %err, "shared quiz unavailable, staying in setup");
                StateChange::Unchanged
            }
        }
    }

    pub async fn restore_on_load(&mut self, backend: &dyn QuizBackend) -> StateChange {
        let Some(ticket) = self.begin_restore() else {
            return StateChange::Unchanged;
        };
        let result = backend.fetch_quiz(ticket.request()).await;
        self.finish_restore(ticket, result)
    }

    // ─── Answering and navigation ──────────────────────────────────────────────

    /// Record `letter` for the current question. Ignored outside InProgress.
    pub fn select_answer(&mut self, letter: OptionLetter) -> StateChange {
        if self.phase() != Phase::InProgress {
            return StateChange::Unchanged;
        }
        self.state.select(letter);
        StateChange::Selection
    }

    /// Move by `delta` questions. Targets outside the quiz are ignored.
    pub fn navigate(&mut self, delta: isize) -> StateChange {
        if self.phase() == Phase::InProgress && self.state.step(delta) {
            StateChange::Navigation
        } else {
            StateChange::Unchanged
        }
    }

    // ─── Submission ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// `WrongPhase` outside InProgress, `NoAnswers` when nothing was
    /// answered (no request may be sent), `Busy` while a submission is
    /// pending.
    pub fn begin_submit(&mut self) -> Result<Ticket<SubmitRequest>, SessionError> {
        self.require_phase(Operation::Submit, Phase::InProgress)?;
        if self.state.answers().is_empty() {
            warn!("submit rejected locally: no answers");
            return Err(SessionError::NoAnswers);
        }
        let Some(quiz_id) = self.state.quiz_id().cloned() else {
            return Err(SessionError::WrongPhase {
                operation: Operation::Submit,
                phase: self.phase(),
            });
        };
        let request = SubmitRequest {
            quiz_id,
            answers: self.state.answers().clone(),
        };
        let ticket = self.dispatch(Operation::Submit, request)?;
        info!(
            quiz_id = %ticket.request().quiz_id,
            answered = ticket.request().answers.count(),
            total = self.state.questions().len(),
            "submitting quiz"
        );
        Ok(ticket)
    }

    /// # Errors
    ///
    /// `Stale` when the session moved on since dispatch, `Backend` when
    /// scoring failed. The session stays InProgress in both cases.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket<SubmitRequest>,
        result: Result<ScoreResult, BackendError>,
    ) -> Result<StateChange, SessionError> {
        self.land(&ticket)?;
        let score = result.inspect_err(|err| warn!(error = %err, "quiz submission failed"))?;
        info!(score = score.score, total = score.total, "quiz scored");
        self.state.complete(score);
        self.epoch += 1;
        self.publish_quiz_id();
        Ok(StateChange::Phase(Phase::Completed))
    }

    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::finish_submit`].
    pub async fn submit(&mut self, backend: &dyn QuizBackend) -> Result<StateChange, SessionError> {
        let ticket = self.begin_submit()?;
        let result = backend.submit_quiz(ticket.request()).await;
        self.finish_submit(ticket, result)
    }

    // ─── Reset ─────────────────────────────────────────────────────────────────

    /// Back to Setup, dropping the quiz and stripping the id from the address.
    ///
    /// Responses still in flight become stale and their controls are
    /// re-enabled, even if the caller never lands them.
    pub fn reset(&mut self) -> StateChange {
        if self.phase() == Phase::Setup {
            return StateChange::Unchanged;
        }
        info!(from = %self.phase(), "resetting session");
        self.state.reset();
        self.epoch += 1;
        self.in_flight.clear();
        match share_link::clear(&self.address.href()) {
            Some(href) => self.address.replace(href),
            None => warn!("address is not a valid URL; leaving it untouched"),
        }
        StateChange::Phase(Phase::Setup)
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn require_phase(&self, operation: Operation, expected: Phase) -> Result<(), SessionError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase { operation, phase })
        }
    }

    fn dispatch<R>(&mut self, operation: Operation, request: R) -> Result<Ticket<R>, SessionError> {
        if self.in_flight.contains_key(&operation) {
            return Err(SessionError::Busy(operation));
        }
        self.next_serial += 1;
        let serial = self.next_serial;
        self.in_flight.insert(operation, serial);
        Ok(Ticket::new(
            operation,
            serial,
            self.epoch,
            self.state.quiz_id().cloned(),
            request,
        ))
    }

    /// Re-enable the ticket's operation and check it still matches the session.
    /// A ticket only clears the in-flight entry it was issued for, never a
    /// newer dispatch of the same operation.
    fn land<R>(&mut self, ticket: &Ticket<R>) -> Result<(), SessionError> {
        if self.in_flight.get(&ticket.operation) == Some(&ticket.serial) {
            self.in_flight.remove(&ticket.operation);
        }
        if ticket.epoch != self.epoch || ticket.quiz_id.as_ref() != self.state.quiz_id() {
            debug!(operation = %ticket.operation, "discarding stale response");
            return Err(SessionError::Stale(ticket.operation));
        }
        Ok(())
    }

    fn start(&mut self, quiz: GeneratedQuiz) -> StateChange {
        info!(quiz_id = %quiz.quiz_id, questions = quiz.questions.len(), "quiz started");
        self.state.start(quiz);
        self.epoch += 1;
        self.publish_quiz_id();
        StateChange::Phase(Phase::InProgress)
    }

    fn publish_quiz_id(&self) {
        let Some(quiz_id) = self.state.quiz_id() else {
            return;
        };
        match share_link::encode(&self.address.href(), quiz_id) {
            Some(href) => self.address.replace(href),
            None => warn!("address is not a valid URL; share link not updated"),
        }
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.state.phase())
            .field("quiz_id", &self.state.quiz_id())
            .field("questions_len", &self.state.questions().len())
            .field("current_index", &self.state.current_index())
            .field("answered", &self.state.answers().count())
            .field("epoch", &self.epoch)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
