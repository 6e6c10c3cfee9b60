use std::fmt;

use quiz_core::model::QuizId;

/// Operations that suspend on a backend response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Restore,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Generate => "quiz generation",
            Operation::Restore => "shared quiz restore",
            Operation::Submit => "quiz submission",
        })
    }
}

/// Proof that an operation was dispatched, tied to the session identity at
/// dispatch time.
///
/// Handed back to the controller together with the backend's answer. A
/// ticket whose identity no longer matches the session is discarded.
#[derive(Debug)]
#[must_use = "a ticket must be returned to the controller to re-enable its operation"]
pub struct Ticket<R> {
    pub(super) operation: Operation,
    pub(super) serial: u64,
    pub(super) epoch: u64,
    pub(super) quiz_id: Option<QuizId>,
    request: R,
}

impl<R> Ticket<R> {
    pub(super) fn new(
        operation: Operation,
        serial: u64,
        epoch: u64,
        quiz_id: Option<QuizId>,
        request: R,
    ) -> Self {
        Self {
            operation,
            serial,
            epoch,
            quiz_id,
            request,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// What to send to the backend.
    #[must_use]
    pub fn request(&self) -> &R {
        &self.request
    }
}
