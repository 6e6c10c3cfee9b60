#![forbid(unsafe_code)]

pub mod address_bar;
pub mod backend;
pub mod config;
pub mod error;
pub mod extraction;
pub mod sessions;

pub use address_bar::{AddressBar, MemoryAddressBar};
pub use backend::{GenerateRequest, GeneratedQuiz, HttpQuizBackend, QuizBackend, SubmitRequest};
pub use config::BackendConfig;
pub use error::{BackendError, ExtractionError, SessionError};
pub use extraction::{ContentSource, extract_content};
pub use sessions::{Operation, Phase, SessionController, SessionState, StateChange, Ticket};
