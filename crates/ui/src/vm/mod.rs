mod question_vm;
mod results_vm;
mod setup_vm;

pub use question_vm::{OptionVm, QuestionVm, render_question};
pub use results_vm::{ResultsVm, ReviewVm, Tier, present_results};
pub use setup_vm::{SetupForm, SourceKind, StatusKind, StatusMessage, difficulty_choices};
