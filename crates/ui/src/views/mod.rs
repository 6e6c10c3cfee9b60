mod quiz;
mod results;
mod setup;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use quiz::QuizView;
pub use results::ResultsView;
pub use setup::SetupView;
