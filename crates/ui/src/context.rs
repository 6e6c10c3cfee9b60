use std::sync::Arc;

use services::{AddressBar, QuizBackend};

pub trait UiApp: Send + Sync {
    fn backend(&self) -> Arc<dyn QuizBackend>;
    fn address_bar(&self) -> Arc<dyn AddressBar>;
}

#[derive(Clone)]
pub struct AppContext {
    backend: Arc<dyn QuizBackend>,
    address_bar: Arc<dyn AddressBar>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            backend: app.backend(),
            address_bar: app.address_bar(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    #[must_use]
    pub fn address_bar(&self) -> Arc<dyn AddressBar> {
        Arc::clone(&self.address_bar)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
