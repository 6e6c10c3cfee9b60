use std::sync::{Mutex, PoisonError};

/// The page's own address: the only state that survives a reload.
///
/// Implementations must replace the displayed address without navigating.
pub trait AddressBar: Send + Sync {
    fn href(&self) -> String;

    fn replace(&self, href: String);
}

/// Address bar kept in memory. Used by the desktop shell and in tests.
#[derive(Debug, Default)]
pub struct MemoryAddressBar {
    href: Mutex<String>,
}

impl MemoryAddressBar {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Mutex::new(href.into()),
        }
    }
}

impl AddressBar for MemoryAddressBar {
    fn href(&self) -> String {
        self.href
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, href: String) {
        *self.href.lock().unwrap_or_else(PoisonError::into_inner) = href;
    }
}
