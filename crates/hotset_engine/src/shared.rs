//! Mutex-guarded context for multithreaded hosts
//!
//! Every writer goes through one lock, so `order` uniqueness holds across
//! threads.

use crate::context::HotkeyContext;
use hotset_equipset::WidgetBackend;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable handle to one [`HotkeyContext`]
pub struct SharedContext<W: WidgetBackend> {
    inner: Arc<Mutex<HotkeyContext<W>>>,
}

impl<W: WidgetBackend> SharedContext<W> {
    /// Wrap a context
    pub fn new(context: HotkeyContext<W>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(context)),
        }
    }

    /// Lock the context
    pub fn lock(&self) -> MutexGuard<'_, HotkeyContext<W>> {
        self.inner.lock()
    }

    /// Run a closure with the context locked
    pub fn with<R>(&self, f: impl FnOnce(&mut HotkeyContext<W>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Number of handles sharing this context
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<W: WidgetBackend> Clone for SharedContext<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
