use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::LLMError;

use super::event::SelectionEvent;

/// Receives selection events from a [`NotificationChannel`].
pub trait SelectionListener: Send + Sync {
    fn update(&self, event: &SelectionEvent) -> Result<(), LLMError>;
}

impl<F> SelectionListener for F
where
    F: Fn(&SelectionEvent) -> Result<(), LLMError> + Send + Sync,
{
    fn update(&self, event: &SelectionEvent) -> Result<(), LLMError> {
        self(event)
    }
}

/// Ordered list of listeners.
///
/// The same listener may be attached more than once and is then notified once
/// per attachment. `notify` walks a snapshot of the list, so listeners can
/// attach or detach (themselves included) while an event is being delivered
/// without changing who receives that event.
#[derive(Default)]
pub struct NotificationChannel {
    listeners: Mutex<Vec<Arc<dyn SelectionListener>>>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Arc<dyn SelectionListener>>> {
        // A panicking listener cannot leave the Vec half-updated.
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a listener.
    pub fn attach(&self, listener: Arc<dyn SelectionListener>) {
        self.listeners().push(listener);
    }

    /// Removes every attachment of `listener` (compared by identity) and
    /// returns how many were removed.
    pub fn detach(&self, listener: &Arc<dyn SelectionListener>) -> usize {
        let target = Arc::as_ptr(listener) as *const ();
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|l| Arc::as_ptr(l) as *const () != target);
        before - listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners().is_empty()
    }

    /// Delivers `event` to every attached listener in attachment order.
    ///
    /// Stops at the first listener error and returns it; later listeners do
    /// not see the event.
    pub fn notify(&self, event: &SelectionEvent) -> Result<(), LLMError> {
        let snapshot: Vec<Arc<dyn SelectionListener>> = self.listeners().clone();
        log::debug!(
            "notifying {} listener(s) of winner {}",
            snapshot.len(),
            event.winner_model
        );
        for listener in snapshot {
            listener.update(event)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("listeners", &self.len())
            .finish()
    }
}
