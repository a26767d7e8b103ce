//! Transient status messages that clear themselves after a fixed delay.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const SUBSCRIBER_BUFFER: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Monotonic sequence number; a later notification always has a larger id.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Single-slot notification area.
///
/// Showing a message replaces whatever is visible and restarts the expiry
/// timer. Only the timer scheduled for the visible message may clear it.
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<Inner>,
}

struct Inner {
    display_for: Duration,
    slot: Mutex<Slot>,
    events: broadcast::Sender<Notification>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    visible: Option<Notification>,
    timer: Option<JoinHandle<()>>,
}

impl NotificationChannel {
    pub fn new(display_for: Duration) -> Self {
        let (events, _) = broadcast::channel(SUBSCRIBER_BUFFER);
        Self {
            inner: Arc::new(Inner {
                display_for,
                slot: Mutex::new(Slot::default()),
                events,
            }),
        }
    }

    pub fn display_for(&self) -> Duration {
        self.inner.display_for
    }

    /// Shows `message`, replacing any visible notification immediately.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let notification = {
            let mut slot = lock(&self.inner.slot);
            if let Some(timer) = slot.timer.take() {
                timer.abort();
            }
            slot.generation += 1;
            let generation = slot.generation;
            let notification = Notification {
                id: generation,
                kind,
                message: message.into(),
            };
            slot.visible = Some(notification.clone());
            slot.timer = schedule_clear(Arc::downgrade(&self.inner), generation);
            notification
        };
        tracing::debug!(
            id = notification.id,
            kind = ?notification.kind,
            "{}",
            notification.message
        );
        // No subscribers is fine; the slot still holds the message.
        let _ = self.inner.events.send(notification);
    }

    /// The currently visible notification, if it has not expired.
    pub fn current(&self) -> Option<Notification> {
        lock(&self.inner.slot).visible.clone()
    }

    /// Receives every notification emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.events.subscribe()
    }
}

fn schedule_clear(inner: Weak<Inner>, generation: u64) -> Option<JoinHandle<()>> {
    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(_) => {
            tracing::debug!("No async runtime; notification will stay until replaced");
            return None;
        }
    };
    let delay = inner.upgrade()?.display_for;
    Some(runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut slot = lock(&inner.slot);
        // An aborted timer can still reach here if it was already past its await.
        if slot.generation == generation {
            slot.visible = None;
            slot.timer = None;
        }
    }))
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
