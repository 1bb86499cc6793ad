//! Transient notifications and the cancellable expiry timer behind them.
//!
//! Timers never touch state directly. An armed [`ExpiryTimer`] spawns a task
//! that sleeps and then sends an event tagged with a generation number; the
//! event loop hands that generation back to the owner, which only acts on it
//! if it is still the current one. Re-arming aborts the previous task, and
//! the generation check covers an event that was already queued before the
//! abort landed.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// How long the copy button shows its copied state.
pub const COPY_INDICATOR_TTL: Duration = Duration::from_millis(2000);

// ============================================================================
// Expiry Timer
// ============================================================================

/// A restartable one-shot timer that owns at most one pending expiry.
pub struct ExpiryTimer<E> {
    delay: Duration,
    tx: mpsc::Sender<E>,
    fire: fn(u64) -> E,
    generation: u64,
    /// Generation of the pending expiry, if one is armed and not yet accepted.
    pending: Option<u64>,
    handle: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> ExpiryTimer<E> {
    /// `fire` builds the event sent on expiry from the arm generation.
    pub fn new(delay: Duration, tx: mpsc::Sender<E>, fire: fn(u64) -> E) -> Self {
        Self {
            delay,
            tx,
            fire,
            generation: 0,
            pending: None,
            handle: None,
        }
    }

    /// Arm the timer for a fresh window, cancelling any pending expiry first.
    ///
    /// Returns the generation the expiry event will carry.
    pub fn arm(&mut self) -> u64 {
        self.cancel();

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.pending = Some(generation);

        let delay = self.delay;
        let tx = self.tx.clone();
        let event = (self.fire)(generation);

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).await.is_err() {
                tracing::debug!(generation, "Expiry receiver dropped");
            }
        }));

        generation
    }

    /// Cancel the pending expiry, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.pending = None;
    }

    /// Returns true if `generation` is the pending expiry, consuming it.
    ///
    /// Stale generations (from a cancelled or superseded arm) are rejected.
    pub fn accept(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) {
            self.pending = None;
            self.handle = None;
            true
        } else {
            tracing::debug!(
                generation,
                current = ?self.pending,
                "Ignoring stale expiry"
            );
            false
        }
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<E> Drop for ExpiryTimer<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Icon shown in front of the message.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Info => "i",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Holds the single visible notification and clears it after [`NOTIFICATION_TTL`].
pub struct NotificationScheduler<E> {
    current: Option<Notification>,
    timer: ExpiryTimer<E>,
}

impl<E: Send + 'static> NotificationScheduler<E> {
    pub fn new(tx: mpsc::Sender<E>, fire: fn(u64) -> E) -> Self {
        Self {
            current: None,
            timer: ExpiryTimer::new(NOTIFICATION_TTL, tx, fire),
        }
    }

    /// Replace the visible notification and restart the expiry window.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        let generation = self.timer.arm();
        tracing::debug!(?kind, generation, message = %message, "Notification shown");
        self.current = Some(Notification { message, kind });
    }

    /// Handle an expiry event. Returns true if the notification was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.timer.accept(generation) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

// ============================================================================
// Copy Indicator
// ============================================================================

/// The copy button's transient "copied" state, reset after [`COPY_INDICATOR_TTL`].
pub struct CopyIndicator<E> {
    active: bool,
    timer: ExpiryTimer<E>,
}

impl<E: Send + 'static> CopyIndicator<E> {
    pub fn new(tx: mpsc::Sender<E>, fire: fn(u64) -> E) -> Self {
        Self {
            active: false,
            timer: ExpiryTimer::new(COPY_INDICATOR_TTL, tx, fire),
        }
    }

    pub fn set(&mut self) {
        self.timer.arm();
        self.active = true;
    }

    /// Handle an expiry event. Returns true if the indicator was reset.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.timer.accept(generation) {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
