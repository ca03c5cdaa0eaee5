//! Ephemeral notification state machine.
//!
//! ```text
//!   Idle --open(data)--> Visible --timeout | dismiss | view--> Closing --> Idle
//! ```
//!
//! Exactly one of {timeout, dismiss, view} performs a close for a given open.
//! The transition out of `Visible` and the cancellation (or release) of the
//! timer happen under one lock; the close callback then runs unlocked.
//! Every `open` bumps a generation so a stale timer or a late `finish` never
//! touches a newer notification.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use loadwire_core::error::Result;

use crate::config::NotifyConfig;
use crate::render::{NotificationData, RenderedNotification};
use crate::timer::CancellableTimer;

/// Callbacks owned by the display surface.
pub trait NotificationSink: Send + Sync {
    /// The notification left the screen (timeout, dismiss, or view).
    fn closed(&self);
    /// The user chose to view the notification. Runs after `closed`.
    fn viewed(&self, data: &NotificationData);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Idle,
    Visible,
    Closing,
}

#[derive(Debug)]
struct Slot {
    state: NotificationState,
    data: Option<NotificationData>,
    timer: Option<CancellableTimer>,
    generation: u64,
}

struct Shared {
    slot: Mutex<Slot>,
    sink: Arc<dyn NotificationSink>,
    cfg: NotifyConfig,
}

/// Owns one display surface's notification.
///
/// Dropping the controller is an unmount: the timer is canceled and no
/// callback fires.
pub struct NotificationController {
    shared: Arc<Shared>,
}

impl NotificationController {
    pub fn new(cfg: NotifyConfig, sink: Arc<dyn NotificationSink>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    state: NotificationState::Idle,
                    data: None,
                    timer: None,
                    generation: 0,
                }),
                sink,
                cfg,
            }),
        })
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.shared.cfg
    }

    pub fn state(&self) -> NotificationState {
        self.shared.lock().state
    }

    /// Payload currently on screen.
    pub fn current(&self) -> Option<NotificationData> {
        let slot = self.shared.lock();
        match slot.state {
            NotificationState::Visible => slot.data.clone(),
            _ => None,
        }
    }

    /// Render the visible notification, if any.
    pub fn render(&self) -> Option<RenderedNotification> {
        self.current()
            .map(|d| d.render(self.shared.cfg.max_body_chars))
    }

    /// Show `data` and start the auto-dismiss timer.
    ///
    /// `None` suppresses the notification and leaves state untouched. Opening
    /// while already visible replaces the payload and restarts the timer.
    /// Returns whether a notification is now shown.
    pub fn open(&self, data: Option<NotificationData>) -> Result<bool> {
        let Some(data) = data else {
            tracing::debug!("open without payload suppressed");
            return Ok(false);
        };

        let slot = self.shared.lock();
        self.show(slot, data)?;
        Ok(true)
    }

    /// Like `open`, but leaves an identical visible payload (and its timer)
    /// alone. The comparison and the open happen under one lock. Returns
    /// whether `data` was shown.
    pub fn open_unless_same(&self, data: NotificationData) -> Result<bool> {
        let slot = self.shared.lock();
        if slot.state == NotificationState::Visible && slot.data.as_ref() == Some(&data) {
            return Ok(false);
        }
        self.show(slot, data)?;
        Ok(true)
    }

    fn show(&self, mut slot: MutexGuard<'_, Slot>, data: NotificationData) -> Result<()> {
        let generation = slot.generation + 1;

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let timer = CancellableTimer::start(
            Duration::from_millis(self.shared.cfg.display_ms),
            move || {
                if let Some(shared) = weak.upgrade() {
                    shared.expire(generation);
                }
            },
        )?;

        if let Some(mut prev) = slot.timer.take() {
            prev.cancel();
        }
        let replaced = slot.state == NotificationState::Visible;
        slot.generation = generation;
        slot.data = Some(data);
        slot.state = NotificationState::Visible;
        slot.timer = Some(timer);
        drop(slot);

        tracing::debug!(generation, replaced, "notification shown");
        Ok(())
    }

    /// User dismiss. Returns whether this call closed the notification.
    pub fn dismiss(&self) -> bool {
        match self.shared.begin_close() {
            Some((generation, _)) => {
                self.shared.sink.closed();
                self.shared.finish(generation);
                true
            }
            None => false,
        }
    }

    /// Dismiss, then hand the payload to `viewed` exactly once.
    pub fn view(&self) -> bool {
        match self.shared.begin_close() {
            Some((generation, data)) => {
                self.shared.sink.closed();
                self.shared.finish(generation);
                if let Some(data) = data {
                    self.shared.sink.viewed(&data);
                }
                true
            }
            None => false,
        }
    }

    /// Unmount: cancel the timer and clear state without callbacks.
    pub fn shutdown(&self) {
        let mut slot = self.shared.lock();
        if let Some(mut t) = slot.timer.take() {
            t.cancel();
        }
        slot.generation += 1;
        slot.state = NotificationState::Idle;
        slot.data = None;
    }
}

impl Drop for NotificationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `Visible -> Closing` with the timer canceled. `None` if not visible.
    fn begin_close(&self) -> Option<(u64, Option<NotificationData>)> {
        let mut slot = self.lock();
        if slot.state != NotificationState::Visible {
            return None;
        }
        if let Some(mut t) = slot.timer.take() {
            t.cancel();
        }
        slot.state = NotificationState::Closing;
        Some((slot.generation, slot.data.clone()))
    }

    /// Timer path. Only closes the generation it was started for.
    fn expire(&self, generation: u64) {
        {
            let mut slot = self.lock();
            if slot.state != NotificationState::Visible || slot.generation != generation {
                return;
            }
            if let Some(mut t) = slot.timer.take() {
                t.release();
            }
            slot.state = NotificationState::Closing;
        }
        tracing::debug!(generation, "notification timed out");
        self.sink.closed();
        self.finish(generation);
    }

    /// `Closing -> Idle`, unless a newer open already took over.
    fn finish(&self, generation: u64) {
        let mut slot = self.lock();
        if slot.state == NotificationState::Closing && slot.generation == generation {
            slot.state = NotificationState::Idle;
            slot.data = None;
        }
    }
}
