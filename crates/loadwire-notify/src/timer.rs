//! One-shot cancellable timer.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use loadwire_core::error::{LoadwireError, Result};

/// Handle to a pending deferred callback.
///
/// `cancel` is idempotent: the first call aborts the pending task, later calls
/// do nothing. Dropping the handle cancels it.
#[derive(Debug)]
pub struct CancellableTimer {
    handle: Option<AbortHandle>,
}

impl CancellableTimer {
    /// Run `f` once after `after`, on the current tokio runtime.
    pub fn start<F>(after: Duration, f: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let rt = Handle::try_current()
            .map_err(|e| LoadwireError::Internal(format!("timer needs a tokio runtime: {e}")))?;
        let task = rt.spawn(async move {
            tokio::time::sleep(after).await;
            f();
        });
        Ok(Self {
            handle: Some(task.abort_handle()),
        })
    }

    /// Abort the pending callback. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(h) => {
                h.abort();
                true
            }
            None => false,
        }
    }

    /// Give up ownership without aborting. Used from inside the callback
    /// itself, where the task is already finishing.
    pub fn release(&mut self) {
        self.handle = None;
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
