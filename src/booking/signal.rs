use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

pub const DEFAULT_HOLD: Duration = Duration::from_millis(3000);

/// Auto-expiring "booked successfully" flag.
///
/// Every `show` schedules its own hide; hides are never cancelled, so an
/// earlier show can hide a banner raised again by a later one.
#[derive(Debug, Clone)]
pub struct SuccessSignal {
    visible: Arc<watch::Sender<bool>>,
    hold: Duration,
}

impl SuccessSignal {
    pub fn new(hold: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            visible: Arc::new(tx),
            hold,
        }
    }

    /// Raise the flag and schedule it to drop after the hold period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self) {
        self.visible.send_replace(true);

        let visible = Arc::clone(&self.visible);
        let deadline = Instant::now() + self.hold;
        tokio::spawn(async move {
            sleep_until(deadline).await;
            visible.send_replace(false);
            debug!("Success banner hidden");
        });
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Watch visibility changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }
}

impl Default for SuccessSignal {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}
