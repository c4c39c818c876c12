//! Scheduled refresh of contract reads.
//!
//! A [`Polled`] value holds the latest successful read and publishes changes
//! to subscribers. A [`RefreshSchedule`] decides when the owning page reads
//! again. Nothing refreshes behind the caller's back.

use std::time::Duration;

use tokio::{
    sync::watch,
    time::{interval, Interval, MissedTickBehavior},
};
use tracing::warn;

use crate::chain::ChainError;

/// The last successfully read value of one contract query.
pub struct Polled<T> {
    label: &'static str,
    value: watch::Sender<Option<T>>,
}

impl<T: Clone + PartialEq> Polled<T> {
    pub fn new(label: &'static str) -> Self {
        let (value, _) = watch::channel(None);
        Self { label, value }
    }

    /// The latest value, or `None` before the first successful read.
    pub fn latest(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.value.subscribe()
    }

    /// Publishes the result of a read. A failed read is logged and the
    /// previous value stays in place. Returns whether the read succeeded.
    pub fn apply(&self, result: Result<T, ChainError>) -> bool {
        match result {
            Ok(value) => {
                self.value.send_if_modified(|current| {
                    if current.as_ref() == Some(&value) {
                        return false;
                    }
                    *current = Some(value);
                    true
                });
                true
            }
            Err(error) => {
                warn!(read = self.label, %error, "read failed, keeping previous value");
                false
            }
        }
    }

    /// Forgets the value, e.g. when the wallet disconnects.
    pub fn clear(&self) {
        self.value.send_if_modified(|current| current.take().is_some());
    }
}

/// Fixed-period refresh timer. The first tick completes immediately.
pub struct RefreshSchedule {
    interval: Interval,
}

impl RefreshSchedule {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
