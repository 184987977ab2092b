//! Value debouncing
//!
//! Holds back a rapidly changing value until it has stayed put for a
//! quiet period. Intermediate values are dropped, never queued.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// A value that only propagates after `delay` without further changes
///
/// Owns one background task and at most one pending timer. Dropping the
/// `Debounced` cancels the pending countdown without firing it.
pub struct Debounced<V> {
    input: watch::Sender<V>,
    output: watch::Receiver<V>,
    delay: Duration,
    task: JoinHandle<()>,
}

impl<V> Debounced<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start debouncing from `initial`. Must be called inside a tokio runtime.
    pub fn new(initial: V, delay: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);
        let task = tokio::spawn(settle_loop(input_rx, output_tx, delay));

        Self {
            input,
            output,
            delay,
            task,
        }
    }

    /// Feed a new input value. Restarts the quiet period when it differs
    /// from the previous input; returns whether it did.
    pub fn set(&self, value: V) -> bool {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Current debounced value
    pub fn get(&self) -> V {
        self.output.borrow().clone()
    }

    /// Latest raw input, settled or not
    pub fn pending(&self) -> V {
        self.input.borrow().clone()
    }

    /// Receiver notified each time the debounced value changes
    pub fn subscribe(&self) -> watch::Receiver<V> {
        self.output.clone()
    }

    /// Configured quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<V> Drop for Debounced<V> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn settle_loop<V>(mut input: watch::Receiver<V>, output: watch::Sender<V>, delay: Duration)
where
    V: Clone + PartialEq,
{
    while input.changed().await.is_ok() {
        // Countdown restarts whenever the input moves again
        loop {
            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    trace!("debounce countdown restarted");
                }
                _ = tokio::time::sleep(delay) => break,
            }
        }

        let settled = input.borrow_and_update().clone();
        output.send_if_modified(|current| {
            if *current == settled {
                false
            } else {
                *current = settled;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout, Instant};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_settled_value_is_emitted() {
        let debounced = Debounced::new("v0", ms(300));
        let mut out = debounced.subscribe();
        let start = Instant::now();

        debounced.set("v1");
        sleep(ms(100)).await;
        debounced.set("v2");
        sleep(ms(50)).await;
        debounced.set("v3");

        out.changed().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= ms(450), "emitted too early: {:?}", elapsed);
        assert!(elapsed < ms(500), "emitted too late: {:?}", elapsed);
        assert_eq!(*out.borrow_and_update(), "v3");

        // No second emission for v1/v2
        assert!(timeout(ms(2_000), out.changed()).await.is_err());
        assert_eq!(debounced.get(), "v3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_value_until_quiet_period_elapses() {
        let debounced = Debounced::new(0u32, ms(300));
        debounced.set(1);
        sleep(ms(299)).await;
        assert_eq!(debounced.get(), 0);
        assert_eq!(debounced.pending(), 1);

        sleep(ms(2)).await;
        assert_eq!(debounced.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_propagates_immediately() {
        let debounced = Debounced::new(String::new(), Duration::ZERO);
        let mut out = debounced.subscribe();
        let start = Instant::now();

        debounced.set("phone".to_string());
        out.changed().await.unwrap();
        assert!(start.elapsed() <= ms(1));
        assert_eq!(*out.borrow(), "phone");
    }

    #[tokio::test(start_paused = true)]
    async fn test_setting_same_value_does_not_restart() {
        let debounced = Debounced::new(0u8, ms(300));
        assert!(debounced.set(5));
        sleep(ms(200)).await;
        assert!(!debounced.set(5));
        sleep(ms(101)).await;
        assert_eq!(debounced.get(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_countdown() {
        let debounced = Debounced::new("initial", ms(300));
        let mut out = debounced.subscribe();

        debounced.set("typed");
        sleep(ms(100)).await;
        drop(debounced);

        // Task is gone: the sender closes without ever publishing "typed"
        assert!(out.changed().await.is_err());
        assert_eq!(*out.borrow(), "initial");
    }
}
