use parking_lot::Mutex;
use std::{
    sync::{mpsc::Sender, Arc},
    thread,
    time::Duration,
};

/// Simulated payment rail takes 3 seconds to settle a batch.
pub const PAY_ALL_DELAY: Duration = Duration::from_secs(3);
/// Simulated wallet handshake takes 2 seconds.
pub const WALLET_DELAY: Duration = Duration::from_secs(2);

/// Completion events delivered back to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    WalletConnected,
    PayAllSettled { count: usize, total: f64 },
}

/// Fire-and-forget delay timers. Each `after` call spawns a detached thread
/// that sleeps, pushes its event into the shared queue, and pokes the wake
/// channel so the UI loop redraws without waiting out its poll interval.
pub struct TimerHub {
    done: Arc<Mutex<Vec<TimerEvent>>>,
    wake_tx: Sender<()>,
}

impl TimerHub {
    pub fn new(wake_tx: Sender<()>) -> Self {
        Self {
            done: Arc::new(Mutex::new(Vec::new())),
            wake_tx,
        }
    }

    /// Schedule `event` to fire after `delay`.
    pub fn after(&self, delay: Duration, event: TimerEvent) {
        let done = self.done.clone();
        let wake_tx = self.wake_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            done.lock().push(event);
            // Receiver may be gone during shutdown
            let _ = wake_tx.send(());
        });
    }

    /// Drain every completed event, in completion order.
    pub fn drain(&self) -> Vec<TimerEvent> {
        std::mem::take(&mut *self.done.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_event_fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        let hub = TimerHub::new(tx);

        hub.after(Duration::from_millis(10), TimerEvent::WalletConnected);
        assert!(hub.drain().is_empty());

        rx.recv_timeout(Duration::from_secs(2))
            .expect("timer never woke the loop");
        let events = hub.drain();
        assert_eq!(events, vec![TimerEvent::WalletConnected]);
        // queue is emptied by drain
        assert!(hub.drain().is_empty());
    }

    #[test]
    fn test_multiple_timers_all_delivered() {
        let (tx, rx) = mpsc::channel();
        let hub = TimerHub::new(tx);

        hub.after(
            Duration::from_millis(5),
            TimerEvent::PayAllSettled {
                count: 3,
                total: 186.79,
            },
        );
        hub.after(Duration::from_millis(5), TimerEvent::WalletConnected);

        for _ in 0..2 {
            rx.recv_timeout(Duration::from_secs(2))
                .expect("timer never woke the loop");
        }
        let events = hub.drain();
        assert_eq!(events.len(), 2);
        assert!(events.contains(&TimerEvent::WalletConnected));
        assert!(events
            .iter()
            .any(|e| matches!(e, TimerEvent::PayAllSettled { count: 3, .. })));
    }
}
