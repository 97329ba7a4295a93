//! Single-slot hand-off between input events and the game loop
//!
//! The producer never blocks: depositing overwrites whatever the consumer has
//! not picked up yet, so a burst of clicks collapses to the newest one. The
//! consumer blocks until a value is present or the channel is closed.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Receiving from a channel that was closed and drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("turn channel closed")]
pub struct Closed;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    /// Set by `wake`, cleared by the `take_or_wake` it releases
    woken: bool,
    closed: bool,
}

#[derive(Debug)]
struct Shared<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

/// Cloneable handle to one shared slot
#[derive(Debug)]
pub struct TurnChannel<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for TurnChannel<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T> Default for TurnChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TurnChannel<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot { value: None, woken: false, closed: false }),
                ready: Condvar::new(),
            }),
        }
    }

    // The slot only holds plain data, so a panic elsewhere cannot leave it
    // half-written.
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.shared.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value`, returning the undelivered value it replaced.
    ///
    /// Deposits into a closed channel are dropped and handed back.
    pub fn deposit(&self, value: T) -> Option<T> {
        let mut slot = self.lock();
        if slot.closed {
            return Some(value);
        }
        let replaced = slot.value.replace(value);
        drop(slot);
        self.shared.ready.notify_one();
        replaced
    }

    /// Block until a value is available and take it.
    ///
    /// A value deposited before `close` is still delivered.
    pub fn take(&self) -> Result<T, Closed> {
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.take() {
                return Ok(value);
            }
            if slot.closed {
                return Err(Closed);
            }
            slot = self
                .shared
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`take`](Self::take), but also returns `Ok(None)` after a
    /// [`wake`](Self::wake).
    ///
    /// A pending wake is reported before a pending value; the value stays in
    /// the slot for the next call.
    pub fn take_or_wake(&self) -> Result<Option<T>, Closed> {
        let mut slot = self.lock();
        loop {
            if slot.woken {
                slot.woken = false;
                return Ok(None);
            }
            if let Some(value) = slot.value.take() {
                return Ok(Some(value));
            }
            if slot.closed {
                return Err(Closed);
            }
            slot = self
                .shared
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Release a consumer blocked in [`take_or_wake`](Self::take_or_wake)
    /// without handing it a value. Wakes do not stack.
    pub fn wake(&self) {
        self.lock().woken = true;
        self.shared.ready.notify_all();
    }

    /// Take a value if one is waiting
    pub fn try_take(&self) -> Option<T> {
        self.lock().value.take()
    }

    /// Wake the consumer and refuse further deposits
    pub fn close(&self) {
        self.lock().closed = true;
        self.shared.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_most_recent_wins() {
        let channel = TurnChannel::new();
        assert_eq!(channel.deposit(1), None);
        assert_eq!(channel.deposit(2), Some(1));
        assert_eq!(channel.deposit(3), Some(2));
        assert_eq!(channel.take(), Ok(3));
        assert_eq!(channel.try_take(), None);
    }

    #[test]
    fn test_blocking_take_wakes_on_deposit() {
        let channel = TurnChannel::new();
        let producer = channel.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.deposit((7u8, 7u8));
        });
        assert_eq!(channel.take(), Ok((7, 7)));
        handle.join().unwrap();
    }

    #[test]
    fn test_close_wakes_consumer() {
        let channel: TurnChannel<u32> = TurnChannel::new();
        let consumer = channel.clone();
        let handle = thread::spawn(move || consumer.take());
        thread::sleep(Duration::from_millis(20));
        channel.close();
        assert_eq!(handle.join().unwrap(), Err(Closed));
        assert!(channel.is_closed());
    }

    #[test]
    fn test_pending_value_survives_close() {
        let channel = TurnChannel::new();
        channel.deposit("last");
        channel.close();
        assert_eq!(channel.deposit("late"), Some("late"));
        assert_eq!(channel.take(), Ok("last"));
        assert_eq!(channel.take(), Err(Closed));
    }

    #[test]
    fn test_wake_comes_before_value() {
        let channel = TurnChannel::new();
        channel.deposit(5);
        channel.wake();
        channel.wake();
        assert_eq!(channel.take_or_wake(), Ok(None));
        assert_eq!(channel.take_or_wake(), Ok(Some(5)));
        channel.close();
        assert_eq!(channel.take_or_wake(), Err(Closed));
    }

    #[test]
    fn test_wake_releases_blocked_consumer() {
        let channel: TurnChannel<u32> = TurnChannel::new();
        let consumer = channel.clone();
        let handle = thread::spawn(move || consumer.take_or_wake());
        thread::sleep(Duration::from_millis(20));
        channel.wake();
        assert_eq!(handle.join().unwrap(), Ok(None));
    }

    #[test]
    fn test_no_value_lost_or_duplicated() {
        let channel = TurnChannel::new();
        let producer = channel.clone();
        let handle = thread::spawn(move || {
            let mut displaced = 0usize;
            for i in 0..1000u32 {
                if producer.deposit(i).is_some() {
                    displaced += 1;
                }
            }
            producer.close();
            displaced
        });

        let mut received = Vec::new();
        while let Ok(v) = channel.take() {
            received.push(v);
        }
        let displaced = handle.join().unwrap();

        assert_eq!(received.len() + displaced, 1000);
        assert!(received.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(received.last(), Some(&999));
    }
}
