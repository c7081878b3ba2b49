//! Deadline-based scheduling primitives
//!
//! The event loop is single-threaded; deferred work is modelled as values
//! with deadlines that the runtime polls. Time is always passed in, never
//! read from the clock here, so behavior is deterministic under test.

use std::time::{Duration, Instant};

/// One display frame at 60 Hz
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Default scroll throttle interval
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(8);

/// At most one pending task; a newer request supersedes the pending one
#[derive(Debug, Clone)]
pub struct Coalescer<T> {
    pending: Option<(Instant, T)>,
    delay: Duration,
}

impl<T> Coalescer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            delay,
        }
    }

    /// Schedule `value`, replacing any pending payload and its deadline
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Replace the payload while keeping an existing deadline.
    ///
    /// Used for bursts where the first request fixes the frame the work
    /// lands in (like a resize observer feeding one animation frame).
    pub fn coalesce(&mut self, value: T, now: Instant) {
        match &mut self.pending {
            Some((_, pending)) => *pending = value,
            None => self.schedule(value, now),
        }
    }

    /// Take the payload if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(d, _)| *d)
    }
}

/// Leading + trailing edge rate limiter.
///
/// The first event after a quiet period passes immediately. Events within
/// the interval replace a pending trailing value, which is released once
/// the interval has elapsed, so the last event of a burst always lands.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Instant>,
    trailing: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            trailing: None,
        }
    }

    /// Offer an event. Returns it back when it may be applied now.
    pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
        let ready = self
            .last_fired
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if ready {
            self.last_fired = Some(now);
            self.trailing = None;
            Some(value)
        } else {
            self.trailing = Some(value);
            None
        }
    }

    /// Release the trailing value once the interval has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now >= deadline {
            self.last_fired = Some(now);
            self.trailing.take()
        } else {
            None
        }
    }

    /// When the trailing value becomes due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        match (&self.trailing, self.last_fired) {
            (Some(_), Some(last)) => Some(last + self.interval),
            _ => None,
        }
    }

    /// Trailing value waiting for the interval to elapse
    pub fn pending(&self) -> Option<&T> {
        self.trailing.as_ref()
    }
}

/// Earliest of several optional deadlines
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
