// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing for bursts of events such as window resizes.
//!
//! Every [`Debouncer::push`] replaces the pending value and restarts the quiet
//! period; [`Debouncer::poll`] hands the latest value out once the quiet period
//! has elapsed without another push.
//!
//! ```
//! use core::time::Duration;
//! use tastemap_event_state::debounce::Debouncer;
//!
//! let mut resize = Debouncer::new(Duration::from_millis(150));
//! resize.push((800.0, 600.0), Duration::from_millis(0));
//! resize.push((820.0, 600.0), Duration::from_millis(100));
//!
//! assert_eq!(resize.poll(Duration::from_millis(200)), None);
//! assert_eq!(resize.poll(Duration::from_millis(250)), Some((820.0, 600.0)));
//! assert_eq!(resize.poll(Duration::from_millis(900)), None);
//! ```

use core::time::Duration;

/// Coalesces values pushed in quick succession into the last one.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Stores `value` as the pending value and restarts the timer at `now`.
    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now));
    }

    /// Returns the pending value if the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_sub(*at) >= self.quiet => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Returns the time at which the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    /// Returns `true` if a value is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
