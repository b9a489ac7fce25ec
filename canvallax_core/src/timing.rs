// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame timestamps.
//!
//! Tick sources report time as milliseconds on the host's monotonic clock
//! (e.g. the `DOMHighResTimeStamp` passed to `requestAnimationFrame`).
//! [`FrameTime`] wraps that value; [`FrameTick`] pairs it with a frame
//! counter.
//!
//! Motion is frame-coupled: sprites advance a fixed step per tick, so these
//! timestamps are recorded for bookkeeping and never scale displacement.

use core::fmt;

/// A point on the host's monotonic clock, in milliseconds.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FrameTime(pub f64);

impl FrameTime {
    /// Creates a frame time from milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, or zero if `earlier` is later.
    #[inline]
    #[must_use]
    pub fn saturating_millis_since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameTime({:.3}ms)", self.0)
    }
}

/// A frame opportunity delivered by a tick source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Host time at which the tick fired.
    pub time: FrameTime,
    /// Monotonically increasing counter, starting at 0 for each tick source.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick.
    #[must_use]
    pub const fn new(time: FrameTime, frame_index: u64) -> Self {
        Self { time, frame_index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_at_zero() {
        let a = FrameTime::from_millis(16.0);
        let b = FrameTime::from_millis(50.5);
        assert_eq!(b.saturating_millis_since(a), 34.5);
        assert_eq!(a.saturating_millis_since(b), 0.0);
    }
}
