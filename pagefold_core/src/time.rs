// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time and timebase conversion.
//!
//! The engine never reads a clock of its own: every tick is keyed by a
//! [`HostTime`] handed in by the host's display-refresh callback, expressed
//! as platform-native monotonic ticks (e.g. `mach_absolute_time` on macOS,
//! `performance.now()` microseconds on the web).
//!
//! [`Timebase`] carries the rational factor converting ticks to nanoseconds,
//! so fold durations configured in milliseconds can be compared against
//! tick-denominated elapsed time. [`Duration`] shares [`HostTime`]'s tick
//! units; conversions widen to `u128` to avoid overflow.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as platform-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts this host time to nanoseconds using the given timebase.
    #[inline]
    #[must_use]
    pub const fn to_nanos(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0)
    }

    /// Creates a [`HostTime`] from a nanosecond value and timebase.
    ///
    /// This is the inverse of [`to_nanos`](Self::to_nanos).
    #[inline]
    #[must_use]
    pub const fn from_nanos(nanos: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(nanos))
    }

    /// Returns the duration since an earlier time, or zero if `earlier` is
    /// actually later than `self`.
    ///
    /// Elapsed-time computations in the fold machine go through this, so a
    /// host that hands in a tick timestamp predating the fold's start never
    /// produces a negative elapsed time.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`, matching the `mach_timebase_info`
/// pattern. The host picks the instance that describes its tick source and
/// passes it to the container at construction; all public millisecond
/// accessors convert through it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// A timebase where ticks are already nanoseconds (1:1).
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// A timebase where one tick is one millisecond.
    ///
    /// Convenient for tests and hosts that deal in milliseconds directly.
    pub const MILLIS: Self = Self {
        numer: 1_000_000,
        denom: 1,
    };

    /// Creates a new timebase with the given numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        let wide = ticks as u128 * self.numer as u128 / self.denom as u128;
        wide as u64
    }

    /// Converts nanoseconds to a tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        let wide = nanos as u128 * self.denom as u128 / self.numer as u128;
        wide as u64
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

/// A duration in platform-native ticks.
///
/// Arithmetic uses the same tick units as [`HostTime`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts this duration to nanoseconds using the given timebase.
    #[inline]
    #[must_use]
    pub const fn to_nanos(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0)
    }

    /// Creates a duration from a nanosecond value and timebase.
    #[inline]
    #[must_use]
    pub const fn from_nanos(nanos: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(nanos))
    }

    /// Creates a duration from a millisecond value and timebase.
    ///
    /// Fold durations are configured in milliseconds; this is the conversion
    /// the container applies before comparing against tick-denominated
    /// elapsed time.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self::from_nanos(millis.saturating_mul(1_000_000), timebase)
    }

    /// Converts this duration to whole milliseconds using the given timebase.
    #[inline]
    #[must_use]
    pub const fn to_millis(self, timebase: Timebase) -> u64 {
        self.to_nanos(timebase) / 1_000_000
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}
