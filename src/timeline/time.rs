//! Scalar value types for musical and wall-clock positions.

use strict_num_extended::NonNegativeF64;

use crate::{ChartError, Result};

/// A musical position measured in beats. Always non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beat(NonNegativeF64);

impl Beat {
    /// Beat 0, the start of the chart.
    pub const ZERO: Self = Self(NonNegativeF64::ZERO);

    /// Create a new `Beat`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `value` is negative or
    /// not finite.
    pub fn new(value: f64) -> Result<Self> {
        NonNegativeF64::new(value).map(Self).map_err(|_| {
            ChartError::InvalidArgument(format!(
                "beat must be a non-negative finite number, got {value}"
            ))
        })
    }

    /// Returns the contained beat value.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0.as_f64()
    }

    /// Whether this position lands exactly on a whole beat.
    #[must_use]
    pub fn is_whole(self) -> bool {
        self.as_f64().fract() == 0.0
    }

    /// The next whole beat strictly after this position.
    ///
    /// A fractional position is ceiled; a whole position advances by one.
    #[must_use]
    pub fn next_whole(self) -> Self {
        let value = self.as_f64();
        let next = if value.fract() == 0.0 {
            value + 1.0
        } else {
            value.ceil()
        };
        Self(NonNegativeF64::new(next).expect("ceiling of a non-negative beat is non-negative"))
    }
}

impl Default for Beat {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::ops::Add for Beat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(
            NonNegativeF64::new(self.as_f64() + rhs.as_f64())
                .expect("sum of two non-negative finite beats is non-negative"),
        )
    }
}

impl std::fmt::Display for Beat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

/// A wall-clock position measured in seconds. Always non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(NonNegativeF64);

impl Time {
    /// Time 0, the start of playback.
    pub const ZERO: Self = Self(NonNegativeF64::ZERO);

    /// Create a new `Time`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `seconds` is negative or
    /// not finite.
    pub fn new(seconds: f64) -> Result<Self> {
        NonNegativeF64::new(seconds).map(Self).map_err(|_| {
            ChartError::InvalidArgument(format!(
                "time must be a non-negative finite number of seconds, got {seconds}"
            ))
        })
    }

    /// Returns the contained number of seconds.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0.as_f64()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.as_f64())
    }
}
