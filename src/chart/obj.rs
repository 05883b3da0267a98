//! Placed chart objects and key column identifiers.

use crate::timeline::Beat;
use crate::{ChartError, Result};

/// The number of key columns a chart has. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCount(usize);

impl KeyCount {
    /// Create a new `KeyCount`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `count` is zero.
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ChartError::InvalidArgument(
                "a chart needs at least one key column".into(),
            ));
        }
        Ok(Self(count))
    }

    /// Returns the contained count value.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Default for KeyCount {
    fn default() -> Self {
        Self(4)
    }
}

/// A key column index. Validity against a [`KeyCount`] is checked wherever
/// both are used together, such as placing an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyIndex(pub usize);

impl KeyIndex {
    /// Create a new `KeyIndex`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the contained index value.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for KeyIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// A single placed note.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartObject {
    /// A note hit at a single instant.
    Tap {
        /// Placement beat.
        beat: Beat,
        /// Key column.
        key: KeyIndex,
    },
    /// A note pressed at `beat` and released `duration` beats later.
    Hold {
        /// Placement beat of the press.
        beat: Beat,
        /// Key column.
        key: KeyIndex,
        /// Length of the hold in beats.
        duration: Beat,
    },
}

impl ChartObject {
    /// Placement beat of the object.
    #[must_use]
    pub const fn beat(&self) -> Beat {
        match self {
            Self::Tap { beat, .. } | Self::Hold { beat, .. } => *beat,
        }
    }

    /// Key column of the object.
    #[must_use]
    pub const fn key(&self) -> KeyIndex {
        match self {
            Self::Tap { key, .. } | Self::Hold { key, .. } => *key,
        }
    }

    /// Hold length in beats, `None` for taps.
    #[must_use]
    pub const fn duration(&self) -> Option<Beat> {
        match self {
            Self::Tap { .. } => None,
            Self::Hold { duration, .. } => Some(*duration),
        }
    }

    /// Beat at which the object ends. For taps this is the placement beat.
    #[must_use]
    pub fn end_beat(&self) -> Beat {
        match self {
            Self::Tap { beat, .. } => *beat,
            Self::Hold { beat, duration, .. } => *beat + *duration,
        }
    }
}

/// Options controlling [`crate::chart::Chart::place_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOptions {
    /// Remove an object already occupying the target beat instead of leaving
    /// it in place. This is the toggle behavior of clicking an existing note.
    pub remove_if_exists: bool,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        Self {
            remove_if_exists: true,
        }
    }
}
