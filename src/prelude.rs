//! Prelude module for the notefield crate.
//!
//! Re-exports the whole public surface so consumers can
//! `use notefield_rs::prelude::*;` and get every type at once.

pub use crate::{ChartError, Result};

pub use crate::timeline::{
    BEATS_PER_MEASURE, Beat, BeatLine, BeatLineKind, BeatLines, Bpm, BpmMap, BpmPoint, Time,
    beat_lines,
};

pub use crate::chart::{Chart, ChartObject, KeyCount, KeyIndex, PlaceOptions};

pub use crate::snap::{BeatSnap, COMMON_SNAPS};

pub use crate::viewport::{
    Baseline, DisplayConfig, ScrollDirection, ScrollState, Viewport, Zoom, adjust_to_baseline,
    calculate_viewport, effective_pixels_per_second, time_to_position,
};
