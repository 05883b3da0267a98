//! The timeline model and notefield geometry engine for rhythm-game chart editors.
//!
//! This crate owns the data structures and algorithms that a chart editor needs
//! between its file formats and its renderer:
//!
//! - `timeline` module provides the [`timeline::Beat`] and [`timeline::Time`]
//!   value types, the [`timeline::BpmMap`] which is the sole authority for
//!   beat-to-time conversion under a piecewise-constant tempo, and the gridline
//!   generator for the visible window.
//! - `chart` module provides the [`chart::Chart`] aggregate: per-key-column
//!   ordered sequences of placed objects with toggle placement and time-window
//!   queries.
//! - `snap` module provides the [`snap::BeatSnap`] quantization state stepping
//!   through the common snap fractions.
//! - `viewport` module provides the pure scroll/zoom geometry converting the
//!   notefield state into the visible time range and per-object pixel
//!   positions.
//!
//! In detail, our policies are:
//!
//! - Every conversion and query is a synchronous pure function over owned
//!   in-memory state; nothing in this crate blocks, suspends, or spawns.
//! - Mutations go through the owning type's methods and report whether they
//!   changed anything, so callers can drive redraws and undo stacks without a
//!   reactive object graph.
//! - Do not parse or serialize chart files here; the format layer consumes the
//!   constructors and readable fields of these types.
//! - Do not render or log here; errors are raised to the immediate caller and
//!   surfaced by the UI layer.

pub mod chart;
pub mod prelude;
pub mod snap;
pub mod timeline;
pub mod viewport;

use thiserror::Error;

/// An error raised by the timeline/notefield core.
///
/// All variants are detected eagerly at the API boundary, before any mutation
/// occurs. The only silently absorbed condition is the documented no-op of
/// [`chart::Chart::place_object`] over an occupied slot without
/// `remove_if_exists`, which reports "not modified" instead of failing.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The caller supplied a value violating a local invariant: a negative
    /// beat or time, a non-positive tempo or zoom, a malformed BPM breakpoint
    /// list, or an inverted time interval.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An index fell outside the bounds of its collection, such as a key index
    /// not below the key count.
    #[error("out of range: index {index} is not below length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the indexed collection.
        len: usize,
    },
}

/// Result alias used across this crate.
pub type Result<T> = std::result::Result<T, ChartError>;
