//! Notefield viewport and draw-geometry calculations.
//!
//! Everything here is a pure function of the current scroll/zoom state and
//! the static display configuration. The hosting UI recomputes the
//! [`Viewport`] once per animation frame; nothing is persisted between
//! frames.

use strict_num_extended::PositiveF64;

use crate::timeline::Time;
use crate::{ChartError, Result};

/// Vertical travel direction of oncoming notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// Notes travel upward toward a receptor near the top.
    #[default]
    Up,
    /// Notes travel downward toward a receptor near the bottom.
    Down,
}

/// Where an object's anchor point sits relative to its rendered bounding box.
///
/// Up-scrolling and down-scrolling mirror the vertical axis, so the same
/// baseline shifts a draw position in opposite directions depending on the
/// scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Baseline {
    /// The anchor sits past the box by its full height.
    Before,
    /// The anchor sits at the middle of the box.
    Centered,
    /// The anchor coincides with the draw position.
    #[default]
    After,
}

/// A zoom factor, clamped to [`Zoom::MIN`]..=[`Zoom::MAX`] on every
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zoom(PositiveF64);

impl Zoom {
    /// Smallest accepted zoom factor; smaller requests clamp here.
    pub const MIN: f64 = 0.25;
    /// Largest accepted zoom factor; larger requests clamp here.
    pub const MAX: f64 = 6.0;

    /// Create a zoom factor, clamping into the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `factor` is zero,
    /// negative or not finite. Out-of-range positive values are clamped, not
    /// rejected.
    pub fn new(factor: f64) -> Result<Self> {
        let valid = PositiveF64::new(factor).map_err(|_| {
            ChartError::InvalidArgument(format!(
                "zoom factor must be a positive finite number, got {factor}"
            ))
        })?;
        let clamped = valid.as_f64().clamp(Self::MIN, Self::MAX);
        Ok(Self(
            PositiveF64::new(clamped).expect("clamp bounds are positive"),
        ))
    }

    /// Returns the contained factor.
    #[must_use]
    pub fn factor(self) -> f64 {
        self.0.as_f64()
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(PositiveF64::new_const(1.0))
    }
}

/// The mutable scroll/zoom state of the notefield.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    time: Time,
    zoom: Zoom,
}

impl ScrollState {
    /// Create a scroll state.
    #[must_use]
    pub const fn new(time: Time, zoom: Zoom) -> Self {
        Self { time, zoom }
    }

    /// The time currently at the receptor line.
    #[must_use]
    pub const fn time(&self) -> Time {
        self.time
    }

    /// The current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Move the receptor line to `time`.
    pub const fn scroll_to(&mut self, time: Time) {
        self.time = time;
    }

    /// Set the zoom factor, clamping into [`Zoom::MIN`]..=[`Zoom::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `factor` is zero,
    /// negative or not finite.
    pub fn set_zoom(&mut self, factor: f64) -> Result<()> {
        self.zoom = Zoom::new(factor)?;
        Ok(())
    }
}

/// Static display parameters of the notefield, passed in by the hosting UI
/// instead of living in ambient global settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    pixels_per_second: f64,
    receptor_y: f64,
    height: f64,
    scroll_direction: ScrollDirection,
    baseline: Baseline,
}

impl DisplayConfig {
    /// Create a display configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `pixels_per_second` or
    /// `height` is not a positive finite number, or `receptor_y` is not
    /// finite.
    pub fn new(
        pixels_per_second: f64,
        receptor_y: f64,
        height: f64,
        scroll_direction: ScrollDirection,
        baseline: Baseline,
    ) -> Result<Self> {
        if !(pixels_per_second.is_finite() && pixels_per_second > 0.0) {
            return Err(ChartError::InvalidArgument(format!(
                "pixels per second must be a positive finite number, got {pixels_per_second}"
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(ChartError::InvalidArgument(format!(
                "notefield height must be a positive finite number, got {height}"
            )));
        }
        if !receptor_y.is_finite() {
            return Err(ChartError::InvalidArgument(format!(
                "receptor offset must be finite, got {receptor_y}"
            )));
        }
        Ok(Self {
            pixels_per_second,
            receptor_y,
            height,
            scroll_direction,
            baseline,
        })
    }

    /// Pixel density before zoom is applied.
    #[must_use]
    pub const fn pixels_per_second(&self) -> f64 {
        self.pixels_per_second
    }

    /// Vertical offset of the receptor line from the top of the notefield.
    #[must_use]
    pub const fn receptor_y(&self) -> f64 {
        self.receptor_y
    }

    /// Pixel height of the notefield.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Vertical travel direction of oncoming notes.
    #[must_use]
    pub const fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    /// Anchor baseline of drawn objects.
    #[must_use]
    pub const fn baseline(&self) -> Baseline {
        self.baseline
    }
}

/// The per-frame derived geometry of the notefield. Never persisted;
/// recomputed from the current scroll/zoom/receptor/height each render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scroll offset in pixels from the top of the chart.
    pub y0: f64,
    /// Earliest visible time.
    pub t0: Time,
    /// Latest visible time.
    pub t1: Time,
    /// The time sitting at the receptor line.
    pub receptor_time: Time,
}

impl Viewport {
    /// Whether `time` falls inside the visible range, bounds inclusive.
    #[must_use]
    pub fn contains(&self, time: Time) -> bool {
        self.t0 <= time && time <= self.t1
    }
}

/// Pixel density after zoom is applied.
#[must_use]
pub fn effective_pixels_per_second(state: &ScrollState, config: &DisplayConfig) -> f64 {
    config.pixels_per_second() * state.zoom().factor()
}

/// Compute the visible time range and scroll offset for one frame.
///
/// The scroll offset places the scrolled-to time exactly on the receptor
/// line; the visible bounds are the times at the top and bottom edges,
/// clamped to zero since the chart has no negative time.
#[must_use]
pub fn calculate_viewport(state: &ScrollState, config: &DisplayConfig) -> Viewport {
    let pps = effective_pixels_per_second(state, config);
    let y0 = state.time().as_f64() * pps - config.receptor_y();
    let t0 = Time::new((y0 / pps).max(0.0)).expect("clamped to zero");
    let t1 = Time::new(((y0 + config.height()) / pps).max(0.0)).expect("clamped to zero");
    Viewport {
        y0,
        t0,
        t1,
        receptor_time: state.time(),
    }
}

/// Pixel offset of a time position from the top of the chart, rounded to the
/// nearest integer pixel for crisp rendering.
#[must_use]
pub fn time_to_position(time: Time, effective_pixels_per_second: f64) -> i64 {
    (time.as_f64() * effective_pixels_per_second).round() as i64
}

/// Shift a draw position so the object's anchor matches the configured
/// baseline.
///
/// `After` leaves the position unchanged; `Before` shifts by the full object
/// height and `Centered` by half of it, in the direction that mirrors with
/// the scroll direction.
#[must_use]
pub const fn adjust_to_baseline(
    pos: i64,
    object_height: i64,
    baseline: Baseline,
    direction: ScrollDirection,
) -> i64 {
    let sign = match direction {
        ScrollDirection::Up => -1,
        ScrollDirection::Down => 1,
    };
    match baseline {
        Baseline::After => pos,
        Baseline::Before => pos + sign * object_height,
        Baseline::Centered => pos + sign * object_height / 2,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn time(seconds: f64) -> Time {
        Time::new(seconds).unwrap()
    }

    fn config(receptor_y: f64) -> DisplayConfig {
        DisplayConfig::new(
            100.0,
            receptor_y,
            500.0,
            ScrollDirection::Up,
            Baseline::After,
        )
        .unwrap()
    }

    #[test]
    fn viewport_at_origin() {
        let state = ScrollState::default();
        let viewport = calculate_viewport(&state, &config(0.0));
        assert_eq!(viewport.y0, 0.0);
        assert_eq!(viewport.t0, Time::ZERO);
        assert_eq!(viewport.t1, time(5.0));
        assert_eq!(viewport.receptor_time, Time::ZERO);
    }

    #[test]
    fn receptor_offset_shifts_the_window() {
        let state = ScrollState::default();
        let viewport = calculate_viewport(&state, &config(100.0));
        assert_eq!(viewport.y0, -100.0);
        assert_eq!(viewport.t0, Time::ZERO);
        assert_eq!(viewport.t1, time(4.0));
    }

    #[test]
    fn scrolling_moves_the_window() {
        let mut state = ScrollState::default();
        state.scroll_to(time(10.0));
        let viewport = calculate_viewport(&state, &config(100.0));
        assert_eq!(viewport.y0, 900.0);
        assert_eq!(viewport.t0, time(9.0));
        assert_eq!(viewport.t1, time(14.0));
        assert_eq!(viewport.receptor_time, time(10.0));
        assert!(viewport.contains(time(9.0)));
        assert!(viewport.contains(time(14.0)));
        assert!(!viewport.contains(time(14.001)));
    }

    #[test]
    fn zoom_scales_pixel_density() {
        let mut state = ScrollState::default();
        state.set_zoom(2.0).unwrap();
        let viewport = calculate_viewport(&state, &config(0.0));
        // 500px at 200px/s shows 2.5 seconds.
        assert_eq!(viewport.t1, time(2.5));
    }

    #[test]
    fn zoom_clamps_at_both_bounds() {
        let mut state = ScrollState::default();
        state.set_zoom(0.01).unwrap();
        assert_eq!(state.zoom().factor(), Zoom::MIN);
        state.set_zoom(100.0).unwrap();
        assert_eq!(state.zoom().factor(), Zoom::MAX);
    }

    #[test]
    fn zoom_rejects_non_positive_factors() {
        let mut state = ScrollState::default();
        assert!(state.set_zoom(0.0).is_err());
        assert!(state.set_zoom(-1.0).is_err());
        assert!(state.set_zoom(f64::NAN).is_err());
        assert_eq!(state.zoom().factor(), 1.0);
    }

    #[test]
    fn display_config_rejects_degenerate_values() {
        assert!(
            DisplayConfig::new(0.0, 0.0, 500.0, ScrollDirection::Up, Baseline::After).is_err()
        );
        assert!(
            DisplayConfig::new(100.0, 0.0, 0.0, ScrollDirection::Up, Baseline::After).is_err()
        );
        assert!(
            DisplayConfig::new(100.0, f64::NAN, 500.0, ScrollDirection::Up, Baseline::After)
                .is_err()
        );
    }

    #[test]
    fn position_rounds_to_the_nearest_pixel() {
        assert_eq!(time_to_position(time(0.333), 100.0), 33);
        assert_eq!(time_to_position(time(0.335), 100.0), 34);
        assert_eq!(time_to_position(time(2.0), 100.0), 200);
        assert_eq!(time_to_position(Time::ZERO, 100.0), 0);
    }

    #[test]
    fn baseline_grid_covers_all_combinations() {
        let pos = 100;
        let height = 20;

        use Baseline::{After, Before, Centered};
        use ScrollDirection::{Down, Up};
        assert_eq!(adjust_to_baseline(pos, height, After, Up), 100);
        assert_eq!(adjust_to_baseline(pos, height, After, Down), 100);
        assert_eq!(adjust_to_baseline(pos, height, Before, Up), 80);
        assert_eq!(adjust_to_baseline(pos, height, Before, Down), 120);
        assert_eq!(adjust_to_baseline(pos, height, Centered, Up), 90);
        assert_eq!(adjust_to_baseline(pos, height, Centered, Down), 110);
    }
}
