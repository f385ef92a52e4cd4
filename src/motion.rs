//! Helix motion: scroll-linked vertical travel plus idle drift and sway.
//!
//! SYSTEM CONTEXT
//! ==============
//! The decorative track holds two stacked tiles, each one viewport tall. Every
//! frame the track is shifted up by an offset that wraps at one viewport height,
//! so the second tile always covers the gap left by the first and the loop
//! reads as seamless.
//!
//! TRADE-OFFS
//! ==========
//! No state is carried between frames: the offset is recomputed from the frame
//! timestamp and the live scroll position. A viewport resize therefore changes
//! the wrap period immediately, at the cost of at most one visible jump.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use crate::config::MotionTunables;

/// Remainder of `value` in `[0, period)`.
///
/// Degenerate periods and non-finite values collapse to 0.
#[must_use]
pub fn wrap_unit(value: f64, period: f64) -> f64 {
    if !(period.is_finite() && period > 0.0) || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs.
    if wrapped >= period { 0.0 } else { wrapped }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame {
    /// Upward travel in px, always within `[0, viewport_height)`.
    pub offset_y: f64,
    pub sway_x: f64,
    pub tilt_deg: f64,
}

impl MotionFrame {
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        -self.offset_y
    }

    /// CSS `transform` value. Vertical translation comes first so wrapping
    /// happens before sway and tilt are applied.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translateY({}px) translateX({}px) rotate({}deg)",
            self.translate_y(),
            self.sway_x,
            self.tilt_deg
        )
    }
}

#[must_use]
pub fn compute_frame(tunables: &MotionTunables, now_ms: f64, scroll_y: f64, viewport_height: f64) -> MotionFrame {
    let t = now_ms / 1000.0;
    let idle = wrap_unit(t * tunables.idle_speed, viewport_height);
    let scrolled = wrap_unit(scroll_y * tunables.scroll_speed, viewport_height);
    let offset_y = wrap_unit(scrolled + idle, viewport_height);
    let sway_x = tunables.sway_amplitude * (t * TAU * tunables.sway_frequency).sin();
    MotionFrame { offset_y, sway_x, tilt_deg: tunables.tilt_degrees }
}

/// Host reads and writes needed for one motion frame.
pub trait MotionSurface {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn set_transform(&self, css: &str);
}

/// Shared stop flag for a [`MotionLoop`].
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Rc<Cell<bool>>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }

    /// Record the host's answer to a next-frame request. A refused request
    /// ends the loop, so the signal never reports a loop that is not running.
    pub fn settle_request<H, E: std::fmt::Debug>(&self, requested: Result<H, E>) -> Option<H> {
        match requested {
            Ok(handle) => Some(handle),
            Err(err) => {
                self.stop();
                log::warn!("motion loop halted: {err:?}");
                None
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Frame applied; schedule another.
    Continue,
    Stopped,
}

/// Single-steppable motion loop. The host's frame scheduler calls
/// [`MotionLoop::tick`] and reschedules while it returns [`Tick::Continue`].
#[derive(Debug)]
pub struct MotionLoop {
    tunables: MotionTunables,
    stop: StopSignal,
    frames_applied: Cell<u64>,
}

impl MotionLoop {
    /// One-time startup check. No loop exists when the track element is
    /// missing or the user asked for reduced motion.
    #[must_use]
    pub fn gate(track_present: bool, reduced_motion: bool, tunables: MotionTunables) -> Option<Self> {
        if !track_present {
            log::debug!("motion disabled: track element missing");
            return None;
        }
        if reduced_motion {
            log::debug!("motion disabled: reduced-motion preference set");
            return None;
        }
        Some(Self::new(tunables))
    }

    #[must_use]
    pub fn new(tunables: MotionTunables) -> Self {
        Self { tunables, stop: StopSignal::default(), frames_applied: Cell::new(0) }
    }

    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    #[must_use]
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied.get()
    }

    pub fn tick(&self, surface: &impl MotionSurface, now_ms: f64) -> Tick {
        if self.stop.is_stopped() {
            return Tick::Stopped;
        }
        let frame = compute_frame(&self.tunables, now_ms, surface.scroll_y(), surface.viewport_height());
        surface.set_transform(&frame.css_transform());
        self.frames_applied.set(self.frames_applied.get() + 1);
        Tick::Continue
    }
}
