//! Page behavior configuration.
//!
//! DESIGN
//! ======
//! Every knob the behaviors read lives in one `PageConfig` value that is built
//! once at mount and never mutated. Pages may override any subset of fields with
//! a JSON blob; missing fields fall back to the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::PageError;

/// Element id of the optional `<script type="application/json">` override.
pub const CONFIG_ELEMENT_ID: &str = "helix-config";

/// Tunables for the decorative helix motion loop.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionTunables {
    /// Pixels of helix travel per pixel of page scroll.
    pub scroll_speed: f64,
    /// Constant drift in px/sec, applied even when the page is idle.
    pub idle_speed: f64,
    /// Horizontal sway amplitude in px (0 disables sway).
    pub sway_amplitude: f64,
    /// Horizontal sway frequency in Hz.
    pub sway_frequency: f64,
    /// Fixed rotation in degrees.
    pub tilt_degrees: f64,
}

impl Default for MotionTunables {
    fn default() -> Self {
        Self {
            scroll_speed: 0.65,
            idle_speed: 10.0,
            sway_amplitude: 3.0,
            sway_frequency: 0.8,
            tilt_degrees: 0.6,
        }
    }
}

/// Intersection observation settings for the active-link tracker.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserverOptions {
    pub thresholds: Vec<f64>,
    /// CSS margin shrinking the root; the default keeps the middle band of the
    /// viewport (top 30% and bottom 55% excluded).
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { thresholds: vec![0.25, 0.45, 0.65], root_margin: "-30% 0px -55% 0px".to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub nav_id: String,
    pub year_id: String,
    pub track_id: String,
    pub active_class: String,
    pub reduced_motion_query: String,
    pub motion: MotionTunables,
    pub observer: ObserverOptions,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav_id: "topNav".to_owned(),
            year_id: "year".to_owned(),
            track_id: "dnaTrack".to_owned(),
            active_class: "active".to_owned(),
            reduced_motion_query: "(prefers-reduced-motion: reduce)".to_owned(),
            motion: MotionTunables::default(),
            observer: ObserverOptions::default(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON override and validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ConfigParse`] for malformed JSON and
    /// [`PageError::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PageError> {
        for (name, value) in [
            ("navId", &self.nav_id),
            ("yearId", &self.year_id),
            ("trackId", &self.track_id),
            ("activeClass", &self.active_class),
        ] {
            if value.trim().is_empty() {
                return Err(PageError::InvalidConfig(format!("{name} must not be empty")));
            }
        }

        let m = &self.motion;
        for (name, value) in [
            ("motion.scrollSpeed", m.scroll_speed),
            ("motion.idleSpeed", m.idle_speed),
            ("motion.swayAmplitude", m.sway_amplitude),
            ("motion.swayFrequency", m.sway_frequency),
            ("motion.tiltDegrees", m.tilt_degrees),
        ] {
            if !value.is_finite() {
                return Err(PageError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if m.sway_frequency < 0.0 {
            return Err(PageError::InvalidConfig("motion.swayFrequency must not be negative".to_owned()));
        }

        if let Some(bad) = self
            .observer
            .thresholds
            .iter()
            .find(|t| !(0.0..=1.0).contains(*t))
        {
            return Err(PageError::InvalidConfig(format!("observer threshold {bad} is outside [0, 1]")));
        }
        if !is_valid_root_margin(&self.observer.root_margin) {
            return Err(PageError::InvalidConfig(format!(
                "observer.rootMargin {:?} must be 1-4 px or % lengths",
                self.observer.root_margin
            )));
        }
        Ok(())
    }
}

/// `rootMargin` grammar accepted by `IntersectionObserver`: one to four
/// whitespace-separated `<number>px` or `<number>%` lengths.
fn is_valid_root_margin(margin: &str) -> bool {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    (1..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            part.strip_suffix("px")
                .or_else(|| part.strip_suffix('%'))
                .and_then(|number| number.parse::<f64>().ok())
                .is_some_and(f64::is_finite)
        })
}
