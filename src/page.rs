//! Page controller: mounts every behavior and owns their teardown.
//!
//! DESIGN
//! ======
//! The behaviors are independent. Each is wired on its own and a missing
//! element disables only that behavior. The controller keeps the resulting
//! [`Subscription`]s so a single-page host can tear the page down explicitly;
//! on a static site it simply lives until unload.
//!
//! TRADE-OFFS
//! ==========
//! Without the `hydrate` feature there is no DOM, so `mount` wires nothing and
//! returns an empty controller. Native builds stay usable for tests.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::config::PageConfig;
use crate::error::PageError;
#[cfg(feature = "hydrate")]
use crate::motion::MotionLoop;
use crate::motion::StopSignal;
use crate::subscription::Subscription;

#[derive(Debug)]
pub struct PageController {
    config: PageConfig,
    subscriptions: Vec<Subscription>,
    motion: Option<StopSignal>,
}

impl PageController {
    /// Validate `config` and wire all page behaviors.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidConfig`] for out-of-range config, and
    /// [`PageError::NoWindow`] / [`PageError::NoDocument`] when the browser
    /// host itself is unusable. A DOM failure while wiring one behavior only
    /// disables that behavior.
    pub fn mount(config: PageConfig) -> Result<Self, PageError> {
        config.validate()?;
        #[cfg_attr(not(feature = "hydrate"), allow(unused_mut))]
        let mut controller = Self { config, subscriptions: Vec::new(), motion: None };

        #[cfg(feature = "hydrate")]
        controller.wire()?;

        log::info!(
            "page mounted: [{}], motion {}",
            controller.subscription_labels().join(", "),
            if controller.is_animating() { "on" } else { "off" }
        );
        Ok(controller)
    }

    #[cfg(feature = "hydrate")]
    fn wire(&mut self) -> Result<(), PageError> {
        use crate::dom;

        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;

        if let Some(subs) = skip_on_error("anchor scrolling", dom::bind_anchor_clicks(&document)) {
            self.subscriptions.extend(subs);
        }
        if let Some(sub) = skip_on_error("active-link tracking", dom::bind_active_links(&document, &self.config)).flatten() {
            self.subscriptions.push(sub);
        }
        dom::stamp_year(&document, &self.config.year_id);

        let track = dom::motion_track(&document, &self.config.track_id);
        let reduced = dom::prefers_reduced_motion(&window, &self.config.reduced_motion_query);
        if let Some(motion) = MotionLoop::gate(track.is_some(), reduced, self.config.motion.clone())
            && let Some(track) = track
        {
            let stop = motion.stop_signal();
            let surface = dom::DomMotionSurface::new(window.clone(), track);
            if let Some(sub) = skip_on_error("helix motion", dom::run_motion_loop(&window, motion, surface)) {
                self.subscriptions.push(sub);
                self.motion = Some(stop);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Labels of the live subscriptions, in wiring order.
    #[must_use]
    pub fn subscription_labels(&self) -> Vec<&'static str> {
        self.subscriptions.iter().map(Subscription::label).collect()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.motion.as_ref().is_some_and(|stop| !stop.is_stopped())
    }

    /// Dispose every subscription, newest first.
    pub fn teardown(mut self) {
        self.dispose_all();
    }

    fn dispose_all(&mut self) {
        if let Some(stop) = self.motion.take() {
            stop.stop();
        }
        while let Some(sub) = self.subscriptions.pop() {
            sub.dispose();
        }
    }

    #[cfg(test)]
    fn with_subscriptions(config: PageConfig, subscriptions: Vec<Subscription>, motion: Option<StopSignal>) -> Self {
        Self { config, subscriptions, motion }
    }
}

/// Keep a behavior's wiring result, or log and drop that one behavior so the
/// rest of the page still mounts.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn skip_on_error<T>(behavior: &str, result: Result<T, PageError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{behavior} disabled: {err}");
            None
        }
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
