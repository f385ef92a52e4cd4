//! Disposer handles for host registrations.
//!
//! Every listener, observer, or frame loop the page wires up is represented by a
//! `Subscription`. Dropping it (or calling [`Subscription::dispose`]) runs the
//! teardown closure exactly once.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

pub struct Subscription {
    label: &'static str,
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(label: &'static str, dispose: impl FnOnce() + 'static) -> Self {
        Self { label, dispose: Some(Box::new(dispose)) }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Run the teardown now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            log::debug!("disposing {}", self.label);
            dispose();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("live", &self.dispose.is_some())
            .finish()
    }
}
