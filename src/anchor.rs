//! Smooth scrolling for same-page anchor links.
//!
//! The click decision is host-agnostic: the DOM layer implements [`ScrollHost`]
//! and calls `preventDefault` only when [`handle_anchor_click`] reports a scroll.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

/// Selector for links whose `href` is a fragment.
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id named by a fragment `href`, e.g. `"#about"` -> `"about"`.
///
/// A bare `"#"` names nothing.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}

/// Host capabilities needed to resolve and scroll to an in-page target.
pub trait ScrollHost {
    type Target;

    fn find_target(&self, id: &str) -> Option<Self::Target>;

    /// Smoothly align the target's top edge with the viewport top.
    fn scroll_to_start(&self, target: &Self::Target);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Scrolled { target_id: String },
    /// No target; the browser's default action is left alone.
    Ignored,
}

impl ClickOutcome {
    #[must_use]
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Scrolled { .. })
    }
}

pub fn handle_anchor_click<H: ScrollHost>(host: &H, href: &str) -> ClickOutcome {
    let Some(id) = fragment_id(href) else {
        return ClickOutcome::Ignored;
    };
    let Some(target) = host.find_target(id) else {
        return ClickOutcome::Ignored;
    };
    host.scroll_to_start(&target);
    ClickOutcome::Scrolled { target_id: id.to_owned() }
}
