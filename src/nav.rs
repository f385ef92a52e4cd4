//! Active navigation link tracking.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser reports visibility ratios for the page sections a nav bar links
//! to. This module decides which link is "active" from each batch of reports;
//! the DOM layer only mirrors the resulting flags onto the link elements.
//!
//! Only the latest batch matters. A batch with nothing intersecting leaves the
//! previous active link in place so the highlight does not flicker off between
//! sections.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::anchor::fragment_id;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    /// Resolved section id, `None` when the fragment names no element.
    pub target_id: Option<String>,
    pub active: bool,
}

/// One visibility report for an observed section.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEntry {
    pub target_id: String,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Intersecting entry with the highest ratio; the earliest one wins ties.
#[must_use]
pub fn most_visible(entries: &[VisibilityEntry]) -> Option<&VisibilityEntry> {
    let ratio = |e: &VisibilityEntry| if e.ratio.is_finite() { e.ratio } else { 0.0 };
    entries
        .iter()
        .filter(|e| e.is_intersecting)
        .fold(None, |best: Option<&VisibilityEntry>, e| match best {
            Some(b) if ratio(b) >= ratio(e) => Some(b),
            _ => Some(e),
        })
}

#[derive(Clone, Debug, Default)]
pub struct ActiveLinkTracker {
    links: Vec<NavLink>,
}

impl ActiveLinkTracker {
    /// Build the link set in document order, resolving each fragment through
    /// `resolves`.
    pub fn new<I, S>(hrefs: I, resolves: impl Fn(&str) -> bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = hrefs
            .into_iter()
            .map(|href| {
                let href = href.into();
                let target_id = fragment_id(&href).filter(|id| resolves(id)).map(str::to_owned);
                NavLink { href, target_id, active: false }
            })
            .collect();
        Self { links }
    }

    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    #[must_use]
    pub fn has_targets(&self) -> bool {
        self.links.iter().any(|l| l.target_id.is_some())
    }

    /// Resolved section ids in link order, without duplicates.
    #[must_use]
    pub fn target_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self.links.iter().filter_map(|l| l.target_id.as_deref()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    #[must_use]
    pub fn active_target(&self) -> Option<&str> {
        self.links.iter().find(|l| l.active).and_then(|l| l.target_id.as_deref())
    }

    /// Apply one visibility batch. Returns the winning section id, or `None`
    /// when nothing intersects and the flags were left untouched.
    pub fn observe(&mut self, entries: &[VisibilityEntry]) -> Option<String> {
        let winner = most_visible(entries)?.target_id.clone();
        for link in &mut self.links {
            link.active = link.target_id.as_deref() == Some(winner.as_str());
        }
        log::debug!("active section -> {winner}");
        Some(winner)
    }

    /// Apply a batch and return the winner only if the active section changed,
    /// so callers can skip redundant class writes.
    pub fn observe_change(&mut self, entries: &[VisibilityEntry]) -> Option<String> {
        let previous = self.active_target().map(str::to_owned);
        let winner = self.observe(entries)?;
        (previous.as_deref() != Some(winner.as_str())).then_some(winner)
    }
}
