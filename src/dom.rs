//! Browser bindings for the page behaviors.
//!
//! ARCHITECTURE
//! ============
//! Decision logic lives in `anchor`, `nav` and `motion`; this module only
//! implements their host traits over `web_sys` and turns each listener,
//! observer, or frame loop into a [`Subscription`]. Everything here requires
//! the `hydrate` feature.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::anchor::{ANCHOR_SELECTOR, ScrollHost, handle_anchor_click};
use crate::config::{ObserverOptions, PageConfig};
use crate::error::PageError;
use crate::motion::{MotionLoop, MotionSurface, Tick};
use crate::nav::{ActiveLinkTracker, VisibilityEntry};
use crate::subscription::Subscription;
use crate::year::{current_year, year_text};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Resolves fragment targets by element id and scrolls them into view.
pub struct DomScrollHost {
    document: Document,
}

impl DomScrollHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ScrollHost for DomScrollHost {
    type Target = Element;

    fn find_target(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn scroll_to_start(&self, target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// The decorative track plus the window it lives in.
pub struct DomMotionSurface {
    window: Window,
    track: HtmlElement,
}

impl DomMotionSurface {
    pub fn new(window: Window, track: HtmlElement) -> Self {
        Self { window, track }
    }
}

impl MotionSurface for DomMotionSurface {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    fn set_transform(&self, css: &str) {
        if let Err(err) = self.track.style().set_property("transform", css) {
            log::warn!("failed to set track transform: {err:?}");
        }
    }
}

/// Read the optional JSON override embedded in the page.
///
/// A missing element yields the defaults; a malformed one is an error so the
/// caller can decide whether to fall back.
///
/// # Errors
///
/// Propagates [`PageConfig::from_json`] failures.
pub fn read_page_config(document: &Document, element_id: &str) -> Result<PageConfig, PageError> {
    match document.get_element_by_id(element_id).and_then(|el| el.text_content()) {
        Some(raw) if !raw.trim().is_empty() => PageConfig::from_json(&raw),
        _ => Ok(PageConfig::default()),
    }
}

#[must_use]
pub fn prefers_reduced_motion(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map_or(false, |mq| mq.matches())
}

/// Set the footer year text. Returns `false` when the element is absent.
pub fn stamp_year(document: &Document, year_id: &str) -> bool {
    let Some(el) = document.get_element_by_id(year_id) else {
        log::debug!("year stamp skipped: #{year_id} missing");
        return false;
    };
    el.set_text_content(Some(&year_text(current_year())));
    true
}

/// Attach a smooth-scroll click listener to every fragment link.
///
/// # Errors
///
/// Returns [`PageError::Dom`] if the selector query or listener registration fails.
pub fn bind_anchor_clicks(document: &Document) -> Result<Vec<Subscription>, PageError> {
    let anchors = document.query_selector_all(ANCHOR_SELECTOR)?;
    let mut subscriptions = Vec::new();
    for index in 0..anchors.length() {
        let Some(anchor) = anchors.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let host = DomScrollHost::new(document.clone());
        let link = anchor.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            if handle_anchor_click(&host, &href).suppresses_default() {
                event.prevent_default();
            }
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        subscriptions.push(Subscription::new("anchor-click", move || {
            let _ = anchor.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }));
    }
    Ok(subscriptions)
}

fn observer_init(options: &ObserverOptions) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    let thresholds: Array = options.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
    init.set_threshold(&thresholds);
    init
}

/// Track the most visible nav section and toggle the active class on its link.
///
/// Returns `Ok(None)` when the nav container is missing or none of its links
/// resolve to a section.
///
/// # Errors
///
/// Returns [`PageError::Dom`] if the observer cannot be constructed.
pub fn bind_active_links(document: &Document, config: &PageConfig) -> Result<Option<Subscription>, PageError> {
    let Some(nav) = document.get_element_by_id(&config.nav_id) else {
        log::debug!("active-link tracking disabled: #{} missing", config.nav_id);
        return Ok(None);
    };

    let nodes = nav.query_selector_all("a")?;
    let links: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let hrefs = links.iter().map(|l| l.get_attribute("href").unwrap_or_default());
    let tracker = ActiveLinkTracker::new(hrefs, |id| document.get_element_by_id(id).is_some());
    if !tracker.has_targets() {
        log::debug!("active-link tracking disabled: no resolvable targets");
        return Ok(None);
    }
    let targets: Vec<Element> = tracker
        .target_ids()
        .into_iter()
        .filter_map(|id| document.get_element_by_id(id))
        .collect();

    let tracker = Rc::new(RefCell::new(tracker));
    let active_class = config.active_class.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityEntry {
                    target_id: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
                .collect();

            let mut tracker = tracker.borrow_mut();
            if tracker.observe_change(&batch).is_none() {
                return;
            }
            for (element, link) in links.iter().zip(tracker.links()) {
                let _ = element.class_list().toggle_with_force(&active_class, link.active);
            }
        },
    );

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_init(&config.observer))?;
    for target in &targets {
        observer.observe(target);
    }
    log::debug!("observing {} nav sections", targets.len());

    Ok(Some(Subscription::new("active-links", move || {
        observer.disconnect();
        drop(callback);
    })))
}

/// Drive `motion` from `requestAnimationFrame` until the returned subscription
/// is disposed.
///
/// # Errors
///
/// Returns [`PageError::Dom`] if the first frame cannot be requested.
pub fn run_motion_loop(
    window: &Window,
    motion: MotionLoop,
    surface: DomMotionSurface,
) -> Result<Subscription, PageError> {
    let stop = motion.stop_signal();
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    // The callback reschedules itself through this slot; the disposer empties
    // it to break the cycle.
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

    let frame_slot = Rc::clone(&slot);
    let frame_pending = Rc::clone(&pending);
    let frame_window = window.clone();
    let frame_stop = stop.clone();
    *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
        frame_pending.set(None);
        if motion.tick(&surface, now_ms) == Tick::Stopped {
            return;
        }
        if let Some(callback) = frame_slot.borrow().as_ref() {
            let requested = frame_window.request_animation_frame(callback.as_ref().unchecked_ref());
            frame_pending.set(frame_stop.settle_request(requested));
        }
    }));

    let first = match slot.borrow().as_ref() {
        Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref())?,
        None => return Err(PageError::Dom("motion callback missing".to_owned())),
    };
    pending.set(Some(first));

    let window = window.clone();
    Ok(Subscription::new("motion-loop", move || {
        stop.stop();
        if let Some(handle) = pending.take() {
            let _ = window.cancel_animation_frame(handle);
        }
        slot.borrow_mut().take();
    }))
}

/// Look up the motion track as an `HtmlElement`.
#[must_use]
pub fn motion_track(document: &Document, track_id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(track_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}
