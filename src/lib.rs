//! # helix-page
//!
//! WASM behaviors for a static site page: smooth same-page anchor scrolling,
//! an active nav link that follows the most visible section, a footer year
//! stamp, and a looping "helix" track synchronized to scroll plus idle drift.
//!
//! The decision logic (`anchor`, `nav`, `motion`, `year`) is plain Rust behind
//! small host traits. The `dom` module implements those traits over `web_sys`
//! and is only compiled with the `hydrate` feature, which also enables the
//! [`start`] entry point.

pub mod anchor;
pub mod config;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod error;
pub mod motion;
pub mod nav;
pub mod page;
pub mod subscription;
pub mod year;

#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(feature = "hydrate")]
thread_local! {
    static CONTROLLER: std::cell::RefCell<Option<page::PageController>> = const { std::cell::RefCell::new(None) };
}

/// Module entry point: mount the page behaviors once the WASM module loads.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = web_sys::window()
        .and_then(|w| w.document())
        .map_or_else(config::PageConfig::default, |doc| {
            dom::read_page_config(&doc, config::CONFIG_ELEMENT_ID).unwrap_or_else(|err| {
                log::warn!("ignoring #{}: {err}", config::CONFIG_ELEMENT_ID);
                config::PageConfig::default()
            })
        });

    match page::PageController::mount(config) {
        Ok(controller) => CONTROLLER.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(controller) {
                previous.teardown();
            }
        }),
        Err(err) => log::warn!("page behaviors not mounted: {err}"),
    }
}

/// Dispose all listeners, observers, and the motion loop.
#[cfg(feature = "hydrate")]
#[wasm_bindgen]
pub fn teardown() {
    if let Some(controller) = CONTROLLER.with(|slot| slot.borrow_mut().take()) {
        controller.teardown();
    }
}
