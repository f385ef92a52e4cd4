#![cfg(not(feature = "hydrate"))]

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn recording(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Subscription {
    let log = Rc::clone(log);
    Subscription::new(label, move || log.borrow_mut().push(label))
}

#[test]
fn mount_without_browser_wires_nothing() {
    let controller = PageController::mount(PageConfig::default()).expect("default config mounts");
    assert_eq!(controller.subscription_count(), 0);
    assert!(!controller.is_animating());
    assert_eq!(controller.config().track_id, "dnaTrack");
}

#[test]
fn mount_rejects_invalid_config() {
    let mut config = PageConfig::default();
    config.observer.thresholds = vec![-0.1];
    assert!(matches!(PageController::mount(config), Err(PageError::InvalidConfig(_))));
}

#[test]
fn teardown_disposes_newest_first_and_stops_motion() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let stop = StopSignal::default();
    let controller = PageController::with_subscriptions(
        PageConfig::default(),
        vec![recording("anchor-click", &log), recording("active-links", &log), recording("motion-loop", &log)],
        Some(stop.clone()),
    );
    assert!(controller.is_animating());
    assert_eq!(controller.subscription_count(), 3);
    assert_eq!(controller.subscription_labels(), vec!["anchor-click", "active-links", "motion-loop"]);

    controller.teardown();
    assert!(stop.is_stopped());
    assert_eq!(*log.borrow(), vec!["motion-loop", "active-links", "anchor-click"]);
}

#[test]
fn dropping_controller_tears_down() {
    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let _controller =
            PageController::with_subscriptions(PageConfig::default(), vec![recording("anchor-click", &log)], None);
    }
    assert_eq!(*log.borrow(), vec!["anchor-click"]);
}

#[test]
fn failed_behavior_is_skipped_without_failing_others() {
    let mut wired = Vec::new();
    let results: Vec<Result<&'static str, PageError>> = vec![
        Ok("anchor-click"),
        Err(PageError::Dom("SyntaxError: rootMargin must be specified in pixels or percent".to_owned())),
        Ok("motion-loop"),
    ];
    for (behavior, result) in ["anchor scrolling", "active-link tracking", "helix motion"].into_iter().zip(results) {
        if let Some(label) = skip_on_error(behavior, result) {
            wired.push(label);
        }
    }
    assert_eq!(wired, vec!["anchor-click", "motion-loop"]);
}

#[test]
fn skip_on_error_passes_nested_absence_through() {
    let disabled: Result<Option<u8>, PageError> = Ok(None);
    assert_eq!(skip_on_error("active-link tracking", disabled).flatten(), None);
    let failed: Result<Option<u8>, PageError> = Err(PageError::Dom("boom".to_owned()));
    assert_eq!(skip_on_error("active-link tracking", failed).flatten(), None);
    assert_eq!(skip_on_error("active-link tracking", Ok(Some(7u8))).flatten(), Some(7));
}
