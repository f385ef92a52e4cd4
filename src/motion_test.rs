use super::*;
use std::cell::RefCell;

struct FakeSurface {
    scroll_y: f64,
    viewport_height: f64,
    transforms: RefCell<Vec<String>>,
}

impl FakeSurface {
    fn new(scroll_y: f64, viewport_height: f64) -> Self {
        Self { scroll_y, viewport_height, transforms: RefCell::new(Vec::new()) }
    }
}

impl MotionSurface for FakeSurface {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_transform(&self, css: &str) {
        self.transforms.borrow_mut().push(css.to_owned());
    }
}

fn still() -> MotionTunables {
    MotionTunables { sway_amplitude: 0.0, sway_frequency: 0.0, ..MotionTunables::default() }
}

// =============================================================
// wrap_unit
// =============================================================

#[test]
fn wrap_unit_keeps_values_in_period() {
    assert_eq!(wrap_unit(0.0, 800.0), 0.0);
    assert_eq!(wrap_unit(400.0, 800.0), 400.0);
    assert_eq!(wrap_unit(800.0, 800.0), 0.0);
    assert_eq!(wrap_unit(1250.0, 800.0), 450.0);
}

#[test]
fn wrap_unit_handles_negative_and_degenerate_input() {
    assert_eq!(wrap_unit(-100.0, 800.0), 700.0);
    assert_eq!(wrap_unit(-1e-20, 800.0), 0.0);
    assert_eq!(wrap_unit(100.0, 0.0), 0.0);
    assert_eq!(wrap_unit(100.0, f64::NAN), 0.0);
    assert_eq!(wrap_unit(f64::INFINITY, 800.0), 0.0);
}

#[test]
fn offset_stays_within_viewport_for_many_frames() {
    let tunables = MotionTunables::default();
    for step in 0..2_000 {
        let now_ms = f64::from(step) * 16.7;
        let scroll_y = f64::from(step) * 37.3 - 5_000.0;
        let vh = 600.0 + f64::from(step % 7) * 50.0;
        let frame = compute_frame(&tunables, now_ms, scroll_y, vh);
        assert!((0.0..vh).contains(&frame.offset_y), "offset {} escaped [0, {vh})", frame.offset_y);
    }
}

// =============================================================
// compute_frame
// =============================================================

#[test]
fn idle_drift_scenario_translates_up_400px() {
    let frame = compute_frame(&still(), 40_000.0, 0.0, 800.0);
    assert!((frame.offset_y - 400.0).abs() < 1e-9);
    assert!((frame.translate_y() + 400.0).abs() < 1e-9);
    assert_eq!(frame.css_transform(), "translateY(-400px) translateX(0px) rotate(0.6deg)");
}

#[test]
fn scroll_and_idle_offsets_combine_then_wrap() {
    // idle: 50s * 10 = 500; scroll: 1000 * 0.65 = 650; 500 + 650 = 1150 -> 350
    let frame = compute_frame(&still(), 50_000.0, 1_000.0, 800.0);
    assert!((frame.offset_y - 350.0).abs() < 1e-9);
}

#[test]
fn sway_follows_sine_and_tilt_is_constant() {
    let tunables = MotionTunables::default();
    // quarter period of 0.8 Hz is 312.5ms -> sin peak
    let peak = compute_frame(&tunables, 312.5, 0.0, 800.0);
    assert!((peak.sway_x - 3.0).abs() < 1e-9);
    let later = compute_frame(&tunables, 9_000.0, 120.0, 800.0);
    assert_eq!(peak.tilt_deg, 0.6);
    assert_eq!(later.tilt_deg, 0.6);
}

#[test]
fn transform_orders_translate_y_first() {
    let css = compute_frame(&MotionTunables::default(), 1_234.0, 56.0, 700.0).css_transform();
    let y = css.find("translateY").expect("translateY present");
    let x = css.find("translateX").expect("translateX present");
    let r = css.find("rotate").expect("rotate present");
    assert!(y < x && x < r);
}

// =============================================================
// MotionLoop
// =============================================================

#[test]
fn gate_blocks_reduced_motion_and_missing_track() {
    assert!(MotionLoop::gate(true, true, MotionTunables::default()).is_none());
    assert!(MotionLoop::gate(false, false, MotionTunables::default()).is_none());
    assert!(MotionLoop::gate(true, false, MotionTunables::default()).is_some());
}

#[test]
fn reduced_motion_never_touches_the_track() {
    let surface = FakeSurface::new(0.0, 800.0);
    if let Some(motion) = MotionLoop::gate(true, true, MotionTunables::default()) {
        motion.tick(&surface, 16.0);
    }
    assert!(surface.transforms.borrow().is_empty());
}

#[test]
fn tick_applies_one_transform_per_frame() {
    let surface = FakeSurface::new(0.0, 800.0);
    let motion = MotionLoop::new(still());
    assert_eq!(motion.tick(&surface, 40_000.0), Tick::Continue);
    assert_eq!(motion.tick(&surface, 40_016.0), Tick::Continue);
    assert_eq!(motion.frames_applied(), 2);
    let transforms = surface.transforms.borrow();
    assert_eq!(transforms[0], "translateY(-400px) translateX(0px) rotate(0.6deg)");
    assert_eq!(transforms.len(), 2);
}

#[test]
fn stop_signal_halts_loop() {
    let surface = FakeSurface::new(0.0, 800.0);
    let motion = MotionLoop::new(MotionTunables::default());
    let stop = motion.stop_signal();
    assert_eq!(motion.tick(&surface, 100.0), Tick::Continue);
    stop.stop();
    assert!(stop.is_stopped());
    assert_eq!(motion.tick(&surface, 116.0), Tick::Stopped);
    assert_eq!(motion.frames_applied(), 1);
    assert_eq!(surface.transforms.borrow().len(), 1);
}

#[test]
fn refused_frame_request_stops_the_loop() {
    let surface = FakeSurface::new(0.0, 800.0);
    let motion = MotionLoop::new(MotionTunables::default());
    let stop = motion.stop_signal();

    assert_eq!(stop.settle_request::<i32, &str>(Ok(7)), Some(7));
    assert!(!stop.is_stopped());

    assert_eq!(stop.settle_request::<i32, &str>(Err("InvalidStateError")), None);
    assert!(stop.is_stopped());
    assert_eq!(motion.tick(&surface, 16.0), Tick::Stopped);
    assert!(surface.transforms.borrow().is_empty());
}
