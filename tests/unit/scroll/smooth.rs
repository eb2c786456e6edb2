use super::*;

#[test]
fn wheel_glides_and_settles() {
    let mut s = SmoothScroll::new(SmoothScrollOpts::default(), 10_000.0);
    s.wheel(100.0);
    assert_eq!(s.target(), 150.0);
    assert!(s.is_animating());

    let a = s.tick(0.1);
    let b = s.tick(0.1);
    assert!(a > 0.0 && a < 150.0);
    assert!(b > a && b <= 150.0);

    assert_eq!(s.tick(5.0), 150.0);
    assert!(!s.is_animating());
}

#[test]
fn touch_uses_its_own_multiplier() {
    let mut s = SmoothScroll::new(SmoothScrollOpts::default(), 10_000.0);
    s.touch(10.0);
    assert_eq!(s.target(), 25.0);
}

#[test]
fn target_is_clamped_to_limit() {
    let mut s = SmoothScroll::new(SmoothScrollOpts::default(), 500.0);
    s.wheel(10_000.0);
    assert_eq!(s.target(), 500.0);
    s.wheel(-10_000.0);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn disabled_jumps_immediately() {
    let opts = SmoothScrollOpts {
        enabled: false,
        ..SmoothScrollOpts::default()
    };
    let mut s = SmoothScroll::new(opts, 1000.0);
    s.scroll_to(400.0);
    assert_eq!(s.position(), 400.0);
    assert!(!s.is_animating());
    assert_eq!(s.tick(0.016), 400.0);
}

#[test]
fn retarget_restarts_from_current_position() {
    let mut s = SmoothScroll::new(SmoothScrollOpts::default(), 10_000.0);
    s.scroll_to(1000.0);
    let mid = s.tick(0.05);
    s.scroll_to(0.0);
    let back = s.tick(0.05);
    assert!(back < mid);
    assert!(back >= 0.0);
}

#[test]
fn shrinking_limit_pulls_position_in() {
    let mut s = SmoothScroll::new(SmoothScrollOpts::default(), 1000.0);
    s.scroll_to(900.0);
    s.tick(10.0);
    s.set_limit(300.0);
    assert_eq!(s.position(), 300.0);
    assert_eq!(s.target(), 300.0);
}

#[test]
fn validate_rejects_bad_values() {
    assert!(SmoothScrollOpts::default().validate().is_ok());
    let bad = SmoothScrollOpts {
        duration_secs: 0.0,
        ..SmoothScrollOpts::default()
    };
    assert!(bad.validate().is_err());
    let bad = SmoothScrollOpts {
        wheel_multiplier: f64::NAN,
        ..SmoothScrollOpts::default()
    };
    assert!(bad.validate().is_err());
}
