use super::*;
use crate::foundation::core::{Canvas, Progress};
use crate::foundation::error::ReelError;
use crate::loader::decode::DecodedFrame;
use crate::render::surface::{PixmapSurface, StyleTable};
use crate::scroll::smooth::SmoothScrollOpts;

const WAIT: Duration = Duration::from_secs(10);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn config(frame_count: usize, smooth: bool, reveal_delay_ms: u64) -> ReelConfig {
    ReelConfig {
        frame_count,
        canvas: Canvas::new(8, 4).unwrap(),
        smooth_scroll: SmoothScrollOpts {
            enabled: smooth,
            ..SmoothScrollOpts::default()
        },
        reveal_delay_ms,
        ..ReelConfig::default()
    }
}

fn source() -> Arc<dyn FrameSource> {
    Arc::new(|i: usize| DecodedFrame::solid(2, 2, [i as u8, 0, 0, 255]))
}

// 1000px of scrubbable distance.
fn region() -> ScrollRegion {
    ScrollRegion::new(0.0, 2000.0)
}

fn ready_session(cfg: &ReelConfig, src: Arc<dyn FrameSource>) -> ScrubSession {
    let s = ScrubSession::new(cfg, src, region(), 1000.0).unwrap();
    assert!(s.wait_ready_timeout(WAIT));
    s
}

#[test]
fn input_is_locked_until_reveal_delay_passes() {
    let cfg = config(10, false, 100);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    assert!(s.is_scroll_locked());
    // The first frame is painted behind the loading screen, once.
    let painted = s.tick(ms(0), &mut surface, &mut styles).unwrap();
    assert!(s.is_scroll_locked());
    assert_eq!(painted.state.frame_index, 0);
    assert!(painted.outcome.drew_frame);
    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));

    s.on_scroll(500.0);
    assert!(s.tick(ms(50), &mut surface, &mut styles).is_none());

    let first = s.tick(ms(100), &mut surface, &mut styles).unwrap();
    assert!(!s.is_scroll_locked());
    // The scroll sent while locked was dropped.
    assert_eq!(first.state.progress, Progress::START);
    assert!(first.outcome.drew_frame);
    assert_eq!(first.outcome.styles_written, 0);
    assert_eq!(s.load_percent(), 100);
}

#[test]
fn nothing_is_painted_while_the_first_frame_is_missing() {
    let cfg = config(4, false, 100);
    let failing: Arc<dyn FrameSource> = Arc::new(|_i: usize| -> ReelResult<DecodedFrame> {
        Err(ReelError::asset("gone"))
    });
    let mut s = ready_session(&cfg, failing);
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    assert!(s.tick(ms(0), &mut surface, &mut styles).is_none());
    assert_eq!(styles.writes(), 0);
    assert!(s.tick(ms(100), &mut surface, &mut styles).is_some());
}

#[test]
fn wheel_overshoot_does_not_accumulate_past_the_end() {
    let cfg = config(10, false, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    s.tick(ms(0), &mut surface, &mut styles);
    s.on_wheel(10_000.0);
    let r = s.tick(ms(16), &mut surface, &mut styles).unwrap();
    assert_eq!(r.state.progress, Progress::END);

    s.on_wheel(-500.0);
    let r = s.tick(ms(32), &mut surface, &mut styles).unwrap();
    assert!((r.state.progress.get() - 0.5).abs() < 1e-12);

    s.on_touch(20_000.0);
    s.on_touch(-250.0);
    let r = s.tick(ms(48), &mut surface, &mut styles).unwrap();
    assert!((r.state.progress.get() - 0.75).abs() < 1e-12);
}

#[test]
fn bursts_of_scroll_render_once_per_tick() {
    let cfg = config(10, false, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    assert!(s.tick(ms(0), &mut surface, &mut styles).is_some());
    s.on_scroll(100.0);
    s.on_scroll(300.0);
    s.on_scroll(450.0);
    let report = s.tick(ms(16), &mut surface, &mut styles).unwrap();
    assert!((report.state.progress.get() - 0.45).abs() < 1e-12);
    assert_eq!(report.state.frame_index, 5);
    assert!(s.tick(ms(32), &mut surface, &mut styles).is_none());
}

#[test]
fn wheel_without_smoothing_moves_directly() {
    let cfg = config(10, false, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    s.tick(ms(0), &mut surface, &mut styles);
    s.on_wheel(250.0);
    let r = s.tick(ms(16), &mut surface, &mut styles).unwrap();
    assert!((r.state.progress.get() - 0.25).abs() < 1e-12);
    s.on_touch(-10_000.0);
    let r = s.tick(ms(32), &mut surface, &mut styles).unwrap();
    assert_eq!(r.state.progress, Progress::START);
}

#[test]
fn smooth_scroll_glides_across_ticks() {
    let cfg = config(218, true, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    s.tick(ms(0), &mut surface, &mut styles);
    s.on_wheel(400.0);

    let mut last = 0.0;
    let mut reports = 0;
    for i in 1..=120u64 {
        if let Some(r) = s.tick(ms(i * 16), &mut surface, &mut styles) {
            let p = r.state.progress.get();
            assert!(p >= last);
            last = p;
            reports += 1;
        }
    }
    assert!(reports > 1);
    assert!((last - 0.6).abs() < 1e-9);
}

#[test]
fn failed_frames_skip_the_draw() {
    let cfg = config(4, false, 0);
    let failing: Arc<dyn FrameSource> = Arc::new(|_i: usize| -> ReelResult<DecodedFrame> {
        Err(ReelError::asset("gone"))
    });
    let mut s = ready_session(&cfg, failing);
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    let r = s.tick(ms(0), &mut surface, &mut styles).unwrap();
    assert!(!r.outcome.drew_frame);
    assert_eq!(r.outcome.styles_written, 4);
    assert!(surface.data().iter().all(|b| *b == 0));
}

#[test]
fn dispose_turns_everything_into_noops() {
    let cfg = config(10, false, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    s.tick(ms(0), &mut surface, &mut styles);
    s.dispose();
    s.dispose();
    assert!(s.is_disposed());
    assert!(s.loader().is_cancelled());

    s.on_scroll(900.0);
    s.set_layout(ScrollRegion::new(0.0, 5000.0), 1000.0);
    assert!(s.tick(ms(16), &mut surface, &mut styles).is_none());
}

#[test]
fn layout_change_rerenders() {
    let cfg = config(10, false, 0);
    let mut s = ready_session(&cfg, source());
    let mut surface = PixmapSurface::new(cfg.canvas);
    let mut styles = StyleTable::new();

    s.tick(ms(0), &mut surface, &mut styles);
    s.on_scroll(500.0);
    s.tick(ms(16), &mut surface, &mut styles);
    s.set_layout(ScrollRegion::new(0.0, 3000.0), 1000.0);
    let r = s.tick(ms(32), &mut surface, &mut styles).unwrap();
    assert!((r.state.progress.get() - 0.25).abs() < 1e-12);
}
