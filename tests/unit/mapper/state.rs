use super::*;

const EPS: f64 = 1e-9;

fn p(v: f64) -> Progress {
    Progress::new(v)
}

fn samples() -> impl Iterator<Item = f64> {
    (0..=1000).map(|i| i as f64 / 1000.0)
}

#[test]
fn frame_index_monotonic_and_bounded() {
    for n in [1usize, 2, 4, 218] {
        let mut prev = 0;
        for v in samples() {
            let f = frame_index(p(v), n);
            assert!(f < n);
            assert!(f >= prev, "n={n} p={v}");
            prev = f;
        }
    }
}

#[test]
fn frame_index_endpoints() {
    assert_eq!(frame_index(p(0.0), 218), 0);
    assert_eq!(frame_index(p(0.45), 218), 109);
    for v in [0.9, 0.95, 1.0] {
        assert_eq!(frame_index(p(v), 218), 217);
    }
    assert_eq!(frame_index(p(0.5), 0), 0);
}

#[test]
fn nav_fades_in_first_tenth() {
    assert_eq!(nav_opacity(p(0.0)), 1.0);
    assert!((nav_opacity(p(0.05)) - 0.5).abs() < EPS);
    assert_eq!(nav_opacity(p(0.1)), 0.0);
    assert_eq!(nav_opacity(p(0.7)), 0.0);
}

#[test]
fn header_opacity_law() {
    for v in samples().filter(|v| *v <= 0.2) {
        assert_eq!(header_style(p(v)).opacity, 1.0, "p={v}");
    }
    assert!((header_style(p(0.225)).opacity - 0.5).abs() < EPS);
    assert!(header_style(p(0.25)).opacity.abs() < EPS);
    for v in samples().filter(|v| *v > 0.25) {
        assert_eq!(header_style(p(v)).opacity, 0.0, "p={v}");
    }
}

#[test]
fn header_opacity_continuous_at_fade_start() {
    let below = header_style(p(0.2 - 1e-12)).opacity;
    let at = header_style(p(0.2)).opacity;
    let above = header_style(p(0.2 + 1e-12)).opacity;
    assert!((below - at).abs() < 1e-6);
    assert!((above - at).abs() < 1e-6);
}

#[test]
fn header_depth_law() {
    assert_eq!(header_style(p(0.0)).translate.z, 0.0);
    assert!((header_style(p(0.125)).translate.z + 250.0).abs() < EPS);
    assert_eq!(header_style(p(0.25)).translate.z, -500.0);
    assert_eq!(header_style(p(0.6)).translate.z, -500.0);
}

#[test]
fn hero_image_law() {
    for v in samples().filter(|v| *v < 0.6) {
        let s = hero_image_style(p(v));
        assert_eq!(s.opacity, 0.0, "p={v}");
        assert_eq!(s.translate.z, 1000.0, "p={v}");
    }

    let mid = hero_image_style(p(0.7));
    assert!((mid.opacity - 0.5).abs() < EPS);
    assert!((mid.translate.z - 1000.0 / 3.0 * 2.0).abs() < 1e-6);

    for v in samples().filter(|v| *v >= 0.8) {
        assert_eq!(hero_image_style(p(v)).opacity, 1.0, "p={v}");
    }
    assert_eq!(hero_image_style(p(0.9)).translate.z, 0.0);
    assert_eq!(hero_image_style(p(1.0)).translate.z, 0.0);
}

#[test]
fn content_grid_law() {
    assert_eq!(content_grid_opacity(p(0.3)), 0.0);
    assert!((content_grid_opacity(p(0.7)) - 0.5).abs() < EPS);
    assert_eq!(content_grid_opacity(p(0.85)), 1.0);
}

#[test]
fn map_state_uses_one_sample_for_every_channel() {
    let s = map_state(p(0.7), 218);
    assert_eq!(s.progress, p(0.7));
    assert_eq!(s.frame_index, frame_index(p(0.7), 218));
    assert_eq!(s.style(Element::Nav), LayerStyle::with_opacity(0.0));
    assert_eq!(s.style(Element::Header), header_style(p(0.7)));
    assert_eq!(s.style(Element::HeroImage), hero_image_style(p(0.7)));
    assert_eq!(s.content_grid.translate, Translate3d::default());
}

#[test]
fn map_state_is_pure() {
    for v in samples() {
        assert_eq!(map_state(p(v), 218), map_state(p(v), 218));
    }
}
