//! Earlier hero layout: full-region scrub with a fading headline, a darkening overlay and a
//! vignette. Drives either a 1-based frame sequence or a video's playhead.

use crate::animation::ease::Ease;
use crate::foundation::core::Progress;
use crate::foundation::math::{lerp, segment_t};

/// Progress at which the headline is gone.
pub const HERO_TEXT_END: f64 = 0.3;

/// Headline style: fades, rises and shrinks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HeroTextStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels (negative is up).
    pub translate_y: f64,
    /// Uniform scale.
    pub scale: f64,
}

/// Visual state of the classic layout for one progress sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClassicState {
    /// The sample every channel was derived from.
    pub progress: Progress,
    /// 1-based frame number; `0` only for an empty sequence.
    pub frame_number: usize,
    /// Headline style.
    pub hero_text: HeroTextStyle,
    /// Darkening overlay opacity.
    pub overlay_opacity: f64,
    /// Vignette opacity.
    pub vignette_opacity: f64,
    /// Progress as a whole percentage, for the progress bar.
    pub scroll_percent: u8,
}

/// Map one progress sample onto the classic layout.
pub fn map_classic(progress: Progress, frame_count: usize) -> ClassicState {
    let p = progress.get();
    let k = Ease::OutQuad.apply(segment_t(p, 0.0, HERO_TEXT_END));
    ClassicState {
        progress,
        frame_number: frame_number(progress, frame_count),
        hero_text: HeroTextStyle {
            opacity: 1.0 - k,
            translate_y: -50.0 * k,
            scale: lerp(1.0, 0.8, k),
        },
        overlay_opacity: lerp(0.3, 0.5, p),
        vignette_opacity: lerp(0.0, 0.5, p),
        scroll_percent: progress.percent(),
    }
}

/// Frame number tweened linearly from 1 to N, floored and clamped to `[1, N]`.
pub fn frame_number(progress: Progress, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let tweened = 1.0 + progress.get() * (frame_count - 1) as f64;
    (tweened.floor() as usize).clamp(1, frame_count)
}

/// Video playhead position for a clip of `duration_secs`.
pub fn media_time(progress: Progress, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    progress.get() * duration_secs
}
