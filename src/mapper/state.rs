//! Scroll progress to per-element visual state.
//!
//! Every channel is a pure function of progress built from clamped linear ramps, so values hold
//! at their boundary outside each channel's active range.

use crate::foundation::core::{LayerStyle, Progress, Translate3d};
use crate::foundation::math::ramp;

/// Progress at which the frame sequence reaches its last frame.
pub const FRAME_SCRUB_END: f64 = 0.9;
/// Progress at which the nav has faded out.
pub const NAV_FADE_END: f64 = 0.1;
/// Progress at which the header starts fading.
pub const HEADER_FADE_START: f64 = 0.2;
/// Progress at which the header is gone.
pub const HEADER_END: f64 = 0.25;
/// Header depth at [`HEADER_END`].
pub const HEADER_DEPTH: f64 = -500.0;
/// Progress at which the hero image and content grid start appearing.
pub const REVEAL_START: f64 = 0.6;
/// Progress at which the hero image and content grid are fully opaque.
pub const REVEAL_FADE_END: f64 = 0.8;
/// Progress at which the hero image reaches its resting depth.
pub const HERO_END: f64 = 0.9;
/// Hero image depth before it starts moving in.
pub const HERO_DEPTH: f64 = 1000.0;

/// Animated elements that receive styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Top navigation bar.
    Nav,
    /// Hero headline block.
    Header,
    /// Hero image that flies in at the end.
    HeroImage,
    /// Profile content grid.
    ContentGrid,
}

impl Element {
    /// All elements in render order.
    pub const ALL: [Self; 4] = [Self::Nav, Self::Header, Self::HeroImage, Self::ContentGrid];
}

/// Visual state of every channel for one progress sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisualState {
    /// The sample every channel was derived from.
    pub progress: Progress,
    /// 0-based frame to draw.
    pub frame_index: usize,
    /// Nav style.
    pub nav: LayerStyle,
    /// Header style.
    pub header: LayerStyle,
    /// Hero image style.
    pub hero_image: LayerStyle,
    /// Content grid style.
    pub content_grid: LayerStyle,
}

impl VisualState {
    /// Style for `element`.
    pub fn style(&self, element: Element) -> LayerStyle {
        match element {
            Element::Nav => self.nav,
            Element::Header => self.header,
            Element::HeroImage => self.hero_image,
            Element::ContentGrid => self.content_grid,
        }
    }
}

/// Map one progress sample onto every channel.
pub fn map_state(progress: Progress, frame_count: usize) -> VisualState {
    VisualState {
        progress,
        frame_index: frame_index(progress, frame_count),
        nav: LayerStyle::with_opacity(nav_opacity(progress)),
        header: header_style(progress),
        hero_image: hero_image_style(progress),
        content_grid: LayerStyle::with_opacity(content_grid_opacity(progress)),
    }
}

/// `round(min(p / 0.9, 1) * (N - 1))`; `0` for an empty sequence.
pub fn frame_index(progress: Progress, frame_count: usize) -> usize {
    let Some(max_index) = frame_count.checked_sub(1) else {
        return 0;
    };
    let t = (progress.get() / FRAME_SCRUB_END).min(1.0);
    ((t * max_index as f64).round() as usize).min(max_index)
}

/// Fades 1 to 0 over `[0, 0.1]`.
pub fn nav_opacity(progress: Progress) -> f64 {
    ramp(progress.get(), 0.0, NAV_FADE_END, 1.0, 0.0)
}

/// Pushes back to depth -500 over `[0, 0.25]`, fading out over `[0.2, 0.25]`.
pub fn header_style(progress: Progress) -> LayerStyle {
    let p = progress.get();
    let z = ramp(p, 0.0, HEADER_END, 0.0, HEADER_DEPTH);
    let opacity = if p > HEADER_END {
        0.0
    } else {
        ramp(p, HEADER_FADE_START, HEADER_END, 1.0, 0.0)
    };
    LayerStyle {
        opacity,
        translate: Translate3d::z(z),
    }
}

/// Flies in from depth 1000 over `[0.6, 0.9]`, fading in over `[0.6, 0.8]`.
pub fn hero_image_style(progress: Progress) -> LayerStyle {
    let p = progress.get();
    LayerStyle {
        opacity: ramp(p, REVEAL_START, REVEAL_FADE_END, 0.0, 1.0),
        translate: Translate3d::z(ramp(p, REVEAL_START, HERO_END, HERO_DEPTH, 0.0)),
    }
}

/// Fades 0 to 1 over `[0.6, 0.8]`.
pub fn content_grid_opacity(progress: Progress) -> f64 {
    ramp(progress.get(), REVEAL_START, REVEAL_FADE_END, 0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/mapper/state.rs"]
mod tests;
