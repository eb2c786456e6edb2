use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Rect;

/// Normalized position inside a scroll trigger region, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Start of the region.
    pub const START: Self = Self(0.0);
    /// End of the region.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`. NaN maps to `0`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Progress rounded to a whole percentage, for progress bars.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f64> for Progress {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 1920x1080, the resolution the hero sequence is baked at.
    pub const HD: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Create a validated non-empty canvas.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Full-surface rectangle, the destination of every frame blit.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::HD
    }
}

/// 3-D translation in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Translate3d {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Depth offset; negative moves away from the viewer.
    pub z: f64,
}

impl Translate3d {
    /// Pure depth translation.
    pub fn z(z: f64) -> Self {
        Self { x: 0.0, y: 0.0, z }
    }
}

/// Style values written onto one animated element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// 3-D translation.
    pub translate: Translate3d,
}

impl LayerStyle {
    /// Fully visible, untransformed.
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        translate: Translate3d {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
    };

    /// Opacity-only style.
    pub fn with_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            ..Self::VISIBLE
        }
    }

    /// CSS `transform` value for this style.
    pub fn css_transform(&self) -> String {
        let t = self.translate;
        format!("translate3d({}px, {}px, {}px)", t.x, t.y, t.z)
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::VISIBLE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
