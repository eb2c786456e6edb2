/// Easing curves applied to a normalized `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// No easing.
    #[default]
    Linear,
    /// Quadratic ease-out (`power2.out`).
    OutQuad,
    /// Exponential ease-out used by momentum scrolling: `min(1, 1.001 - 2^(-10t))`.
    OutExpo,
}

impl Ease {
    /// Apply the curve. `t` is clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutExpo => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
