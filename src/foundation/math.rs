/// Linear interpolation, `t = 0` yields `a`, `t = 1` yields `b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Local parameter of `p` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A zero-width segment acts as a step at `start`.
pub(crate) fn segment_t(p: f64, start: f64, end: f64) -> f64 {
    let width = end - start;
    if width <= 0.0 {
        return if p < start { 0.0 } else { 1.0 };
    }
    ((p - start) / width).clamp(0.0, 1.0)
}

/// Interpolate `a -> b` while `p` moves across `[start, end]`, holding the end values outside.
pub(crate) fn ramp(p: f64, start: f64, end: f64, a: f64, b: f64) -> f64 {
    lerp(a, b, segment_t(p, start, end))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
