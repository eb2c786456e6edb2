use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};

/// Momentum-scrolling parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollOpts {
    /// When `false`, input jumps straight to the target.
    pub enabled: bool,
    /// Time to settle on a new target, in seconds.
    pub duration_secs: f64,
    /// Curve from the current position to the target.
    pub ease: Ease,
    /// Scale applied to wheel deltas.
    pub wheel_multiplier: f64,
    /// Scale applied to touch deltas.
    pub touch_multiplier: f64,
}

impl Default for SmoothScrollOpts {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: 1.0,
            ease: Ease::OutExpo,
            wheel_multiplier: 1.5,
            touch_multiplier: 2.5,
        }
    }
}

impl SmoothScrollOpts {
    /// Reject non-finite or non-positive parameters.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ReelError::validation(
                "smooth_scroll duration_secs must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::validation(format!(
                    "smooth_scroll {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Eased scroll position chasing a target offset, advanced by the frame clock.
///
/// Every new target restarts the ease from the current position, so bursts of wheel input
/// accumulate into one glide instead of stuttering.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    opts: SmoothScrollOpts,
    limit: f64,
    current: f64,
    target: f64,
    from: f64,
    elapsed: f64,
    animating: bool,
}

impl SmoothScroll {
    /// Create a scroller over `[0, limit]`, resting at the top.
    pub fn new(opts: SmoothScrollOpts, limit: f64) -> Self {
        Self {
            opts,
            limit: limit.max(0.0),
            current: 0.0,
            target: 0.0,
            from: 0.0,
            elapsed: 0.0,
            animating: false,
        }
    }

    /// Change the scrollable length, pulling positions back inside it.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.current = self.current.clamp(0.0, self.limit);
        let target = self.target;
        self.scroll_to(target);
    }

    /// Feed a wheel delta in pixels.
    pub fn wheel(&mut self, delta: f64) {
        let y = self.target + delta * self.opts.wheel_multiplier;
        self.scroll_to(y);
    }

    /// Feed a touch-drag delta in pixels.
    pub fn touch(&mut self, delta: f64) {
        let y = self.target + delta * self.opts.touch_multiplier;
        self.scroll_to(y);
    }

    /// Glide to an absolute offset.
    pub fn scroll_to(&mut self, y: f64) {
        if !y.is_finite() {
            return;
        }
        self.target = y.clamp(0.0, self.limit);
        if !self.opts.enabled {
            self.current = self.target;
            self.animating = false;
            return;
        }
        self.from = self.current;
        self.elapsed = 0.0;
        self.animating = self.target != self.current;
    }

    /// Advance by `dt_secs` and return the new position.
    pub fn tick(&mut self, dt_secs: f64) -> f64 {
        if !self.animating {
            return self.current;
        }
        self.elapsed += dt_secs.max(0.0);
        let t = (self.elapsed / self.opts.duration_secs).min(1.0);
        if t >= 1.0 {
            self.current = self.target;
            self.animating = false;
        } else {
            let k = self.opts.ease.apply(t);
            self.current = self.from + (self.target - self.from) * k;
        }
        self.current
    }

    /// Current eased position.
    pub fn position(&self) -> f64 {
        self.current
    }

    /// Position being glided towards.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` while the position has not settled on the target.
    pub fn is_animating(&self) -> bool {
        self.animating
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
