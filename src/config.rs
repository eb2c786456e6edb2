use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::loader::frame_loader::LoaderOpts;
use crate::loader::source::FramePattern;
use crate::scroll::smooth::SmoothScrollOpts;

/// Deployment description of one scroll-scrubbed frame sequence.
///
/// Every field has a default, so a config file only needs to list what differs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Number of frames in the sequence.
    pub frame_count: usize,
    /// File naming of the frames.
    pub pattern: FramePattern,
    /// Drawing surface resolution.
    pub canvas: Canvas,
    /// Loader tuning.
    pub loader: LoaderOpts,
    /// Momentum scrolling.
    pub smooth_scroll: SmoothScrollOpts,
    /// Delay between readiness and unlocking scroll input, in milliseconds.
    pub reveal_delay_ms: u64,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            frame_count: 218,
            pattern: FramePattern::default(),
            canvas: Canvas::HD,
            loader: LoaderOpts::default(),
            smooth_scroll: SmoothScrollOpts::default(),
            reveal_delay_ms: 500,
        }
    }
}

impl ReelConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| ReelError::serde(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section.
    pub fn validate(&self) -> ReelResult<()> {
        if self.frame_count == 0 {
            return Err(ReelError::validation("frame_count must be >= 1"));
        }
        Canvas::new(self.canvas.width, self.canvas.height)?;
        self.pattern.validate()?;
        self.loader.validate()?;
        self.smooth_scroll.validate()?;
        Ok(())
    }

    /// [`ReelConfig::reveal_delay_ms`] as a duration.
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
