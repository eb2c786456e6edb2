use crate::foundation::core::Progress;

/// Vertical extent of the tall section that drives the animation, in document pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRegion {
    /// Offset of the region's top edge from the document top.
    pub top: f64,
    /// Total height of the region.
    pub height: f64,
}

impl ScrollRegion {
    /// Create a region from its top offset and height.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Scroll offset at which the region's bottom meets the viewport bottom.
    pub fn scroll_end(self, viewport_height: f64) -> f64 {
        self.top + self.height - viewport_height
    }
}

/// Map a scroll offset onto progress through `region`.
///
/// Before the region the result is `0`, past its end `1`. When the region is no taller than the
/// viewport there is nothing to scrub: the result is `0` above the region and `1` once reached.
pub fn scroll_progress(region: ScrollRegion, viewport_height: f64, scroll_y: f64) -> Progress {
    let start = region.top;
    let end = region.scroll_end(viewport_height);
    let range = end - start;

    if scroll_y < start {
        return Progress::START;
    }
    if range.is_nan() || range <= 0.0 || scroll_y > end {
        return Progress::END;
    }
    Progress::new((scroll_y - start) / range)
}

/// Coalesces scroll notifications into at most one progress sample per frame tick.
///
/// Hosts call [`ProgressSource::push_scroll`] from their scroll handler as often as events arrive
/// and [`ProgressSource::take`] once per animation frame.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    region: ScrollRegion,
    viewport_height: f64,
    scroll_y: f64,
    dirty: bool,
    last: Option<Progress>,
}

impl ProgressSource {
    /// Create a source for `region` seen through a viewport of `viewport_height`.
    ///
    /// The first tick always yields a sample so the initial state gets rendered.
    pub fn new(region: ScrollRegion, viewport_height: f64) -> Self {
        Self {
            region,
            viewport_height,
            scroll_y: 0.0,
            dirty: true,
            last: None,
        }
    }

    /// Record the latest scroll offset. Only the newest value survives until the next tick.
    pub fn push_scroll(&mut self, scroll_y: f64) {
        if scroll_y != self.scroll_y {
            self.scroll_y = scroll_y;
            self.dirty = true;
        }
    }

    /// Update the region geometry after a layout change; the next tick re-emits.
    pub fn set_layout(&mut self, region: ScrollRegion, viewport_height: f64) {
        self.region = region;
        self.viewport_height = viewport_height;
        self.dirty = true;
        self.last = None;
    }

    /// Consume the pending sample.
    ///
    /// Returns `None` when nothing was pushed since the last tick or the progress did not change.
    pub fn take(&mut self) -> Option<Progress> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;

        let p = self.current();
        if self.last == Some(p) {
            return None;
        }
        self.last = Some(p);
        Some(p)
    }

    /// Progress for the latest recorded offset, without consuming it.
    pub fn current(&self) -> Progress {
        scroll_progress(self.region, self.viewport_height, self.scroll_y)
    }

    /// The latest recorded scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Viewport height the region is seen through.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Largest meaningful scroll offset: where the region's bottom meets the viewport bottom.
    pub fn max_scroll(&self) -> f64 {
        self.region.scroll_end(self.viewport_height).max(0.0)
    }

    /// The region this source tracks.
    pub fn region(&self) -> ScrollRegion {
        self.region
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
