use std::sync::Arc;
use std::time::Duration;

use crate::config::ReelConfig;
use crate::foundation::error::ReelResult;
use crate::loader::frame_loader::{FrameLoader, LoadHandle};
use crate::loader::source::FrameSource;
use crate::loader::store::FrameStore;
use crate::mapper::state::{VisualState, map_state};
use crate::render::renderer::{RenderOutcome, Renderer};
use crate::render::surface::{DrawSurface, StyleSink};
use crate::scroll::progress::{ProgressSource, ScrollRegion};
use crate::scroll::smooth::SmoothScroll;

/// Result of a tick that rendered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TickReport {
    /// State that was rendered.
    pub state: VisualState,
    /// What the renderer did with it.
    pub outcome: RenderOutcome,
}

/// Scroll input to rendered output, for one scroll-scrubbed section.
///
/// The host forwards input events as they arrive and calls [`ScrubSession::tick`] once per
/// animation frame with a monotonic timestamp. Scroll input is ignored until the priority frames
/// have loaded and the reveal delay has passed.
pub struct ScrubSession {
    frame_count: usize,
    loader: LoadHandle,
    progress: ProgressSource,
    smooth: Option<SmoothScroll>,
    renderer: Renderer,
    reveal_delay: Duration,
    ready_at: Option<Duration>,
    last_tick: Option<Duration>,
    unlocked: bool,
    primed: bool,
    disposed: bool,
}

impl ScrubSession {
    /// Start loading `config`'s sequence from `source` and track `region`.
    pub fn new(
        config: &ReelConfig,
        source: Arc<dyn FrameSource>,
        region: ScrollRegion,
        viewport_height: f64,
    ) -> ReelResult<Self> {
        config.validate()?;
        let loader = FrameLoader::new(source, config.loader).load(config.frame_count)?;
        let smooth = config.smooth_scroll.enabled.then(|| {
            SmoothScroll::new(config.smooth_scroll, region.scroll_end(viewport_height))
        });

        Ok(Self {
            frame_count: config.frame_count,
            loader,
            progress: ProgressSource::new(region, viewport_height),
            smooth,
            renderer: Renderer::new(),
            reveal_delay: config.reveal_delay(),
            ready_at: None,
            last_tick: None,
            unlocked: false,
            primed: false,
            disposed: false,
        })
    }

    /// Native scroll position changed.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if !self.accepts_input() {
            return;
        }
        match &mut self.smooth {
            Some(smooth) => smooth.scroll_to(scroll_y),
            None => self.progress.push_scroll(scroll_y),
        }
    }

    /// Mouse wheel delta in pixels.
    pub fn on_wheel(&mut self, delta: f64) {
        if !self.accepts_input() {
            return;
        }
        match &mut self.smooth {
            Some(smooth) => smooth.wheel(delta),
            None => self.nudge(delta),
        }
    }

    /// Touch-drag delta in pixels.
    pub fn on_touch(&mut self, delta: f64) {
        if !self.accepts_input() {
            return;
        }
        match &mut self.smooth {
            Some(smooth) => smooth.touch(delta),
            None => self.nudge(delta),
        }
    }

    /// Region geometry changed (resize, reflow).
    pub fn set_layout(&mut self, region: ScrollRegion, viewport_height: f64) {
        if self.disposed {
            return;
        }
        self.progress.set_layout(region, viewport_height);
        if let Some(smooth) = &mut self.smooth {
            smooth.set_limit(region.scroll_end(viewport_height));
        }
    }

    /// Advance one animation frame at host time `now`.
    ///
    /// Renders at most once, from a single progress sample, and only when progress changed.
    /// While input is locked, the initial state is rendered once as soon as the first frame has
    /// loaded.
    pub fn tick<D, S>(&mut self, now: Duration, surface: &mut D, styles: &mut S) -> Option<TickReport>
    where
        D: DrawSurface + ?Sized,
        S: StyleSink + ?Sized,
    {
        if self.disposed {
            return None;
        }
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |prev| now.saturating_sub(prev));
        self.last_tick = Some(now);

        if !self.update_lock(now) {
            return self.prime(surface, styles);
        }

        if let Some(smooth) = &mut self.smooth {
            let y = smooth.tick(dt.as_secs_f64());
            self.progress.push_scroll(y);
        }

        let progress = self.progress.take()?;
        let state = map_state(progress, self.frame_count);
        let store = self.loader.store();
        let outcome = self.renderer.render(&state, &store, surface, styles);
        Some(TickReport { state, outcome })
    }

    /// `true` while input is suppressed for loading.
    pub fn is_scroll_locked(&self) -> bool {
        !self.unlocked
    }

    /// `true` once every priority frame resolved.
    pub fn is_ready(&self) -> bool {
        self.loader.is_ready()
    }

    /// Block until ready or `timeout` passes.
    pub fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        self.loader.wait_ready_timeout(timeout)
    }

    /// Loading-screen percentage.
    pub fn load_percent(&self) -> u8 {
        self.loader.load_percent()
    }

    /// Frames loaded so far.
    pub fn frames(&self) -> Arc<FrameStore> {
        self.loader.store()
    }

    /// Underlying load.
    pub fn loader(&self) -> &LoadHandle {
        &self.loader
    }

    /// Tear down: cancel loading and ignore every later call.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!("disposing scrub session");
        self.disposed = true;
        self.loader.cancel();
    }

    /// `true` after [`ScrubSession::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn accepts_input(&self) -> bool {
        !self.disposed && self.unlocked
    }

    // Clamped like a native scroll container, so overshoot never accumulates.
    fn nudge(&mut self, delta: f64) {
        let y = (self.progress.scroll_y() + delta).clamp(0.0, self.progress.max_scroll());
        self.progress.push_scroll(y);
    }

    // Initial paint behind the loading screen.
    fn prime<D, S>(&mut self, surface: &mut D, styles: &mut S) -> Option<TickReport>
    where
        D: DrawSurface + ?Sized,
        S: StyleSink + ?Sized,
    {
        if self.primed {
            return None;
        }
        let store = self.loader.store();
        store.get(0)?;
        self.primed = true;
        let state = map_state(self.progress.current(), self.frame_count);
        let outcome = self.renderer.render(&state, &store, surface, styles);
        tracing::debug!("first frame painted while scroll is locked");
        Some(TickReport { state, outcome })
    }

    // Returns whether input is unlocked at `now`.
    fn update_lock(&mut self, now: Duration) -> bool {
        if self.unlocked {
            return true;
        }
        if self.ready_at.is_none() && self.loader.is_ready() {
            self.ready_at = Some(now);
        }
        let Some(ready_at) = self.ready_at else {
            return false;
        };
        if now.saturating_sub(ready_at) >= self.reveal_delay {
            tracing::debug!(load_percent = self.load_percent(), "scroll unlocked");
            self.unlocked = true;
        }
        self.unlocked
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
