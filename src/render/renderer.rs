use crate::foundation::core::LayerStyle;
use crate::loader::store::FrameStore;
use crate::mapper::state::{Element, VisualState};
use crate::render::surface::{DrawSurface, StyleSink};

/// What a [`Renderer::render`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderOutcome {
    /// Frame index that was requested.
    pub frame_index: usize,
    /// `false` when the frame was still pending or had failed and the blit was skipped.
    pub drew_frame: bool,
    /// Style writes issued; unchanged styles are not rewritten.
    pub styles_written: usize,
}

/// Applies mapped states to a drawing surface and a style sink.
///
/// Remembers the styles it last wrote so a repeated state only re-blits the frame.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    applied: [Option<LayerStyle>; 4],
}

impl Renderer {
    /// Renderer with no styles applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `state`'s frame and write its element styles.
    ///
    /// A frame that is not loaded yet (or failed) is skipped for this call; whatever the surface
    /// showed before stays visible.
    #[tracing::instrument(level = "trace", skip_all, fields(frame = state.frame_index))]
    pub fn render<D, S>(
        &mut self,
        state: &VisualState,
        frames: &FrameStore,
        surface: &mut D,
        styles: &mut S,
    ) -> RenderOutcome
    where
        D: DrawSurface + ?Sized,
        S: StyleSink + ?Sized,
    {
        let drew_frame = match frames.get(state.frame_index) {
            Some(frame) => {
                let dest = surface.canvas().rect();
                surface.draw_image(&frame, dest);
                true
            }
            None => {
                tracing::trace!(frame = state.frame_index, "frame not loaded, skipping draw");
                false
            }
        };

        let mut styles_written = 0;
        for (slot, element) in Element::ALL.into_iter().enumerate() {
            let style = state.style(element);
            if self.applied[slot] == Some(style) {
                continue;
            }
            styles.set_style(element, style);
            self.applied[slot] = Some(style);
            styles_written += 1;
        }

        RenderOutcome {
            frame_index: state.frame_index,
            drew_frame,
            styles_written,
        }
    }

    /// Forget applied styles so the next render rewrites all of them.
    pub fn reset(&mut self) {
        self.applied = [None; 4];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
