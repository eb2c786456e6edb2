//! scrollreel is a headless scroll-scrub animation engine.
//!
//! A tall page section drives a pre-rendered frame sequence and a handful of element styles:
//!
//! - [`scroll_progress`] / [`ProgressSource`] turn scroll offsets into a [`Progress`] in `[0, 1]`,
//!   at most once per frame tick
//! - [`FrameLoader`] fetches the sequence priority-first ([`LoadSchedule::bisection`]) and gates
//!   readiness on the priority set
//! - [`map_state`] maps one progress sample onto every visual channel
//! - [`Renderer`] blits the selected frame onto a [`DrawSurface`] and writes styles to a
//!   [`StyleSink`]
//!
//! [`ScrubSession`] wires these together for hosts that forward input events and a frame clock.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod loader;
mod mapper;
mod render;
mod scroll;
mod session;

pub use crate::animation::ease::Ease;
pub use crate::config::ReelConfig;
pub use crate::foundation::core::{Canvas, LayerStyle, Progress, Rect, Translate3d};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::loader::decode::{DecodedFrame, decode_frame};
pub use crate::loader::frame_loader::{FrameLoader, LoadEvent, LoadHandle, LoaderOpts};
pub use crate::loader::schedule::{BACKGROUND_DENOMINATORS, LoadSchedule, PRIORITY_DENOMINATORS};
pub use crate::loader::source::{DirFrameSource, FramePattern, FrameSource};
pub use crate::loader::store::{FrameStore, SlotCounts, SlotState};
pub use crate::mapper::classic::{
    ClassicState, HeroTextStyle, frame_number, map_classic, media_time,
};
pub use crate::mapper::state::{
    Element, VisualState, content_grid_opacity, frame_index, header_style, hero_image_style,
    map_state, nav_opacity,
};
pub use crate::render::renderer::{RenderOutcome, Renderer};
pub use crate::render::surface::{DrawSurface, PixmapSurface, StyleSink, StyleTable};
pub use crate::scroll::progress::{ProgressSource, ScrollRegion, scroll_progress};
pub use crate::scroll::smooth::{SmoothScroll, SmoothScrollOpts};
pub use crate::session::{ScrubSession, TickReport};
