use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, LayerStyle, Rect};
use crate::foundation::error::ReelResult;
use crate::loader::decode::DecodedFrame;
use crate::mapper::state::Element;

/// 2-D target that frames are blitted onto.
pub trait DrawSurface {
    /// Fixed resolution of the surface.
    fn canvas(&self) -> Canvas;

    /// Draw `frame` scaled into `dest`, stretching to fill regardless of aspect ratio.
    ///
    /// Pixels under `dest` are replaced, transparency included, so nothing drawn earlier shows
    /// through.
    fn draw_image(&mut self, frame: &DecodedFrame, dest: Rect);
}

/// Receives style values for the animated elements.
pub trait StyleSink {
    /// Apply `style` to `element`.
    fn set_style(&mut self, element: Element, style: LayerStyle);
}

/// CPU raster surface holding premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct PixmapSurface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl PixmapSurface {
    /// Transparent surface of the given size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.rgba_len()],
        }
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write the surface as a straight-alpha PNG.
    pub fn save_png(&self, path: &Path) -> ReelResult<()> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::save_buffer_with_format(
            path,
            &straight,
            self.canvas.width,
            self.canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }
}

impl DrawSurface for PixmapSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    // Nearest-neighbour sampling at pixel centers, copy mode.
    fn draw_image(&mut self, frame: &DecodedFrame, dest: Rect) {
        let dest_w = dest.width();
        let dest_h = dest.height();
        if dest_w <= 0.0 || dest_h <= 0.0 || frame.width == 0 || frame.height == 0 {
            return;
        }

        let clip = dest.intersect(self.canvas.rect());
        if clip.is_zero_area() {
            return;
        }
        let x0 = clip.x0.floor().max(0.0) as u32;
        let y0 = clip.y0.floor().max(0.0) as u32;
        let x1 = (clip.x1.ceil() as u32).min(self.canvas.width);
        let y1 = (clip.y1.ceil() as u32).min(self.canvas.height);

        let sx_scale = f64::from(frame.width) / dest_w;
        let sy_scale = f64::from(frame.height) / dest_h;
        let src = frame.rgba8_premul.as_slice();

        for y in y0..y1 {
            let sy = (((f64::from(y) + 0.5 - dest.y0) * sy_scale).floor().max(0.0) as u32)
                .min(frame.height - 1);
            for x in x0..x1 {
                let sx = (((f64::from(x) + 0.5 - dest.x0) * sx_scale).floor().max(0.0) as u32)
                    .min(frame.width - 1);
                let si = ((sy as usize) * (frame.width as usize) + (sx as usize)) * 4;
                let di = self.offset(x, y);
                self.data[di..di + 4].copy_from_slice(&src[si..si + 4]);
            }
        }
    }
}

/// Style sink that keeps the last style per element and counts writes.
#[derive(Clone, Debug, Default)]
pub struct StyleTable {
    styles: BTreeMap<Element, LayerStyle>,
    writes: usize,
}

impl StyleTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last style written to `element`.
    pub fn get(&self, element: Element) -> Option<LayerStyle> {
        self.styles.get(&element).copied()
    }

    /// Total number of `set_style` calls received.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Iterate `(element, style)` in element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, LayerStyle)> + '_ {
        self.styles.iter().map(|(e, s)| (*e, *s))
    }
}

impl StyleSink for StyleTable {
    fn set_style(&mut self, element: Element, style: LayerStyle) {
        self.styles.insert(element, style);
        self.writes += 1;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
