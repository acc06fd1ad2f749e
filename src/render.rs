use std::path::Path;

use rayon::prelude::*;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rgba, Shape};
use crate::scene::Scene;

/// Drawing backend with a gg-style current path and a save/restore state stack.
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn push(&mut self);
    fn pop(&mut self);
    fn set_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    /// Fills the current path with the even-odd rule and keeps it.
    fn fill_preserve(&mut self);
    /// Strokes the current path and clears it.
    fn stroke(&mut self);
}

/// Draws one shape inside its own push/pop so no state leaks to siblings.
pub fn draw_shape(canvas: &mut impl Canvas, shape: &Shape) {
    let Some((first, rest)) = shape.points.split_first() else {
        return;
    };

    canvas.push();
    canvas.set_line_width(shape.stroke_width);
    canvas.move_to(*first);
    for p in rest {
        canvas.line_to(*p);
    }
    canvas.close_path();

    canvas.set_color(shape.fill);
    canvas.fill_preserve();
    canvas.set_color(shape.stroke);
    canvas.stroke();
    canvas.pop();
}

/// Paints the background and every shape, far layers first.
pub fn draw_scene(canvas: &mut impl Canvas, scene: &Scene) {
    canvas.clear(scene.background);
    for shape in scene.shapes() {
        draw_shape(canvas, shape);
    }
}

/// 8-bit backend color. Channels saturate to [0, 255]; NaN becomes 0.
fn skia_color(c: Rgba) -> Color {
    let to_u8 = |v: f64| (v * 255.0).round() as u8;
    Color::from_rgba8(to_u8(c.r), to_u8(c.g), to_u8(c.b), to_u8(c.a))
}

#[derive(Clone, Copy, Debug)]
struct DrawState {
    color: Rgba,
    line_width: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Rgba::opaque(0.0, 0.0, 0.0),
            line_width: 1.0,
        }
    }
}

/// Anti-aliased software canvas backed by a tiny-skia pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    state: DrawState,
    stack: Vec<DrawState>,
    // (vertices, closed) per subpath
    subpaths: Vec<(Vec<Point>, bool)>,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(Error::Canvas(width, height))?;
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            stack: Vec::new(),
            subpaths: Vec::new(),
        })
    }

    /// Save/restore depth, zero outside any scoped draw.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(skia_color(self.state.color));
        paint.anti_alias = true;
        paint
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for (points, closed) in &self.subpaths {
            let Some((first, rest)) = points.split_first() else {
                continue;
            };
            pb.move_to(first.x as f32, first.y as f32);
            for p in rest {
                pb.line_to(p.x as f32, p.y as f32);
            }
            if *closed {
                pb.close();
            }
        }
        pb.finish()
    }

    /// Straight (non-premultiplied) RGBA8 rows, ready for PNG encoding.
    pub fn into_rgba(self) -> Vec<u8> {
        let w = self.pixmap.width() as usize;
        let mut rgba = self.pixmap.take();
        rgba.par_chunks_mut(w * 4).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                let a = px[3] as u32;
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        });
        rgba
    }
}

impl Canvas for PixmapCanvas {
    fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(skia_color(color));
    }

    fn push(&mut self) {
        self.stack.push(self.state);
    }

    fn pop(&mut self) {
        debug_assert!(!self.stack.is_empty(), "pop without matching push");
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_color(&mut self, color: Rgba) {
        self.state.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn move_to(&mut self, p: Point) {
        self.subpaths.push((vec![p], false));
    }

    fn line_to(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some((points, false)) => points.push(p),
            // gg semantics: a line with no open subpath starts one
            _ => self.subpaths.push((vec![p], false)),
        }
    }

    fn close_path(&mut self) {
        if let Some((_, closed)) = self.subpaths.last_mut() {
            *closed = true;
        }
    }

    fn fill_preserve(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = self.paint();
            self.pixmap
                .fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }
    }

    fn stroke(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = self.paint();
            let stroke = Stroke {
                width: self.state.line_width as f32,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        self.subpaths.clear();
    }
}

/// Rasterizes a scene into straight RGBA8 pixels.
pub fn render_scene(scene: &Scene) -> Result<Vec<u8>> {
    let mut canvas = PixmapCanvas::new(scene.width, scene.height)?;
    draw_scene(&mut canvas, scene);
    Ok(canvas.into_rgba())
}

pub fn save_png(path: &Path, rgba: &[u8], w: u32, h: u32) -> Result<()> {
    image::save_buffer(path, rgba, w, h, image::ColorType::Rgba8)?;
    Ok(())
}
