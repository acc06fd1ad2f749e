/// A vertex in canvas space. y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Color with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::opaque(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Channels clamped to [0, 1].
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

/// Closed polygon with fill and stroke. The unit handed to a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub points: Vec<Point>,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f64,
}

impl Shape {
    /// Shape filled and stroked with the same color.
    pub fn solid(points: Vec<Point>, color: Rgba, stroke_width: f64) -> Self {
        Self {
            points,
            fill: color,
            stroke: color,
            stroke_width,
        }
    }
}
