//! Horizon polylines: two-level jittered subdivision and the height lookup
//! used to keep trees below the ridge.

use crate::config::Params;
use crate::geometry::Point;
use crate::layer::Layer;
use crate::rng::{RandomRange, RandomSource};

/// One layer's ridge line, vertices in strictly increasing x from 0 to the canvas width.
#[derive(Clone, Debug, PartialEq)]
pub struct Horizon {
    points: Vec<Point>,
}

impl Horizon {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Highest y a tree may take at `x`: the smaller of the first vertex at or
    /// after `x` and its predecessor.
    ///
    /// Queries left of the first vertex use that vertex as its own predecessor;
    /// queries right of the last vertex use the last pair.
    pub fn ceiling_y(&self, x: f64) -> f64 {
        let pts = &self.points;
        let idx = pts
            .iter()
            .position(|p| x <= p.x)
            .unwrap_or(pts.len() - 1);
        let prev = idx.saturating_sub(1);
        pts[idx].y.min(pts[prev].y)
    }

    /// Closes the ridge against the canvas bottom into a fillable outline.
    pub fn polygon(&self, width: f64, height: f64) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.points.len() + 2);
        out.extend_from_slice(&self.points);
        out.push(Point::new(width, height));
        out.push(Point::new(0.0, height));
        out
    }
}

/// Builds horizons for a fixed canvas.
#[derive(Clone, Debug)]
pub struct HorizonGenerator {
    width: f64,
    height: f64,
    start_jitter: f64,
    trend_correction: f64,
}

impl HorizonGenerator {
    pub fn new(params: &Params) -> Self {
        Self {
            width: params.width_f(),
            height: params.height_f(),
            start_jitter: params.start_jitter,
            trend_correction: params.trend_correction,
        }
    }

    pub fn generate(&self, layer: &Layer, rng: &mut impl RandomSource) -> Horizon {
        let big_steps = layer.big_steps.max(1);
        let small_steps = layer.small_steps.max(1);
        let big_w = self.width / big_steps as f64;
        let small_w = big_w / small_steps as f64;

        let mut points = Vec::with_capacity(big_steps * small_steps + 1);

        let mut y_from =
            layer.horizon_base_y + self.start_jitter * self.height * RandomRange::UNIT.sample(rng);
        points.push(Point::new(0.0, y_from));

        for i in 0..big_steps {
            let x_from = i as f64 * big_w;
            // Pin the last coarse vertex so the ridge spans the full width.
            let x_to = if i + 1 == big_steps {
                self.width
            } else {
                (i + 1) as f64 * big_w
            };
            let y_to = y_from + y_from * layer.big_variation * RandomRange::UNIT.sample(rng);

            // Fine detail follows the coarse segment's direction.
            let trend = (y_to - y_from) * self.trend_correction;
            let mut y_small = y_from;
            for j in 1..small_steps {
                y_small += y_small * layer.small_variation * RandomRange::UNIT.sample(rng) + trend;
                points.push(Point::new(x_from + j as f64 * small_w, y_small));
            }

            points.push(Point::new(x_to, y_to));
            y_from = y_to;
        }

        Horizon { points }
    }
}
