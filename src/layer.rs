//! Per-layer state and the pass that turns one layer into a mountain plus its trees.

use crate::config::{Params, Variant};
use crate::geometry::{Point, Rgba, Shape};
use crate::horizon::HorizonGenerator;
use crate::rng::{RandomRange, RandomSource};
use crate::tree::{Tree, TreeGenerator};

/// Mutable record carried from one layer to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub color: Rgba,
    pub line_width: f64,
    pub horizon_base_y: f64,
    pub big_variation: f64,
    pub small_variation: f64,
    pub big_steps: usize,
    pub small_steps: usize,
    pub index: usize,
}

impl Layer {
    /// Farthest layer. Draws the base color and then the line width.
    pub fn first(params: &Params, rng: &mut impl RandomSource) -> Self {
        let color = match params.variant {
            Variant::Rich => {
                let r = rng.uniform();
                let g = rng.uniform();
                let b = rng.uniform();
                Rgba::opaque(r, g, b)
            }
            Variant::Monochrome => {
                let v = RandomRange::new(0.1, 0.4).sample(rng);
                Rgba::opaque(v, v, v)
            }
        };
        let line_width = RandomRange::new(1.0, 5.0).sample(rng);

        Self {
            color,
            line_width,
            horizon_base_y: params.initial_horizon * params.height_f(),
            big_variation: params.big_variation,
            small_variation: params.small_variation,
            big_steps: params.big_steps,
            small_steps: params.small_steps,
            index: 0,
        }
    }

    /// Advances to the next, closer layer: fades the color and lowers the ridge.
    pub fn iterate(&mut self, variant: Variant, canvas_height: f64) {
        let faded = self.color.scaled(variant.decay_factor());
        self.color = match variant {
            Variant::Rich => faded,
            // lightening saturates at white
            Variant::Monochrome => faded.clamped(),
        };
        self.horizon_base_y += variant.relief_step() * canvas_height;
        self.index += 1;
    }
}

/// Everything one layer contributes to the picture, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOutput {
    pub index: usize,
    pub mountain: Shape,
    pub trees: Vec<Tree>,
}

impl LayerOutput {
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        std::iter::once(&self.mountain).chain(self.trees.iter().flat_map(|t| t.shapes()))
    }
}

/// Builds the ridge for a layer and scatters trees below it.
#[derive(Clone, Debug)]
pub struct LayerCompositor {
    horizons: HorizonGenerator,
    width: f64,
    height: f64,
    num_layers: usize,
    trees_per_layer: usize,
    tree_min_height: f64,
    tree_height_span: f64,
    tree_height_range: f64,
}

impl LayerCompositor {
    pub fn new(params: &Params) -> Self {
        Self {
            horizons: HorizonGenerator::new(params),
            width: params.width_f(),
            height: params.height_f(),
            num_layers: params.num_layers,
            trees_per_layer: params.trees_per_layer,
            tree_min_height: params.tree_min_height,
            tree_height_span: params.tree_height_span,
            tree_height_range: params.tree_height_range,
        }
    }

    /// Tree heights for a layer; nearer layers grow taller trees.
    pub fn tree_height_range(&self, layer: usize) -> RandomRange {
        let min = self.tree_min_height
            + (self.tree_height_span / self.num_layers as f64) * layer as f64;
        RandomRange::new(min, min + self.tree_height_range)
    }

    pub fn compose(&self, layer: &Layer, rng: &mut impl RandomSource) -> LayerOutput {
        let horizon = self.horizons.generate(layer, rng);
        let mountain = Shape::solid(
            horizon.polygon(self.width, self.height),
            layer.color,
            layer.line_width,
        );

        let trees_gen = TreeGenerator::new(layer.index, self.num_layers, layer.line_width);
        let xs = RandomRange::new(0.0, self.width);
        let heights = self.tree_height_range(layer.index);

        let trees = (0..self.trees_per_layer)
            .map(|_| {
                let x = xs.sample(rng);
                let y = RandomRange::new(horizon.ceiling_y(x), self.height).sample(rng);
                let h = heights.sample(rng);
                trees_gen.generate(Point::new(x, y), h, rng)
            })
            .collect();

        LayerOutput {
            index: layer.index,
            mountain,
            trees,
        }
    }
}
