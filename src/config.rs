use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Palette and relief behavior applied between layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Random base color, each closer layer darker.
    Rich,
    /// Single gray tone, each closer layer lighter up to white.
    Monochrome,
}

impl Variant {
    /// Multiplier applied to the layer color after each layer.
    pub fn decay_factor(self) -> f64 {
        match self {
            Variant::Rich => 0.9,
            Variant::Monochrome => 1.15,
        }
    }

    /// Downward shift of the horizon baseline per layer, as a fraction of canvas height.
    pub fn relief_step(self) -> f64 {
        match self {
            Variant::Rich => 0.07,
            Variant::Monochrome => 0.15,
        }
    }
}

/// Upper bound on recorded vertices per ridge.
pub const MAX_RIDGE_VERTICES: usize = 1 << 20;
/// Upper bound on trees scattered over one layer.
pub const MAX_TREES_PER_LAYER: usize = 1 << 20;

/// All generation parameters. `Default` reproduces the 4000x2000 eight-layer scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Canvas
    pub width: u32,
    pub height: u32,
    pub background: [f64; 3],

    // Layers
    pub num_layers: usize,
    pub variant: Variant,
    pub initial_horizon: f64,

    // Horizon
    pub big_steps: usize,
    pub small_steps: usize,
    pub big_variation: f64,
    pub small_variation: f64,
    pub start_jitter: f64,
    pub trend_correction: f64,

    // Trees
    pub trees_per_layer: usize,
    pub tree_min_height: f64,
    pub tree_height_span: f64,
    pub tree_height_range: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 4000,
            height: 2000,
            background: [0.7, 0.8, 1.0],
            num_layers: 8,
            variant: Variant::Rich,
            initial_horizon: 0.3,
            big_steps: 5,
            small_steps: 5,
            big_variation: 0.3,
            small_variation: 0.1,
            start_jitter: 0.1,
            trend_correction: 0.3,
            trees_per_layer: 200,
            tree_min_height: 50.0,
            tree_height_span: 300.0,
            tree_height_range: 50.0,
        }
    }
}

impl Params {
    pub fn width_f(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f(&self) -> f64 {
        self.height as f64
    }

    /// Rejects anything that would divide by zero or never terminate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.num_layers == 0 {
            return Err(ConfigError::ZeroCount("num_layers"));
        }
        if self.big_steps == 0 {
            return Err(ConfigError::ZeroCount("big_steps"));
        }
        if self.small_steps == 0 {
            return Err(ConfigError::ZeroCount("small_steps"));
        }
        let vertices = self
            .big_steps
            .checked_mul(self.small_steps)
            .and_then(|n| n.checked_add(1));
        match vertices {
            Some(n) if n <= MAX_RIDGE_VERTICES => {}
            _ => {
                return Err(ConfigError::OutOfRange {
                    name: "big_steps * small_steps",
                    value: self.big_steps as f64 * self.small_steps as f64,
                });
            }
        }
        if self.trees_per_layer > MAX_TREES_PER_LAYER {
            return Err(ConfigError::OutOfRange {
                name: "trees_per_layer",
                value: self.trees_per_layer as f64,
            });
        }
        for value in self.background {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name: "background",
                    value,
                });
            }
        }
        let non_negative = [
            ("big_variation", self.big_variation),
            ("small_variation", self.small_variation),
            ("start_jitter", self.start_jitter),
            ("tree_min_height", self.tree_min_height),
            ("tree_height_span", self.tree_height_span),
            ("tree_height_range", self.tree_height_range),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("initial_horizon", self.initial_horizon),
            ("trend_correction", self.trend_correction),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        // A zero-height tree has no spacing and its branch loop never advances.
        if self.tree_min_height <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "tree_min_height",
                value: self.tree_min_height,
            });
        }
        Ok(())
    }
}
