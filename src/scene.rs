use crate::config::Params;
use crate::error::ConfigError;
use crate::geometry::{Rgba, Shape};
use crate::layer::{Layer, LayerCompositor, LayerOutput};
use crate::rng::RandomSource;

/// A finished landscape: background plus layers ordered far to near.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub layers: Vec<LayerOutput>,
}

impl Scene {
    /// Builds every layer back to front from a single random stream.
    pub fn build(params: &Params, rng: &mut impl RandomSource) -> Result<Self, ConfigError> {
        params.validate()?;

        let compositor = LayerCompositor::new(params);
        let mut layer = Layer::first(params, rng);
        let mut layers = Vec::with_capacity(params.num_layers);
        for _ in 0..params.num_layers {
            layers.push(compositor.compose(&layer, rng));
            layer.iterate(params.variant, params.height_f());
        }

        let [r, g, b] = params.background;
        Ok(Self {
            width: params.width,
            height: params.height,
            background: Rgba::opaque(r, g, b),
            layers,
        })
    }

    /// All shapes in painting order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers.iter().flat_map(|l| l.shapes())
    }

    pub fn tree_count(&self) -> usize {
        self.layers.iter().map(|l| l.trees.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::rng::Rng;
    use crate::rng::tests::Scripted;

    /// Ridge vertices of a layer, without the two bottom corners.
    fn ridge(layer: &LayerOutput) -> &[crate::geometry::Point] {
        let pts = &layer.mountain.points;
        &pts[..pts.len() - 2]
    }

    fn assert_flat_ridges_step_down(variant: Variant, step: f64) {
        let params = Params {
            variant,
            trees_per_layer: 0,
            ..Params::default()
        };
        // u = 0.5 zeroes every jitter, leaving each ridge flat at its baseline.
        let scene = Scene::build(&params, &mut Scripted::constant(0.5)).unwrap();
        for (i, layer) in scene.layers.iter().enumerate() {
            let expected = 600.0 + i as f64 * step;
            for p in ridge(layer) {
                assert!((p.y - expected).abs() < 1e-6, "layer {i}: {} != {expected}", p.y);
            }
        }
    }

    #[test]
    fn default_scene_shape_counts() {
        let scene = Scene::build(&Params::default(), &mut Rng::new(42)).expect("valid params");

        assert_eq!(scene.layers.len(), 8);
        assert_eq!(scene.tree_count(), 1600);
        for (i, layer) in scene.layers.iter().enumerate() {
            assert_eq!(layer.index, i);
            assert_eq!(layer.trees.len(), 200);
            // 26 ridge vertices plus the two bottom corners
            assert_eq!(layer.mountain.points.len(), 28);
            assert!(layer.trees.iter().all(|t| !t.branches.is_empty()));
        }
        let branches: usize = scene
            .layers
            .iter()
            .flat_map(|l| &l.trees)
            .map(|t| t.branches.len())
            .sum();
        assert_eq!(scene.shapes().count(), 8 + 1600 + branches);
    }

    #[test]
    fn same_seed_same_scene() {
        let params = Params {
            trees_per_layer: 20,
            ..Params::default()
        };
        let a = Scene::build(&params, &mut Rng::new(77)).unwrap();
        let b = Scene::build(&params, &mut Rng::new(77)).unwrap();
        let c = Scene::build(&params, &mut Rng::new(78)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rich_layers_darken() {
        let scene = Scene::build(&Params::default(), &mut Rng::new(5)).unwrap();
        for pair in scene.layers.windows(2) {
            let (far, near) = (&pair[0].mountain, &pair[1].mountain);
            assert!(near.fill.r <= far.fill.r);
            assert!(near.fill.g <= far.fill.g);
            assert!(near.fill.b <= far.fill.b);
        }
    }

    #[test]
    fn rich_ridges_descend_by_relief_step() {
        assert_flat_ridges_step_down(Variant::Rich, 140.0);
    }

    #[test]
    fn monochrome_ridges_descend_and_lighten() {
        assert_flat_ridges_step_down(Variant::Monochrome, 300.0);

        let params = Params {
            variant: Variant::Monochrome,
            trees_per_layer: 0,
            ..Params::default()
        };
        let scene = Scene::build(&params, &mut Rng::new(12)).unwrap();
        for pair in scene.layers.windows(2) {
            let (far, near) = (&pair[0].mountain, &pair[1].mountain);
            assert!(near.fill.r >= far.fill.r);
            assert_eq!(near.fill.r, near.fill.g);
        }
    }

    #[test]
    fn invalid_params_are_rejected_before_drawing() {
        let params = Params {
            num_layers: 0,
            ..Params::default()
        };
        let mut rng = Rng::new(1);
        assert_eq!(
            Scene::build(&params, &mut rng),
            Err(ConfigError::ZeroCount("num_layers"))
        );
    }
}
