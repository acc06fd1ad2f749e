//! Conifer-style trees: a trunk triangle plus alternating branch triangles
//! climbing toward the top.

use crate::geometry::{Point, Rgba, Shape};
use crate::rng::{RandomRange, RandomSource};

/// Near-layer trunk tone.
pub const TRUNK_COLOR: [u8; 3] = [102, 51, 0];
/// Near-layer foliage tone.
pub const BRANCH_COLOR: [u8; 3] = [0, 153, 76];
/// Trunk base width as a fraction of tree height.
const TRUNK_WIDTH: f64 = 0.0375;

/// Branch geometry derived from tree height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchParams {
    /// Distance above the trunk base where the first branch starts.
    pub start_offset: f64,
    /// Initial horizontal reach.
    pub length: f64,
    /// Fraction of the initial reach lost per branch.
    pub taper: f64,
    /// Branches stop this far below the tip.
    pub top_margin: f64,
    pub width: f64,
    /// How far the branch tip droops below its base.
    pub rise_rate: f64,
    /// Vertical distance between consecutive branches.
    pub spacing: f64,
}

impl BranchParams {
    pub fn for_height(height: f64) -> Self {
        Self {
            start_offset: height * 0.125,
            length: height * 0.25,
            taper: 0.05,
            top_margin: height * 0.025,
            width: height * 0.0125,
            rise_rate: height * 0.0375,
            spacing: height * 0.05,
        }
    }

    /// Upper bound on the number of branches a tree of `height` can grow.
    pub fn max_branches(&self, height: f64) -> usize {
        (height / (self.spacing * RandomRange::WOBBLE.min)).floor() as usize + 1
    }
}

/// Haze blend for a layer: 0.5 for the farthest layer rising toward 1 for the nearest.
pub fn depth_blend(layer: usize, num_layers: usize) -> f64 {
    let n = num_layers as f64;
    let a = (255.0 - ((255.0 / n) / 2.0) * (n - layer as f64)) / 255.0;
    a.clamp(0.0, 1.0)
}

/// Mixes white with `target` by `a`, truncating to 8-bit channels.
pub fn blend_toward_white(target: [u8; 3], a: f64) -> Rgba {
    let mix = |c: u8| ((1.0 - a) * 255.0 + a * c as f64) as u8;
    Rgba::from_rgb8([mix(target[0]), mix(target[1]), mix(target[2])])
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub height: f64,
    pub trunk: Shape,
    pub branches: Vec<Shape>,
}

impl Tree {
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        std::iter::once(&self.trunk).chain(self.branches.iter())
    }
}

/// Grows trees for one layer; colors are fixed once per layer.
#[derive(Clone, Debug)]
pub struct TreeGenerator {
    trunk_color: Rgba,
    branch_color: Rgba,
    line_width: f64,
}

impl TreeGenerator {
    pub fn new(layer: usize, num_layers: usize, line_width: f64) -> Self {
        let a = depth_blend(layer, num_layers);
        Self {
            trunk_color: blend_toward_white(TRUNK_COLOR, a),
            branch_color: blend_toward_white(BRANCH_COLOR, a),
            line_width,
        }
    }

    /// Tree whose trunk's left base corner sits at `base`.
    pub fn generate(&self, base: Point, height: f64, rng: &mut impl RandomSource) -> Tree {
        let wobble = RandomRange::WOBBLE;

        let bottom = base.y;
        let top = bottom - height;
        let base_l = base.x;
        let base_r = base_l + height * TRUNK_WIDTH * wobble.sample(rng);
        let mid_x = base_l + (base_r - base_l) / 2.0;

        let trunk = Shape::solid(
            vec![
                Point::new(base_l, bottom),
                Point::new(base_r, bottom),
                Point::new(mid_x, top),
            ],
            self.trunk_color,
            self.line_width,
        );

        let br = BranchParams::for_height(height);
        let mut base_y = bottom - br.start_offset * wobble.sample(rng);
        let mut reach = br.length * wobble.sample(rng);
        let mut side = 1.0;
        let reduction = reach * br.taper * wobble.sample(rng);

        let mut branches = Vec::new();
        while base_y > top + br.top_margin {
            let thickness = br.width * wobble.sample(rng);
            let droop = br.rise_rate * wobble.sample(rng);
            branches.push(Shape::solid(
                vec![
                    Point::new(mid_x, base_y),
                    Point::new(mid_x, base_y - thickness),
                    Point::new(mid_x + reach * side, base_y + droop),
                ],
                self.branch_color,
                self.line_width,
            ));

            side = -side;
            reach -= reduction * wobble.sample(rng);
            base_y -= br.spacing * wobble.sample(rng);
        }

        Tree {
            height,
            trunk,
            branches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use crate::rng::tests::Scripted;
    use proptest::prelude::*;

    #[test]
    fn blend_spans_half_to_nearly_full() {
        assert_eq!(depth_blend(0, 8), 0.5);
        assert!((depth_blend(7, 8) - (1.0 - 1.0 / 16.0)).abs() < 1e-12);
        assert!(depth_blend(3, 8) < depth_blend(4, 8));
    }

    #[test]
    fn blend_is_clamped() {
        // past the last layer the raw formula exceeds 1
        assert_eq!(depth_blend(5, 2), 1.0);
    }

    #[test]
    fn far_trunk_is_pale() {
        let c = blend_toward_white(TRUNK_COLOR, 0.5);
        assert_eq!(c, Rgba::from_rgb8([178, 153, 127]));
        assert_eq!(blend_toward_white(BRANCH_COLOR, 1.0), Rgba::from_rgb8(BRANCH_COLOR));
    }

    fn assert_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn branch_params_scale_with_height() {
        let br = BranchParams::for_height(200.0);
        let expected = [25.0, 50.0, 5.0, 2.5, 7.5, 10.0];
        let got = [br.start_offset, br.length, br.top_margin, br.width, br.rise_rate, br.spacing];
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-9);
        }
        assert_eq!(br.taper, 0.05);
    }

    #[test]
    fn tree_geometry_with_fixed_wobble() {
        // u = 0.75 -> every wobble is 1.1
        let tg = TreeGenerator::new(7, 8, 2.0);
        let tree = tg.generate(Point::new(100.0, 1000.0), 200.0, &mut Scripted::constant(0.75));

        let trunk = &tree.trunk.points;
        assert_near(trunk[0], Point::new(100.0, 1000.0));
        assert_near(trunk[1], Point::new(108.25, 1000.0));
        assert_near(trunk[2], Point::new(104.125, 800.0));

        // first branch at 972.5, climbing 11 per branch while above 805
        assert_eq!(tree.branches.len(), 16);

        let first = &tree.branches[0].points;
        assert_near(first[0], Point::new(104.125, 972.5));
        assert_near(first[1], Point::new(104.125, 969.75));
        assert_near(first[2], Point::new(159.125, 980.75));

        // second branch points the other way with a shorter reach
        let second = &tree.branches[1].points;
        assert_near(second[0], Point::new(104.125, 961.5));
        assert_near(second[2], Point::new(104.125 - 51.6725, 969.75));
    }

    #[test]
    fn shapes_cover_trunk_and_branches() {
        let tg = TreeGenerator::new(0, 8, 1.0);
        let tree = tg.generate(Point::new(0.0, 500.0), 100.0, &mut Rng::new(11));
        assert_eq!(tree.shapes().count(), 1 + tree.branches.len());
        assert_eq!(tree.trunk.stroke_width, 1.0);
    }

    proptest! {
        #[test]
        fn branch_loop_is_bounded(seed in any::<u64>(), height in 0.5f64..2000.0) {
            let tg = TreeGenerator::new(2, 8, 1.0);
            let tree = tg.generate(Point::new(0.0, 2000.0), height, &mut Rng::new(seed));
            let bound = BranchParams::for_height(height).max_branches(height);
            prop_assert!(tree.branches.len() <= bound);
            let top = 2000.0 - height;
            for b in &tree.branches {
                prop_assert!(b.points[0].y > top);
            }
        }
    }
}
