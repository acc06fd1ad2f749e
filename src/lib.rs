pub mod config;
pub mod error;
pub mod geometry;
pub mod horizon;
pub mod layer;
pub mod render;
pub mod rng;
pub mod scene;
pub mod tree;

use std::path::Path;
use std::time::Instant;

use config::Params;
use error::Result;
use rng::Rng;
use scene::Scene;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Output of one run: the geometry and its rasterized pixels.
pub struct Landscape {
    pub seed: u64,
    pub scene: Scene,
    pub rgba: Vec<u8>,
}

pub fn generate(seed: u64, params: &Params) -> Result<(Landscape, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Geometry: ridges and trees, back to front
    let t = Instant::now();
    let mut rng = Rng::new(seed);
    let scene = Scene::build(params, &mut rng)?;
    timings.push(Timing {
        name: "geometry",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Rasterize
    let t = Instant::now();
    let rgba = render::render_scene(&scene)?;
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((Landscape { seed, scene, rgba }, timings))
}

impl Landscape {
    pub fn save_png(&self, path: &Path) -> Result<()> {
        render::save_png(path, &self.rgba, self.scene.width, self.scene.height)
    }
}
