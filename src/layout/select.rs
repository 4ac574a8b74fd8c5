use eframe::egui::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::LayoutConfig;
use super::bbox::{aspect_diff, minimize_bounding_box};
use super::forces::{initial_positions, simulate};
use super::graph::LayoutGraph;
use super::score::crossing_score;

#[derive(Clone, Debug)]
pub struct LayoutResult {
    pub positions: Vec<Vec2>,
    pub score: u64,
    pub aspect_diff: f32,
}

/// Splitmix64-style spread so consecutive run indices get unrelated streams.
pub(crate) fn run_seed(base: u64, run: usize) -> u64 {
    let mut z = base.wrapping_add((run as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn single_run(graph: &LayoutGraph, config: &LayoutConfig, seed: u64) -> LayoutResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = initial_positions(graph.node_count(), config, &mut rng);
    simulate(graph, config, &mut positions);
    minimize_bounding_box(&mut positions, config.canvas_w, config.canvas_h);
    let score = crossing_score(&positions, &graph.edges);
    let aspect_diff = aspect_diff(&positions, config.canvas_w, config.canvas_h);
    LayoutResult {
        positions,
        score,
        aspect_diff,
    }
}

/// Multi-start selection: run the simulator `config.runs` times from
/// independent seeded starts and keep the lowest crossing score, breaking
/// exact ties by how closely the bounding box matches the canvas aspect.
/// `None` only if there were no runs at all (guarded; `clamped` configs
/// always have at least one).
pub fn select_layout(
    graph: &LayoutGraph,
    config: &LayoutConfig,
    base_seed: u64,
) -> Option<LayoutResult> {
    let mut best: Option<LayoutResult> = None;
    for run in 0..config.runs.max(1) {
        let candidate = single_run(graph, config, run_seed(base_seed, run));
        let better = match &best {
            None => true,
            Some(current) => {
                candidate.score < current.score
                    || (candidate.score == current.score
                        && candidate.aspect_diff < current.aspect_diff)
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}
