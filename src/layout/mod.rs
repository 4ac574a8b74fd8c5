mod bbox;
mod forces;
mod graph;
mod hull;
mod labels;
mod score;
mod select;
mod transform;

pub use graph::{LayoutEdge, build_layout_graph};
pub use labels::label_offsets;
pub use select::select_layout;
pub use transform::{FitTransform, fit_transform};

/// Layout parameters, already clamped to their valid ranges. Build one with
/// [`LayoutConfig::clamped`] at the boundary; the engine assumes the fields
/// are in range.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub ideal_edge_len: f32,
    pub canvas_w: f32,
    pub canvas_h: f32,
    pub runs: usize,
}

impl LayoutConfig {
    pub fn clamped(
        iterations: usize,
        ideal_edge_len: f32,
        canvas_w: f32,
        canvas_h: f32,
        runs: usize,
    ) -> Self {
        Self {
            iterations: iterations.clamp(50, 5000),
            ideal_edge_len: finite_or(ideal_edge_len, 240.0).clamp(50.0, 1000.0),
            canvas_w: finite_or(canvas_w, 1000.0).clamp(400.0, 2000.0),
            canvas_h: finite_or(canvas_h, 600.0).clamp(300.0, 2000.0),
            runs: runs.clamp(1, 30),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 800,
            ideal_edge_len: 240.0,
            canvas_w: 1000.0,
            canvas_h: 600.0,
            runs: 5,
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
