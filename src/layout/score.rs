use eframe::egui::Vec2;

use crate::util::orient;

use super::graph::LayoutEdge;

/// Strict proper intersection: both segments must straddle each other's
/// line. Shared endpoints, touching and collinear overlap all miss.
fn segments_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Aesthetic penalty: for every properly-crossing pair of non-adjacent
/// edges, add `(w₁·w₂)²`. Crossings between strong relationships hurt far
/// more than crossings between weak ones. Returns the floored sum.
pub fn crossing_score(positions: &[Vec2], edges: &[LayoutEdge]) -> u64 {
    let mut sum = 0.0f64;
    for (i, first) in edges.iter().enumerate() {
        let a = positions[first.source];
        let b = positions[first.target];
        for second in &edges[(i + 1)..] {
            if first.source == second.source
                || first.source == second.target
                || first.target == second.source
                || first.target == second.target
            {
                continue;
            }
            let c = positions[second.source];
            let d = positions[second.target];
            if segments_cross(a, b, c, d) {
                let product = (first.weight * second.weight) as f64;
                sum += product * product;
            }
        }
    }
    sum.floor() as u64
}
