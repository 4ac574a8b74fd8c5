use std::f32::consts::{PI, TAU};

use eframe::egui::{Vec2, vec2};

use super::graph::LayoutEdge;

/// Distance from a node's center to the center of its label.
pub const LABEL_DISTANCE: f32 = 22.0;

/// Pick a label direction per node: the midpoint of the widest angular gap
/// between its incident edges, so the text lands in the most open spot.
/// Edgeless nodes label straight up; degree-one nodes label opposite their
/// single edge. Direction annotations are ignored; only geometry matters.
pub fn label_offsets(positions: &[Vec2], edges: &[LayoutEdge]) -> Vec<Vec2> {
    let mut angles_by_node: Vec<Vec<f32>> = vec![Vec::new(); positions.len()];
    for edge in edges {
        if edge.source >= positions.len() || edge.target >= positions.len() {
            continue;
        }
        for (from, to) in [(edge.source, edge.target), (edge.target, edge.source)] {
            let delta = positions[to] - positions[from];
            let mut angle = delta.y.atan2(delta.x);
            if angle < 0.0 {
                angle += TAU;
            }
            angles_by_node[from].push(angle);
        }
    }

    angles_by_node
        .into_iter()
        .map(|mut angles| {
            let theta = match angles.len() {
                0 => {
                    // Straight up (screen coordinates grow downward).
                    -PI / 2.0 + TAU
                }
                1 => {
                    let mut opposite = angles[0] + PI;
                    if opposite >= TAU {
                        opposite -= TAU;
                    }
                    opposite
                }
                _ => {
                    angles.sort_by(f32::total_cmp);
                    let mut best_gap = -1.0f32;
                    let mut best_start = angles[0];
                    for (index, &start) in angles.iter().enumerate() {
                        let next = if index == angles.len() - 1 {
                            angles[0] + TAU
                        } else {
                            angles[index + 1]
                        };
                        let gap = next - start;
                        if gap > best_gap {
                            best_gap = gap;
                            best_start = start;
                        }
                    }
                    let mut theta = best_start + best_gap / 2.0;
                    if theta >= TAU {
                        theta -= TAU;
                    }
                    theta
                }
            };
            vec2(theta.cos(), theta.sin()) * LABEL_DISTANCE
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: usize, target: usize) -> LayoutEdge {
        LayoutEdge {
            source,
            target,
            weight: 1.0,
            directed: None,
        }
    }

    #[test]
    fn lone_node_labels_straight_up() {
        let offsets = label_offsets(&[vec2(5.0, 5.0)], &[]);
        assert!(offsets[0].x.abs() < 1e-4);
        assert!((offsets[0].y + LABEL_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn degree_one_labels_opposite_the_edge() {
        let positions = vec![vec2(0.0, 0.0), vec2(100.0, 0.0)];
        let mut edge = edge(0, 1);
        edge.weight = 42.0; // weight must not matter
        let offsets = label_offsets(&positions, &[edge]);
        // Node 0's only neighbor is to the right, so its label goes left.
        assert!((offsets[0].x + LABEL_DISTANCE).abs() < 1e-3);
        assert!(offsets[0].y.abs() < 1e-3);
        // And node 1's goes right.
        assert!((offsets[1].x - LABEL_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn label_lands_in_the_widest_gap() {
        // Node 0 has neighbors due east and due north; the widest gap's
        // midpoint points south-east-ish (3/4 of the way around from east).
        let positions = vec![vec2(0.0, 0.0), vec2(100.0, 0.0), vec2(0.0, 100.0)];
        let offsets = label_offsets(&positions, &[edge(0, 1), edge(0, 2)]);
        let angle = offsets[0].y.atan2(offsets[0].x).rem_euclid(TAU);
        let expected = 5.0 * PI / 4.0;
        assert!((angle - expected).abs() < 1e-3);
    }
}
