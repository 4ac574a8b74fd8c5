use crate::layout::LayoutEdge;
use crate::util::round2;

/// Solid/dashed line tallies for the current diagram. A one-way arrow is
/// always drawn solid but counts as half a line; an undirected edge is
/// dashed when its weight is at or below the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeStats {
    pub solid_equivalent: f32,
    pub dashed: f32,
    pub solid_rate: f32,
    pub both_rate: f32,
}

impl EdgeStats {
    pub fn compute(node_count: usize, edges: &[LayoutEdge], threshold: f32) -> Self {
        let max_lines = (node_count * node_count.saturating_sub(1)) as f32 / 2.0;
        if node_count < 2 || max_lines <= 0.0 {
            return Self::default();
        }

        let mut solid_equivalent = 0.0f32;
        let mut dashed = 0.0f32;
        for edge in edges {
            if edge.directed.is_some() {
                solid_equivalent += 0.5;
            } else if edge.weight <= threshold {
                dashed += 1.0;
            } else {
                solid_equivalent += 1.0;
            }
        }

        Self {
            solid_equivalent: round2(solid_equivalent),
            dashed: round2(dashed),
            solid_rate: round2(solid_equivalent / max_lines),
            both_rate: round2((solid_equivalent + dashed) / max_lines),
        }
    }
}
