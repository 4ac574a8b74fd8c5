use eframe::egui::{Vec2, vec2};
use rand::Rng;

use super::LayoutConfig;
use super::graph::LayoutGraph;
use super::hull::convex_hull;

/// Repulsion reaches at most this multiple of the ideal edge length; pairs
/// farther apart ignore each other.
const REPULSION_RANGE_FACTOR: f32 = 1.0;

const COHESION_STRENGTH_SCALE: f32 = 12.0;
const CIRCLE_STRENGTH_SCALE: f32 = 10.0;
const OUT_STRENGTH_SCALE: f32 = 10.0;
const OUT_STRENGTH_EXTRA: f32 = 0.3;

const LONER_STRENGTH_FACTOR: f32 = 0.001;
const INITIAL_MARGIN: f32 = 40.0;
const MIN_DISTANCE: f32 = 1e-4;

/// Uniformly random start positions inside the canvas, inset by a margin.
/// The result is rescaled to the canvas later anyway, so spilling past the
/// margin during simulation is fine.
pub fn initial_positions(count: usize, config: &LayoutConfig, rng: &mut impl Rng) -> Vec<Vec2> {
    (0..count)
        .map(|_| {
            vec2(
                INITIAL_MARGIN + rng.gen_range(0.0..1.0f32) * (config.canvas_w - INITIAL_MARGIN * 2.0),
                INITIAL_MARGIN + rng.gen_range(0.0..1.0f32) * (config.canvas_h - INITIAL_MARGIN * 2.0),
            )
        })
        .collect()
}

/// Fruchterman–Reingold style relaxation with group-shape constraints.
///
/// Runs exactly `config.iterations` steps over `positions` in place: each
/// step accumulates repulsion (range-limited), weight-scaled attraction,
/// group cohesion, hull circularization, outside-group ejection and a weak
/// centering pull on edgeless nodes, then moves every node along its net
/// displacement capped by the current temperature. The temperature starts at
/// `max(W, H) / 8` and cools linearly to zero.
pub fn simulate(graph: &LayoutGraph, config: &LayoutConfig, positions: &mut [Vec2]) {
    let n = positions.len().min(graph.node_count());
    if n == 0 {
        return;
    }

    let k = config.ideal_edge_len;
    let repulsion_radius = REPULSION_RANGE_FACTOR * k;

    let mut incident_weight = vec![0.0f32; n];
    for edge in &graph.edges {
        if edge.source < n && edge.target < n {
            incident_weight[edge.source] += edge.weight;
            incident_weight[edge.target] += edge.weight;
        }
    }

    // Static per-group membership masks; positions change every iteration,
    // membership never does.
    let group_masks = graph
        .groups
        .iter()
        .map(|group| {
            let mut mask = vec![false; n];
            for &member in &group.members {
                if member < n {
                    mask[member] = true;
                }
            }
            mask
        })
        .collect::<Vec<_>>();

    let mut temperature = config.canvas_w.max(config.canvas_h) / 8.0;
    let cooling = temperature / config.iterations.max(1) as f32;
    let mut disp = vec![Vec2::ZERO; n];

    for _ in 0..config.iterations {
        disp.fill(Vec2::ZERO);

        for v in 0..n {
            for u in (v + 1)..n {
                let delta = positions[v] - positions[u];
                let distance = delta.length();
                if distance <= 0.0 || distance > repulsion_radius {
                    continue;
                }
                let force = (k * k) / distance;
                let push = (delta / distance) * force;
                disp[v] += push;
                disp[u] -= push;
            }
        }

        for edge in &graph.edges {
            let (v, u) = (edge.source, edge.target);
            if v >= n || u >= n {
                continue;
            }
            let delta = positions[v] - positions[u];
            let distance = delta.length().max(MIN_DISTANCE);
            let force = edge.weight * distance * distance / k;
            let pull = (delta / distance) * force;
            disp[v] -= pull;
            disp[u] += pull;
        }

        for (group, mask) in graph.groups.iter().zip(&group_masks) {
            let members = &group.members;
            if members.len() < 2 {
                continue;
            }

            let mut centroid = Vec2::ZERO;
            for &v in members {
                centroid += positions[v];
            }
            centroid /= members.len() as f32;

            let cohesion = COHESION_STRENGTH_SCALE * group.weight;
            for &v in members {
                disp[v] -= (positions[v] - centroid) * cohesion;
            }

            let hull = convex_hull(members, positions);
            if hull.len() < 2 {
                continue;
            }

            let radii = hull
                .iter()
                .map(|&v| (positions[v] - centroid).length().max(MIN_DISTANCE))
                .collect::<Vec<_>>();
            let mut target_radius = radii.iter().sum::<f32>() / hull.len() as f32;
            if !target_radius.is_finite() || target_radius < k * 0.3 {
                target_radius = k;
            }

            let circle = CIRCLE_STRENGTH_SCALE * group.weight;
            for (&v, &radius) in hull.iter().zip(&radii) {
                let radial = (positions[v] - centroid) / radius;
                // Outside the target circle pulls in, inside pushes out.
                disp[v] -= radial * (circle * (radius - target_radius));
            }

            // Eject foreign nodes from the circle, fading out across a band
            // just outside it.
            let out_base = OUT_STRENGTH_SCALE * group.weight;
            let band = target_radius * OUT_STRENGTH_EXTRA;
            for v in 0..n {
                if mask[v] {
                    continue;
                }
                let delta = positions[v] - centroid;
                let distance = delta.length().max(MIN_DISTANCE);
                if distance >= target_radius + band {
                    continue;
                }
                let (overlap, factor) = if distance < target_radius {
                    (target_radius - distance, 1.0)
                } else {
                    let remaining = target_radius + band - distance;
                    (remaining, remaining / band)
                };
                disp[v] += (delta / distance) * (out_base * overlap * factor);
            }
        }

        // Edgeless nodes drift to the rim under pure repulsion; tug them
        // back toward the crowd.
        let mut global_centroid = Vec2::ZERO;
        for position in positions.iter().take(n) {
            global_centroid += *position;
        }
        global_centroid /= n as f32;
        let loner_strength = LONER_STRENGTH_FACTOR * k;
        for v in 0..n {
            if incident_weight[v] > 0.0 {
                continue;
            }
            disp[v] -= (positions[v] - global_centroid) * loner_strength;
        }

        for v in 0..n {
            let magnitude = disp[v].length().max(MIN_DISTANCE);
            let step = magnitude.min(temperature);
            positions[v] += (disp[v] / magnitude) * step;
        }

        temperature = (temperature - cooling).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::super::graph::{GroupForce, LayoutEdge, build_layout_graph};
    use crate::model::RelationModel;

    use super::*;

    fn graph(names: usize, edges: Vec<LayoutEdge>, groups: Vec<GroupForce>) -> LayoutGraph {
        LayoutGraph {
            names: (0..names).map(|i| format!("P{i}")).collect(),
            edges,
            groups,
        }
    }

    fn edge(source: usize, target: usize, weight: f32) -> LayoutEdge {
        LayoutEdge {
            source,
            target,
            weight,
            directed: None,
        }
    }

    fn centroid(positions: &[Vec2], members: &[usize]) -> Vec2 {
        let mut sum = Vec2::ZERO;
        for &v in members {
            sum += positions[v];
        }
        sum / members.len() as f32
    }

    #[test]
    fn empty_graph_is_a_no_op() {
        let graph = graph(0, Vec::new(), Vec::new());
        let mut positions: Vec<Vec2> = Vec::new();
        simulate(&graph, &LayoutConfig::default(), &mut positions);
    }

    #[test]
    fn all_positions_stay_finite() {
        let mut model = RelationModel::new();
        for name in ["A", "B", "C", "D", "E"] {
            model.add_person(name);
        }
        model.set_pair_friendship("A", "B", 2.0);
        model.set_pair_friendship("B", "C", 0.5);
        let graph = build_layout_graph(&model);

        let config = LayoutConfig {
            iterations: 200,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut positions = initial_positions(graph.node_count(), &config, &mut rng);
        simulate(&graph, &config, &mut positions);

        for position in &positions {
            assert!(position.x.is_finite() && position.y.is_finite());
        }
    }

    #[test]
    fn coincident_nodes_do_not_produce_nan() {
        let graph = graph(3, vec![edge(0, 1, 1.0)], Vec::new());
        let config = LayoutConfig {
            iterations: 50,
            ..LayoutConfig::default()
        };
        let mut positions = vec![vec2(100.0, 100.0); 3];
        simulate(&graph, &config, &mut positions);
        for position in &positions {
            assert!(position.x.is_finite() && position.y.is_finite());
        }
    }

    // A single mutual edge settles near the attraction/repulsion
    // equilibrium at the ideal edge length.
    #[test]
    fn connected_pair_settles_near_ideal_length() {
        let graph = graph(2, vec![edge(0, 1, 1.0)], Vec::new());
        let config = LayoutConfig {
            iterations: 100,
            ideal_edge_len: 240.0,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(17);
        let mut positions = initial_positions(2, &config, &mut rng);
        simulate(&graph, &config, &mut positions);

        let distance = (positions[0] - positions[1]).length();
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(
            (distance - 240.0).abs() < 60.0,
            "expected near-240 separation, got {distance}"
        );
        assert_eq!(super::super::score::crossing_score(&positions, &graph.edges), 0);
    }

    // A foreign node starting at a group's centroid gets pushed outside the
    // circularized boundary.
    #[test]
    fn outsider_is_ejected_from_group_circle() {
        let members = vec![0, 1, 2, 3];
        let graph = graph(
            5,
            vec![
                edge(0, 1, 1.0),
                edge(1, 2, 1.0),
                edge(2, 3, 1.0),
                edge(3, 0, 1.0),
            ],
            vec![GroupForce {
                members: members.clone(),
                weight: 1.0,
            }],
        );
        let config = LayoutConfig {
            iterations: 300,
            ..LayoutConfig::default()
        };
        let mut positions = vec![
            vec2(400.0, 200.0),
            vec2(600.0, 200.0),
            vec2(600.0, 400.0),
            vec2(400.0, 400.0),
            vec2(500.0, 300.0), // dead center of the group
        ];
        simulate(&graph, &config, &mut positions);

        let center = centroid(&positions, &members);
        let hull = convex_hull(&members, &positions);
        let mean_radius = hull
            .iter()
            .map(|&v| (positions[v] - center).length())
            .sum::<f32>()
            / hull.len() as f32;
        let outsider_distance = (positions[4] - center).length();
        assert!(
            outsider_distance > mean_radius,
            "outsider at {outsider_distance}, mean hull radius {mean_radius}"
        );
    }

    // Two disjoint groups with no cross edges end up clearly separated.
    #[test]
    fn disjoint_groups_separate() {
        let graph = graph(
            6,
            vec![
                edge(0, 1, 1.0),
                edge(1, 2, 1.0),
                edge(3, 4, 1.0),
                edge(4, 5, 1.0),
            ],
            vec![
                GroupForce {
                    members: vec![0, 1, 2],
                    weight: 1.0,
                },
                GroupForce {
                    members: vec![3, 4, 5],
                    weight: 1.0,
                },
            ],
        );
        let config = LayoutConfig {
            iterations: 600,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(29);
        let mut positions = initial_positions(6, &config, &mut rng);
        simulate(&graph, &config, &mut positions);

        let center_a = centroid(&positions, &[0, 1, 2]);
        let center_b = centroid(&positions, &[3, 4, 5]);
        let diameter = |members: &[usize]| {
            let mut max = 0.0f32;
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    max = max.max((positions[a] - positions[b]).length());
                }
            }
            max
        };
        let separation = (center_a - center_b).length();
        assert!(separation > diameter(&[0, 1, 2]));
        assert!(separation > diameter(&[3, 4, 5]));
    }
}
