use std::collections::HashMap;

use crate::model::{Direction, RelationModel};
use crate::util::normalize_weight;

/// One deduplicated, undirected relationship between two node indices.
/// `directed` is set only when the pair is strictly one-way, and always
/// points `(from, to)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
    pub directed: Option<(usize, usize)>,
}

/// A group resolved to node indices; groups with fewer than two resolvable
/// members are dropped here so the simulator never has to re-check.
#[derive(Clone, Debug)]
pub struct GroupForce {
    pub members: Vec<usize>,
    pub weight: f32,
}

/// A layout-ready snapshot of the relationship model. Owns everything the
/// worker needs, so the live model is free to change while a run is in
/// flight.
#[derive(Clone, Debug)]
pub struct LayoutGraph {
    pub names: Vec<String>,
    pub edges: Vec<LayoutEdge>,
    pub groups: Vec<GroupForce>,
}

impl LayoutGraph {
    pub fn node_count(&self) -> usize {
        self.names.len()
    }
}

/// Flatten the model into nodes and a deduplicated edge list. The model
/// stores weights symmetrically, but divergent halves still collapse to the
/// larger one; self-pairs and unknown names are dropped. Deterministic for a
/// fixed model (edges sorted by index pair).
pub fn build_layout_graph(model: &RelationModel) -> LayoutGraph {
    let names = model.people.clone();
    let index_by_name = names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<_, _>>();

    let mut best_weight: HashMap<(usize, usize), f32> = HashMap::new();
    for name in &names {
        let Some(entries) = model.friends_of(name) else {
            continue;
        };
        let Some(&a) = index_by_name.get(name.as_str()) else {
            continue;
        };
        for (friend, weight) in entries {
            let Some(&b) = index_by_name.get(friend.as_str()) else {
                continue;
            };
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            let weight = normalize_weight(*weight);
            let entry = best_weight.entry(key).or_insert(weight);
            if weight > *entry {
                *entry = weight;
            }
        }
    }

    let mut edges = best_weight
        .into_iter()
        .map(|((a, b), weight)| {
            let directed = match model.pair_direction(&names[a], &names[b]) {
                Direction::OneWay { from, to } => {
                    match (
                        index_by_name.get(from.as_str()),
                        index_by_name.get(to.as_str()),
                    ) {
                        (Some(&from), Some(&to)) => Some((from, to)),
                        _ => None,
                    }
                }
                Direction::Mutual => None,
            };
            LayoutEdge {
                source: a,
                target: b,
                weight,
                directed,
            }
        })
        .collect::<Vec<_>>();
    edges.sort_by_key(|edge| (edge.source, edge.target));

    let groups = model
        .groups
        .iter()
        .filter_map(|group| {
            let mut members = group
                .members
                .iter()
                .filter_map(|name| index_by_name.get(name.as_str()).copied())
                .collect::<Vec<_>>();
            members.sort_unstable();
            if members.len() < 2 {
                return None;
            }
            Some(GroupForce {
                members,
                weight: normalize_weight(group.weight),
            })
        })
        .collect();

    LayoutGraph {
        names,
        edges,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> RelationModel {
        let mut model = RelationModel::new();
        for name in ["A", "B", "C", "D"] {
            model.add_person(name);
        }
        model.set_pair_friendship("A", "B", 0.8);
        model.set_pair_friendship_directed(
            "B",
            "C",
            1.2,
            Direction::OneWay {
                from: "C".to_owned(),
                to: "B".to_owned(),
            },
        );
        model
    }

    #[test]
    fn one_edge_per_unordered_pair() {
        let graph = build_layout_graph(&sample_model());
        assert_eq!(graph.names, vec!["A", "B", "C", "D"]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(
            graph.edges[0],
            LayoutEdge {
                source: 0,
                target: 1,
                weight: 0.8,
                directed: None,
            }
        );
        assert_eq!(
            graph.edges[1],
            LayoutEdge {
                source: 1,
                target: 2,
                weight: 1.2,
                directed: Some((2, 1)),
            }
        );
    }

    #[test]
    fn rebuild_is_deterministic() {
        let model = sample_model();
        assert_eq!(build_layout_graph(&model).edges, build_layout_graph(&model).edges);
    }

    #[test]
    fn small_groups_are_dropped() {
        let mut model = sample_model();
        let solo = model.add_group();
        model.group_mut(solo).unwrap().members.insert("A".to_owned());
        let pair = model.add_group();
        let group = model.group_mut(pair).unwrap();
        group.members.insert("A".to_owned());
        group.members.insert("B".to_owned());
        group.members.insert("Nobody".to_owned());
        group.weight = -1.0;

        let graph = build_layout_graph(&model);
        assert_eq!(graph.groups.len(), 1);
        assert_eq!(graph.groups[0].members, vec![0, 1]);
        // Unknown member dropped, weight normalized.
        assert_eq!(graph.groups[0].weight, 1.0);
    }
}
