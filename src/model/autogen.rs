use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::util::round2;

use super::relations::{Direction, RelationModel};

/// Knobs for the sample-network generator. Ranges follow the manual-entry UI.
#[derive(Clone, Debug)]
pub struct AutogenSettings {
    pub min_people: usize,
    pub max_people: usize,
    pub min_group_size: usize,
    pub max_group_size: usize,
    pub preferred_group_size: usize,
    pub group_weight_min: f32,
    pub group_weight_max: f32,
    pub intra_strong_edge_prob: f32,
    pub intra_small_density: f32,
    pub intra_medium_density: f32,
    pub intra_large_density: f32,
    pub base_cross_prob: f32,
    pub cross_strong_edge_prob: f32,
    pub one_way_prob: f32,
}

impl Default for AutogenSettings {
    fn default() -> Self {
        Self {
            min_people: 10,
            max_people: 20,
            min_group_size: 1,
            max_group_size: 6,
            preferred_group_size: 4,
            group_weight_min: 0.7,
            group_weight_max: 1.3,
            intra_strong_edge_prob: 0.2,
            intra_small_density: 0.95,
            intra_medium_density: 0.8,
            intra_large_density: 0.6,
            base_cross_prob: 0.12,
            cross_strong_edge_prob: 0.06,
            one_way_prob: 0.05,
        }
    }
}

/// Spreadsheet-style name for person `index`: A..Z, AA, AB, ...
fn person_name(index: usize) -> String {
    let mut name = String::new();
    let mut value = index;
    loop {
        name.insert(0, (b'A' + (value % 26) as u8) as char);
        value /= 26;
        if value == 0 {
            break;
        }
        value -= 1;
    }
    name
}

/// Group size drawn from a mound-shaped distribution peaking at the
/// preferred size. A small remainder becomes one final group.
fn pick_group_size(settings: &AutogenSettings, remaining: usize, rng: &mut impl Rng) -> usize {
    let min_size = settings.min_group_size.max(1);
    let max_size = settings.max_group_size.max(min_size);
    if remaining <= max_size {
        return remaining.max(min_size);
    }

    let mut peak = settings.preferred_group_size as f32;
    if peak < min_size as f32 || peak > max_size as f32 {
        peak = (min_size + max_size) as f32 / 2.0;
    }
    let mut sigma = (max_size - min_size) as f32 / 3.0;
    if sigma <= 0.0 {
        sigma = 1.0;
    }

    let mut sizes = Vec::new();
    let mut weights = Vec::new();
    let mut total = 0.0f32;
    for size in min_size..=max_size.min(remaining) {
        let x = (size as f32 - peak) / sigma;
        let weight = (-0.5 * x * x).exp();
        sizes.push(size);
        weights.push(weight);
        total += weight;
    }
    if sizes.is_empty() {
        return remaining.clamp(min_size, max_size);
    }

    let mut draw = rng.gen_range(0.0..1.0f32) * total;
    for (size, weight) in sizes.iter().zip(&weights) {
        draw -= weight;
        if draw <= 0.0 {
            return *size;
        }
    }
    *sizes.last().unwrap_or(&min_size)
}

/// Repeated picks between the same pair average with the previous weight,
/// like repeated manual entry would.
fn add_or_update_friendship(model: &mut RelationModel, a: &str, b: &str, weight: f32) {
    let previous = model
        .friends_of(a)
        .and_then(|entries| entries.get(b).copied());
    let combined = match previous {
        Some(prev) => (prev + weight) / 2.0,
        None => weight,
    };
    model.set_pair_friendship(a, b, round2(combined));
}

fn max_intra_weight(model: &RelationModel, name: &str, members: &HashSet<&str>) -> f32 {
    model
        .friends_of(name)
        .map(|entries| {
            entries
                .iter()
                .filter(|(other, _)| members.contains(other.as_str()))
                .fold(0.0f32, |best, (_, weight)| best.max(*weight))
        })
        .unwrap_or(0.0)
}

pub fn generate_network(settings: &AutogenSettings, rng: &mut impl Rng) -> RelationModel {
    let mut model = RelationModel::new();

    let min_people = settings.min_people.max(1);
    let max_people = settings.max_people.max(min_people);
    let count = rng.gen_range(min_people..=max_people);
    for index in 0..count {
        model.add_person(&person_name(index));
    }

    let mut order = (0..count).collect::<Vec<_>>();
    order.shuffle(rng);

    let mut group_defs: Vec<(Vec<String>, f32)> = Vec::new();
    let mut position = 0;
    while position < count {
        let size = pick_group_size(settings, count - position, rng);
        let members = order[position..(position + size).min(count)]
            .iter()
            .map(|&index| model.people[index].clone())
            .collect::<Vec<_>>();
        position += members.len();

        let weight = round2(
            settings.group_weight_min
                + rng.gen_range(0.0..1.0f32)
                    * (settings.group_weight_max - settings.group_weight_min).max(0.0),
        );
        group_defs.push((members, weight));
    }

    // Intra-group: a spanning tree keeps each group connected, then extra
    // pairs by a size-dependent density.
    for (members, group_weight) in &group_defs {
        let size = members.len();
        if size < 2 {
            continue;
        }

        for i in 1..size {
            let j = rng.gen_range(0..i);
            let weight = 0.9 + rng.gen_range(0.0..1.0f32) * 0.5;
            add_or_update_friendship(&mut model, &members[i], &members[j], weight);
        }

        let base_density = if size <= 3 {
            settings.intra_small_density
        } else if size <= 4 {
            settings.intra_medium_density
        } else {
            settings.intra_large_density
        };
        let density = group_weight * base_density;

        for i in 0..size {
            for j in (i + 1)..size {
                if rng.gen_range(0.0..1.0f32) >= density {
                    continue;
                }
                let weight = if rng.gen_range(0.0..1.0f32) < 1.0 - settings.intra_strong_edge_prob
                {
                    0.4 + rng.gen_range(0.0..1.0f32) * 0.3
                } else {
                    0.7 + rng.gen_range(0.0..1.0f32) * 0.7
                };
                add_or_update_friendship(&mut model, &members[i], &members[j], weight);
            }
        }
    }

    // Cross-group pairs, scaled down to each endpoint's strongest
    // in-group tie so they rarely dominate.
    for gi in 0..group_defs.len() {
        for gj in (gi + 1)..group_defs.len() {
            let set_a = group_defs[gi].0.iter().map(String::as_str).collect::<HashSet<_>>();
            let set_b = group_defs[gj].0.iter().map(String::as_str).collect::<HashSet<_>>();

            for a in &group_defs[gi].0 {
                for b in &group_defs[gj].0 {
                    if rng.gen_range(0.0..1.0f32) >= settings.base_cross_prob {
                        continue;
                    }
                    let max_a = max_intra_weight(&model, a, &set_a);
                    let max_b = max_intra_weight(&model, b, &set_b);
                    let mut base_max = max_a.min(max_b);
                    if base_max <= 0.0 {
                        base_max = 1.0;
                    }

                    let (low, high) =
                        if rng.gen_range(0.0..1.0f32) < 1.0 - settings.cross_strong_edge_prob {
                            (base_max * 0.4, base_max)
                        } else {
                            (base_max * 0.8, base_max * 1.2)
                        };
                    let weight = round2(low + rng.gen_range(0.0..1.0f32) * (high - low));
                    add_or_update_friendship(&mut model, a, b, weight);
                }
            }
        }
    }

    for (members, weight) in &group_defs {
        if members.len() < 2 {
            continue;
        }
        model.add_group_with(members.iter().cloned().collect(), *weight);
    }

    // Flip a few mutual pairs one-way.
    let people = model.people.clone();
    for i in 0..people.len() {
        for j in (i + 1)..people.len() {
            let linked = model
                .friends_of(&people[i])
                .is_some_and(|entries| entries.contains_key(&people[j]));
            if !linked || model.pair_direction(&people[i], &people[j]) != Direction::Mutual {
                continue;
            }
            if rng.gen_range(0.0..1.0f32) < settings.one_way_prob {
                let (from, to) = if rng.gen_range(0.0..1.0f32) < 0.5 {
                    (people[i].clone(), people[j].clone())
                } else {
                    (people[j].clone(), people[i].clone())
                };
                model.set_pair_direction(&people[i], &people[j], Direction::OneWay { from, to });
            }
        }
    }

    model
}
