use std::collections::{HashMap, HashSet};

use crate::util::normalize_weight;

/// Canonical key for an unordered pair of people, smaller name first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_owned(), b.to_owned())
        } else {
            Self(b.to_owned(), a.to_owned())
        }
    }
}

/// How a pair relates. A missing record is treated as `Mutual`; the one-way
/// variant always carries both endpoints so there is no half-specified state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Mutual,
    OneWay { from: String, to: String },
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id: u32,
    pub members: HashSet<String>,
    pub weight: f32,
}

/// The editable relationship model: an ordered people list, symmetric
/// weighted friendships, per-pair direction records and cohesion groups.
///
/// Friendship weights are stored on both sides and normalized to be strictly
/// positive on every insertion, so no reader has to re-check them.
#[derive(Clone, Debug, Default)]
pub struct RelationModel {
    pub people: Vec<String>,
    friends: HashMap<String, HashMap<String, f32>>,
    directions: HashMap<PairKey, Direction>,
    pub groups: Vec<Group>,
    next_group_id: u32,
}

impl RelationModel {
    pub fn new() -> Self {
        Self {
            next_group_id: 1,
            ..Self::default()
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.friends.contains_key(name)
    }

    pub fn friends_of(&self, name: &str) -> Option<&HashMap<String, f32>> {
        self.friends.get(name)
    }

    pub fn add_person(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.people.push(name.to_owned());
        self.friends.insert(name.to_owned(), HashMap::new());
        true
    }

    pub fn remove_person(&mut self, name: &str) {
        self.people.retain(|person| person != name);
        self.friends.remove(name);
        for entries in self.friends.values_mut() {
            entries.remove(name);
        }
        self.directions
            .retain(|key, _| key.0 != name && key.1 != name);
        for group in &mut self.groups {
            group.members.remove(name);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_pair_friendship(&mut self, a: &str, b: &str, weight: f32) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        let weight = normalize_weight(weight);
        if let Some(entries) = self.friends.get_mut(a) {
            entries.insert(b.to_owned(), weight);
        }
        if let Some(entries) = self.friends.get_mut(b) {
            entries.insert(a.to_owned(), weight);
        }
        self.ensure_direction(a, b);
    }

    pub fn set_pair_friendship_directed(
        &mut self,
        a: &str,
        b: &str,
        weight: f32,
        direction: Direction,
    ) {
        self.set_pair_friendship(a, b, weight);
        self.set_pair_direction(a, b, direction);
    }

    pub fn remove_pair_friendship(&mut self, a: &str, b: &str) {
        if let Some(entries) = self.friends.get_mut(a) {
            entries.remove(b);
        }
        if let Some(entries) = self.friends.get_mut(b) {
            entries.remove(a);
        }
        self.clear_direction_if_unlinked(a, b);
    }

    pub fn set_pair_direction(&mut self, a: &str, b: &str, direction: Direction) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        let direction = match direction {
            Direction::OneWay { from, to }
                if (from == a && to == b) || (from == b && to == a) =>
            {
                Direction::OneWay { from, to }
            }
            Direction::OneWay { .. } => Direction::Mutual,
            Direction::Mutual => Direction::Mutual,
        };
        self.directions.insert(PairKey::new(a, b), direction);
    }

    pub fn pair_direction(&self, a: &str, b: &str) -> Direction {
        self.directions
            .get(&PairKey::new(a, b))
            .cloned()
            .unwrap_or(Direction::Mutual)
    }

    fn ensure_direction(&mut self, a: &str, b: &str) {
        self.directions
            .entry(PairKey::new(a, b))
            .or_insert(Direction::Mutual);
    }

    fn clear_direction_if_unlinked(&mut self, a: &str, b: &str) {
        let linked = self
            .friends
            .get(a)
            .is_some_and(|entries| entries.contains_key(b))
            || self
                .friends
                .get(b)
                .is_some_and(|entries| entries.contains_key(a));
        if !linked {
            self.directions.remove(&PairKey::new(a, b));
        }
    }

    pub fn add_group(&mut self) -> u32 {
        let id = self.next_group_id;
        self.next_group_id += 1;
        self.groups.push(Group {
            id,
            members: HashSet::new(),
            weight: 1.0,
        });
        id
    }

    pub fn add_group_with(&mut self, members: HashSet<String>, weight: f32) -> u32 {
        let id = self.add_group();
        if let Some(group) = self.group_mut(id) {
            group.members = members;
            group.weight = normalize_weight(weight);
        }
        id
    }

    pub fn remove_group(&mut self, id: u32) {
        self.groups.retain(|group| group.id != id);
    }

    pub fn group_mut(&mut self, id: u32) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn set_group_weight(&mut self, id: u32, weight: f32) {
        if let Some(group) = self.group_mut(id) {
            group.weight = normalize_weight(weight);
        }
    }
}
