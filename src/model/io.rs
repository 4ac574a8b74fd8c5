use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::util::normalize_weight;

use super::relations::{Direction, RelationModel};

const FILE_VERSION: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RelationKind {
    #[default]
    Mutual,
    AToB,
    BToA,
}

#[derive(Debug, Serialize, Deserialize)]
struct FriendshipRecord {
    a: String,
    b: String,
    weight: f32,
    #[serde(rename = "type", default)]
    kind: RelationKind,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupRecord {
    #[serde(default)]
    members: Vec<String>,
    #[serde(default = "default_weight")]
    weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

#[derive(Debug, Serialize, Deserialize)]
struct FileModel {
    version: u32,
    people: Vec<String>,
    #[serde(default)]
    friendships: Vec<FriendshipRecord>,
    #[serde(default)]
    groups: Vec<GroupRecord>,
}

pub fn export_model(model: &RelationModel) -> String {
    let mut friendships = Vec::new();
    let mut seen = HashSet::new();
    for name in &model.people {
        let Some(entries) = model.friends_of(name) else {
            continue;
        };
        for (friend, weight) in entries {
            let (a, b) = if name <= friend {
                (name.clone(), friend.clone())
            } else {
                (friend.clone(), name.clone())
            };
            if !seen.insert((a.clone(), b.clone())) {
                continue;
            }
            let kind = match model.pair_direction(&a, &b) {
                Direction::Mutual => RelationKind::Mutual,
                Direction::OneWay { from, .. } if from == a => RelationKind::AToB,
                Direction::OneWay { .. } => RelationKind::BToA,
            };
            friendships.push(FriendshipRecord {
                a,
                b,
                weight: normalize_weight(*weight),
                kind,
            });
        }
    }
    friendships.sort_by(|x, y| (&x.a, &x.b).cmp(&(&y.a, &y.b)));

    let groups = model
        .groups
        .iter()
        .map(|group| {
            let mut members = group.members.iter().cloned().collect::<Vec<_>>();
            members.sort();
            GroupRecord {
                members,
                weight: normalize_weight(group.weight),
            }
        })
        .collect();

    let file = FileModel {
        version: FILE_VERSION,
        people: model.people.clone(),
        friendships,
        groups,
    };

    serde_json::to_string_pretty(&file).unwrap_or_else(|_| "{}".to_owned())
}

/// Parse a version-2 model document. Deliberately lenient: unknown names and
/// empty groups are skipped, weights normalized, missing arrays treated as
/// empty. Only a missing/invalid `people` list is an error.
pub fn import_model(text: &str) -> Result<RelationModel> {
    let file: FileModel =
        serde_json::from_str(text).context("invalid relationship document JSON")?;

    let mut model = RelationModel::new();
    for name in &file.people {
        model.add_person(name);
    }
    if model.people.is_empty() && !file.people.is_empty() {
        return Err(anyhow!("relationship document has no usable people"));
    }

    for record in &file.friendships {
        if !model.contains(&record.a) || !model.contains(&record.b) {
            continue;
        }
        let direction = match record.kind {
            RelationKind::Mutual => Direction::Mutual,
            RelationKind::AToB => Direction::OneWay {
                from: record.a.clone(),
                to: record.b.clone(),
            },
            RelationKind::BToA => Direction::OneWay {
                from: record.b.clone(),
                to: record.a.clone(),
            },
        };
        model.set_pair_friendship_directed(
            &record.a,
            &record.b,
            normalize_weight(record.weight),
            direction,
        );
    }

    for record in &file.groups {
        let members = record
            .members
            .iter()
            .filter(|name| model.contains(name))
            .cloned()
            .collect::<HashSet<_>>();
        if members.is_empty() {
            continue;
        }
        model.add_group_with(members, record.weight);
    }

    Ok(model)
}

pub fn load_from_path(path: &Path) -> Result<RelationModel> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_model(&text).with_context(|| format!("failed to import {}", path.display()))
}

pub fn save_to_path(model: &RelationModel, path: &Path) -> Result<()> {
    fs::write(path, export_model(model))
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_import_round_trip() {
        let mut model = RelationModel::new();
        for name in ["A", "B", "C"] {
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
        let id = model.add_group();
        let group = model.group_mut(id).unwrap();
        group.members.insert("A".to_owned());
        group.members.insert("B".to_owned());
        group.weight = 1.1;

        let text = export_model(&model);
        let restored = import_model(&text).unwrap();

        assert_eq!(restored.people, model.people);
        assert_eq!(restored.friends_of("A").unwrap().get("B"), Some(&0.8));
        assert_eq!(
            restored.pair_direction("B", "C"),
            Direction::OneWay {
                from: "C".to_owned(),
                to: "B".to_owned(),
            }
        );
        assert_eq!(restored.groups.len(), 1);
        assert!(restored.groups[0].members.contains("A"));
        assert_eq!(restored.groups[0].weight, 1.1);
    }

    #[test]
    fn import_skips_unknown_names_and_empty_groups() {
        let text = r#"{
            "version": 2,
            "people": ["A", "B"],
            "friendships": [
                {"a": "A", "b": "B", "weight": -1.0},
                {"a": "A", "b": "Z", "weight": 1.0}
            ],
            "groups": [
                {"members": ["Z"], "weight": 1.0},
                {"members": ["A", "B"], "weight": 0.9}
            ]
        }"#;
        let model = import_model(text).unwrap();
        // Negative weight normalized, unknown endpoint dropped.
        assert_eq!(model.friends_of("A").unwrap().get("B"), Some(&1.0));
        assert!(!model.friends_of("A").unwrap().contains_key("Z"));
        assert_eq!(model.groups.len(), 1);
    }

    #[test]
    fn import_accepts_missing_type_and_missing_arrays() {
        let text = r#"{"version": 2, "people": ["A"]}"#;
        let model = import_model(text).unwrap();
        assert_eq!(model.people, vec!["A"]);

        let text = r#"{
            "version": 2,
            "people": ["A", "B"],
            "friendships": [{"a": "A", "b": "B", "weight": 0.5}]
        }"#;
        let model = import_model(text).unwrap();
        assert_eq!(model.pair_direction("A", "B"), Direction::Mutual);
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import_model("not json").is_err());
        assert!(import_model(r#"{"version": 2}"#).is_err());
    }
}
