use eframe::egui::{self, Color32, RichText, Ui};

use crate::model::{Direction, generate_network};

use super::{EdgeStats, SociogramApp};

impl SociogramApp {
    pub(super) fn control_panel(&mut self, ui: &mut Ui) {
        ui.heading("Sociogram");
        ui.separator();

        self.people_section(ui);
        ui.separator();
        self.friends_section(ui);
        ui.separator();
        self.groups_section(ui);
        ui.separator();
        self.layout_section(ui);
        ui.separator();
        self.autogen_section(ui);
        ui.separator();
        self.io_section(ui);
        ui.separator();
        self.stats_section(ui);

        if let Some(status) = &self.ui.status {
            ui.separator();
            let color = if status.error {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    }

    fn people_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("People").strong());

        ui.horizontal(|ui| {
            let field = ui.text_edit_singleline(&mut self.ui.name_input);
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Add").clicked() || submitted) && !self.ui.name_input.trim().is_empty() {
                let name = self.ui.name_input.trim().to_owned();
                if self.model.add_person(&name) {
                    self.ui.name_input.clear();
                    self.relayout_requested = true;
                } else {
                    self.set_status(format!("\"{name}\" already exists."), true);
                }
            }
        });

        let mut removed = None;
        for person in self.model.people.clone() {
            ui.horizontal(|ui| {
                let selected = self.ui.selected_person.as_deref() == Some(person.as_str());
                if ui.selectable_label(selected, &person).clicked() {
                    self.ui.selected_person = if selected { None } else { Some(person.clone()) };
                }
                if ui.small_button("x").on_hover_text("Remove this person").clicked() {
                    removed = Some(person.clone());
                }
            });
        }
        if let Some(name) = removed {
            self.model.remove_person(&name);
            if self.ui.selected_person.as_deref() == Some(name.as_str()) {
                self.ui.selected_person = None;
            }
            self.relayout_requested = true;
        }

        if !self.model.people.is_empty() && ui.button("Clear everything").clicked() {
            self.model.reset();
            self.ui.selected_person = None;
            self.session.last = None;
            self.relayout_requested = true;
        }
    }

    fn friends_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Friendships").strong());

        let Some(person) = self.ui.selected_person.clone() else {
            ui.label("Select a person to edit their friendships.");
            return;
        };
        ui.label(format!("Editing: {person}"));

        let mut friends: Vec<(String, f32)> = self
            .model
            .friends_of(&person)
            .map(|entries| entries.iter().map(|(n, w)| (n.clone(), *w)).collect())
            .unwrap_or_default();
        friends.sort_by(|a, b| a.0.cmp(&b.0));

        let mut changed = false;
        let mut removed = None;
        for (friend, weight) in &mut friends {
            ui.horizontal(|ui| {
                ui.label(friend.as_str());
                let drag = ui.add(
                    egui::DragValue::new(weight)
                        .range(0.05..=2.0)
                        .speed(0.02)
                        .fixed_decimals(2),
                );
                if drag.changed() {
                    self.model.set_pair_friendship(&person, friend, *weight);
                    changed = true;
                }

                let current = self.model.pair_direction(&person, friend);
                let label = match &current {
                    Direction::Mutual => "mutual".to_owned(),
                    Direction::OneWay { from, to } => format!("{from} \u{2192} {to}"),
                };
                egui::ComboBox::from_id_salt(("direction", &person, friend.as_str()))
                    .selected_text(label)
                    .show_ui(ui, |ui| {
                        let options = [
                            Direction::Mutual,
                            Direction::OneWay {
                                from: person.clone(),
                                to: friend.clone(),
                            },
                            Direction::OneWay {
                                from: friend.clone(),
                                to: person.clone(),
                            },
                        ];
                        for option in options {
                            let text = match &option {
                                Direction::Mutual => "mutual".to_owned(),
                                Direction::OneWay { from, to } => format!("{from} \u{2192} {to}"),
                            };
                            if ui.selectable_label(current == option, text).clicked()
                                && current != option
                            {
                                self.model.set_pair_direction(&person, friend, option);
                                changed = true;
                            }
                        }
                    });

                if ui.small_button("x").on_hover_text("Remove this friendship").clicked() {
                    removed = Some(friend.clone());
                }
            });
        }
        if let Some(friend) = removed {
            self.model.remove_pair_friendship(&person, &friend);
            changed = true;
        }

        let candidates: Vec<String> = self
            .model
            .people
            .iter()
            .filter(|p| {
                *p != &person
                    && !self
                        .model
                        .friends_of(&person)
                        .is_some_and(|entries| entries.contains_key(*p))
            })
            .cloned()
            .collect();
        if !candidates.is_empty() {
            ui.horizontal(|ui| {
                if !candidates.contains(&self.ui.add_friend_pick) {
                    self.ui.add_friend_pick = candidates[0].clone();
                }
                egui::ComboBox::from_id_salt("add_friend")
                    .selected_text(&self.ui.add_friend_pick)
                    .show_ui(ui, |ui| {
                        for candidate in &candidates {
                            ui.selectable_value(
                                &mut self.ui.add_friend_pick,
                                candidate.clone(),
                                candidate,
                            );
                        }
                    });
                if ui.button("Add friendship").clicked() {
                    let friend = self.ui.add_friend_pick.clone();
                    self.model.set_pair_friendship(&person, &friend, 1.0);
                    changed = true;
                }
            });
        }

        if changed {
            self.relayout_requested = true;
        }
    }

    fn groups_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Groups").strong());

        let mut changed = false;
        let mut removed = None;
        let people = self.model.people.clone();
        for group_index in 0..self.model.groups.len() {
            let (id, title) = {
                let group = &self.model.groups[group_index];
                (group.id, format!("Group {} ({} members)", group.id, group.members.len()))
            };
            ui.collapsing(title, |ui| {
                let mut weight = self.model.groups[group_index].weight;
                ui.horizontal(|ui| {
                    ui.label("Weight");
                    let drag = ui.add(
                        egui::DragValue::new(&mut weight)
                            .range(0.1..=3.0)
                            .speed(0.02)
                            .fixed_decimals(2),
                    );
                    if drag.changed() {
                        self.model.set_group_weight(id, weight);
                        changed = true;
                    }
                });
                let group = &mut self.model.groups[group_index];
                for person in &people {
                    let mut member = group.members.contains(person);
                    if ui.checkbox(&mut member, person).changed() {
                        if member {
                            group.members.insert(person.clone());
                        } else {
                            group.members.remove(person);
                        }
                        changed = true;
                    }
                }
                if ui.button("Remove group").clicked() {
                    removed = Some(id);
                }
            });
        }
        if let Some(id) = removed {
            self.model.remove_group(id);
            changed = true;
        }

        if ui.button("New group").clicked() {
            self.model.add_group();
            changed = true;
        }

        if changed {
            self.relayout_requested = true;
        }
    }

    fn layout_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Layout").strong());

        let mut relayout = false;
        relayout |= ui
            .add(
                egui::Slider::new(&mut self.settings.iterations, 50..=5000)
                    .text("Iterations"),
            )
            .on_hover_text("Simulation steps per layout run.")
            .changed();
        relayout |= ui
            .add(
                egui::Slider::new(&mut self.settings.ideal_edge_len, 50.0..=1000.0)
                    .text("Ideal edge length"),
            )
            .on_hover_text("Target distance between connected people.")
            .changed();
        relayout |= ui
            .add(egui::Slider::new(&mut self.settings.runs, 1..=30).text("Layout runs"))
            .on_hover_text("Independent runs; the one with the fewest edge crossings wins.")
            .changed();

        // canvas size and the dashed cutoff only change how the diagram is
        // drawn, so no new layout run is needed
        ui.add(
            egui::Slider::new(&mut self.settings.canvas_w, 400.0..=2000.0).text("Canvas width"),
        );
        ui.add(
            egui::Slider::new(&mut self.settings.canvas_h, 300.0..=2000.0).text("Canvas height"),
        );
        ui.add(
            egui::Slider::new(&mut self.settings.dashed_threshold, 0.05..=2.0)
                .text("Dashed below"),
        )
        .on_hover_text("Undirected friendships at or below this weight draw dashed.");

        if ui.button("Relayout").clicked() {
            relayout = true;
        }
        if self.session.running() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Computing layout...");
            });
        }

        if relayout {
            self.relayout_requested = true;
        }
    }

    fn autogen_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Random network").strong());

        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                self.model = generate_network(&self.autogen, &mut rand::thread_rng());
                self.ui.selected_person = None;
                self.relayout_requested = true;
                self.set_status(
                    format!(
                        "Generated {} people in {} groups.",
                        self.model.people.len(),
                        self.model.groups.len()
                    ),
                    false,
                );
            }
            ui.checkbox(&mut self.ui.show_autogen_settings, "Settings");
        });

        if !self.ui.show_autogen_settings {
            return;
        }

        let a = &mut self.autogen;
        ui.add(egui::Slider::new(&mut a.min_people, 2..=60).text("Min people"));
        ui.add(egui::Slider::new(&mut a.max_people, 2..=80).text("Max people"));
        if a.max_people < a.min_people {
            a.max_people = a.min_people;
        }
        ui.add(egui::Slider::new(&mut a.min_group_size, 1..=10).text("Min group size"));
        ui.add(egui::Slider::new(&mut a.max_group_size, 1..=15).text("Max group size"));
        if a.max_group_size < a.min_group_size {
            a.max_group_size = a.min_group_size;
        }
        ui.add(
            egui::Slider::new(&mut a.preferred_group_size, 1..=15).text("Preferred group size"),
        );
        ui.add(egui::Slider::new(&mut a.group_weight_min, 0.1..=3.0).text("Min group weight"));
        ui.add(egui::Slider::new(&mut a.group_weight_max, 0.1..=3.0).text("Max group weight"));
        if a.group_weight_max < a.group_weight_min {
            a.group_weight_max = a.group_weight_min;
        }
        ui.add(egui::Slider::new(&mut a.intra_small_density, 0.0..=1.0).text("Pair density"));
        ui.add(
            egui::Slider::new(&mut a.intra_medium_density, 0.0..=1.0).text("Small group density"),
        );
        ui.add(
            egui::Slider::new(&mut a.intra_large_density, 0.0..=1.0).text("Large group density"),
        );
        ui.add(
            egui::Slider::new(&mut a.intra_strong_edge_prob, 0.0..=1.0)
                .text("Strong intra chance"),
        );
        ui.add(egui::Slider::new(&mut a.base_cross_prob, 0.0..=1.0).text("Cross-group chance"));
        ui.add(
            egui::Slider::new(&mut a.cross_strong_edge_prob, 0.0..=1.0)
                .text("Strong cross chance"),
        );
        ui.add(egui::Slider::new(&mut a.one_way_prob, 0.0..=1.0).text("One-way chance"));

        if ui.button("Reset to defaults").clicked() {
            self.autogen = Default::default();
        }
    }

    fn io_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("File").strong());

        ui.text_edit_singleline(&mut self.ui.io_path);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                let path = self.ui.io_path.clone();
                match crate::model::save_to_path(&self.model, path.as_ref()) {
                    Ok(()) => self.set_status(format!("Saved to {path}."), false),
                    Err(err) => self.set_status(format!("Save failed: {err:#}"), true),
                }
            }
            if ui.button("Load").clicked() {
                let path = self.ui.io_path.clone();
                match crate::model::load_from_path(path.as_ref()) {
                    Ok(model) => {
                        self.model = model;
                        self.ui.selected_person = None;
                        self.relayout_requested = true;
                        self.set_status(
                            format!("Loaded {} people from {path}.", self.model.people.len()),
                            false,
                        );
                    }
                    Err(err) => self.set_status(format!("Load failed: {err:#}"), true),
                }
            }
        });
    }

    fn stats_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Statistics").strong());

        let edges = self
            .session
            .last
            .as_ref()
            .map(|layout| layout.edges.as_slice())
            .unwrap_or_default();
        let stats = EdgeStats::compute(
            self.model.people.len(),
            edges,
            self.settings.dashed_threshold,
        );

        ui.label(format!("Solid-equivalent edges: {}", stats.solid_equivalent));
        ui.label(format!("Dashed edges: {}", stats.dashed));
        ui.label(format!("Solid rate: {}", stats.solid_rate));
        ui.label(format!("Combined rate: {}", stats.both_rate));
        if let Some(layout) = &self.session.last {
            ui.label(format!("Edge crossings score: {}", layout.score));
        }
    }
}
