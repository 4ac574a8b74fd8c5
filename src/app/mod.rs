use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};

use crate::layout::{
    LayoutConfig, LayoutEdge, build_layout_graph, label_offsets, select_layout,
};
use crate::model::{AutogenSettings, RelationModel};

mod canvas;
mod stats;
mod ui;

pub use stats::EdgeStats;

/// Layout-relevant settings as edited in the panel; clamped into a
/// [`LayoutConfig`] whenever a run starts. The dashed threshold only affects
/// drawing and statistics, never the engine.
struct LayoutSettings {
    iterations: usize,
    ideal_edge_len: f32,
    canvas_w: f32,
    canvas_h: f32,
    runs: usize,
    dashed_threshold: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            iterations: 800,
            ideal_edge_len: 240.0,
            canvas_w: 1000.0,
            canvas_h: 600.0,
            runs: 5,
            dashed_threshold: 0.7,
        }
    }
}

impl LayoutSettings {
    fn config(&self) -> LayoutConfig {
        LayoutConfig::clamped(
            self.iterations,
            self.ideal_edge_len,
            self.canvas_w,
            self.canvas_h,
            self.runs,
        )
    }
}

/// A finished layout, cached until the next run replaces it. Owns its own
/// name list so later model edits cannot skew an already-drawn diagram.
struct FinishedLayout {
    names: Vec<String>,
    positions: Vec<Vec2>,
    edges: Vec<LayoutEdge>,
    label_offsets: Vec<Vec2>,
    score: u64,
}

/// Coalescing layout session: Idle -> Running -> (Idle | run once more).
/// Requests while a worker is in flight only set `pending`; the worker is
/// never interrupted and at most one is alive at a time.
struct LayoutSession {
    worker: Option<Receiver<Option<FinishedLayout>>>,
    pending: bool,
    last: Option<FinishedLayout>,
}

impl LayoutSession {
    fn new() -> Self {
        Self {
            worker: None,
            pending: false,
            last: None,
        }
    }

    fn running(&self) -> bool {
        self.worker.is_some()
    }
}

struct StatusLine {
    text: String,
    error: bool,
}

struct UiState {
    name_input: String,
    selected_person: Option<String>,
    add_friend_pick: String,
    io_path: String,
    show_autogen_settings: bool,
    status: Option<StatusLine>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            name_input: String::new(),
            selected_person: None,
            add_friend_pick: String::new(),
            io_path: "relationships.json".to_owned(),
            show_autogen_settings: false,
            status: None,
        }
    }
}

pub struct SociogramApp {
    model: RelationModel,
    settings: LayoutSettings,
    autogen: AutogenSettings,
    session: LayoutSession,
    fixed_seed: Option<u64>,
    relayout_requested: bool,
    ui: UiState,
}

impl SociogramApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, model: RelationModel, seed: Option<u64>) -> Self {
        let has_people = !model.people.is_empty();
        Self {
            model,
            settings: LayoutSettings::default(),
            autogen: AutogenSettings::default(),
            session: LayoutSession::new(),
            fixed_seed: seed,
            relayout_requested: has_people,
            ui: UiState::default(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, error: bool) {
        let text = text.into();
        if error {
            log::warn!("{text}");
        } else {
            log::info!("{text}");
        }
        self.ui.status = Some(StatusLine { text, error });
    }

    /// Start a layout run, or mark one pending if a worker is already busy.
    /// The graph snapshot is taken here, before spawning, so the worker
    /// never reads the live model.
    fn request_layout(&mut self) {
        if self.model.people.is_empty() {
            self.session.last = None;
            self.session.pending = false;
            return;
        }
        if self.session.running() {
            self.session.pending = true;
            return;
        }

        let graph = build_layout_graph(&self.model);
        let config = self.settings.config();
        let seed = self.fixed_seed.unwrap_or_else(rand::random);
        log::info!(
            "layout: {} nodes, {} edges, {} groups, {} runs (seed {seed})",
            graph.node_count(),
            graph.edges.len(),
            graph.groups.len(),
            config.runs
        );

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = select_layout(&graph, &config, seed).map(|best| {
                let offsets = label_offsets(&best.positions, &graph.edges);
                FinishedLayout {
                    names: graph.names,
                    positions: best.positions,
                    edges: graph.edges,
                    label_offsets: offsets,
                    score: best.score,
                }
            });
            let _ = tx.send(result);
        });
        self.session.worker = Some(rx);
    }

    fn poll_layout_worker(&mut self) {
        let Some(rx) = self.session.worker.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Some(finished)) => {
                log::info!("layout finished with crossing score {}", finished.score);
                self.session.last = Some(finished);
            }
            Ok(None) => {
                self.set_status("Layout failed; nothing to draw.", true);
            }
            Err(TryRecvError::Empty) => {
                self.session.worker = Some(rx);
                return;
            }
            Err(TryRecvError::Disconnected) => {
                self.set_status("Layout worker disconnected.", true);
            }
        }

        if self.session.pending {
            self.session.pending = false;
            self.request_layout();
        }
    }
}

impl eframe::App for SociogramApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_layout_worker();

        egui::SidePanel::left("controls")
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.control_panel(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.draw_canvas(ui);
            });
        });

        if self.relayout_requested {
            self.relayout_requested = false;
            self.request_layout();
        }

        if self.session.running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
