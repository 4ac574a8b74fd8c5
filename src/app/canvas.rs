use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Sense, Shape, Stroke, Ui, Vec2, vec2,
};

use crate::layout::{FitTransform, LayoutEdge, fit_transform};

use super::{FinishedLayout, SociogramApp};

const NODE_RADIUS: f32 = 10.0;
const NODE_FILL: Color32 = Color32::from_rgb(0x19, 0x76, 0xd2);
const NODE_BORDER_WIDTH: f32 = 1.5;
const EDGE_COLOR: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);
const EDGE_BASE_WIDTH: f32 = 1.5;
const EDGE_WIDTH_SCALE: f32 = 9.0;
const EDGE_MAX_WIDTH: f32 = 9.5;
const ARROW_BASE_SIZE: f32 = 6.0;
const ARROW_ASPECT: f32 = 0.65;
const ARROW_LINE_OVERLAP: f32 = 2.0;
const LABEL_FONT_SIZE: f32 = 17.0;
const DASH_LEN: f32 = 4.0;

/// Layout coordinates to screen: fit into the canvas, then shift by the
/// allocated rect's origin.
fn screen_position(origin: Pos2, transform: &FitTransform, p: Vec2) -> Pos2 {
    origin + transform.apply(p)
}

impl SociogramApp {
    pub(super) fn draw_canvas(&mut self, ui: &mut Ui) {
        let size = vec2(self.settings.canvas_w, self.settings.canvas_h);
        let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let Some(layout) = &self.session.last else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No diagram yet. Add people or generate a network.",
                FontId::proportional(16.0),
                Color32::GRAY,
            );
            return;
        };

        let transform = fit_transform(&layout.positions, size.x, size.y);
        let to_screen = |p: Vec2| -> Pos2 { screen_position(rect.min, &transform, p) };
        let scale = transform.scale;

        for edge in &layout.edges {
            draw_edge(
                &painter,
                layout,
                edge,
                &to_screen,
                scale,
                self.settings.dashed_threshold,
            );
        }

        for (i, pos) in layout.positions.iter().enumerate() {
            let center = to_screen(*pos);
            painter.circle_filled(center, NODE_RADIUS * scale, NODE_FILL);
            painter.circle_stroke(
                center,
                NODE_RADIUS * scale,
                Stroke::new(NODE_BORDER_WIDTH * scale, Color32::WHITE),
            );
            let offset = layout.label_offsets[i] * scale;
            painter.text(
                center + offset,
                Align2::CENTER_CENTER,
                &layout.names[i],
                FontId::proportional(LABEL_FONT_SIZE * scale),
                Color32::BLACK,
            );
        }
    }
}

fn draw_edge(
    painter: &Painter,
    layout: &FinishedLayout,
    edge: &LayoutEdge,
    to_screen: &impl Fn(Vec2) -> Pos2,
    scale: f32,
    dashed_threshold: f32,
) {
    let a = to_screen(layout.positions[edge.source]);
    let b = to_screen(layout.positions[edge.target]);
    let dir = b - a;
    let len = dir.length();
    if len <= f32::EPSILON {
        return;
    }
    let unit = dir / len;

    // stop lines at node borders, not centers
    let inset = NODE_RADIUS * scale;
    let mut start = a + unit * inset;
    let mut end = b - unit * inset;
    if (end - start).dot(unit) <= 0.0 {
        return;
    }

    let directed = edge.directed.is_some();
    let dashed = !directed && edge.weight <= dashed_threshold;

    let width = if dashed {
        EDGE_BASE_WIDTH * scale
    } else {
        (EDGE_BASE_WIDTH + ((edge.weight - dashed_threshold) * EDGE_WIDTH_SCALE).max(0.0))
            .min(EDGE_MAX_WIDTH)
            * scale
    };
    let stroke = Stroke::new(width, EDGE_COLOR);

    let mut arrow = None;
    if let Some((_, to)) = edge.directed {
        let arrow_size = (ARROW_BASE_SIZE + width / scale) * scale;
        // the head sits at whichever endpoint the relation flows to
        let (tip, back_unit) = if to == edge.target {
            (end, -unit)
        } else {
            (start, unit)
        };
        let base = tip + back_unit * arrow_size;
        let side = vec2(-back_unit.y, back_unit.x) * arrow_size * ARROW_ASPECT;
        arrow = Some(Shape::convex_polygon(
            vec![tip, base + side, base - side],
            EDGE_COLOR,
            Stroke::NONE,
        ));
        // tuck the line under the head so no seam shows
        let tuck = arrow_size - ARROW_LINE_OVERLAP * scale;
        if to == edge.target {
            end -= unit * tuck;
        } else {
            start += unit * tuck;
        }
    }

    if dashed {
        painter.extend(Shape::dashed_line(
            &[start, end],
            stroke,
            DASH_LEN * scale,
            DASH_LEN * scale,
        ));
    } else {
        painter.line_segment([start, end], stroke);
    }

    if let Some(shape) = arrow {
        painter.add(shape);
    }
}
