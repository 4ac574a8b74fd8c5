use eframe::egui::{Vec2, vec2};

/// Margin kept around the diagram when fitting it to a canvas; leaves room
/// for node circles and labels at the edge.
pub const GRAPH_MARGIN: f32 = 60.0;

/// Uniform scale plus translation from layout space into a target canvas.
/// Cheap to recompute on every repaint; never touches the layout itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub translation: Vec2,
}

impl FitTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    pub fn apply(&self, position: Vec2) -> Vec2 {
        position * self.scale + self.translation
    }
}

/// Fit the point set into a `width × height` canvas: uniform scale chosen so
/// the margin-inset box contains the layout's bounding box, centered. A
/// degenerate box (or a non-finite/non-positive scale) falls back to scale 1
/// with centering only where possible.
pub fn fit_transform(positions: &[Vec2], width: f32, height: f32) -> FitTransform {
    if positions.is_empty() {
        return FitTransform::IDENTITY;
    }

    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &position in positions {
        min = min.min(position);
        max = max.max(position);
    }
    let size = max - min;
    if size.x <= 0.0 || size.y <= 0.0 || !size.x.is_finite() || !size.y.is_finite() {
        return FitTransform::IDENTITY;
    }

    let mut scale = ((width - 2.0 * GRAPH_MARGIN) / size.x)
        .min((height - 2.0 * GRAPH_MARGIN) / size.y);
    if !scale.is_finite() || scale <= 0.0 {
        scale = 1.0;
    }

    let box_center = (min + max) / 2.0;
    let canvas_center = vec2(width / 2.0, height / 2.0);
    FitTransform {
        scale,
        translation: canvas_center - box_center * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_box_center_to_canvas_center() {
        let positions = vec![vec2(100.0, 100.0), vec2(300.0, 200.0)];
        let transform = fit_transform(&positions, 1000.0, 600.0);
        let center = transform.apply(vec2(200.0, 150.0));
        assert!((center.x - 500.0).abs() < 1e-3);
        assert!((center.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn respects_margin() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 2000.0)];
        let transform = fit_transform(&positions, 1000.0, 600.0);
        for &position in &positions {
            let mapped = transform.apply(position);
            assert!(mapped.y >= GRAPH_MARGIN - 1e-3);
            assert!(mapped.y <= 600.0 - GRAPH_MARGIN + 1e-3);
        }
    }

    #[test]
    fn degenerate_extent_falls_back_to_identity_scale() {
        let transform = fit_transform(&[vec2(5.0, 5.0), vec2(5.0, 9.0)], 1000.0, 600.0);
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.translation, Vec2::ZERO);
        assert_eq!(fit_transform(&[], 1000.0, 600.0), FitTransform::IDENTITY);
    }
}
