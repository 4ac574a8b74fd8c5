use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

struct Bounds {
    min: Vec2,
    max: Vec2,
}

fn rotated_bounds(positions: &[Vec2], centroid: Vec2, cos: f32, sin: f32) -> Bounds {
    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &position in positions {
        let offset = position - centroid;
        let rotated = vec2(
            cos * offset.x - sin * offset.y,
            sin * offset.x + cos * offset.y,
        );
        min = min.min(rotated);
        max = max.max(rotated);
    }
    Bounds { min, max }
}

/// Rotate the whole point set about its centroid to the angle minimizing the
/// axis-aligned bounding-box area (1° steps over `[0, π)`, since a box
/// repeats every half turn), then translate so that box sits centered in the
/// `width × height` target.
pub fn minimize_bounding_box(positions: &mut [Vec2], width: f32, height: f32) {
    if positions.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for &position in positions.iter() {
        centroid += position;
    }
    centroid /= positions.len() as f32;

    let step = PI / 180.0;
    let mut best_angle = 0.0f32;
    let mut best_area = f32::INFINITY;
    let mut best_bounds = None;

    let mut angle = 0.0f32;
    while angle < PI {
        let bounds = rotated_bounds(positions, centroid, angle.cos(), angle.sin());
        let size = bounds.max - bounds.min;
        let area = size.x * size.y;
        if area < best_area {
            best_area = area;
            best_angle = angle;
            best_bounds = Some(bounds);
        }
        angle += step;
    }

    let Some(bounds) = best_bounds else {
        return;
    };

    let size = bounds.max - bounds.min;
    let offset = vec2(
        (width - size.x) / 2.0 - bounds.min.x,
        (height - size.y) / 2.0 - bounds.min.y,
    );

    let (sin, cos) = best_angle.sin_cos();
    for position in positions.iter_mut() {
        let delta = *position - centroid;
        *position = vec2(
            cos * delta.x - sin * delta.y,
            sin * delta.x + cos * delta.y,
        ) + offset;
    }
}

/// Difference between the point set's bounding-box aspect ratio and the
/// canvas aspect ratio; infinite when the box is degenerate. Used as the
/// selector's tie-break.
pub fn aspect_diff(positions: &[Vec2], canvas_w: f32, canvas_h: f32) -> f32 {
    if positions.is_empty() {
        return f32::INFINITY;
    }

    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &position in positions {
        min = min.min(position);
        max = max.max(position);
    }
    let size = max - min;
    if size.x <= 0.0 || size.y <= 0.0 {
        return f32::INFINITY;
    }

    ((size.x / size.y) - (canvas_w / canvas_h)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox_area(positions: &[Vec2]) -> f32 {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &position in positions {
            min = min.min(position);
            max = max.max(position);
        }
        let size = max - min;
        size.x * size.y
    }

    #[test]
    fn never_increases_bounding_box_area() {
        // A rectangle tilted 30 degrees; the optimizer should recover the
        // axis-aligned footprint (or better).
        let (sin, cos) = (30.0f32.to_radians()).sin_cos();
        let corners = [
            vec2(0.0, 0.0),
            vec2(200.0, 0.0),
            vec2(200.0, 80.0),
            vec2(0.0, 80.0),
        ];
        let mut positions = corners
            .iter()
            .map(|&p| vec2(cos * p.x - sin * p.y, sin * p.x + cos * p.y))
            .collect::<Vec<_>>();
        let before = bbox_area(&positions);

        minimize_bounding_box(&mut positions, 1000.0, 600.0);
        let after = bbox_area(&positions);
        assert!(after <= before + 1.0);
        // 1-degree search granularity around the exact 200x80 box.
        assert!((after - 200.0 * 80.0).abs() < 600.0);
    }

    #[test]
    fn result_is_centered_in_target() {
        let mut positions = vec![
            vec2(13.0, 7.0),
            vec2(90.0, 40.0),
            vec2(55.0, 160.0),
            vec2(-20.0, 90.0),
        ];
        minimize_bounding_box(&mut positions, 1000.0, 600.0);

        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &position in &positions {
            min = min.min(position);
            max = max.max(position);
        }
        let center = (min + max) / 2.0;
        assert!((center.x - 500.0).abs() < 0.1);
        assert!((center.y - 300.0).abs() < 0.1);
    }

    #[test]
    fn aspect_diff_degenerate_cases() {
        assert_eq!(aspect_diff(&[], 1000.0, 600.0), f32::INFINITY);
        assert_eq!(
            aspect_diff(&[vec2(1.0, 1.0), vec2(1.0, 5.0)], 1000.0, 600.0),
            f32::INFINITY
        );
        let square = [vec2(0.0, 0.0), vec2(10.0, 10.0)];
        assert!((aspect_diff(&square, 600.0, 600.0)).abs() < 1e-6);
    }
}
