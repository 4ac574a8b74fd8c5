use eframe::egui::Vec2;

/// Signed area of the triangle (a, b, c), doubled. Positive for a
/// counter-clockwise turn in the usual y-up convention.
pub fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Weights are kept strictly positive everywhere; anything else collapses
/// to 1 at the boundary.
pub fn normalize_weight(weight: f32) -> f32 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn orient_signs() {
        let a = vec2(0.0, 0.0);
        let b = vec2(1.0, 0.0);
        assert!(orient(a, b, vec2(0.5, 1.0)) > 0.0);
        assert!(orient(a, b, vec2(0.5, -1.0)) < 0.0);
        assert_eq!(orient(a, b, vec2(2.0, 0.0)), 0.0);
    }

    #[test]
    fn weight_normalization() {
        assert_eq!(normalize_weight(0.4), 0.4);
        assert_eq!(normalize_weight(0.0), 1.0);
        assert_eq!(normalize_weight(-3.0), 1.0);
        assert_eq!(normalize_weight(f32::NAN), 1.0);
    }
}
