use eframe::egui::Vec2;

use crate::util::orient;

/// Convex hull of the positions selected by `indices`, as one traversal of
/// the boundary (monotone chain; collinear points dropped). Two or fewer
/// points come back unchanged.
pub fn convex_hull(indices: &[usize], positions: &[Vec2]) -> Vec<usize> {
    if indices.len() <= 2 {
        return indices.to_vec();
    }

    let mut points = indices
        .iter()
        .map(|&index| (index, positions[index]))
        .collect::<Vec<_>>();
    points.sort_by(|(_, a), (_, b)| {
        a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
    });

    let mut lower: Vec<(usize, Vec2)> = Vec::with_capacity(points.len());
    for &point in &points {
        while lower.len() >= 2
            && orient(lower[lower.len() - 2].1, lower[lower.len() - 1].1, point.1) <= 0.0
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<(usize, Vec2)> = Vec::with_capacity(points.len());
    for &point in points.iter().rev() {
        while upper.len() >= 2
            && orient(upper[upper.len() - 2].1, upper[upper.len() - 1].1, point.1) <= 0.0
        {
            upper.pop();
        }
        upper.push(point);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(index, _)| index).collect()
}
