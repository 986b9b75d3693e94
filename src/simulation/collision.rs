//! Bounding box collision checks

use super::types::Rect;

/// Whether two rectangles overlap.
///
/// Inequalities are strict, so boxes that only share an edge do not collide.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
