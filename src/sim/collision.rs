//! Axis-aligned rectangle overlap
//!
//! Edges that merely touch do not count: every comparison is strict.

use super::actor::Rect;

/// Whether two rectangles overlap
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let right = Rect::new(50.0, 0.0, 50.0, 50.0);
        let below = Rect::new(0.0, 50.0, 50.0, 50.0);
        assert!(!collides(&a, &right));
        assert!(!collides(&right, &a));
        assert!(!collides(&a, &below));
        assert!(!collides(&below, &a));
    }

    #[test]
    fn test_one_unit_overlap_collides() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(49.0, 0.0, 50.0, 50.0);
        assert!(collides(&a, &b));
        assert!(collides(&b, &a));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn test_separated_on_one_axis() {
        // Overlapping horizontally but far apart vertically
        let a = Rect::new(100.0, 0.0, 50.0, 50.0);
        let b = Rect::new(100.0, 300.0, 50.0, 50.0);
        assert!(!collides(&a, &b));
    }
}
