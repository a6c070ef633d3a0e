//! Axis-aligned collision testing
//!
//! Overlap is tested on open intervals on both axes: rectangles that merely
//! share an edge do not collide.

use glam::Vec2;

/// Open-interval AABB overlap test between two rectangles given by their
/// top-left corner and size.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Vec2::new(190.0, 400.0);
        let b = Vec2::new(200.0, 395.0);
        let size = Vec2::splat(50.0);
        assert!(aabb_overlap(a, size, b, size));
    }

    #[test]
    fn test_disjoint_rects_miss() {
        let size = Vec2::splat(50.0);
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(100.0, 0.0),
            size
        ));
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(0.0, 100.0),
            size
        ));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let size = Vec2::splat(50.0);
        // Flush on the right edge
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(50.0, 0.0),
            size
        ));
        // Flush on the bottom edge
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(0.0, 50.0),
            size
        ));
        // Corner contact only
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(50.0, 50.0),
            size
        ));
    }

    #[test]
    fn test_containment_collides() {
        assert!(aabb_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::splat(100.0),
            Vec2::new(40.0, 40.0),
            Vec2::splat(10.0)
        ));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a_pos = Vec2::new(ax, ay);
            let a_size = Vec2::new(aw, ah);
            let b_pos = Vec2::new(bx, by);
            let b_size = Vec2::new(bw, bh);
            prop_assert_eq!(
                aabb_overlap(a_pos, a_size, b_pos, b_size),
                aabb_overlap(b_pos, b_size, a_pos, a_size)
            );
        }

        #[test]
        fn prop_flush_edges_never_collide(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a_pos = Vec2::new(x, y);
            let a_size = Vec2::new(aw, ah);
            // b placed flush against a's right edge
            prop_assert!(!aabb_overlap(
                a_pos,
                a_size,
                Vec2::new(x + aw, y),
                Vec2::new(bw, bh)
            ));
            // b placed flush against a's bottom edge
            prop_assert!(!aabb_overlap(
                a_pos,
                a_size,
                Vec2::new(x, y + ah),
                Vec2::new(bw, bh)
            ));
        }
    }
}
