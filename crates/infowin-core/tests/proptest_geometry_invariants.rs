//! Property-based invariant tests for geometry primitives.
//!
//! These tests verify structural invariants that must hold for any valid
//! inputs:
//!
//! 1. Viewport width/height agree with the edge coordinates.
//! 2. `contains_anchor` is monotone: shrinking the viewport never adds
//!    visible anchors.
//! 3. `is_empty` agrees with non-positive width or height.
//! 4. Point translation is additive.

use infowin_core::geometry::{ScreenPoint, Viewport};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (
        -500.0f32..=500.0,
        -500.0f32..=500.0,
        0.0f32..=1000.0,
        0.0f32..=1000.0,
    )
        .prop_map(|(left, top, w, h)| Viewport::new(left, top, left + w, top + h))
}

fn point_strategy() -> impl Strategy<Value = ScreenPoint> {
    (-1500.0f32..=1500.0, -1500.0f32..=1500.0).prop_map(|(x, y)| ScreenPoint::new(x, y))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Dimensions agree with edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dimensions_match_edges(vp in viewport_strategy()) {
        prop_assert_eq!(vp.width(), vp.right - vp.left);
        prop_assert_eq!(vp.height(), vp.bottom - vp.top);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Visibility is monotone under shrinking
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shrinking_never_adds_visible_anchors(
        vp in viewport_strategy(),
        p in point_strategy(),
        shrink in 0.0f32..=100.0,
    ) {
        let smaller = Viewport::new(vp.left, vp.top, vp.right - shrink, vp.bottom - shrink);
        if smaller.contains_anchor(p) {
            prop_assert!(
                vp.contains_anchor(p),
                "anchor {:?} visible in {:?} but not in larger {:?}",
                p, smaller, vp
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. is_empty matches non-positive dimensions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn is_empty_matches_dimensions(vp in viewport_strategy()) {
        prop_assert_eq!(vp.is_empty(), vp.width() <= 0.0 || vp.height() <= 0.0);
    }

    #[test]
    fn empty_viewport_contains_no_interior_anchor(p in point_strategy()) {
        let vp = Viewport::new(100.0, 100.0, 100.0, 100.0);
        // Only the degenerate corner itself passes the inclusive check.
        if vp.contains_anchor(p) {
            prop_assert_eq!(p, ScreenPoint::new(0.0, 0.0));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Translation is additive
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn translation_is_additive(
        p in point_strategy(),
        dx in -100.0f32..=100.0,
        dy in -100.0f32..=100.0,
    ) {
        let moved = p.translated(dx, dy);
        prop_assert_eq!(moved.x, p.x + dx);
        prop_assert_eq!(moved.y, p.y + dy);
        let back = moved.translated(-dx, -dy);
        prop_assert!((back.x - p.x).abs() < 1e-3);
        prop_assert!((back.y - p.y).abs() < 1e-3);
    }
}
