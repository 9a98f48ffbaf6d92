//! Keeping popups inside the viewport.

use egui::{Pos2, Vec2};

/// Distance kept between an open menu and every viewport edge.
pub const DEFAULT_MARGIN: f32 = 32.0;

/// Place one axis of a popup so it stays inside `[margin, viewport - margin]`.
///
/// The popup first flips to the other side of the anchor when it would cross
/// the far edge, then slides back against the far edge if flipping was not
/// enough, and is finally pinned to the near margin. On a viewport smaller than
/// `extent + 2 * margin` the near margin wins and the popup overflows the far
/// edge.
///
/// # Arguments
/// * `anchor` - Requested near edge (cursor position)
/// * `extent` - Popup size along this axis
/// * `viewport` - Viewport size along this axis
/// * `margin` - Distance to keep from both edges
pub fn clamp_axis(anchor: f32, extent: f32, viewport: f32, margin: f32) -> f32 {
    let limit = viewport - margin;
    let mut position = anchor;

    if position + extent > limit {
        position -= extent;
    }

    if position + extent > limit {
        position = viewport - extent - margin;
    }

    if position < margin {
        position = margin;
    }

    position
}

/// Apply [`clamp_axis`] to both axes of a popup anchored at `anchor`.
pub fn clamp_to_viewport(anchor: Pos2, extent: Vec2, viewport: Vec2, margin: f32) -> Pos2 {
    Pos2::new(
        clamp_axis(anchor.x, extent.x, viewport.x, margin),
        clamp_axis(anchor.y, extent.y, viewport.y, margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_without_adjustment() {
        let pos = clamp_to_viewport(
            Pos2::new(100.0, 120.0),
            Vec2::new(150.0, 80.0),
            Vec2::new(800.0, 600.0),
            DEFAULT_MARGIN,
        );
        assert_eq!(pos, Pos2::new(100.0, 120.0));
    }

    #[test]
    fn test_flips_to_other_side_of_cursor() {
        // 700 + 150 overflows 800 - 32, flipping gives 550 which fits
        assert_eq!(clamp_axis(700.0, 150.0, 800.0, DEFAULT_MARGIN), 550.0);
    }

    #[test]
    fn test_slides_against_far_edge_when_flip_is_not_enough() {
        // 760 flips to 660, 795 flips to 695 and still overflows 768
        assert_eq!(clamp_axis(760.0, 100.0, 800.0, 32.0), 660.0);
        assert_eq!(clamp_axis(795.0, 100.0, 800.0, 32.0), 668.0);
    }

    #[test]
    fn test_pins_near_edge_to_margin() {
        assert_eq!(clamp_axis(5.0, 50.0, 800.0, 32.0), 32.0);
        assert_eq!(clamp_axis(-40.0, 50.0, 800.0, 32.0), 32.0);
    }

    #[test]
    fn test_small_viewport_prefers_near_margin() {
        // 200 px cannot hold 180 px plus two margins
        let pos = clamp_axis(100.0, 180.0, 200.0, 32.0);
        assert_eq!(pos, 32.0);
        assert!(pos + 180.0 > 200.0 - 32.0);
    }

    #[test]
    fn test_bottom_right_corner() {
        let viewport = Vec2::new(1024.0, 768.0);
        let extent = Vec2::new(100.0, 50.0);
        let pos = clamp_to_viewport(
            Pos2::new(viewport.x - 5.0, viewport.y - 5.0),
            extent,
            viewport,
            DEFAULT_MARGIN,
        );

        assert!(pos.x + extent.x <= viewport.x - DEFAULT_MARGIN);
        assert!(pos.y + extent.y <= viewport.y - DEFAULT_MARGIN);
        assert!(pos.x >= DEFAULT_MARGIN);
        assert!(pos.y >= DEFAULT_MARGIN);
        assert_eq!(pos, Pos2::new(892.0, 686.0));
    }

    #[test]
    fn test_bounds_hold_across_anchors_and_extents() {
        let margin = DEFAULT_MARGIN;
        let viewports = [64.0, 100.0, 300.0, 640.0, 1920.0];
        let extents = [0.0, 1.0, 10.0, 50.0, 120.0, 400.0, 1000.0];

        for &viewport in &viewports {
            for &extent in &extents {
                let mut anchor = -100.0;
                while anchor <= viewport + 100.0 {
                    let pos = clamp_axis(anchor, extent, viewport, margin);
                    assert!(pos >= margin, "anchor {anchor} extent {extent} vp {viewport}");
                    if viewport >= extent + 2.0 * margin {
                        assert!(
                            pos + extent <= viewport - margin,
                            "anchor {anchor} extent {extent} vp {viewport}"
                        );
                    }
                    anchor += 7.5;
                }
            }
        }
    }
}
