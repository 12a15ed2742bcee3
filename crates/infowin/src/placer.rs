#![forbid(unsafe_code)]

//! Screen-space placement for map-anchored popups.
//!
//! A popup is centered horizontally above its anchor, then shifted to stay
//! inside the viewport. When the popup carries a tip graphic, the tip's
//! left margin is compensated in the opposite direction so the tip keeps
//! pointing at the anchor after the shift. The clamp decision is made once
//! per open; subsequent camera moves reuse it through [`Placer::track`].

use std::fmt;

use infowin_core::geometry::{Offset, ScreenPoint, Size, Viewport};

/// Default gap kept between a shifted popup and the viewport edge, in pixels.
pub const DEFAULT_MARGIN_HORIZONTAL: f32 = 10.0;

/// Default width of the tip graphic, in pixels.
pub const DEFAULT_TIP_WIDTH: f32 = 20.0;

/// Error from [`Placer::place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceError {
    /// The popup has not been measured yet; placement needs a positive size
    /// in both dimensions.
    EmptySize(Size),
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySize(size) => write!(
                f,
                "popup size must be positive in both dimensions, got {}x{}",
                size.width, size.height
            ),
        }
    }
}

impl std::error::Error for PlaceError {}

/// The outcome of a placement pass.
///
/// `width_delta` and `height_delta` cache how far the clamped origin ended
/// up from the raw anchor so that [`Placer::track`] can follow camera moves
/// without re-running boundary correction. A placement is computed fresh on
/// every open and replaced wholesale, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner of the popup in screen space.
    pub origin: ScreenPoint,
    /// Distance from the popup's left edge to the tip graphic's left edge.
    pub tip_margin_left: f32,
    /// Horizontal delta between the clamped origin and the offset anchor.
    pub width_delta: f32,
    /// Vertical delta between the origin and the anchor (height + offset).
    pub height_delta: f32,
}

/// Computes popup placements against a viewport.
///
/// The margin and tip width default to [`DEFAULT_MARGIN_HORIZONTAL`] and
/// [`DEFAULT_TIP_WIDTH`]; embedders whose popup assets differ can override
/// both.
///
/// # Example
///
/// ```
/// use infowin::placer::Placer;
/// use infowin_core::geometry::{Offset, ScreenPoint, Size, Viewport};
///
/// let placer = Placer::new().tip_width(24.0);
/// let placement = placer
///     .place(
///         ScreenPoint::new(100.0, 100.0),
///         Size::new(40.0, 20.0),
///         Offset::ZERO,
///         Viewport::from_size(320.0, 240.0),
///         true,
///     )
///     .unwrap();
/// assert_eq!(placement.origin, ScreenPoint::new(80.0, 80.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Placer {
    margin_horizontal: f32,
    tip_width: f32,
}

impl Default for Placer {
    fn default() -> Self {
        Self::new()
    }
}

impl Placer {
    /// Create a placer with the default margin and tip width.
    pub const fn new() -> Self {
        Self {
            margin_horizontal: DEFAULT_MARGIN_HORIZONTAL,
            tip_width: DEFAULT_TIP_WIDTH,
        }
    }

    /// Set the minimum gap kept between a shifted popup and the viewport edge.
    pub const fn margin_horizontal(mut self, margin: f32) -> Self {
        self.margin_horizontal = margin;
        self
    }

    /// Set the width of the tip graphic.
    pub const fn tip_width(mut self, width: f32) -> Self {
        self.tip_width = width;
        self
    }

    /// Compute a popup placement for the given anchor.
    ///
    /// The popup is centered above `anchor` and biased by `offset`. When
    /// `has_tip` is set and the anchor is visible, the origin is clamped to
    /// the viewport with the tip margin compensated so the tip still points
    /// at the anchor. Non-tip popups get no boundary correction.
    ///
    /// Corrections run in a fixed order (right overflow, left overflow,
    /// right margin, left margin) and are not re-validated against each
    /// other: a popup wider than the viewport minus margins may still end
    /// up overflowing. That is a best-effort result, not an error.
    pub fn place(
        &self,
        anchor: ScreenPoint,
        size: Size,
        offset: Offset,
        viewport: Viewport,
        has_tip: bool,
    ) -> Result<Placement, PlaceError> {
        if size.is_empty() {
            return Err(PlaceError::EmptySize(size));
        }

        let mut x = anchor.x - size.width / 2.0 + offset.dx;
        let y = anchor.y - size.height + offset.dy;
        let height_delta = -size.height + offset.dy;

        if !has_tip {
            return Ok(Placement {
                origin: ScreenPoint::new(x, y),
                tip_margin_left: size.width / 2.0,
                width_delta: x - anchor.x - offset.dx,
                height_delta,
            });
        }

        let tip_half = self.tip_width / 2.0;
        let mut tip_margin_left = size.width / 2.0 - tip_half;

        // An empty viewport means nothing is visible; skip correction the
        // same way an off-screen anchor does.
        if !viewport.is_empty() && viewport.contains_anchor(anchor) {
            if size.width > viewport.width() {
                infowin_core::debug!(
                    width = size.width,
                    viewport_width = viewport.width(),
                    "popup wider than viewport, placement is best-effort"
                );
            }

            let mut right_edge = x + size.width;
            let mut left_edge = x;
            let mut out_of_bounds_right = false;
            let mut out_of_bounds_left = false;

            // Right overflow. Boundary equality is not overflow.
            if right_edge > viewport.right {
                let over = right_edge - viewport.right;
                out_of_bounds_right = true;
                x -= over;
                tip_margin_left += over + tip_half;
                right_edge = x + size.width;
            }

            // Left overflow.
            if left_edge < viewport.left {
                let over = viewport.left - left_edge;
                out_of_bounds_left = true;
                x += over;
                tip_margin_left -= over + tip_half;
                left_edge = x;
            }

            // Right margin: only after a right shift, keep a gap to the edge.
            if out_of_bounds_right && viewport.right - right_edge < self.margin_horizontal {
                let shortfall = self.margin_horizontal - (viewport.right - right_edge);
                x -= shortfall;
                tip_margin_left += shortfall - tip_half;
                left_edge = x;
            }

            // Left margin, symmetric.
            if out_of_bounds_left && left_edge - viewport.left < self.margin_horizontal {
                let shortfall = self.margin_horizontal - (left_edge - viewport.left);
                x += shortfall;
                tip_margin_left -= shortfall - tip_half;
            }
        }

        Ok(Placement {
            origin: ScreenPoint::new(x, y),
            tip_margin_left,
            width_delta: x - anchor.x - offset.dx,
            height_delta,
        })
    }

    /// Re-track a previously placed popup after the anchor moved on screen.
    ///
    /// Reuses the clamp decision cached in `previous` instead of re-running
    /// boundary correction, so it is cheap enough to call every frame. With
    /// an unmoved anchor this reproduces the placed origin.
    pub fn track(
        &self,
        anchor: ScreenPoint,
        size: Size,
        previous: &Placement,
        offset: Offset,
        has_tip: bool,
    ) -> ScreenPoint {
        let x = if has_tip {
            anchor.x + previous.width_delta + offset.dx
        } else {
            anchor.x - size.width / 2.0 + offset.dx
        };
        ScreenPoint::new(x, anchor.y + previous.height_delta)
    }
}
