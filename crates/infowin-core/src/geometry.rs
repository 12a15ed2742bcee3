#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Screen quantities are `f32` pixels with the origin at the map surface's
//! top-left corner; geographic positions are `f64` degrees.

/// A point in screen space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
}

impl ScreenPoint {
    /// The origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new screen point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A measured footprint in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether either dimension is zero or negative.
    ///
    /// An unmeasured view reports an empty size; placement must reject it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A pixel bias between an anchor and the popup's reference corner.
///
/// Positive `dy` moves the popup down; callers typically pass a negative
/// `dy` to raise the popup above a marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    /// Horizontal bias in pixels.
    pub dx: f32,
    /// Vertical bias in pixels.
    pub dy: f32,
}

impl Offset {
    /// No bias.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// The visible pixel bounds of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Left edge in pixels.
    pub left: f32,
    /// Top edge in pixels.
    pub top: f32,
    /// Right edge in pixels.
    pub right: f32,
    /// Bottom edge in pixels.
    pub bottom: f32,
}

impl Viewport {
    /// Create a new viewport from explicit edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a viewport anchored at the origin with the given dimensions.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if the viewport has zero (or inverted) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check whether an anchor point is visible on the map surface.
    ///
    /// The check runs in viewport-local coordinates, both ends inclusive:
    /// a point exactly on the far edge still counts as visible.
    #[inline]
    pub fn contains_anchor(&self, point: ScreenPoint) -> bool {
        point.x >= 0.0 && point.x <= self.width() && point.y >= 0.0 && point.y <= self.height()
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic position.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
