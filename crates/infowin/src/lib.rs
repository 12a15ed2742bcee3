#![forbid(unsafe_code)]

//! Map-anchored popup ("info window") placement and lifecycle.
//!
//! Two pieces:
//!
//! - [`placer::Placer`] — pure screen-space geometry: center a measured
//!   popup above a projected anchor, clamp it to the viewport, and keep
//!   the tip graphic pointing at the anchor after clamping.
//! - [`popup::Popup`] — the single-open-popup lifecycle: open, close,
//!   and per-frame re-tracking, with weak bindings to the host view
//!   system's view, container, and anchor entities.
//!
//! The map projection, view measurement, and event dispatch stay with the
//! embedding map/view system; they plug in through the traits in
//! [`popup`].

pub mod content;
pub mod placer;
pub mod popup;

pub use content::PopupContent;
pub use placer::{PlaceError, Placement, Placer};
pub use popup::{Anchor, Container, Popup, PopupError, PopupObserver, PopupState, PopupView, Projector};

// Geometry primitives, re-exported for convenience.
pub use infowin_core::geometry::{GeoPoint, Offset, ScreenPoint, Size, Viewport};
