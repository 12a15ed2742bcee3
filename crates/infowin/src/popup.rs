#![forbid(unsafe_code)]

//! Popup lifecycle: at most one popup is open at a time.
//!
//! [`Popup`] owns the binding between an on-screen popup view and the map
//! entity it is anchored to. The view, the container, and the anchor all
//! belong to the surrounding map/view system; this module holds them as
//! weak references and treats a dead reference as "closed" rather than an
//! error. Everything runs synchronously on the thread that owns the view
//! tree; there are no locks and no internal suspension points.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use infowin_core::geometry::{GeoPoint, Offset, ScreenPoint, Size, Viewport};

use crate::content::PopupContent;
use crate::placer::{PlaceError, Placement, Placer};

/// A map entity a popup can be anchored to.
pub trait Anchor {
    /// Current geographic position of the entity.
    fn position(&self) -> GeoPoint;
}

/// Projects geographic positions to screen space for the current camera.
pub trait Projector {
    /// Project a geographic position to viewport-local screen coordinates.
    fn to_screen_location(&self, position: GeoPoint) -> ScreenPoint;
}

/// The rendered popup widget, measured and moved by the host view system.
pub trait PopupView {
    /// The measured footprint. Empty until layout has run.
    fn measured_size(&self) -> Size;

    /// Whether this view renders a directional tip graphic.
    fn has_tip(&self) -> bool;

    /// Move the view's top-left corner.
    fn set_origin(&mut self, origin: ScreenPoint);

    /// Position the tip graphic within the view. Only called for tip views.
    fn set_tip_margin_left(&mut self, margin: f32);

    /// Replace the displayed title/snippet. Views without default content
    /// can ignore this.
    fn set_content(&mut self, content: &PopupContent) {
        let _ = content;
    }
}

/// The surface the popup view is attached to while open.
pub trait Container {
    /// Attach the popup view at the given origin.
    fn add_child(&mut self, origin: ScreenPoint);

    /// Detach the popup view.
    fn remove_child(&mut self);
}

/// Synchronous notifications from the popup lifecycle.
///
/// All methods default to doing nothing so observers only implement what
/// they care about. `on_tap` returns whether the tap was handled; an
/// unhandled tap closes the popup.
pub trait PopupObserver<A> {
    /// The popup closed while `anchor` was bound to it.
    fn on_close(&mut self, anchor: &A) {
        let _ = anchor;
    }

    /// The popup was tapped. Return `true` to suppress the default
    /// close-on-tap behavior.
    fn on_tap(&mut self, anchor: &A) -> bool {
        let _ = anchor;
        false
    }

    /// The popup was long-pressed.
    fn on_long_press(&mut self, anchor: &A) {
        let _ = anchor;
    }
}

/// Error from [`Popup::open`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupError {
    /// The view reported an empty size; open was called before layout
    /// measured it. Fix the call order, do not retry as-is.
    Unmeasured(Size),
}

impl fmt::Display for PopupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmeasured(size) => write!(
                f,
                "popup view is unmeasured ({}x{}); open() requires a laid-out view",
                size.width, size.height
            ),
        }
    }
}

impl std::error::Error for PopupError {}

impl From<PlaceError> for PopupError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::EmptySize(size) => Self::Unmeasured(size),
        }
    }
}

/// Lifecycle state of a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    /// Not attached, nothing bound.
    #[default]
    Closed,
    /// Attached to the container and bound to an anchor.
    Open,
}

/// A single popup bound to at most one anchor.
///
/// Opening while already open first closes the previous binding, so the
/// close notification for the old anchor fires exactly once before the new
/// one takes effect.
pub struct Popup<A, V, C> {
    placer: Placer,
    view: Weak<RefCell<V>>,
    container: Weak<RefCell<C>>,
    bound: Weak<A>,
    placement: Option<Placement>,
    offset: Offset,
    state: PopupState,
    observer: Option<Box<dyn PopupObserver<A>>>,
}

impl<A, V, C> fmt::Debug for Popup<A, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popup")
            .field("state", &self.state)
            .field("placement", &self.placement)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl<A, V, C> Popup<A, V, C>
where
    A: Anchor,
    V: PopupView,
    C: Container,
{
    /// Create a closed popup for a view living in the given container.
    ///
    /// Both references are held weakly; the host view system keeps
    /// ownership and may drop either at any time.
    pub fn new(view: &Rc<RefCell<V>>, container: &Rc<RefCell<C>>) -> Self {
        Self {
            placer: Placer::new(),
            view: Rc::downgrade(view),
            container: Rc::downgrade(container),
            bound: Weak::new(),
            placement: None,
            offset: Offset::ZERO,
            state: PopupState::Closed,
            observer: None,
        }
    }

    /// Replace the placer, e.g. to change margin or tip width.
    pub fn placer(mut self, placer: Placer) -> Self {
        self.placer = placer;
        self
    }

    /// Install the lifecycle observer.
    pub fn set_observer(&mut self, observer: Box<dyn PopupObserver<A>>) {
        self.observer = Some(observer);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Whether the popup is currently open.
    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    /// The bound anchor, if open and still alive.
    pub fn bound_anchor(&self) -> Option<Rc<A>> {
        self.bound.upgrade()
    }

    /// The placement computed at open time, if open.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Open the popup above `anchor`.
    ///
    /// If already open, the previous binding is closed first. A dead view
    /// or container reference makes this a no-op. Returns
    /// [`PopupError::Unmeasured`] when the view has no size yet.
    pub fn open(
        &mut self,
        anchor: &Rc<A>,
        projector: &impl Projector,
        viewport: Viewport,
        offset: Offset,
    ) -> Result<(), PopupError> {
        if self.state == PopupState::Open {
            self.close();
        }

        let (Some(view), Some(container)) = (self.view.upgrade(), self.container.upgrade())
        else {
            return Ok(());
        };

        let (size, has_tip) = {
            let view = view.borrow();
            (view.measured_size(), view.has_tip())
        };
        let anchor_screen = projector.to_screen_location(anchor.position());
        let placement = self
            .placer
            .place(anchor_screen, size, offset, viewport, has_tip)?;

        {
            let mut view = view.borrow_mut();
            if has_tip {
                view.set_tip_margin_left(placement.tip_margin_left);
            }
            view.set_origin(placement.origin);
        }
        container.borrow_mut().add_child(placement.origin);

        infowin_core::trace!(x = placement.origin.x, y = placement.origin.y, "popup opened");

        self.bound = Rc::downgrade(anchor);
        self.placement = Some(placement);
        self.offset = offset;
        self.state = PopupState::Open;
        Ok(())
    }

    /// Close the popup. Does nothing when already closed.
    ///
    /// Detaches the view, notifies the observer with the bound anchor (if
    /// it is still alive), and clears the binding.
    pub fn close(&mut self) {
        if self.state == PopupState::Closed {
            return;
        }

        if let Some(container) = self.container.upgrade() {
            container.borrow_mut().remove_child();
        }

        let bound = self.bound.upgrade();
        if let (Some(observer), Some(anchor)) = (self.observer.as_mut(), bound.as_ref()) {
            observer.on_close(anchor);
        }

        infowin_core::trace!("popup closed");

        self.bound = Weak::new();
        self.placement = None;
        self.state = PopupState::Closed;
    }

    /// Re-track the anchor after a camera move.
    ///
    /// Reprojects the bound anchor and repositions the view using the
    /// clamp decision cached at open time. No-op when closed or when any
    /// collaborator has gone away.
    pub fn update(&mut self, projector: &impl Projector) {
        if self.state == PopupState::Closed {
            return;
        }
        let (Some(anchor), Some(view), Some(placement)) =
            (self.bound.upgrade(), self.view.upgrade(), self.placement)
        else {
            return;
        };

        let anchor_screen = projector.to_screen_location(anchor.position());
        let mut view = view.borrow_mut();
        let origin = self.placer.track(
            anchor_screen,
            view.measured_size(),
            &placement,
            self.offset,
            view.has_tip(),
        );
        view.set_origin(origin);
    }

    /// Push new title/snippet text into the view, if it is still alive.
    pub fn set_content(&mut self, content: &PopupContent) {
        if let Some(view) = self.view.upgrade() {
            view.borrow_mut().set_content(content);
        }
    }

    /// Handle a tap on the popup.
    ///
    /// The observer sees it first; an unhandled tap closes the popup
    /// (the default behavior users expect from a tooltip).
    pub fn handle_tap(&mut self) {
        if self.state == PopupState::Closed {
            return;
        }
        let bound = self.bound.upgrade();
        let handled = match (self.observer.as_mut(), bound.as_ref()) {
            (Some(observer), Some(anchor)) => observer.on_tap(anchor),
            _ => false,
        };
        if !handled {
            self.close();
        }
    }

    /// Handle a long press on the popup. Forwarded to the observer only.
    pub fn handle_long_press(&mut self) {
        if self.state == PopupState::Closed {
            return;
        }
        let bound = self.bound.upgrade();
        if let (Some(observer), Some(anchor)) = (self.observer.as_mut(), bound.as_ref()) {
            observer.on_long_press(anchor);
        }
    }
}
