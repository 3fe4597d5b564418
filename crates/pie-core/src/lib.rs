//! Headless core of the viewfinder overlay: a radial touch menu and an
//! autofocus ring that share one center point.
//!
//! Nothing here draws or dispatches input on its own. A host feeds
//! [`TouchEvent`]s and focus signals into an [`Overlay`], pumps it with
//! [`Overlay::tick`] and renders it through a [`Canvas`].

pub mod macros;

pub mod animation;
pub mod canvas;
pub mod clock;
pub mod focus;
pub mod geometry;
pub mod item;
pub mod menu;
pub mod overlay;
pub mod scheduler;
pub mod stage;

pub use canvas::{Canvas, Paint, Sector, ViewTransform};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use focus::{AngleSource, DialTint, FixedAngles, FocusRing, RandomAngles};
pub use geometry::{Point, Polar, Rect, Rotation};
pub use item::{GeometryError, ItemId, ItemPath, PieItem};
pub use menu::{PieMenu, TouchAction, TouchEvent};
pub use overlay::{Overlay, PieListener};
pub use stage::{Dimensions, Phase, Stage};
