//! Drawing seam between the overlay and whatever renders it.

use crate::geometry::Point;
use crate::item::{PieItem, SliceShape};

/// Semantic paint; the host maps it to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Normal,
    Selected,
    Focus,
    Success,
    Fail,
}

/// Annular sector in counter-clockwise radians (y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub start: f64,
    pub sweep: f64,
    pub inner: f64,
    pub outer: f64,
}

impl Sector {
    /// `slice` rotated to `start`, trimmed by its gap on both edges. A slice
    /// narrower than both gaps collapses to zero sweep at its middle.
    pub fn from_slice(center: Point, start: f64, slice: &SliceShape) -> Self {
        let sweep = (slice.sweep - 2.0 * slice.gap).max(0.0);
        Self {
            center,
            start: start + (slice.sweep - sweep) / 2.0,
            sweep,
            inner: slice.inner,
            outer: slice.outer,
        }
    }
}

/// How to composite an item's view: opacity, and a scale around `pivot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub alpha: f64,
    pub scale: f64,
    pub pivot: Point,
}

/// Arc angles are clockwise screen degrees from 3 o'clock.
pub trait Canvas {
    type Error;

    /// Starts an offscreen group, composited by [`Canvas::pop_layer`].
    fn push_layer(&mut self) -> Result<(), Self::Error>;
    fn pop_layer(&mut self, alpha: f64) -> Result<(), Self::Error>;

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        paint: Paint,
    ) -> Result<(), Self::Error>;

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        width: f64,
        paint: Paint,
    ) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, width: f64, paint: Paint)
    -> Result<(), Self::Error>;

    fn fill_slice(&mut self, sector: &Sector, paint: Paint, alpha: f64) -> Result<(), Self::Error>;

    /// Draws the item's own view inside `item.bounds()`.
    fn item_view(&mut self, item: &PieItem, transform: ViewTransform) -> Result<(), Self::Error>;
}
