use crate::geometry::{Polar, Rect, normalize_angle};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

/// Invoked with the item's id when the item is committed.
pub type ItemAction = Box<dyn FnMut(&ItemId)>;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("sweep must be a positive finite angle, got {0}")]
    InvalidSweep(f64),
    #[error("center angle must be finite, got {0}")]
    InvalidCenter(f64),
}

/// Address of an item in a menu that nests at most one level deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemPath {
    pub top: usize,
    pub child: Option<usize>,
}

impl ItemPath {
    pub fn top(index: usize) -> Self {
        Self {
            top: index,
            child: None,
        }
    }

    pub fn child(top: usize, child: usize) -> Self {
        Self {
            top,
            child: Some(child),
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.child.is_none()
    }
}

/// Angular position requested by the item instead of an auto-assigned one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeometry {
    pub center: f64,
    pub sweep: f64,
}

/// Computed by layout: the slice `[start, start + sweep)` between `inner` and
/// `outer`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemGeometry {
    pub start: f64,
    pub sweep: f64,
    pub inner: f64,
    pub outer: f64,
}

/// Outline shared by all slices of one level, drawn rotated to each start
/// angle. `gap` is trimmed from both angular edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceShape {
    pub sweep: f64,
    pub inner: f64,
    pub outer: f64,
    pub gap: f64,
}

pub struct PieItem {
    id: ItemId,
    label: Option<String>,
    enabled: bool,
    selected: bool,
    width: f64,
    height: f64,
    fixed: Option<FixedGeometry>,
    geometry: ItemGeometry,
    bounds: Rect,
    slice: Option<SliceShape>,
    action: Option<ItemAction>,
    children: Vec<PieItem>,
}

impl fmt::Debug for PieItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieItem")
            .field("id", &self.id)
            .field("enabled", &self.enabled)
            .field("selected", &self.selected)
            .field("geometry", &self.geometry)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl PieItem {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            enabled: true,
            selected: false,
            width: 0.0,
            height: 0.0,
            fixed: None,
            geometry: ItemGeometry::default(),
            bounds: Rect::default(),
            slice: None,
            action: None,
            children: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Pins the item at `center` radians, wrapped into `[0, 2π)`, with the
    /// given sweep.
    pub fn with_fixed_geometry(mut self, center: f64, sweep: f64) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::InvalidCenter(center));
        }
        if !(sweep.is_finite() && sweep > 0.0) {
            return Err(GeometryError::InvalidSweep(sweep));
        }
        self.fixed = Some(FixedGeometry {
            center: normalize_angle(center),
            sweep,
        });
        Ok(self)
    }

    pub fn with_action(mut self, action: impl FnMut(&ItemId) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn with_child(mut self, child: PieItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PieItem>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn fixed(&self) -> Option<FixedGeometry> {
        self.fixed
    }

    pub fn geometry(&self) -> &ItemGeometry {
        &self.geometry
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn slice(&self) -> Option<&SliceShape> {
        self.slice.as_ref()
    }

    pub fn has_items(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn children(&self) -> &[PieItem] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [PieItem] {
        &mut self.children
    }

    /// Runs the action, if any. Returns whether one ran.
    pub fn perform_click(&mut self) -> bool {
        match self.action.as_mut() {
            Some(action) => {
                action(&self.id);
                true
            }
            None => false,
        }
    }

    /// Whether `polar` falls on this slice. The angle test is taken modulo
    /// 2π, so slices straddling 0 rad hit on both sides. The outer bound only
    /// applies outside tap mode.
    pub fn contains(&self, polar: Polar, tap_mode: bool) -> bool {
        let g = &self.geometry;
        g.inner < polar.radius
            && normalize_angle(polar.angle - g.start) < g.sweep
            && (tap_mode || polar.radius <= g.outer)
    }

    pub(crate) fn place(&mut self, geometry: ItemGeometry, bounds: Rect, slice: SliceShape) {
        self.geometry = geometry;
        self.bounds = bounds;
        self.slice = Some(slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    fn placed(start: f64, sweep: f64) -> PieItem {
        let mut item = PieItem::new("x");
        item.place(
            ItemGeometry {
                start,
                sweep,
                inner: 50.0,
                outer: 100.0,
            },
            Rect::default(),
            SliceShape {
                sweep,
                inner: 50.0,
                outer: 100.0,
                gap: 0.0,
            },
        );
        item
    }

    #[test]
    fn contains_uses_half_open_angle_range() {
        let item = placed(1.0, 0.5);
        assert!(item.contains(Polar::new(1.0, 75.0), false));
        assert!(item.contains(Polar::new(1.49, 75.0), false));
        assert!(!item.contains(Polar::new(1.5, 75.0), false));
        assert!(!item.contains(Polar::new(0.99, 75.0), false));
    }

    #[test]
    fn slice_straddling_zero_hits_on_both_sides() {
        let below = placed(-0.2, 0.5);
        assert!(below.contains(Polar::new(0.1, 75.0), false));
        assert!(below.contains(Polar::new(TAU - 0.05, 75.0), false));
        assert!(!below.contains(Polar::new(TAU - 0.25, 75.0), false));
        assert!(!below.contains(Polar::new(0.35, 75.0), false));

        let past = placed(TAU - 0.1, 0.5);
        assert!(past.contains(Polar::new(TAU - 0.05, 75.0), false));
        assert!(past.contains(Polar::new(0.35, 75.0), false));
        assert!(!past.contains(Polar::new(0.45, 75.0), false));
    }

    #[test]
    fn inner_radius_is_exclusive() {
        let item = placed(1.0, 0.5);
        assert!(!item.contains(Polar::new(1.2, 50.0), false));
        assert!(item.contains(Polar::new(1.2, 50.01), false));
    }

    #[test]
    fn outer_radius_bounds_only_outside_tap_mode() {
        let item = placed(1.0, 0.5);
        assert!(item.contains(Polar::new(1.2, 100.0), false));
        assert!(!item.contains(Polar::new(1.2, 140.0), false));
        assert!(item.contains(Polar::new(1.2, 140.0), true));
    }

    #[test]
    fn fixed_geometry_is_validated() {
        assert!(PieItem::new("a").with_fixed_geometry(0.5, 0.3).is_ok());
        assert!(matches!(
            PieItem::new("a").with_fixed_geometry(f64::INFINITY, 0.3),
            Err(GeometryError::InvalidCenter(_))
        ));
        assert_eq!(
            PieItem::new("a").with_fixed_geometry(0.5, 0.0).err(),
            Some(GeometryError::InvalidSweep(0.0))
        );
        assert!(matches!(
            PieItem::new("a").with_fixed_geometry(0.5, f64::NAN),
            Err(GeometryError::InvalidSweep(_))
        ));
    }

    #[test]
    fn fixed_center_wraps_into_one_turn() {
        let wrapped = PieItem::new("a").with_fixed_geometry(7.0, 0.3).unwrap();
        assert!((wrapped.fixed().unwrap().center - (7.0 - TAU)).abs() < 1e-12);

        let negative = PieItem::new("b").with_fixed_geometry(-1.0, 0.3).unwrap();
        assert!((negative.fixed().unwrap().center - (TAU - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn perform_click_passes_own_id() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut item = PieItem::new("flash").with_action(move |id| sink.borrow_mut().push(id.clone()));

        assert!(item.perform_click());
        assert!(!PieItem::new("bare").perform_click());
        assert_eq!(*seen.borrow(), vec![ItemId::from("flash")]);
    }
}
