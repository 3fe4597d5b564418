use crate::geometry::{Point, Polar, Rotation};
use serde::{Deserialize, Serialize};
use strum::Display as StrumDisplay;

/// Shared visual phase of the overlay. The focus ring moves through the first
/// three; `Pie` marks an open menu and is the only phase that draws slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum Phase {
    #[default]
    Idle,
    Focusing,
    Finishing,
    Pie,
}

/// Pixel sizes of the menu band and the focus ring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Dimensions {
    pub pie_radius_start: f64,
    pub pie_radius_increment: f64,
    pub pie_touch_offset: f64,
    pub focus_radius_offset: f64,
    pub focus_inner_offset: f64,
    pub focus_outer_stroke: f64,
    pub focus_inner_stroke: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            pie_radius_start: 80.0,
            pie_radius_increment: 48.0,
            pie_touch_offset: 20.0,
            focus_radius_offset: 8.0,
            focus_inner_offset: 12.0,
            focus_outer_stroke: 3.0,
            focus_inner_stroke: 2.0,
        }
    }
}

/// Geometry and phase shared by the menu and the focus ring. The overlay owns
/// the only instance and lends it to each component per call.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Center of the pie menu.
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub surface_center: Point,
    pub radius: f64,
    pub radius_increment: f64,
    pub touch_offset: f64,
    pub phase: Phase,
    pub visible: bool,
    /// Whole-overlay opacity, lowered by the select fade-out.
    pub alpha: f64,
    pub rotation: Rotation,
}

impl Stage {
    pub fn new(dimensions: &Dimensions) -> Self {
        Self {
            center: Point::default(),
            width: 0.0,
            height: 0.0,
            surface_center: Point::default(),
            radius: dimensions.pie_radius_start,
            radius_increment: dimensions.pie_radius_increment,
            touch_offset: dimensions.pie_touch_offset,
            phase: Phase::Idle,
            visible: false,
            alpha: 1.0,
            rotation: Rotation::Deg0,
        }
    }

    /// Polar form of `point` around the menu center. With `use_offset` the
    /// radius grows by the touch offset so slices register before the finger
    /// covers them.
    pub fn polar(&self, point: Point, use_offset: bool) -> Polar {
        let mut polar = Polar::from_point(self.center, point);
        if use_offset {
            polar.radius += self.touch_offset;
        }
        polar
    }

    pub fn apply_dimensions(&mut self, dimensions: &Dimensions) {
        self.radius = dimensions.pie_radius_start;
        self.radius_increment = dimensions.pie_radius_increment;
        self.touch_offset = dimensions.pie_touch_offset;
    }
}
