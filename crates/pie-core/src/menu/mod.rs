use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Duration;

pub mod model;
pub mod touch;
pub(crate) mod view;

pub use model::PieMenu;
pub use touch::{MenuCommand, TouchAction, TouchEvent, TouchResponse};

/// Total angle covered by one level of slices.
pub const PIE_SWEEP: f64 = 2.0 * PI / 3.0;
/// Left empty at each end of a level.
pub const EMPTY_ANGLE: f64 = PIE_SWEEP / 16.0;
/// The top level opens straight up.
pub const CENTER_ANGLE: f64 = FRAC_PI_2;
pub const RADIUS_GAP: f64 = 2.0;
pub const SLICE_GAP_DEG: f64 = 1.0;
pub const PIE_FADE_IN_DURATION: Duration = Duration::from_millis(200);
pub const PIE_XFADE_DURATION: Duration = Duration::from_millis(200);
pub const PIE_SELECT_FADE_DURATION: Duration = Duration::from_millis(300);
