use crate::canvas::Paint;
use std::time::Duration;

pub mod angles;
pub mod model;
pub(crate) mod view;

pub use angles::{AngleSource, FixedAngles, RandomAngles};
pub use model::{FocusEnd, FocusRing};

pub const SCALING_UP_DURATION: Duration = Duration::from_millis(1000);
pub const SCALING_DOWN_DURATION: Duration = Duration::from_millis(200);
/// Delay between the end of a finishing animation and the ring hiding.
pub const DISAPPEAR_TIMEOUT: Duration = Duration::from_millis(200);
/// Resting angle of the dial, in clockwise screen degrees.
pub const DIAL_HORIZONTAL: i32 = 157;
pub const MAX_CIRCLE_SIZE: f64 = 200.0;
pub const START_ANGLE_RANGE: i32 = 90;
pub const SWEEP_RANGE: i32 = 120;
const DIAL_ARC_DEG: f64 = 45.0;

/// Color state of the dial arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialTint {
    #[default]
    Neutral,
    Success,
    Fail,
}

impl DialTint {
    pub fn paint(self) -> Paint {
        match self {
            Self::Neutral => Paint::Focus,
            Self::Success => Paint::Success,
            Self::Fail => Paint::Fail,
        }
    }
}
