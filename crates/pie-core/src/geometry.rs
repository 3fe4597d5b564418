use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::{FRAC_PI_2, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point relative to a center: `angle` counter-clockwise from 3 o'clock in
/// `[0, 2π)` with the screen y axis flipped, `radius` in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    pub angle: f64,
    pub radius: f64,
}

impl Polar {
    pub fn new(angle: f64, radius: f64) -> Self {
        Self { angle, radius }
    }

    pub fn from_point(center: Point, point: Point) -> Self {
        let dx = point.x - center.x;
        let dy = center.y - point.y;
        let angle = if dx == 0.0 && dy == 0.0 {
            FRAC_PI_2
        } else {
            normalize_angle(dy.atan2(dx))
        };
        Self {
            angle,
            radius: dx.hypot(dy),
        }
    }

    pub fn to_point(self, center: Point) -> Point {
        Point::new(
            center.x + self.radius * self.angle.cos(),
            center.y - self.radius * self.angle.sin(),
        )
    }
}

/// Wraps any angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Counter-clockwise radians to clockwise screen degrees, the convention of
/// arc-drawing APIs with a downward y axis.
pub fn screen_degrees(angle: f64) -> f64 {
    360.0 - angle.to_degrees()
}

/// Integer-rounded offset of a clockwise screen angle at `radius`.
pub fn cartesian_offset(angle_deg: i32, radius: f64) -> Point {
    let a = f64::from(angle_deg % 360).to_radians();
    Point::new(
        (radius * a.cos() + 0.5).trunc(),
        (radius * a.sin() + 0.5).trunc(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn around(center: Point, half: f64) -> Self {
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn inset(&self, by: f64) -> Self {
        Self::new(
            self.left + by,
            self.top + by,
            self.right - by,
            self.bottom - by,
        )
    }
}

/// Device rotation relative to the natural orientation of the surface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Rotation {
    #[default]
    #[strum(to_string = "0", serialize = "portrait")]
    Deg0,
    #[strum(to_string = "90", serialize = "landscape")]
    Deg90,
    #[strum(to_string = "180", serialize = "reverse-portrait")]
    Deg180,
    #[strum(to_string = "270", serialize = "reverse-landscape")]
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Maps a touch point into display space for a `width` x `height` surface.
    pub fn remap(self, point: Point, width: f64, height: f64) -> Point {
        match self {
            Self::Deg0 => point,
            Self::Deg90 => Point::new(width - point.y, point.x),
            Self::Deg180 => Point::new(width - point.x, height - point.y),
            Self::Deg270 => Point::new(point.y, height - point.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn polar_round_trip_reproduces_point() {
        let center = Point::new(240.0, 400.0);
        let points = [
            Point::new(300.0, 400.0),
            Point::new(100.0, 20.0),
            Point::new(240.0, 999.0),
            Point::new(239.5, 400.25),
            Point::new(-50.0, 700.0),
        ];

        for p in points {
            let back = Polar::from_point(center, p).to_point(center);
            assert!((back.x - p.x).abs() < EPS, "{p:?} -> {back:?}");
            assert!((back.y - p.y).abs() < EPS, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn angles_follow_inverted_y_axis() {
        let c = Point::new(100.0, 100.0);
        let cases = [
            (Point::new(150.0, 100.0), 0.0),
            (Point::new(100.0, 50.0), PI / 2.0),
            (Point::new(50.0, 100.0), PI),
            (Point::new(100.0, 150.0), 3.0 * PI / 2.0),
        ];

        for (p, expected) in cases {
            let polar = Polar::from_point(c, p);
            assert!((polar.angle - expected).abs() < EPS, "{p:?}: {}", polar.angle);
            assert!((polar.radius - 50.0).abs() < EPS);
        }
    }

    #[test]
    fn angle_always_in_half_open_range() {
        let c = Point::new(0.0, 0.0);
        for i in 0..720 {
            let a = (i as f64).to_radians() / 2.0;
            let p = Point::new(10.0 * a.cos(), -10.0 * a.sin());
            let polar = Polar::from_point(c, p);
            assert!((0.0..TAU).contains(&polar.angle), "{}", polar.angle);
        }
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < EPS);
    }

    #[test]
    fn center_point_has_zero_radius() {
        let c = Point::new(5.0, 5.0);
        let polar = Polar::from_point(c, c);
        assert_eq!(polar.radius, 0.0);
        assert_eq!(polar.angle, FRAC_PI_2);
    }

    #[test]
    fn screen_degrees_flip_direction() {
        assert_eq!(screen_degrees(0.0), 360.0);
        assert!((screen_degrees(PI / 2.0) - 270.0).abs() < EPS);
    }

    #[test]
    fn cartesian_offset_rounds_like_pixels() {
        assert_eq!(cartesian_offset(0, 10.0), Point::new(10.0, 0.0));
        assert_eq!(cartesian_offset(90, 10.0), Point::new(0.0, 10.0));
        assert_eq!(cartesian_offset(450, 10.0), Point::new(0.0, 10.0));
    }

    #[test]
    fn rotation_remaps_into_display_space() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(Rotation::Deg0.remap(p, 100.0, 200.0), p);
        assert_eq!(Rotation::Deg90.remap(p, 100.0, 200.0), Point::new(80.0, 10.0));
        assert_eq!(
            Rotation::Deg180.remap(p, 100.0, 200.0),
            Point::new(90.0, 180.0)
        );
        assert_eq!(
            Rotation::Deg270.remap(p, 100.0, 200.0),
            Point::new(20.0, 190.0)
        );
    }

    #[test]
    fn rotation_parses_degrees_and_names() {
        let cases = vec![
            ("\"0\"", Rotation::Deg0),
            ("\"Portrait\"", Rotation::Deg0),
            ("\"90\"", Rotation::Deg90),
            ("\"LANDSCAPE\"", Rotation::Deg90),
            ("\"180\"", Rotation::Deg180),
            ("\"reverse-landscape\"", Rotation::Deg270),
        ];

        for (json, expected) in cases {
            let deserialized: Rotation = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(serde_json::to_string(&Rotation::Deg180).unwrap(), "\"180\"");
    }
}
