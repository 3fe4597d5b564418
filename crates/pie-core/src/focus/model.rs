use super::{
    AngleSource, DIAL_HORIZONTAL, DialTint, MAX_CIRCLE_SIZE, SCALING_DOWN_DURATION,
    SCALING_UP_DURATION,
};
use crate::animation::{Animation, Progress};
use crate::geometry::{Point, Rect};
use crate::stage::{Dimensions, Phase, Stage};
use std::time::Duration;

/// End action of the dial animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEnd {
    /// Hide the ring after the disappear timeout.
    ScheduleDisappear,
}

/// Autofocus indicator: a circle with two dial arcs that turn while the
/// camera focuses and settle back once it reports a result.
#[derive(Debug)]
pub struct FocusRing {
    animation: Animation<FocusEnd>,
    /// Clockwise screen degrees.
    dial_angle: i32,
    start_animation_angle: i32,
    focused: bool,
    blocked: bool,
    focus: Point,
    circle_size: f64,
    circle: Rect,
    dial: Rect,
    radius_offset: f64,
    inner_offset: f64,
    outer_stroke: f64,
    inner_stroke: f64,
}

impl FocusRing {
    pub fn new(dimensions: &Dimensions) -> Self {
        let mut ring = Self {
            animation: Animation::new(f64::from(DIAL_HORIZONTAL)),
            dial_angle: DIAL_HORIZONTAL,
            start_animation_angle: 0,
            focused: false,
            blocked: false,
            focus: Point::default(),
            circle_size: 0.0,
            circle: Rect::default(),
            dial: Rect::default(),
            radius_offset: 0.0,
            inner_offset: 0.0,
            outer_stroke: 0.0,
            inner_stroke: 0.0,
        };
        ring.apply_dimensions(dimensions);
        ring
    }

    pub fn apply_dimensions(&mut self, dimensions: &Dimensions) {
        self.radius_offset = dimensions.focus_radius_offset;
        self.inner_offset = dimensions.focus_inner_offset;
        self.outer_stroke = dimensions.focus_outer_stroke;
        self.inner_stroke = dimensions.focus_inner_stroke;
        self.circle_size = dimensions.pie_radius_start - dimensions.focus_radius_offset;
        self.set_circle();
    }

    /// Sizes the ring for a `width` x `height` surface and parks it on the
    /// surface center.
    pub fn layout(&mut self, stage: &Stage) {
        self.circle_size = MAX_CIRCLE_SIZE.min(stage.width.min(stage.height) / 5.0);
        self.focus = stage.surface_center;
        self.set_circle();
    }

    fn set_circle(&mut self) {
        self.circle = Rect::around(self.focus, self.circle_size);
        self.dial = self.circle.inset(self.inner_offset);
    }

    /// Parks the dial at rest on `point`, dropping any running animation.
    pub fn align(&mut self, point: Point) {
        self.animation.cancel();
        self.animation.reset();
        self.focus = point;
        self.dial_angle = DIAL_HORIZONTAL;
        self.set_circle();
        self.focused = false;
    }

    /// Moves the ring without touching its animation.
    pub fn move_to(&mut self, point: Point) {
        self.focus = point;
        self.set_circle();
    }

    /// Starts the focusing sweep. Only valid while idle.
    pub fn show_start(
        &mut self,
        stage: &mut Stage,
        angles: &mut dyn AngleSource,
        now: Duration,
    ) -> bool {
        if stage.phase != Phase::Idle {
            log::debug!("focus start ignored in {} phase", stage.phase);
            return false;
        }
        let angle = angles.start_angle();
        let range = angles.range();
        self.start_animation(
            stage,
            now,
            SCALING_UP_DURATION,
            f64::from(angle),
            f64::from(angle + range),
            None,
        );
        stage.phase = Phase::Focusing;
        self.start_animation_angle = angle;
        true
    }

    pub fn show_success(&mut self, stage: &mut Stage, timeout: bool, now: Duration) -> bool {
        self.finish(stage, timeout, now, true)
    }

    pub fn show_fail(&mut self, stage: &mut Stage, timeout: bool, now: Duration) -> bool {
        self.finish(stage, timeout, now, false)
    }

    fn finish(&mut self, stage: &mut Stage, timeout: bool, now: Duration, focused: bool) -> bool {
        if stage.phase != Phase::Focusing {
            log::debug!("focus result ignored in {} phase", stage.phase);
            return false;
        }
        let end = timeout.then_some(FocusEnd::ScheduleDisappear);
        self.start_animation(
            stage,
            now,
            SCALING_DOWN_DURATION,
            f64::from(self.dial_angle),
            f64::from(self.start_animation_angle),
            end,
        );
        stage.phase = Phase::Finishing;
        self.focused = focused;
        true
    }

    fn start_animation(
        &mut self,
        stage: &mut Stage,
        now: Duration,
        duration: Duration,
        from: f64,
        to: f64,
        end: Option<FocusEnd>,
    ) {
        stage.visible = true;
        self.animation.start(now, duration, from, to, end);
        self.dial_angle = from as i32;
    }

    pub fn cancel(&mut self) {
        self.animation.cancel();
        self.focused = false;
    }

    /// Hides the ring and returns it to the surface center.
    pub fn disappear(&mut self, stage: &mut Stage) {
        stage.visible = false;
        stage.phase = Phase::Idle;
        self.focus = stage.surface_center;
        self.set_circle();
        self.focused = false;
    }

    /// Moves the dial to `now`. Returns whether it changed and the end
    /// action once the animation completes.
    pub fn advance(&mut self, now: Duration) -> (bool, Option<FocusEnd>) {
        match self.animation.advance(now) {
            Progress::Idle => (false, None),
            Progress::Running(value) => {
                self.dial_angle = value as i32;
                (true, None)
            }
            Progress::Finished { value, end } => {
                self.dial_angle = value as i32;
                (true, end)
            }
        }
    }

    pub fn tint(&self, stage: &Stage) -> DialTint {
        if self.focused {
            DialTint::Success
        } else if stage.phase == Phase::Finishing {
            DialTint::Fail
        } else {
            DialTint::Neutral
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn has_end_action(&self) -> bool {
        self.animation.has_end_action()
    }

    pub fn dial_angle(&self) -> i32 {
        self.dial_angle
    }

    pub fn focus_point(&self) -> Point {
        self.focus
    }

    pub fn circle(&self) -> Rect {
        self.circle
    }

    pub fn dial(&self) -> Rect {
        self.dial
    }

    pub fn circle_size(&self) -> f64 {
        self.circle_size
    }

    pub fn size(&self) -> f64 {
        2.0 * self.circle_size
    }

    pub fn inner_offset(&self) -> f64 {
        self.inner_offset
    }

    pub fn outer_stroke(&self) -> f64 {
        self.outer_stroke
    }

    pub fn inner_stroke(&self) -> f64 {
        self.inner_stroke
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FixedAngles;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn setup() -> (FocusRing, Stage) {
        let dims = Dimensions::default();
        let mut stage = Stage::new(&dims);
        stage.width = 1000.0;
        stage.height = 600.0;
        stage.surface_center = Point::new(500.0, 300.0);
        let mut ring = FocusRing::new(&dims);
        ring.layout(&stage);
        (ring, stage)
    }

    #[test]
    fn initial_circle_follows_dimensions() {
        let ring = FocusRing::new(&Dimensions::default());
        assert_eq!(ring.circle_size(), 72.0);
        assert_eq!(ring.size(), 144.0);
        assert_eq!(ring.dial_angle(), DIAL_HORIZONTAL);
    }

    #[test]
    fn layout_caps_circle_and_centers_it() {
        let (ring, mut stage) = setup();
        assert_eq!(ring.circle_size(), 120.0);
        assert_eq!(ring.circle(), Rect::new(380.0, 180.0, 620.0, 420.0));
        assert_eq!(ring.dial(), Rect::new(392.0, 192.0, 608.0, 408.0));

        stage.width = 4000.0;
        stage.height = 3000.0;
        let mut ring = ring;
        ring.layout(&stage);
        assert_eq!(ring.circle_size(), MAX_CIRCLE_SIZE);
    }

    #[test]
    fn start_sweeps_from_random_angle() {
        let (mut ring, mut stage) = setup();
        let mut angles = FixedAngles::new(30, 100);

        assert!(ring.show_start(&mut stage, &mut angles, ms(0)));
        assert_eq!(stage.phase, Phase::Focusing);
        assert!(stage.visible);
        assert!(!ring.has_end_action());

        ring.advance(ms(500));
        assert_eq!(ring.dial_angle(), 80);
        let (changed, end) = ring.advance(ms(1000));
        assert!(changed);
        assert_eq!(end, None);
        assert_eq!(ring.dial_angle(), 130);
    }

    #[test]
    fn results_are_ignored_unless_focusing() {
        let (mut ring, mut stage) = setup();
        assert!(!ring.show_success(&mut stage, true, ms(0)));
        assert!(!ring.show_fail(&mut stage, true, ms(0)));
        assert_eq!(stage.phase, Phase::Idle);
        assert!(!stage.visible);

        let mut angles = FixedAngles::new(10, 20);
        ring.show_start(&mut stage, &mut angles, ms(0));
        assert!(!ring.show_start(&mut stage, &mut angles, ms(10)));
        assert_eq!(stage.phase, Phase::Focusing);
    }

    #[test]
    fn success_settles_back_to_start_angle() {
        let (mut ring, mut stage) = setup();
        let mut angles = FixedAngles::new(20, 100);
        ring.show_start(&mut stage, &mut angles, ms(0));
        ring.advance(ms(500));
        assert_eq!(ring.dial_angle(), 70);

        assert!(ring.show_success(&mut stage, true, ms(500)));
        assert_eq!(stage.phase, Phase::Finishing);
        assert_eq!(ring.tint(&stage), DialTint::Success);

        ring.advance(ms(600));
        assert_eq!(ring.dial_angle(), 45);
        let (_, end) = ring.advance(ms(700));
        assert_eq!(end, Some(FocusEnd::ScheduleDisappear));
        assert_eq!(ring.dial_angle(), 20);
    }

    #[test]
    fn fail_without_timeout_has_no_end_action() {
        let (mut ring, mut stage) = setup();
        let mut angles = FixedAngles::new(0, 0);
        ring.show_start(&mut stage, &mut angles, ms(0));
        ring.show_fail(&mut stage, false, ms(10));

        assert_eq!(ring.tint(&stage), DialTint::Fail);
        assert!(!ring.has_end_action());
        assert_eq!(ring.advance(ms(500)), (true, None));
    }

    #[test]
    fn restarting_drops_previous_end_action() {
        let (mut ring, mut stage) = setup();
        let mut angles = FixedAngles::new(0, 60);
        ring.show_start(&mut stage, &mut angles, ms(0));
        ring.show_fail(&mut stage, true, ms(0));
        assert!(ring.has_end_action());

        // a new start while the finishing animation still runs
        stage.phase = Phase::Idle;
        ring.show_start(&mut stage, &mut angles, ms(50));
        assert!(!ring.has_end_action());

        let (_, end) = ring.advance(ms(5000));
        assert_eq!(end, None);
        assert_eq!(ring.advance(ms(6000)), (false, None));
    }

    #[test]
    fn align_parks_dial_and_disappear_recenters() {
        let (mut ring, mut stage) = setup();
        let mut angles = FixedAngles::new(40, 40);
        ring.show_start(&mut stage, &mut angles, ms(0));
        ring.align(Point::new(100.0, 100.0));

        assert!(!ring.is_animating());
        assert_eq!(ring.dial_angle(), DIAL_HORIZONTAL);
        assert_eq!(ring.circle().center(), Point::new(100.0, 100.0));

        ring.disappear(&mut stage);
        assert!(!stage.visible);
        assert_eq!(stage.phase, Phase::Idle);
        assert_eq!(ring.focus_point(), stage.surface_center);
        assert_eq!(ring.tint(&stage), DialTint::Neutral);
    }
}
