use crate::animation::{Animation, Progress};
use crate::canvas::Canvas;
use crate::clock::{Clock, MonotonicClock};
use crate::focus::{self, AngleSource, DISAPPEAR_TIMEOUT, FocusEnd, FocusRing, RandomAngles};
use crate::geometry::{Point, Rotation};
use crate::item::{ItemId, PieItem};
use crate::menu::{self, MenuCommand, PIE_SELECT_FADE_DURATION, PieMenu, TouchEvent};
use crate::scheduler::Scheduler;
use crate::stage::{Dimensions, Phase, Stage};


/// Told when the menu opens or closes. Calls arrive from [`Overlay::tick`],
/// never from inside the call that caused them.
pub trait PieListener {
    fn on_opened(&mut self, center: Point);
    fn on_closed(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Opened(Point),
    Closed,
    Disappear,
}

impl Deferred {
    fn is_disappear(&self) -> bool {
        matches!(self, Self::Disappear)
    }
}

/// Closes the menu once the select fade-out completes.
#[derive(Debug, Clone, Copy)]
struct Dismiss;

/// The single drawable, touchable component. Owns the shared [`Stage`] and
/// wires the menu and the focus ring to it.
pub struct Overlay {
    stage: Stage,
    menu: PieMenu,
    focus: FocusRing,
    scheduler: Scheduler<Deferred>,
    fade_out: Animation<Dismiss>,
    listener: Option<Box<dyn PieListener>>,
    clock: Box<dyn Clock>,
    angles: Box<dyn AngleSource>,
}

impl Overlay {
    pub fn new(dimensions: &Dimensions) -> Self {
        Self::with_sources(
            dimensions,
            Box::new(MonotonicClock::new()),
            Box::new(RandomAngles::default()),
        )
    }

    pub fn with_sources(
        dimensions: &Dimensions,
        clock: Box<dyn Clock>,
        angles: Box<dyn AngleSource>,
    ) -> Self {
        Self {
            stage: Stage::new(dimensions),
            menu: PieMenu::new(),
            focus: FocusRing::new(dimensions),
            scheduler: Scheduler::new(),
            fade_out: Animation::new(1.0),
            listener: None,
            clock,
            angles,
        }
    }

    pub fn set_listener(&mut self, listener: impl PieListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn apply_dimensions(&mut self, dimensions: &Dimensions) {
        self.stage.apply_dimensions(dimensions);
        self.focus.apply_dimensions(dimensions);
        self.menu.layout(&self.stage);
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn menu(&self) -> &PieMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut PieMenu {
        &mut self.menu
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn phase(&self) -> Phase {
        self.stage.phase
    }

    pub fn is_visible(&self) -> bool {
        self.stage.visible
    }

    /// True in tap mode, where the items stay up without a held finger.
    pub fn shows_items(&self) -> bool {
        self.menu.is_tap_mode()
    }

    /// Diameter of the focus ring.
    pub fn size(&self) -> f64 {
        self.focus.size()
    }

    pub fn add_item(&mut self, item: PieItem) {
        self.menu.add_item(item);
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Option<PieItem> {
        self.menu.remove_item(id)
    }

    pub fn clear_items(&mut self) {
        self.menu.clear_items();
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.stage.rotation = rotation;
    }

    pub fn layout(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.stage.width = right - left;
        self.stage.height = bottom - top;
        self.stage.surface_center = Point::new(self.stage.width / 2.0, self.stage.height / 2.0);
        self.focus.layout(&self.stage);
        if self.stage.visible && self.stage.phase == Phase::Pie {
            self.set_center(self.stage.surface_center);
            self.menu.layout(&self.stage);
        }
    }

    // pie menu

    fn show(&mut self, open: bool) {
        let now = self.clock.now();
        if open {
            self.fade_out.cancel();
            self.stage.alpha = 1.0;
            self.stage.phase = Phase::Pie;
            self.menu.reset_selection();
            self.menu.layout(&self.stage);
            self.menu.start_fade_in(now);
            self.scheduler.post(now, Deferred::Opened(self.stage.center));
        } else {
            self.stage.phase = Phase::Idle;
            self.scheduler.post(now, Deferred::Closed);
        }
        log::debug!("pie menu {}", if open { "opened" } else { "closed" });
        self.stage.visible = open;
    }

    /// Toggles the menu in tap mode around the surface center.
    pub fn show_in_center(&mut self) {
        if self.stage.visible {
            self.menu.set_tap_mode(false);
            self.show(false);
        } else {
            self.set_center(self.stage.surface_center);
            self.menu.set_tap_mode(true);
            self.show(true);
        }
    }

    /// Moves the menu and brings the focus ring along.
    pub fn set_center(&mut self, center: Point) {
        self.stage.center = center;
        self.align_focus(center);
    }

    /// Moves the menu to where the focus ring is and lays it out fresh.
    pub fn setup(&mut self, center: Point) {
        self.stage.center = center;
        self.menu.reset_selection();
        self.menu.layout(&self.stage);
    }

    pub fn align_focus(&mut self, point: Point) {
        self.scheduler.remove(Deferred::is_disappear);
        self.focus.align(point);
    }

    /// Feeds one touch into the menu. Returns whether the touch was consumed.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        let now = self.clock.now();
        let response = self.menu.on_touch(&mut self.stage, event, now);
        match response.command {
            MenuCommand::None => {}
            MenuCommand::OpenAt(point) => {
                self.set_center(point);
                self.show(true);
            }
            MenuCommand::Close => self.show(false),
            MenuCommand::Commit(path) => {
                self.menu.perform_click(path);
                self.fade_out.start(now, PIE_SELECT_FADE_DURATION, 1.0, 0.0, Some(Dismiss));
            }
            MenuCommand::Dismiss(path) => {
                self.show(false);
                self.stage.phase = Phase::Idle;
                self.menu.perform_click(path);
                self.menu.unselect(path);
            }
            MenuCommand::Cancel { close } => {
                if close {
                    self.show(false);
                }
            }
        }
        response.handled
    }

    // focus ring

    pub fn show_start(&mut self) -> bool {
        let now = self.clock.now();
        self.focus.show_start(&mut self.stage, &mut *self.angles, now)
    }

    pub fn show_success(&mut self, timeout: bool) -> bool {
        let now = self.clock.now();
        self.focus.show_success(&mut self.stage, timeout, now)
    }

    pub fn show_fail(&mut self, timeout: bool) -> bool {
        let now = self.clock.now();
        self.focus.show_fail(&mut self.stage, timeout, now)
    }

    /// Stops any focus animation and hides the ring right away.
    pub fn clear(&mut self) {
        self.focus.cancel();
        self.scheduler.remove(Deferred::is_disappear);
        self.disappear();
    }

    pub fn set_block_focus(&mut self, blocked: bool) {
        self.focus.set_blocked(blocked);
        if blocked {
            self.clear();
        }
    }

    /// Tap-to-focus at a raw touch point. The point is mapped through the
    /// device rotation and the menu is set up around it in tap mode.
    /// `immediate` is accepted for signature parity and has no effect.
    pub fn set_focus(&mut self, x: f64, y: f64, _immediate: bool) {
        let point = self
            .stage
            .rotation
            .remap(Point::new(x, y), self.stage.width, self.stage.height);
        log::debug!("focus at ({}, {})", point.x, point.y);
        self.menu.set_tap_mode(true);
        self.focus.move_to(point);
        self.setup(point);
    }

    fn disappear(&mut self) {
        self.focus.disappear(&mut self.stage);
        self.setup(self.focus.focus_point());
    }

    /// Advances every animation to the clock's current time and runs the
    /// deferred tasks that are due. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();

        let (mut dirty, end) = self.focus.advance(now);
        if let Some(FocusEnd::ScheduleDisappear) = end {
            self.scheduler.remove(Deferred::is_disappear);
            self.scheduler.post_delayed(now, DISAPPEAR_TIMEOUT, Deferred::Disappear);
        }

        dirty |= self.menu.advance(now);

        match self.fade_out.advance(now) {
            Progress::Idle => {}
            Progress::Running(alpha) => {
                self.stage.alpha = alpha;
                dirty = true;
            }
            Progress::Finished { end, .. } => {
                if end.is_some() {
                    self.menu.deselect();
                    self.show(false);
                }
                self.stage.alpha = 1.0;
                dirty = true;
            }
        }

        for task in self.scheduler.take_due(now) {
            dirty = true;
            match task {
                Deferred::Opened(center) => {
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_opened(center);
                    }
                }
                Deferred::Closed => {
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_closed();
                    }
                }
                Deferred::Disappear => self.disappear(),
            }
        }
        dirty
    }

    /// Renders the ring, then the menu. Nothing is drawn while hidden.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        if !self.stage.visible {
            return Ok(());
        }

        let layered = self.stage.alpha < 1.0;
        if layered {
            canvas.push_layer()?;
        }
        focus::view::draw(&self.focus, &self.stage, canvas)?;
        if self.stage.phase != Phase::Finishing {
            menu::view::draw(&self.menu, &self.stage, canvas)?;
        }
        if layered {
            canvas.pop_layer(self.stage.alpha)?;
        }
        Ok(())
    }
}
