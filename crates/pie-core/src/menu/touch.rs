use super::model::PieMenu;
use crate::geometry::{Point, Polar};
use crate::item::{ItemPath, PieItem};
use crate::stage::{Phase, Stage};
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub point: Point,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: f64, y: f64) -> Self {
        Self {
            action,
            point: Point::new(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Up, x, y)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Cancel, x, y)
    }
}

/// What the overlay must do after the menu has digested a touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCommand {
    None,
    /// Recenter on the point and open.
    OpenAt(Point),
    Close,
    /// Run the item's action, then fade the menu out.
    Commit(ItemPath),
    /// Close at once, then run the item's action.
    Dismiss(ItemPath),
    Cancel { close: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchResponse {
    pub handled: bool,
    pub command: MenuCommand,
}

impl TouchResponse {
    fn handled(command: MenuCommand) -> Self {
        Self {
            handled: true,
            command,
        }
    }

    fn passed(command: MenuCommand) -> Self {
        Self {
            handled: false,
            command,
        }
    }
}

impl PieMenu {
    /// Runs one step of the touch protocol. Selection state changes here;
    /// showing, hiding and committing are left to the overlay through the
    /// returned command.
    pub fn on_touch(&mut self, stage: &mut Stage, event: TouchEvent, now: Duration) -> TouchResponse {
        let polar = stage.polar(event.point, !self.tap_mode);
        match event.action {
            TouchAction::Down => self.on_down(stage, event.point, polar, now),
            TouchAction::Move => self.on_move(stage, polar, now),
            TouchAction::Up => self.on_up(stage, polar),
            TouchAction::Cancel => {
                let close = stage.visible || self.tap_mode;
                self.deselect();
                TouchResponse::passed(MenuCommand::Cancel { close })
            }
        }
    }

    fn on_down(&mut self, stage: &mut Stage, point: Point, polar: Polar, now: Duration) -> TouchResponse {
        self.down = point;
        self.opening = false;

        if !self.tap_mode {
            return TouchResponse::handled(MenuCommand::OpenAt(point));
        }

        if let Some(path) = self.find(polar)
            && self.current() != Some(path)
        {
            stage.phase = Phase::Pie;
            self.enter(path, now);
        }
        TouchResponse::handled(MenuCommand::None)
    }

    fn on_move(&mut self, stage: &Stage, polar: Polar, now: Duration) -> TouchResponse {
        // back over the center
        if polar.radius < stage.radius {
            if self.open().is_some() {
                self.close_submenu();
            } else {
                self.deselect();
            }
            return TouchResponse::passed(MenuCommand::None);
        }

        if let Some(path) = self.find(polar)
            && self.current() != Some(path)
        {
            self.enter(path, now);
        }
        TouchResponse::passed(MenuCommand::None)
    }

    fn on_up(&mut self, stage: &Stage, polar: Polar) -> TouchResponse {
        if !stage.visible {
            return TouchResponse::passed(MenuCommand::None);
        }

        let mut candidate = self.current();
        if self.tap_mode {
            candidate = self.find(polar);
            if candidate.is_some() && self.opening {
                self.opening = false;
                return TouchResponse::handled(MenuCommand::None);
            }
        }

        let Some(path) = candidate else {
            self.tap_mode = false;
            return TouchResponse::handled(MenuCommand::Close);
        };

        let leaf = !self.item(path).is_some_and(PieItem::has_items);
        let command = if leaf && !self.opening {
            self.tap_mode = false;
            MenuCommand::Commit(path)
        } else if leaf {
            self.tap_mode = false;
            MenuCommand::Dismiss(path)
        } else {
            MenuCommand::None
        };
        TouchResponse::handled(command)
    }
}
