use super::{
    CENTER_ANGLE, EMPTY_ANGLE, PIE_FADE_IN_DURATION, PIE_SWEEP, PIE_XFADE_DURATION, RADIUS_GAP,
    SLICE_GAP_DEG,
};
use crate::animation::{Animation, Progress};
use crate::geometry::{Point, Polar, Rect};
use crate::item::{ItemGeometry, ItemId, ItemPath, PieItem, SliceShape};
use crate::stage::Stage;
use std::time::Duration;

/// Item tree plus selection state. `current` is the slice under the finger,
/// `open` the top-level item whose children are exposed.
#[derive(Debug)]
pub struct PieMenu {
    items: Vec<PieItem>,
    current: Option<ItemPath>,
    open: Option<ItemPath>,
    pub(crate) tap_mode: bool,
    /// Set while a submenu opens, so the release of the same gesture does
    /// not commit.
    pub(crate) opening: bool,
    pub(crate) down: Point,
    fade_in: Animation<()>,
    xfade: Animation<()>,
}

impl Default for PieMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PieMenu {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            open: None,
            tap_mode: false,
            opening: false,
            down: Point::default(),
            fade_in: Animation::new(1.0),
            xfade: Animation::new(1.0),
        }
    }

    pub fn add_item(&mut self, item: PieItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Option<PieItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        // indices shift, drop any selection that pointed into the list
        self.current = None;
        self.open = None;
        Some(self.items.remove(index))
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
        self.current = None;
        self.open = None;
    }

    pub fn items(&self) -> &[PieItem] {
        &self.items
    }

    pub fn item(&self, path: ItemPath) -> Option<&PieItem> {
        let top = self.items.get(path.top)?;
        match path.child {
            Some(child) => top.children().get(child),
            None => Some(top),
        }
    }

    pub fn item_mut(&mut self, path: ItemPath) -> Option<&mut PieItem> {
        let top = self.items.get_mut(path.top)?;
        match path.child {
            Some(child) => top.children_mut().get_mut(child),
            None => Some(top),
        }
    }

    pub fn find_path(&self, id: &ItemId) -> Option<ItemPath> {
        self.items.iter().enumerate().find_map(|(i, item)| {
            if item.id() == id {
                return Some(ItemPath::top(i));
            }
            item.children()
                .iter()
                .position(|child| child.id() == id)
                .map(|j| ItemPath::child(i, j))
        })
    }

    pub fn current(&self) -> Option<ItemPath> {
        self.current
    }

    pub fn open(&self) -> Option<ItemPath> {
        self.open
    }

    pub fn open_item(&self) -> Option<&PieItem> {
        self.open.and_then(|path| self.item(path))
    }

    pub fn is_tap_mode(&self) -> bool {
        self.tap_mode
    }

    pub fn is_opening(&self) -> bool {
        self.opening
    }

    pub fn down_point(&self) -> Point {
        self.down
    }

    /// Opacity of the fade-in, while it runs.
    pub fn fade_in_alpha(&self) -> Option<f64> {
        self.fade_in.is_running().then(|| self.fade_in.value())
    }

    /// Cross-fade value (1 → 0) while a submenu opens.
    pub fn xfade_alpha(&self) -> Option<f64> {
        self.xfade.is_running().then(|| self.xfade.value())
    }

    pub(crate) fn set_tap_mode(&mut self, tap_mode: bool) {
        self.tap_mode = tap_mode;
    }

    pub(crate) fn reset_selection(&mut self) {
        self.current = None;
        self.open = None;
        for item in &mut self.items {
            item.set_selected(false);
            for child in item.children_mut() {
                child.set_selected(false);
            }
        }
    }

    /// Assigns slice geometry to every item around the stage center.
    pub fn layout(&mut self, stage: &Stage) {
        let inner = stage.radius + RADIUS_GAP;
        let outer = stage.radius + stage.radius_increment - RADIUS_GAP;
        layout_items(
            &mut self.items,
            stage.center,
            CENTER_ANGLE,
            inner,
            outer,
            stage.radius_increment,
        );
    }

    /// Hit-tests the visible level only: the open item's children, or the
    /// top level when nothing is open.
    pub fn find(&self, polar: Polar) -> Option<ItemPath> {
        let hit = |item: &PieItem| item.is_enabled() && item.contains(polar, self.tap_mode);
        match self.open {
            Some(open) => self
                .item(open)?
                .children()
                .iter()
                .position(hit)
                .map(|i| ItemPath::child(open.top, i)),
            None => self.items.iter().position(hit).map(ItemPath::top),
        }
    }

    /// Moves the selection to `path`, opening it as a submenu when it has
    /// children.
    pub(crate) fn enter(&mut self, path: ItemPath, now: Duration) {
        if let Some(previous) = self.current.and_then(|c| self.item_mut(c)) {
            previous.set_selected(false);
        }

        match self.item_mut(path) {
            Some(item) if item.is_enabled() => {
                item.set_selected(true);
                let has_items = item.has_items();
                self.current = Some(path);
                if self.open != Some(path) && has_items {
                    self.open_current(now);
                }
            }
            _ => self.current = None,
        }
    }

    fn open_current(&mut self, now: Duration) {
        let Some(path) = self.current else {
            return;
        };
        if !path.is_top_level() {
            log::debug!("ignoring nested submenu at {:?}", path);
            return;
        }
        let Some(item) = self.item_mut(path) else {
            return;
        };
        if !item.has_items() {
            return;
        }

        item.set_selected(false);
        log::debug!("opening submenu {}", item.id());
        self.open = Some(path);
        self.opening = true;
        self.xfade.start(now, PIE_XFADE_DURATION, 1.0, 0.0, None);
    }

    pub(crate) fn close_submenu(&mut self) {
        self.open = None;
    }

    pub(crate) fn deselect(&mut self) {
        if let Some(item) = self.current.and_then(|c| self.item_mut(c)) {
            item.set_selected(false);
        }
        self.open = None;
        self.current = None;
    }

    pub(crate) fn unselect(&mut self, path: ItemPath) {
        if let Some(item) = self.item_mut(path) {
            item.set_selected(false);
        }
    }

    pub(crate) fn perform_click(&mut self, path: ItemPath) -> bool {
        self.item_mut(path).is_some_and(PieItem::perform_click)
    }

    pub(crate) fn start_fade_in(&mut self, now: Duration) {
        self.fade_in.start(now, PIE_FADE_IN_DURATION, 0.0, 1.0, None);
    }

    /// Advances the fades; true when something visibly changed.
    pub(crate) fn advance(&mut self, now: Duration) -> bool {
        let fade_in = !matches!(self.fade_in.advance(now), Progress::Idle);
        let xfade = !matches!(self.xfade.advance(now), Progress::Idle);
        fade_in || xfade
    }
}

fn layout_items(
    items: &mut [PieItem],
    center: Point,
    center_angle: f64,
    inner: f64,
    outer: f64,
    radius_increment: f64,
) {
    if items.is_empty() {
        return;
    }

    let mut sweep = (PIE_SWEEP - 2.0 * EMPTY_ANGLE) / items.len() as f64;
    let mut angle = center_angle - PIE_SWEEP / 2.0 + EMPTY_ANGLE + sweep / 2.0;
    // one fixed item imposes its sweep on the whole level so the slice
    // outline can be shared
    if let Some(fixed) = items.iter().find_map(PieItem::fixed) {
        sweep = fixed.sweep;
    }

    let slice = SliceShape {
        sweep,
        inner,
        outer,
        gap: SLICE_GAP_DEG.to_radians(),
    };
    // views sit two thirds of the way out
    let r = inner + (outer - inner) * 2.0 / 3.0;

    for item in items.iter_mut() {
        if let Some(fixed) = item.fixed() {
            angle = fixed.center;
        }
        let (w, h) = item.size();
        let view = Polar::new(angle, r).to_point(center);
        let bounds = Rect::new(
            view.x - w / 2.0,
            view.y - h / 2.0,
            view.x + w / 2.0,
            view.y + h / 2.0,
        );
        let geometry = ItemGeometry {
            start: angle - sweep / 2.0,
            sweep,
            inner,
            outer,
        };
        item.place(geometry, bounds, slice);

        if item.has_items() {
            layout_items(
                item.children_mut(),
                center,
                angle,
                inner,
                outer + radius_increment / 2.0,
                radius_increment,
            );
        }
        angle += sweep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize_angle;
    use crate::stage::Dimensions;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn stage() -> Stage {
        let mut stage = Stage::new(&Dimensions {
            pie_radius_start: 40.0,
            pie_radius_increment: 48.0,
            ..Dimensions::default()
        });
        stage.center = Point::new(200.0, 300.0);
        stage
    }

    fn menu_with(n: usize) -> PieMenu {
        let mut menu = PieMenu::new();
        for i in 0..n {
            menu.add_item(PieItem::new(format!("item-{i}")).with_size(20.0, 10.0));
        }
        menu
    }

    #[test]
    fn sweeps_and_margins_partition_the_pie() {
        for n in 1..=7 {
            let mut menu = menu_with(n);
            menu.layout(&stage());

            let total: f64 = menu.items().iter().map(|i| i.geometry().sweep).sum();
            assert!((total + 2.0 * EMPTY_ANGLE - PIE_SWEEP).abs() < EPS, "n = {n}");

            let first = menu.items()[0].geometry().start;
            assert!((first - (CENTER_ANGLE - PIE_SWEEP / 2.0 + EMPTY_ANGLE)).abs() < EPS);

            for pair in menu.items().windows(2) {
                let (a, b) = (pair[0].geometry(), pair[1].geometry());
                assert!(a.start + a.sweep <= b.start + EPS, "overlap at n = {n}");
            }
        }
    }

    #[test]
    fn radius_band_leaves_gaps_around_base_radius() {
        let mut menu = menu_with(3);
        menu.layout(&stage());
        let g = menu.items()[1].geometry();
        assert_eq!(g.inner, 42.0);
        assert_eq!(g.outer, 86.0);
    }

    #[test]
    fn views_are_centered_two_thirds_out() {
        let mut menu = menu_with(1);
        menu.layout(&stage());
        // a single item sits straight up
        let bounds = menu.items()[0].bounds();
        let r = 42.0 + 44.0 * 2.0 / 3.0;
        assert!((bounds.center().x - 200.0).abs() < EPS);
        assert!((bounds.center().y - (300.0 - r)).abs() < EPS);
        assert!((bounds.width() - 20.0).abs() < EPS);
        assert!((bounds.height() - 10.0).abs() < EPS);
    }

    #[test]
    fn fixed_item_forces_sweep_on_siblings() {
        let mut menu = PieMenu::new();
        menu.add_item(PieItem::new("auto"));
        menu.add_item(
            PieItem::new("fixed")
                .with_fixed_geometry(PI / 2.0, PI / 8.0)
                .unwrap(),
        );
        menu.add_item(PieItem::new("after"));
        menu.layout(&stage());

        let geometries: Vec<_> = menu.items().iter().map(|i| *i.geometry()).collect();
        assert!(geometries.iter().all(|g| (g.sweep - PI / 8.0).abs() < EPS));
        assert!((geometries[1].start - (PI / 2.0 - PI / 16.0)).abs() < EPS);
        // the running angle continues from the fixed center
        assert!((geometries[2].start - (PI / 2.0 + PI / 16.0)).abs() < EPS);
    }

    #[test]
    fn siblings_share_one_slice_outline() {
        let mut menu = menu_with(4);
        menu.layout(&stage());
        let first = *menu.items()[0].slice().unwrap();
        assert!(menu.items().iter().all(|i| *i.slice().unwrap() == first));
    }

    #[test]
    fn children_wrap_parent_in_wider_band() {
        let mut menu = PieMenu::new();
        menu.add_item(PieItem::new("left"));
        menu.add_item(
            PieItem::new("mode")
                .with_child(PieItem::new("photo"))
                .with_child(PieItem::new("video")),
        );
        menu.layout(&stage());

        let parent = *menu.items()[1].geometry();
        let children = menu.items()[1].children();
        let parent_center = parent.start + parent.sweep / 2.0;
        let mid = (children[0].geometry().start
            + children[1].geometry().start
            + children[1].geometry().sweep)
            / 2.0;
        assert!((mid - parent_center).abs() < EPS);
        assert_eq!(children[0].geometry().inner, 42.0);
        assert_eq!(children[0].geometry().outer, 86.0 + 24.0);
    }

    #[test]
    fn empty_menu_lays_out_to_nothing() {
        let mut menu = PieMenu::new();
        menu.layout(&stage());
        assert!(menu.find(Polar::new(PI / 2.0, 60.0)).is_none());
    }

    #[test]
    fn at_most_one_item_matches_any_touch() {
        let mut menu = menu_with(5);
        let stage = stage();
        menu.layout(&stage);

        for deg in 0..360 {
            for r in (0..140).step_by(7) {
                let polar = Polar::new(f64::from(deg).to_radians(), f64::from(r));
                let hits = menu
                    .items()
                    .iter()
                    .filter(|item| item.contains(polar, false))
                    .count();
                assert!(hits <= 1, "{hits} hits at {deg}° r = {r}");
            }
        }
    }

    #[test]
    fn find_skips_disabled_items() {
        let mut menu = PieMenu::new();
        menu.add_item(PieItem::new("only").with_enabled(false));
        menu.layout(&stage());
        assert!(menu.find(Polar::new(PI / 2.0, 60.0)).is_none());
    }

    #[test]
    fn find_searches_open_children_only() {
        let mut menu = PieMenu::new();
        menu.add_item(
            PieItem::new("mode")
                .with_child(PieItem::new("photo"))
                .with_child(PieItem::new("video")),
        );
        menu.layout(&stage());

        let top = Polar::new(PI / 2.0, 60.0);
        assert_eq!(menu.find(top), Some(ItemPath::top(0)));

        menu.enter(ItemPath::top(0), Duration::ZERO);
        assert_eq!(menu.open(), Some(ItemPath::top(0)));
        assert!(menu.is_opening());
        assert!(!menu.items()[0].is_selected());

        // the first child takes the clockwise half
        assert_eq!(
            menu.find(Polar::new(PI / 2.0 - 0.2, 60.0)),
            Some(ItemPath::child(0, 0))
        );
        assert_eq!(
            menu.find(Polar::new(PI / 2.0 + 0.2, 100.0)),
            Some(ItemPath::child(0, 1))
        );
    }

    #[test]
    fn submenu_slices_wrap_across_zero() {
        let mut menu = PieMenu::new();
        menu.add_item(
            PieItem::new("flash")
                .with_fixed_geometry(45f64.to_radians(), 45f64.to_radians())
                .unwrap()
                .with_child(PieItem::new("auto"))
                .with_child(PieItem::new("on"))
                .with_child(PieItem::new("off")),
        );
        menu.layout(&stage());

        // the first child spans -7.5° to 27.5°
        let first = *menu.items()[0].children()[0].geometry();
        assert!((first.start.to_degrees() + 7.5).abs() < 1e-9);

        menu.enter(ItemPath::top(0), Duration::ZERO);
        let above = Polar::new(3f64.to_radians(), 70.0);
        let below = Polar::new(normalize_angle(-3f64.to_radians()), 70.0);
        assert_eq!(menu.find(above), Some(ItemPath::child(0, 0)));
        assert_eq!(menu.find(below), Some(ItemPath::child(0, 0)));
        assert_eq!(
            menu.find(Polar::new(normalize_angle(-10f64.to_radians()), 70.0)),
            None
        );
    }

    #[test]
    fn grandchildren_never_open_a_third_level() {
        let mut menu = PieMenu::new();
        menu.add_item(
            PieItem::new("mode")
                .with_child(PieItem::new("photo").with_child(PieItem::new("raw")))
                .with_child(PieItem::new("video")),
        );
        menu.layout(&stage());

        menu.enter(ItemPath::top(0), Duration::ZERO);
        menu.enter(ItemPath::child(0, 0), Duration::ZERO);
        assert_eq!(menu.open(), Some(ItemPath::top(0)));
        assert_eq!(menu.current(), Some(ItemPath::child(0, 0)));
        assert!(menu.items()[0].children()[0].is_selected());
    }

    #[test]
    fn entering_moves_the_selected_flag() {
        let mut menu = menu_with(3);
        menu.layout(&stage());

        menu.enter(ItemPath::top(0), Duration::ZERO);
        menu.enter(ItemPath::top(2), Duration::ZERO);
        assert!(!menu.items()[0].is_selected());
        assert!(menu.items()[2].is_selected());
        assert_eq!(menu.current(), Some(ItemPath::top(2)));

        menu.deselect();
        assert!(menu.items().iter().all(|i| !i.is_selected()));
        assert_eq!(menu.current(), None);
    }

    #[test]
    fn remove_and_clear_drop_selection() {
        let mut menu = menu_with(3);
        menu.enter(ItemPath::top(1), Duration::ZERO);

        let removed = menu.remove_item(&ItemId::from("item-1")).unwrap();
        assert_eq!(removed.id().as_str(), "item-1");
        assert_eq!(menu.current(), None);
        assert!(menu.remove_item(&ItemId::from("missing")).is_none());

        menu.clear_items();
        assert!(menu.items().is_empty());
    }

    #[test]
    fn find_path_reaches_children() {
        let mut menu = PieMenu::new();
        menu.add_item(PieItem::new("a"));
        menu.add_item(PieItem::new("b").with_child(PieItem::new("b1")));
        assert_eq!(menu.find_path(&"b1".into()), Some(ItemPath::child(1, 0)));
        assert_eq!(menu.find_path(&"a".into()), Some(ItemPath::top(0)));
        assert_eq!(menu.find_path(&"zz".into()), None);
    }
}
