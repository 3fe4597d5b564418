use crate::config::{self, Config};
use crate::events::{AppEvent, FocusSignal};
use crate::gui::menu::{self, CairoCanvas, ItemViews};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use pie_core::{Dimensions, ItemId, Overlay, PieListener, Point, TouchEvent};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// How long tap-to-focus pretends the lens takes when no camera is attached.
const SIMULATED_FOCUS_TIME: Duration = Duration::from_millis(800);

pub struct AppModel {
    pub overlay: Rc<RefCell<Overlay>>,
    pub views: Rc<RefCell<ItemViews>>,
    pub menu_open: bool,
    pub tx: async_channel::Sender<AppEvent>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(TouchEvent),
    TapFocus(Point),
    Focus(FocusSignal),
    TogglePie,
    Cancel,
    Resize(f64, f64),
    MenuOpened(Point),
    MenuClosed,
    ItemCommitted(ItemId),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Focus(signal) => AppMsg::Focus(signal),
            AppEvent::TogglePie => AppMsg::TogglePie,
            AppEvent::MenuOpened(center) => AppMsg::MenuOpened(center),
            AppEvent::MenuClosed => AppMsg::MenuClosed,
            AppEvent::ItemCommitted(id) => AppMsg::ItemCommitted(id),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Forwards menu open/close to the UI loop as events.
struct ChannelListener(async_channel::Sender<AppEvent>);

impl ChannelListener {
    fn send(&self, event: AppEvent) {
        if let Err(e) = self.0.try_send(event) {
            log::error!("Failed to forward menu event: {}", e);
        }
    }
}

impl PieListener for ChannelListener {
    fn on_opened(&mut self, center: Point) {
        self.send(AppEvent::MenuOpened(center));
    }

    fn on_closed(&mut self) {
        self.send(AppEvent::MenuClosed);
    }
}

fn apply_focus_signal(overlay: &mut Overlay, signal: FocusSignal) {
    let applied = match signal {
        FocusSignal::FocusStart => overlay.show_start(),
        FocusSignal::FocusSuccess => overlay.show_success(true),
        FocusSignal::FocusSuccessHold => overlay.show_success(false),
        FocusSignal::FocusFail => overlay.show_fail(true),
        FocusSignal::FocusFailHold => overlay.show_fail(false),
        FocusSignal::FocusClear => {
            overlay.clear();
            true
        }
        FocusSignal::Block => {
            overlay.set_block_focus(true);
            true
        }
        FocusSignal::Unblock => {
            overlay.set_block_focus(false);
            true
        }
    };
    if !applied {
        log::debug!("{} ignored in {} phase", signal, overlay.phase());
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        async_channel::Sender<AppEvent>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(if model.menu_open { "Viewfinder (menu)" } else { "Viewfinder" }),
            set_default_width: 960,
            set_default_height: 640,
            add_css_class: "viewfinder-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::space => sender.input(AppMsg::TogglePie),
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Cancel),
                        gtk::gdk::Key::f => sender.input(AppMsg::Focus(FocusSignal::FocusStart)),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "viewfinder-surface",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::GestureDrag {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Touch(TouchEvent::down(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Touch(TouchEvent::moved(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Touch(TouchEvent::up(x + dx, y + dy)));
                        }
                    },
                    connect_cancel[sender] => move |gesture, _| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        sender.input(AppMsg::Touch(TouchEvent::cancel(x, y)));
                    },
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_SECONDARY,
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::TapFocus(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, tx, rx) = init;

        theme::load_css();

        let mut overlay = Overlay::new(&Dimensions::default());
        overlay.set_listener(ChannelListener(tx.clone()));

        let model = AppModel {
            overlay: Rc::new(RefCell::new(overlay)),
            views: Rc::new(RefCell::new(ItemViews::default())),
            menu_open: false,
            tx,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.apply_config(&config);

        let overlay_draw = model.overlay.clone();
        let views_draw = model.views.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let views = views_draw.borrow();
                let mut canvas = CairoCanvas::new(cr, &colors, &views);
                if let Err(e) = overlay_draw.borrow().draw(&mut canvas) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let overlay_tick = model.overlay.clone();
        widgets.drawing_area.add_tick_callback(move |area, _| {
            if overlay_tick.borrow_mut().tick() {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Touch(event) => {
                self.overlay.borrow_mut().handle_touch(event);
            }
            AppMsg::TapFocus(point) => {
                {
                    let mut overlay = self.overlay.borrow_mut();
                    overlay.set_focus(point.x, point.y, true);
                    overlay.show_start();
                }
                let sender = sender.clone();
                glib::timeout_add_local_once(SIMULATED_FOCUS_TIME, move || {
                    sender.input(AppMsg::Focus(FocusSignal::FocusSuccess));
                });
            }
            AppMsg::Focus(signal) => {
                log::debug!("Focus signal: {}", signal);
                apply_focus_signal(&mut self.overlay.borrow_mut(), signal);
            }
            AppMsg::TogglePie => self.overlay.borrow_mut().show_in_center(),
            AppMsg::Cancel => {
                let mut overlay = self.overlay.borrow_mut();
                overlay.handle_touch(TouchEvent::cancel(0.0, 0.0));
                overlay.clear();
            }
            AppMsg::Resize(width, height) => {
                self.overlay.borrow_mut().layout(0.0, 0.0, width, height);
            }
            AppMsg::MenuOpened(center) => {
                log::debug!("Menu opened at ({}, {})", center.x, center.y);
                self.menu_open = true;
            }
            AppMsg::MenuClosed => {
                log::debug!("Menu closed");
                self.menu_open = false;
            }
            AppMsg::ItemCommitted(id) => log::info!("Selected '{}'", id),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    /// Replaces the menu wholesale and applies sizes and rotation.
    fn apply_config(&mut self, config: &Config) {
        let (items, views) = menu::build_items(&config.items, &self.tx);
        {
            let mut overlay = self.overlay.borrow_mut();
            overlay.clear_items();
            for item in items {
                overlay.add_item(item);
            }
            overlay.set_rotation(config.rotation);
            overlay.apply_dimensions(&config.dimensions);
        }
        *self.views.borrow_mut() = views;
    }
}
