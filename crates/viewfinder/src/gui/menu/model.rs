use super::{ICON_SIZE, VIEW_SIZE};
use crate::config::{ExecCommand, ItemConfig};
use crate::events::AppEvent;
use async_channel::Sender;
use gdk_pixbuf::Pixbuf;
use pie_core::{GeometryError, ItemId, PieItem};
use std::collections::HashMap;
use std::process::{Command, Stdio};

/// Decoded icons, looked up by item id when the canvas draws an item view.
#[derive(Default)]
pub struct ItemViews {
    icons: HashMap<ItemId, Pixbuf>,
}

impl ItemViews {
    pub fn icon(&self, id: &ItemId) -> Option<&Pixbuf> {
        self.icons.get(id)
    }

    fn load(&mut self, cfg: &ItemConfig) {
        let Some(path) = cfg.icon.as_ref().filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        match Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true) {
            Ok(pixbuf) => {
                self.icons.insert(cfg.id.clone(), pixbuf);
            }
            Err(e) => log::warn!("Failed to load icon {}: {}", path.display(), e),
        }
    }
}

/// Builds the menu tree from config. Items with invalid angles are logged and
/// left out; committing an item runs its `exec` and reports its id on `tx`.
pub fn build_items(configs: &[ItemConfig], tx: &Sender<AppEvent>) -> (Vec<PieItem>, ItemViews) {
    let mut views = ItemViews::default();
    let items = configs
        .iter()
        .filter_map(|cfg| match build_item(cfg, tx, &mut views) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping item '{}': {}", cfg.id, e);
                None
            }
        })
        .collect();
    (items, views)
}

fn build_item(
    cfg: &ItemConfig,
    tx: &Sender<AppEvent>,
    views: &mut ItemViews,
) -> Result<PieItem, GeometryError> {
    let mut item = PieItem::new(cfg.id.clone())
        .with_size(VIEW_SIZE, VIEW_SIZE)
        .with_enabled(cfg.enabled);
    if let Some(label) = &cfg.label {
        item = item.with_label(label.clone());
    }

    match (cfg.center, cfg.sweep) {
        (Some(center), Some(sweep)) => {
            item = item.with_fixed_geometry(center.to_radians(), sweep.to_radians())?;
        }
        (None, None) => {}
        _ => log::warn!("Item '{}' needs both center and sweep to be fixed", cfg.id),
    }

    for child in &cfg.children {
        match build_item(child, tx, views) {
            Ok(child) => item = item.with_child(child),
            Err(e) => log::warn!("Skipping item '{}': {}", child.id, e),
        }
    }

    let exec = cfg.exec.clone();
    let tx = tx.clone();
    item = item.with_action(move |id| {
        if let Some(exec) = &exec {
            run_exec(id, exec);
        }
        if let Err(e) = tx.try_send(AppEvent::ItemCommitted(id.clone())) {
            log::error!("Failed to report item '{}': {}", id, e);
        }
    });

    views.load(cfg);
    Ok(item)
}

fn run_exec(id: &ItemId, exec: &ExecCommand) {
    let spawned = Command::new("sh")
        .arg("-c")
        .arg(exec.as_str())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = spawned {
        log::error!("Failed to run '{}' for item '{}': {}", exec, id, e);
    }
}
