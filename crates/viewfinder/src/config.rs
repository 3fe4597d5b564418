use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use pie_core::{Dimensions, ItemId, Rotation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Shell command run when an item is committed.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

pie_core::impl_string_newtype!(ExecCommand);

/// One menu entry. Angles are in degrees, counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub id: ItemId,
    pub label: Option<String>,
    pub icon: Option<PathBuf>,
    pub exec: Option<ExecCommand>,
    pub center: Option<f64>,
    pub sweep: Option<f64>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub children: Vec<ItemConfig>,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "viewfinder", "viewfinder")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("VIEWFINDER").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The user's config, or the bundled one when it is missing or broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to the bundled config: {}", e);
            default_config()
        }
    }
}

pub fn default_config() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_default()
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
