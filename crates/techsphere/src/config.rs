use crate::events::AppEvent;
use crate::locale::Locale;
use crate::scene::{
    Catalog, CatalogError, ItemConfig, SceneKind, TrackerSettings, ViewSettings,
};
use async_channel::{Receiver, Sender};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbitkit::depth::HOVER_SCALE;
use orbitkit::sphere::DEFAULT_RADIUS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const MAX_FRAME_RATE: u32 = 240;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid item list: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Overrides for the per-scene motion defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    pub idle_step: Option<f64>,
    pub idle_pitch_amplitude: Option<f64>,
    pub pitch_sensitivity: Option<f64>,
    pub yaw_sensitivity: Option<f64>,
    pub follow_pointer: Option<bool>,
    pub hover_scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub scene: SceneKind,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    #[serde(default = "default_cloud_radius")]
    pub cloud_radius: f64,
    #[serde(default)]
    pub depth_radius: Option<f64>,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

fn default_frame_rate() -> u32 {
    60
}

fn default_socket_path() -> PathBuf {
    PathBuf::from("/tmp/techsphere.sock")
}

fn default_cloud_radius() -> f64 {
    DEFAULT_RADIUS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            scene: SceneKind::default(),
            frame_rate: default_frame_rate(),
            socket_path: default_socket_path(),
            cloud_radius: default_cloud_radius(),
            depth_radius: None,
            motion: MotionConfig::default(),
            items: Vec::new(),
        }
    }
}

impl Config {
    pub fn tracker_settings(&self) -> TrackerSettings {
        let base = TrackerSettings::for_kind(self.scene);
        let m = &self.motion;
        TrackerSettings {
            idle_step: m.idle_step.unwrap_or(base.idle_step),
            idle_pitch_amplitude: m.idle_pitch_amplitude.unwrap_or(base.idle_pitch_amplitude),
            pitch_sensitivity: m.pitch_sensitivity.unwrap_or(base.pitch_sensitivity),
            yaw_sensitivity: m.yaw_sensitivity.unwrap_or(base.yaw_sensitivity),
            follow_pointer: m.follow_pointer.unwrap_or(base.follow_pointer),
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            depth_radius: self.depth_radius,
            hover_scale: self.motion.hover_scale.unwrap_or(HOVER_SCALE),
        }
    }

    /// The configured items, or the built-in catalog when none are listed.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        if self.items.is_empty() {
            Catalog::builtin(self.scene, self.cloud_radius)
        } else {
            Catalog::build(self.scene, self.items.clone(), self.cloud_radius)
        }
    }

    pub fn frame_interval(&self) -> Duration {
        let rate = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        Duration::from_secs_f64(1.0 / rate as f64)
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "techsphere", "techsphere")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TECHSPHERE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment())
        .build()?;

    let config: Config = s.try_deserialize()?;
    // reject bad item lists at load time rather than on first use
    config.catalog()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Parses a TOML document without consulting the environment.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.catalog()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled default config to the standard location unless a file is already there.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Returns whether a new file was written. An existing file is never overwritten.
pub fn write_default_config_to(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if path.exists() {
        return Ok(false);
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors save in several steps (truncate, write, rename). Changes closer together
/// than this produce a single reload.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

/// Sends `ConfigReload` after the file at `config_path` is written, created or removed.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
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

    log::debug!("watching {}", config_path.display());
    forward_reloads(&config_path, bridge_rx, &tx, RELOAD_DEBOUNCE).await;
}

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// One `ConfigReload` per burst of changes to `config_path`. A burst ends after
/// `quiet` passes without another change to the file.
async fn forward_reloads(
    config_path: &Path,
    events: Receiver<notify::Result<notify::Event>>,
    tx: &Sender<AppEvent>,
    quiet: Duration,
) {
    loop {
        match events.recv().await {
            Ok(Ok(event)) if touches_config(&event, config_path) => {}
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => {
                log::error!("Watch error: {}", e);
                continue;
            }
            Err(_) => return,
        }

        let mut closed = false;
        let mut coalesced = 0usize;
        loop {
            match tokio::time::timeout(quiet, events.recv()).await {
                Ok(Ok(Ok(event))) if touches_config(&event, config_path) => coalesced += 1,
                Ok(Ok(_)) => {}
                Ok(Err(_)) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }

        log::debug!("config changed ({} events coalesced)", coalesced + 1);
        if tx.send(AppEvent::ConfigReload).await.is_err() || closed {
            return;
        }
    }
}
