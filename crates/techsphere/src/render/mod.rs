use crate::locale::Locale;
use crate::scene::{Frame, SceneKind};
use thiserror::Error;

pub mod text;

#[cfg(feature = "snapshot")]
pub mod snapshot;
#[cfg(feature = "snapshot")]
pub mod theme;

pub use text::TextSurface;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering surface unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "snapshot")]
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[cfg(feature = "snapshot")]
    #[error(transparent)]
    Png(#[from] cairo::IoError),
}

/// Something that can draw resolved frames.
pub trait Surface {
    fn draw(&mut self, frame: &Frame) -> Result<(), RenderError>;
}

/// A mounted rendering surface, or the static fallback shown when it could not be created.
pub enum Presentation {
    Live(Box<dyn Surface>),
    Fallback { reason: String },
}

impl Presentation {
    /// Tries `create` once. A failure is kept as a flag; there is no retry.
    pub fn mount<F>(create: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn Surface>, RenderError>,
    {
        match create() {
            Ok(surface) => Self::Live(surface),
            Err(e) => {
                log::warn!("Using static fallback: {}", e);
                Self::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Message to show instead of the visualization, if the surface is missing.
    pub fn fallback_text(&self, locale: Locale) -> Option<&'static str> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { .. } => Some(locale.unavailable()),
        }
    }

    pub fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        match self {
            Self::Live(surface) => surface.draw(frame),
            Self::Fallback { .. } => Ok(()),
        }
    }
}

/// Factory for the PNG snapshot surface. Fails when the crate was built without it.
#[cfg(feature = "snapshot")]
pub fn snapshot_factory(
    path: std::path::PathBuf,
    options: SnapshotOptions,
) -> impl FnOnce() -> Result<Box<dyn Surface>, RenderError> {
    move || Ok(Box::new(snapshot::SnapshotSurface::new(path, options)?) as Box<dyn Surface>)
}

#[cfg(not(feature = "snapshot"))]
pub fn snapshot_factory(
    _path: std::path::PathBuf,
    _options: SnapshotOptions,
) -> impl FnOnce() -> Result<Box<dyn Surface>, RenderError> {
    || {
        Err(RenderError::Unavailable(
            "built without the `snapshot` feature".to_string(),
        ))
    }
}

/// Image size and scene scale for PNG snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotOptions {
    pub width: i32,
    pub height: i32,
    /// Pixels per scene unit: 1 for the pixel-sized cloud, larger for the orbit scene.
    pub units_to_px: f64,
}

impl SnapshotOptions {
    pub fn for_kind(kind: SceneKind) -> Self {
        let bounds = kind.default_bounds();
        let units_to_px = match kind {
            SceneKind::Cloud => 1.0,
            SceneKind::Orbit => 70.0,
        };
        Self {
            width: bounds.width as i32,
            height: bounds.height as i32,
            units_to_px,
        }
    }
}
