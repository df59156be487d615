use orbitkit::{Bounds, Point};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub mod builtin;
pub mod catalog;
pub mod frame;
pub mod item;
pub mod model;
pub mod tracker;

pub use catalog::{Catalog, CatalogError};
pub use frame::{Frame, HoverPanel, NodeTransform, OrbitRing};
pub use item::{HexColor, Item, ItemConfig, ItemError, ItemId, Placement};
pub use model::{Scene, ViewSettings};
pub use tracker::{Mode, Tracker, TrackerAction, TrackerSettings};

use crate::locale::Locale;

pub const GLOW_TARGET: f64 = 0.3;
pub const GLOW_EASING: f64 = 0.1;
pub const RING_OPACITY_INNER: f64 = 0.12;
pub const RING_OPACITY_OUTER: f64 = 0.08;

/// Default container size of the cloud, in pixels.
pub const CLOUD_BOUNDS: Bounds = Bounds {
    width: 250.0,
    height: 320.0,
};
pub const ORBIT_BOUNDS: Bounds = Bounds {
    width: 800.0,
    height: 400.0,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Tiles on a slowly turning sphere that follows the pointer.
    #[default]
    #[strum(to_string = "cloud", serialize = "icons")]
    Cloud,
    /// An anchor with satellites on circular orbits.
    #[strum(to_string = "orbit", serialize = "tech")]
    Orbit,
}

impl SceneKind {
    pub fn default_bounds(&self) -> Bounds {
        match self {
            Self::Cloud => CLOUD_BOUNDS,
            Self::Orbit => ORBIT_BOUNDS,
        }
    }
}

/// Pointer and presentation input for a mounted scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    PointerEnter,
    PointerLeave,
    PointerMove(Point),
    Resize(Bounds),
    NodeEnter(ItemId),
    NodeLeave(ItemId),
    Locale(Locale),
}
