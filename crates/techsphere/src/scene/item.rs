use crate::locale::{Locale, Localized};
use derive_more::{AsRef, Deref, Display, From, Into};
use orbitkit::{OrbitError, OrbitParams, Vec3};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

/// `#RRGGBB` display color.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgb<u8>);

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// From a `0xRRGGBB` literal.
    pub fn from_u32(hex: u32) -> Self {
        Self(Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
    }

    pub fn to_f64(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0.red, self.0.green, self.0.blue)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("item '{0}' needs either a fixed position or orbit parameters")]
    MissingPlacement(ItemId),
    #[error("item '{0}' has both a fixed position and orbit parameters")]
    ConflictingPlacement(ItemId),
    #[error("item '{0}' is placed by the sphere layout and cannot set its own position")]
    PlacedByLayout(ItemId),
    #[error("item '{0}' has a non-finite position")]
    InvalidPosition(ItemId),
    #[error("item '{id}' scale must be a positive number, got {scale}")]
    InvalidScale { id: ItemId, scale: f64 },
    #[error("item '{id}': {source}")]
    Orbit { id: ItemId, source: OrbitError },
}

/// Where an item sits. Exactly one kind of placement per item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Fixed(Vec3),
    Orbit(OrbitParams),
}

impl Placement {
    pub fn position_at(&self, t: f64) -> Vec3 {
        match self {
            Self::Fixed(p) => *p,
            Self::Orbit(orbit) => orbit.position_at(t),
        }
    }

    /// Furthest distance from the origin this placement can reach on the horizontal plane.
    pub fn extent(&self) -> f64 {
        match self {
            Self::Fixed(p) => p.length(),
            Self::Orbit(orbit) => orbit.radius(),
        }
    }

    pub fn orbit(&self) -> Option<&OrbitParams> {
        match self {
            Self::Orbit(orbit) => Some(orbit),
            Self::Fixed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub label: Localized,
    pub description: Localized,
    pub color: HexColor,
    pub placement: Placement,
    pub scale: f64,
}

impl Item {
    pub fn label(&self, locale: Locale) -> &str {
        self.label.get(locale)
    }

    pub fn description(&self, locale: Locale) -> &str {
        self.description.get(locale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct OrbitConfig {
    pub radius: f64,
    pub speed: f64,
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItemConfig {
    pub id: ItemId,
    pub label: Localized,
    #[serde(default)]
    pub description: Localized,
    pub color: HexColor,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl ItemConfig {
    pub fn new(id: &str, label: Localized, color: HexColor) -> Self {
        Self {
            id: ItemId::from(id),
            label,
            description: Localized::default(),
            color,
            position: None,
            orbit: None,
            scale: default_scale(),
        }
    }

    pub fn description(mut self, description: Localized) -> Self {
        self.description = description;
        self
    }

    pub fn at(mut self, position: [f64; 3]) -> Self {
        self.position = Some(position);
        self
    }

    pub fn orbiting(mut self, radius: f64, speed: f64, offset: f64) -> Self {
        self.orbit = Some(OrbitConfig {
            radius,
            speed,
            offset,
        });
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Validates the entry. `assigned` is the position handed out by a sphere layout,
    /// in which case the entry must not carry a placement of its own.
    pub fn into_item(self, assigned: Option<Vec3>) -> Result<Item, ItemError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ItemError::InvalidScale {
                id: self.id,
                scale: self.scale,
            });
        }

        let placement = match (assigned, self.position, self.orbit) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ItemError::PlacedByLayout(self.id));
            }
            (Some(point), None, None) => Placement::Fixed(point),
            (None, Some(_), Some(_)) => return Err(ItemError::ConflictingPlacement(self.id)),
            (None, None, None) => return Err(ItemError::MissingPlacement(self.id)),
            (None, Some(position), None) => {
                let position = Vec3::from(position);
                if !position.is_finite() {
                    return Err(ItemError::InvalidPosition(self.id));
                }
                Placement::Fixed(position)
            }
            (None, None, Some(orbit)) => {
                match OrbitParams::new(orbit.radius, orbit.speed, orbit.offset) {
                    Ok(params) => Placement::Orbit(params),
                    Err(source) => return Err(ItemError::Orbit { id: self.id, source }),
                }
            }
        };

        Ok(Item {
            id: self.id,
            label: self.label,
            description: self.description,
            color: self.color,
            placement,
            scale: self.scale,
        })
    }
}
