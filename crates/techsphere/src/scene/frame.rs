use super::item::{HexColor, ItemId};
use crate::locale::Locale;
use orbitkit::{Rotation, Vec3};
use serde::Serialize;

/// Resolved transform of one node for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTransform {
    pub id: ItemId,
    pub label: String,
    pub color: HexColor,
    pub position: Vec3,
    /// Depth cue multiplied by the item's base scale.
    pub scale: f64,
    pub tile_size: f64,
    pub opacity: f64,
    pub stacking: i32,
    pub hovered: bool,
    pub glow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPanel {
    pub id: ItemId,
    pub label: String,
    pub description: String,
    pub color: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitRing {
    pub radius: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    pub locale: Locale,
    pub rotation: Rotation,
    pub nodes: Vec<NodeTransform>,
    pub rings: Vec<OrbitRing>,
    pub hovered: Option<HoverPanel>,
    /// Shown in place of the panel while nothing is hovered.
    pub hint: Option<&'static str>,
}

impl Frame {
    pub fn node(&self, id: &ItemId) -> Option<&NodeTransform> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Back to front, the hovered node last.
    pub fn draw_order(&self) -> Vec<&NodeTransform> {
        let mut nodes: Vec<&NodeTransform> = self.nodes.iter().collect();
        nodes.sort_by_key(|n| (n.hovered, n.stacking));
        nodes
    }
}
