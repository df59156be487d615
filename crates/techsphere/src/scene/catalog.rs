use super::SceneKind;
use super::builtin;
use super::item::{Item, ItemConfig, ItemError, ItemId};
use orbitkit::SphereLayout;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate item id '{0}'")]
    DuplicateId(ItemId),
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// The validated, ordered item list of one visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    kind: SceneKind,
    items: Vec<Item>,
    layout: Option<SphereLayout>,
}

impl Catalog {
    /// Cloud entries get their positions from a sphere layout of `cloud_radius`;
    /// orbit entries must carry their own placement.
    pub fn build(
        kind: SceneKind,
        entries: Vec<ItemConfig>,
        cloud_radius: f64,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.id.clone())) {
            return Err(CatalogError::DuplicateId(dup.id.clone()));
        }

        let (items, layout) = match kind {
            SceneKind::Cloud => {
                let layout = SphereLayout::new(entries.len(), cloud_radius);
                let items = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| entry.into_item(layout.get(i)))
                    .collect::<Result<Vec<_>, _>>()?;
                (items, Some(layout))
            }
            SceneKind::Orbit => {
                let items = entries
                    .into_iter()
                    .map(|entry| entry.into_item(None))
                    .collect::<Result<Vec<_>, _>>()?;
                (items, None)
            }
        };

        Ok(Self {
            kind,
            items,
            layout,
        })
    }

    pub fn builtin(kind: SceneKind, cloud_radius: f64) -> Result<Self, CatalogError> {
        let entries = match kind {
            SceneKind::Cloud => builtin::cloud_entries(),
            SceneKind::Orbit => builtin::orbit_entries(),
        };
        Self::build(kind, entries, cloud_radius)
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn layout(&self) -> Option<&SphereLayout> {
        self.layout.as_ref()
    }

    /// Largest distance any item reaches from the centre.
    pub fn extent(&self) -> f64 {
        if let Some(layout) = &self.layout {
            return layout.radius();
        }
        self.items
            .iter()
            .map(|item| item.placement.extent())
            .fold(0.0, f64::max)
    }

    /// Distinct orbit radii, innermost first.
    pub fn orbit_radii(&self) -> Vec<f64> {
        let mut radii: Vec<f64> = self
            .items
            .iter()
            .filter_map(|item| item.placement.orbit().map(|o| o.radius()))
            .filter(|r| *r > 0.0)
            .collect();
        radii.sort_by(f64::total_cmp);
        radii.dedup();
        radii
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Localized;
    use crate::scene::item::{HexColor, Placement};
    use orbitkit::Vec3;

    #[test]
    fn test_builtin_cloud_uses_sphere_layout() {
        let catalog = Catalog::builtin(SceneKind::Cloud, 120.0).unwrap();
        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.extent(), 120.0);

        let first = &catalog.items()[0];
        match first.placement {
            Placement::Fixed(p) => assert!(p.distance(&Vec3::new(0.0, 0.0, -120.0)) < 1e-9),
            Placement::Orbit(_) => panic!("cloud items are fixed"),
        }
    }

    #[test]
    fn test_builtin_orbit() {
        let catalog = Catalog::builtin(SceneKind::Orbit, 120.0).unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.layout().is_none());
        assert_eq!(catalog.orbit_radii(), vec![2.2, 3.2]);
        assert_eq!(catalog.extent(), 3.2);
        assert!(catalog.contains(&ItemId::from("database")));
        assert!(!catalog.contains(&ItemId::from("python")));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let entry = ItemConfig::new("git", Localized::same("Git"), HexColor::from_u32(0xF05032));
        let result = Catalog::build(SceneKind::Cloud, vec![entry.clone(), entry], 120.0);
        assert_eq!(result, Err(CatalogError::DuplicateId(ItemId::from("git"))));
    }

    #[test]
    fn test_malformed_item_rejected() {
        let entry = ItemConfig::new("git", Localized::same("Git"), HexColor::from_u32(0xF05032));
        let result = Catalog::build(SceneKind::Orbit, vec![entry], 120.0);
        assert_eq!(
            result,
            Err(CatalogError::Item(ItemError::MissingPlacement(ItemId::from(
                "git"
            ))))
        );
    }

    #[test]
    fn test_empty_cloud() {
        let catalog = Catalog::build(SceneKind::Cloud, Vec::new(), 120.0).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.layout().unwrap().is_empty());
    }
}
