use super::catalog::Catalog;
use super::frame::{Frame, HoverPanel, NodeTransform, OrbitRing};
use super::item::ItemId;
use super::tracker::{Tracker, TrackerAction, TrackerSettings};
use super::{
    GLOW_EASING, GLOW_TARGET, Input, RING_OPACITY_INNER, RING_OPACITY_OUTER, SceneKind,
};
use crate::locale::Locale;
use orbitkit::depth::{self, DepthCue, HOVER_SCALE};
use orbitkit::{Bounds, Rotation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Depth used for the scale/opacity cue. Defaults to the catalog's extent.
    pub depth_radius: Option<f64>,
    pub hover_scale: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            depth_radius: None,
            hover_scale: HOVER_SCALE,
        }
    }
}

/// One mounted visualization: its items, interaction state and clock.
pub struct Scene {
    catalog: Catalog,
    tracker: Tracker,
    view: ViewSettings,
    locale: Locale,
    time: f64,
    glow: Vec<f64>,
}

impl Scene {
    pub fn mount(
        catalog: Catalog,
        settings: TrackerSettings,
        bounds: Bounds,
        locale: Locale,
        view: ViewSettings,
    ) -> Self {
        log::info!(
            "mounting {} scene with {} items",
            catalog.kind(),
            catalog.len()
        );
        let glow = vec![0.0; catalog.len()];
        Self {
            catalog,
            tracker: Tracker::new(settings, bounds),
            view,
            locale,
            time: 0.0,
            glow,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn kind(&self) -> SceneKind {
        self.catalog.kind()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_mounted()
    }

    pub fn depth_radius(&self) -> f64 {
        self.view.depth_radius.unwrap_or_else(|| self.catalog.extent())
    }

    /// Moves the clock forward by `dt` seconds and runs one animation tick.
    pub fn advance(&mut self, dt: f64) -> TrackerAction {
        if !self.is_mounted() {
            return TrackerAction::none();
        }
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }

        let hovered = self.tracker.hovered().cloned();
        for (item, glow) in self.catalog.items().iter().zip(self.glow.iter_mut()) {
            let target = if hovered.as_ref() == Some(&item.id) {
                GLOW_TARGET
            } else {
                0.0
            };
            *glow += (target - *glow) * GLOW_EASING;
        }

        self.tracker.tick();
        // orbiting items move every frame even while the container is held still
        TrackerAction::new(true)
    }

    /// Reaches the state of `ticks` calls to `advance(dt)` without stepping through them.
    pub fn fast_forward(&mut self, ticks: u64, dt: f64) -> TrackerAction {
        if ticks == 0 || !self.is_mounted() {
            return TrackerAction::none();
        }
        if dt.is_finite() && dt > 0.0 {
            self.time += dt * ticks as f64;
        }

        // each tick keeps (1 - easing) of the distance to the target
        let remaining = (1.0 - GLOW_EASING).powf(ticks as f64);
        let hovered = self.tracker.hovered().cloned();
        for (item, glow) in self.catalog.items().iter().zip(self.glow.iter_mut()) {
            let target = if hovered.as_ref() == Some(&item.id) {
                GLOW_TARGET
            } else {
                0.0
            };
            *glow = target + (*glow - target) * remaining;
        }

        self.tracker.tick_n(ticks);
        TrackerAction::new(true)
    }

    pub fn handle(&mut self, input: Input) -> TrackerAction {
        match input {
            Input::PointerEnter => self.tracker.pointer_enter(),
            Input::PointerLeave => self.tracker.pointer_leave(),
            Input::PointerMove(point) => self.tracker.pointer_move(point),
            Input::Resize(bounds) => {
                self.tracker.resize(bounds);
                TrackerAction::none()
            }
            Input::NodeEnter(id) => self.node_enter(id),
            Input::NodeLeave(id) => self.tracker.node_leave(&id),
            Input::Locale(locale) => self.set_locale(locale),
        }
    }

    fn node_enter(&mut self, id: ItemId) -> TrackerAction {
        if !self.catalog.contains(&id) {
            log::debug!("ignoring hover on unknown item '{}'", id);
            return TrackerAction::none();
        }
        self.tracker.node_enter(id)
    }

    pub fn set_locale(&mut self, locale: Locale) -> TrackerAction {
        if !self.is_mounted() || self.locale == locale {
            return TrackerAction::none();
        }
        self.locale = locale;
        TrackerAction::new(true)
    }

    pub fn set_tracker_settings(&mut self, settings: TrackerSettings) {
        self.tracker.set_settings(settings);
    }

    pub fn set_view(&mut self, view: ViewSettings) {
        self.view = view;
    }

    /// Swaps in a new item list. An identical list keeps the current layout.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> TrackerAction {
        if !self.is_mounted() || catalog == self.catalog {
            return TrackerAction::none();
        }

        log::info!(
            "item list changed: {} -> {} items",
            self.catalog.len(),
            catalog.len()
        );
        self.glow = vec![0.0; catalog.len()];
        self.catalog = catalog;
        let catalog = &self.catalog;
        self.tracker.retain_hover(|id| catalog.contains(id));
        TrackerAction::new(true)
    }

    pub fn unmount(&mut self) {
        if self.is_mounted() {
            log::info!("unmounting {} scene", self.kind());
            self.tracker.unmount();
        }
    }

    pub fn hover_panel(&self) -> Option<HoverPanel> {
        let item = self.tracker.hovered().and_then(|id| self.catalog.get(id))?;
        Some(HoverPanel {
            id: item.id.clone(),
            label: item.label(self.locale).to_string(),
            description: item.description(self.locale).to_string(),
            color: item.color,
        })
    }

    /// Resolved transforms for the current instant. `None` once unmounted.
    pub fn frame(&self) -> Option<Frame> {
        if !self.is_mounted() {
            return None;
        }

        let rotation = self.tracker.rotation();
        let radius = self.depth_radius();
        let hovered = self.tracker.hovered();

        let mut nodes: Vec<NodeTransform> = self
            .catalog
            .items()
            .iter()
            .zip(&self.glow)
            .map(|(item, &glow)| {
                let position = rotation.apply(item.placement.position_at(self.time));
                let is_hovered = hovered == Some(&item.id);
                let cue =
                    DepthCue::resolve(position.z, radius, is_hovered, self.view.hover_scale);

                NodeTransform {
                    id: item.id.clone(),
                    label: item.label(self.locale).to_string(),
                    color: item.color,
                    position,
                    scale: cue.scale * item.scale,
                    tile_size: depth::tile_size(cue.scale),
                    opacity: cue.opacity,
                    stacking: cue.stacking,
                    hovered: is_hovered,
                    glow,
                }
            })
            .collect();

        let top = depth::hover_stacking(
            nodes
                .iter()
                .filter(|n| !n.hovered)
                .map(|n| n.stacking),
        );
        if let Some(node) = nodes.iter_mut().find(|n| n.hovered) {
            node.stacking = top;
        }

        let hovered = self.hover_panel();
        Some(Frame {
            time: self.time,
            locale: self.locale,
            rotation,
            nodes,
            rings: self.rings(),
            hint: hovered.is_none().then(|| self.locale.hover_hint()),
            hovered,
        })
    }

    fn rings(&self) -> Vec<OrbitRing> {
        self.catalog
            .orbit_radii()
            .into_iter()
            .enumerate()
            .map(|(i, radius)| OrbitRing {
                radius,
                opacity: if i == 0 {
                    RING_OPACITY_INNER
                } else {
                    RING_OPACITY_OUTER
                },
            })
            .collect()
    }

    pub fn rotation(&self) -> Rotation {
        self.tracker.rotation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitkit::{Point, Vec3};

    fn mount(kind: SceneKind) -> Scene {
        Scene::mount(
            Catalog::builtin(kind, 120.0).unwrap(),
            TrackerSettings::for_kind(kind),
            Bounds::new(250.0, 320.0),
            Locale::En,
            ViewSettings::default(),
        )
    }

    #[test]
    fn test_cloud_frame_at_mount() {
        let scene = mount(SceneKind::Cloud);
        let frame = scene.frame().unwrap();

        assert_eq!(frame.nodes.len(), 18);
        assert!(frame.rings.is_empty());
        assert_eq!(frame.hint, Some("Hover over nodes to explore"));

        let first = &frame.nodes[0];
        assert!(first.position.distance(&Vec3::new(0.0, 0.0, -120.0)) < 1e-9);
        assert_eq!(first.opacity, 0.4);
    }

    #[test]
    fn test_orbit_item_starts_on_x_axis() {
        let scene = mount(SceneKind::Orbit);
        let frame = scene.frame().unwrap();

        let js = frame.node(&ItemId::from("javascript")).unwrap();
        assert!(js.position.distance(&Vec3::new(2.2, 0.0, 0.0)) < 1e-9);

        let anchor = frame.node(&ItemId::from("react")).unwrap();
        assert_eq!(anchor.position, Vec3::ZERO);
        assert_eq!(frame.rings.len(), 2);
        assert_eq!(frame.rings[0].opacity, RING_OPACITY_INNER);
    }

    #[test]
    fn test_opacity_follows_depth_for_plain_nodes() {
        let mut scene = mount(SceneKind::Cloud);
        for _ in 0..40 {
            scene.advance(1.0 / 60.0);
        }
        let frame = scene.frame().unwrap();

        let mut nodes: Vec<_> = frame.nodes.iter().collect();
        nodes.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        for pair in nodes.windows(2) {
            assert!(pair[0].opacity <= pair[1].opacity);
            assert!(pair[0].stacking <= pair[1].stacking);
        }
    }

    #[test]
    fn test_hovered_node_is_opaque_and_on_top() {
        let mut scene = mount(SceneKind::Cloud);
        // the first cloud item sits at the back pole
        scene.handle(Input::NodeEnter(ItemId::from("react")));
        let frame = scene.frame().unwrap();

        let node = frame.node(&ItemId::from("react")).unwrap();
        assert!(node.hovered);
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.scale, HOVER_SCALE);
        assert!(frame.nodes.iter().all(|n| n.stacking <= node.stacking));
        assert_eq!(frame.draw_order().last().unwrap().id, node.id);
        assert_eq!(frame.hint, None);
    }

    #[test]
    fn test_hovered_node_stays_on_top_of_a_large_cloud() {
        let mut scene = Scene::mount(
            Catalog::builtin(SceneKind::Cloud, 1000.0).unwrap(),
            TrackerSettings::for_kind(SceneKind::Cloud),
            Bounds::new(250.0, 320.0),
            Locale::En,
            ViewSettings::default(),
        );
        scene.handle(Input::NodeEnter(ItemId::from("react")));
        let frame = scene.frame().unwrap();

        let hovered = frame.node(&ItemId::from("react")).unwrap();
        let others = frame.nodes.iter().filter(|n| !n.hovered);
        assert!(others.clone().any(|n| n.stacking > depth::HOVER_STACKING));
        assert!(others.clone().all(|n| n.stacking < hovered.stacking));
        assert_eq!(frame.draw_order().last().unwrap().id, hovered.id);
    }

    #[test]
    fn test_unknown_node_hover_ignored() {
        let mut scene = mount(SceneKind::Cloud);
        assert!(
            !scene
                .handle(Input::NodeEnter(ItemId::from("cobol")))
                .should_redraw
        );
        assert_eq!(scene.tracker().hovered(), None);
    }

    #[test]
    fn test_hover_panel_is_localized() {
        let mut scene = mount(SceneKind::Orbit);
        scene.handle(Input::NodeEnter(ItemId::from("database")));
        scene.handle(Input::Locale(Locale::Jp));

        let panel = scene.frame().unwrap().hovered.unwrap();
        assert_eq!(panel.label, "データ");
        assert_eq!(panel.description, "構造化データ管理");
    }

    #[test]
    fn test_glow_eases_toward_target() {
        let mut scene = mount(SceneKind::Orbit);
        scene.handle(Input::NodeEnter(ItemId::from("ai")));
        scene.advance(0.016);
        let first = scene.frame().unwrap().node(&ItemId::from("ai")).unwrap().glow;
        assert!((first - 0.03).abs() < 1e-12);

        for _ in 0..200 {
            scene.advance(0.016);
        }
        let settled = scene.frame().unwrap().node(&ItemId::from("ai")).unwrap().glow;
        assert!((settled - GLOW_TARGET).abs() < 1e-6);
    }

    #[test]
    fn test_fast_forward_matches_stepping() {
        let mut stepped = mount(SceneKind::Orbit);
        let mut jumped = mount(SceneKind::Orbit);
        for scene in [&mut stepped, &mut jumped] {
            scene.handle(Input::NodeEnter(ItemId::from("cloud")));
        }

        for _ in 0..300 {
            stepped.advance(1.0 / 60.0);
        }
        jumped.fast_forward(300, 1.0 / 60.0);

        let (a, b) = (stepped.frame().unwrap(), jumped.frame().unwrap());
        assert!((a.time - b.time).abs() < 1e-9);
        assert!((a.rotation.yaw - b.rotation.yaw).abs() < 1e-9);
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert!(x.position.distance(&y.position) < 1e-6, "{}", x.id);
            assert!((x.glow - y.glow).abs() < 1e-9, "{}", x.id);
        }
    }

    #[test]
    fn test_fast_forward_far_ahead_stays_finite() {
        let mut scene = mount(SceneKind::Cloud);
        // 1e12 seconds at 60 Hz
        scene.fast_forward(60_000_000_000_000, 1.0 / 60.0);

        let frame = scene.frame().unwrap();
        assert!(frame.time.is_finite() && frame.rotation.yaw.is_finite());
        assert!(frame.nodes.iter().all(|n| n.position.is_finite()));
    }

    #[test]
    fn test_engaged_centre_pointer_keeps_yaw() {
        let mut scene = mount(SceneKind::Cloud);
        for _ in 0..10 {
            scene.advance(0.016);
        }
        let yaw = scene.rotation().yaw;
        scene.handle(Input::PointerEnter);
        scene.handle(Input::PointerMove(Point::new(125.0, 160.0)));
        assert_eq!(scene.rotation(), Rotation::new(0.0, yaw));
    }

    #[test]
    fn test_replace_catalog_drops_missing_hover() {
        let mut scene = mount(SceneKind::Orbit);
        scene.handle(Input::NodeEnter(ItemId::from("crm")));

        let same = Catalog::builtin(SceneKind::Orbit, 120.0).unwrap();
        assert!(!scene.replace_catalog(same).should_redraw);
        assert!(scene.tracker().hovered().is_some());

        let cloud = Catalog::builtin(SceneKind::Cloud, 120.0).unwrap();
        assert!(scene.replace_catalog(cloud).should_redraw);
        assert_eq!(scene.tracker().hovered(), None);
    }

    #[test]
    fn test_unmounted_scene_produces_no_frames() {
        let mut scene = mount(SceneKind::Cloud);
        scene.unmount();
        assert!(scene.frame().is_none());
        assert!(!scene.advance(0.016).should_redraw);
        assert_eq!(scene.time(), 0.0);
    }
}
