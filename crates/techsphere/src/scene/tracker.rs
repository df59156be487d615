use super::SceneKind;
use super::item::ItemId;
use orbitkit::{Bounds, Point, Rotation};

/// Pointer engagement of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Engaged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Radians added to the auto-advance angle per idle tick.
    pub idle_step: f64,
    pub idle_pitch_amplitude: f64,
    pub pitch_sensitivity: f64,
    pub yaw_sensitivity: f64,
    /// When false the container keeps spinning under the pointer and ignores moves.
    pub follow_pointer: bool,
}

impl TrackerSettings {
    pub fn for_kind(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Cloud => Self {
                idle_step: 0.004,
                idle_pitch_amplitude: 0.1,
                pitch_sensitivity: 0.3,
                yaw_sensitivity: 0.5,
                follow_pointer: true,
            },
            SceneKind::Orbit => Self {
                idle_step: 0.002,
                idle_pitch_amplitude: 0.0,
                pitch_sensitivity: 0.0,
                yaw_sensitivity: 0.0,
                follow_pointer: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerAction {
    pub should_redraw: bool,
}

impl TrackerAction {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Rotation and hover state of one mounted visualization.
#[derive(Debug, Clone)]
pub struct Tracker {
    settings: TrackerSettings,
    bounds: Bounds,
    rotation: Rotation,
    auto_advance: f64,
    hovered: Option<ItemId>,
    mode: Mode,
    mounted: bool,
}

impl Tracker {
    pub fn new(settings: TrackerSettings, bounds: Bounds) -> Self {
        Self {
            settings,
            bounds,
            rotation: Rotation::default(),
            auto_advance: 0.0,
            hovered: None,
            mode: Mode::Idle,
            mounted: true,
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn auto_advance(&self) -> f64 {
        self.auto_advance
    }

    pub fn hovered(&self) -> Option<&ItemId> {
        self.hovered.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_pointer_active(&self) -> bool {
        self.mode == Mode::Engaged
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: TrackerSettings) {
        self.settings = settings;
    }

    fn spins(&self) -> bool {
        self.mode == Mode::Idle || !self.settings.follow_pointer
    }

    /// One animation frame. Only an idle container moves on its own.
    pub fn tick(&mut self) -> TrackerAction {
        if !self.mounted || !self.spins() {
            return TrackerAction::none();
        }

        self.auto_advance += self.settings.idle_step;
        self.spin_to_auto_advance();
        TrackerAction::new(true)
    }

    /// `ticks` frames at once.
    pub fn tick_n(&mut self, ticks: u64) -> TrackerAction {
        if ticks == 0 || !self.mounted || !self.spins() {
            return TrackerAction::none();
        }

        self.auto_advance += self.settings.idle_step * ticks as f64;
        self.spin_to_auto_advance();
        TrackerAction::new(true)
    }

    fn spin_to_auto_advance(&mut self) {
        self.rotation = Rotation::new(
            self.settings.idle_pitch_amplitude * (self.auto_advance * 0.5).sin(),
            self.auto_advance,
        );
    }

    pub fn pointer_enter(&mut self) -> TrackerAction {
        if !self.mounted || self.mode == Mode::Engaged {
            return TrackerAction::none();
        }
        log::debug!("pointer engaged at yaw {:.3}", self.rotation.yaw);
        self.mode = Mode::Engaged;
        TrackerAction::none()
    }

    pub fn pointer_leave(&mut self) -> TrackerAction {
        if !self.mounted {
            return TrackerAction::none();
        }
        let had_hover = self.hovered.take().is_some();
        self.mode = Mode::Idle;
        TrackerAction::new(had_hover)
    }

    /// Rotation follows the pointer without easing; re-entry may jump.
    pub fn pointer_move(&mut self, pointer: Point) -> TrackerAction {
        if !self.mounted || self.mode != Mode::Engaged || !self.settings.follow_pointer {
            return TrackerAction::none();
        }

        let offset = self.bounds.normalized_offset(pointer);
        let rotation = Rotation::new(
            offset.y * self.settings.pitch_sensitivity,
            offset.x * self.settings.yaw_sensitivity + self.auto_advance,
        );
        let changed = rotation != self.rotation;
        self.rotation = rotation;
        TrackerAction::new(changed)
    }

    pub fn resize(&mut self, bounds: Bounds) {
        if self.mounted {
            self.bounds = bounds;
        }
    }

    /// Last entered node wins.
    pub fn node_enter(&mut self, id: ItemId) -> TrackerAction {
        if !self.mounted || self.hovered.as_ref() == Some(&id) {
            return TrackerAction::none();
        }
        self.hovered = Some(id);
        TrackerAction::new(true)
    }

    /// Leaving a node that was already replaced by another enter changes nothing.
    pub fn node_leave(&mut self, id: &ItemId) -> TrackerAction {
        if !self.mounted || self.hovered.as_ref() != Some(id) {
            return TrackerAction::none();
        }
        self.hovered = None;
        TrackerAction::new(true)
    }

    /// Drops the hovered id unless `keep` still accepts it.
    pub fn retain_hover(&mut self, keep: impl Fn(&ItemId) -> bool) -> TrackerAction {
        let stale = self.hovered.as_ref().is_some_and(|id| !keep(id));
        if stale {
            self.hovered = None;
        }
        TrackerAction::new(stale)
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.hovered = None;
        self.mode = Mode::Idle;
    }
}
