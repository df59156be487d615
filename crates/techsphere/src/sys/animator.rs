use crate::config::{Config, ConfigError};
use crate::events::AppEvent;
use crate::scene::{Frame, Input, Scene, TrackerAction};
use async_channel::{Receiver, Sender, TrySendError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Owner of a running animation loop. Stop it explicitly on unmount; dropping the
/// handle aborts the loop.
pub struct AnimationHandle {
    events: Sender<AppEvent>,
    task: Option<JoinHandle<Scene>>,
}

impl AnimationHandle {
    pub fn sender(&self) -> Sender<AppEvent> {
        self.events.clone()
    }

    /// Unmounts the scene, waits for the loop to finish and hands the scene back.
    pub async fn stop(mut self) -> Option<Scene> {
        let task = self.task.take()?;
        if self.events.send(AppEvent::Unmount).await.is_err() {
            log::debug!("animation loop already gone");
        }
        match task.await {
            Ok(scene) => Some(scene),
            Err(e) => {
                log::error!("Animation loop failed: {}", e);
                None
            }
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawns the per-frame loop. The loop is the only code that touches `scene`:
/// ticks and events are applied in arrival order on one task.
pub fn spawn<R>(
    scene: Scene,
    interval: Duration,
    (events_tx, events_rx): (Sender<AppEvent>, Receiver<AppEvent>),
    frames: Sender<Frame>,
    reload: R,
) -> AnimationHandle
where
    R: Fn() -> Result<Config, ConfigError> + Send + 'static,
{
    let task = tokio::spawn(run_loop(scene, interval, events_rx, frames, reload));
    AnimationHandle {
        events: events_tx,
        task: Some(task),
    }
}

async fn run_loop<R>(
    mut scene: Scene,
    interval: Duration,
    events: Receiver<AppEvent>,
    frames: Sender<Frame>,
    reload: R,
) -> Scene
where
    R: Fn() -> Result<Config, ConfigError>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            now = ticker.tick() => {
                let dt = now.duration_since(last).as_secs_f64();
                last = now;
                if scene.advance(dt).should_redraw && !publish(&mut scene, &frames) {
                    break;
                }
            }
            event = events.recv() => {
                let action = match event {
                    Ok(AppEvent::Input(input)) => {
                        log::debug!("input: {:?}", input);
                        scene.handle(input)
                    }
                    Ok(AppEvent::ConfigReload) => apply_reload(&mut scene, &reload),
                    Ok(AppEvent::Unmount) | Err(_) => {
                        scene.unmount();
                        break;
                    }
                };
                // inputs that change the picture show up before the next tick
                if action.should_redraw && !publish(&mut scene, &frames) {
                    break;
                }
            }
        }
    }

    scene
}

/// Offers the current frame to the consumer. Returns `false` once it is gone.
fn publish(scene: &mut Scene, frames: &Sender<Frame>) -> bool {
    let Some(frame) = scene.frame() else {
        return false;
    };
    match frames.try_send(frame) {
        Ok(()) => true,
        // the renderer is behind; it picks up the next frame
        Err(TrySendError::Full(_)) => true,
        Err(TrySendError::Closed(_)) => {
            log::info!("Frame consumer closed");
            scene.unmount();
            false
        }
    }
}

fn apply_reload<R>(scene: &mut Scene, reload: &R) -> TrackerAction
where
    R: Fn() -> Result<Config, ConfigError>,
{
    let config = match reload() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to reload config: {}", e);
            return TrackerAction::none();
        }
    };

    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to reload config: {}", e);
            return TrackerAction::none();
        }
    };

    let kind_changed = config.scene != scene.kind();
    scene.set_tracker_settings(config.tracker_settings());
    scene.set_view(config.view_settings());
    scene.set_locale(config.locale);
    scene.replace_catalog(catalog);
    if kind_changed {
        scene.handle(Input::Resize(config.scene.default_bounds()));
    }
    log::info!("Configuration reloaded");
    TrackerAction::new(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::scene::{Catalog, ItemId, ORBIT_BOUNDS, SceneKind, ViewSettings};

    const FRAME: Duration = Duration::from_millis(16);

    fn scene(kind: SceneKind) -> Scene {
        let config = Config {
            scene: kind,
            ..Config::default()
        };
        Scene::mount(
            config.catalog().unwrap(),
            config.tracker_settings(),
            kind.default_bounds(),
            Locale::En,
            ViewSettings::default(),
        )
    }

    fn no_reload() -> Result<Config, ConfigError> {
        Err(ConfigError::ConfigDirNotFound)
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_advance_time_and_yaw() {
        let (frame_tx, frame_rx) = async_channel::bounded(64);
        let handle = spawn(
            scene(SceneKind::Cloud),
            FRAME,
            async_channel::unbounded(),
            frame_tx,
            no_reload,
        );

        let mut prev_yaw = f64::NEG_INFINITY;
        let mut last = None;
        for _ in 0..30 {
            let frame = frame_rx.recv().await.unwrap();
            assert!(frame.rotation.yaw >= prev_yaw);
            prev_yaw = frame.rotation.yaw;
            last = Some(frame);
        }

        let last = last.unwrap();
        assert!((last.rotation.yaw - 30.0 * 0.004).abs() < 1e-9);
        assert!((last.time - 29.0 * 0.016).abs() < 1e-6);

        let scene = handle.stop().await.unwrap();
        assert!(!scene.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_reach_the_scene() {
        let (frame_tx, frame_rx) = async_channel::bounded(64);
        let handle = spawn(
            scene(SceneKind::Orbit),
            FRAME,
            async_channel::unbounded(),
            frame_tx,
            no_reload,
        );

        // locale first, so every frame that shows the panel is already localized
        let tx = handle.sender();
        tx.send(Input::Locale(Locale::Jp).into()).await.unwrap();
        tx.send(Input::NodeEnter(ItemId::from("ai")).into())
            .await
            .unwrap();

        let mut panel = None;
        for _ in 0..10 {
            panel = frame_rx.recv().await.unwrap().hovered;
            if panel.is_some() {
                break;
            }
        }
        let panel = panel.expect("hover never reached the scene");
        assert_eq!(panel.description, "業務システムでのAI活用");

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_frame_stream() {
        let (frame_tx, frame_rx) = async_channel::bounded(4);
        let handle = spawn(
            scene(SceneKind::Cloud),
            FRAME,
            async_channel::unbounded(),
            frame_tx,
            no_reload,
        );
        frame_rx.recv().await.unwrap();

        let scene = handle.stop().await.unwrap();
        assert!(scene.frame().is_none());

        // drain whatever was buffered before the stop, then the stream ends
        while frame_rx.recv().await.is_ok() {}
        assert!(frame_rx.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_swaps_catalog() {
        let (frame_tx, frame_rx) = async_channel::bounded(64);
        let reload = || -> Result<Config, ConfigError> {
            Ok(Config {
                scene: SceneKind::Orbit,
                locale: Locale::Jp,
                ..Config::default()
            })
        };
        let handle = spawn(
            scene(SceneKind::Cloud),
            FRAME,
            async_channel::unbounded(),
            frame_tx,
            reload,
        );

        handle.sender().send(AppEvent::ConfigReload).await.unwrap();

        let mut nodes = 0;
        for _ in 0..10 {
            let frame = frame_rx.recv().await.unwrap();
            nodes = frame.nodes.len();
            if nodes == 6 {
                assert_eq!(frame.locale, Locale::Jp);
                break;
            }
        }
        assert_eq!(nodes, 6);

        let scene = handle.stop().await.unwrap();
        assert_eq!(
            scene.catalog(),
            &Catalog::builtin(SceneKind::Orbit, 120.0).unwrap()
        );
        assert_eq!(scene.tracker().bounds(), ORBIT_BOUNDS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_redrawing_input_publishes_between_ticks() {
        let (frame_tx, frame_rx) = async_channel::bounded(64);
        let handle = spawn(
            scene(SceneKind::Orbit),
            Duration::from_secs(3600),
            async_channel::unbounded(),
            frame_tx,
            no_reload,
        );
        // mount tick
        assert_eq!(frame_rx.recv().await.unwrap().time, 0.0);

        let tx = handle.sender();
        tx.send(Input::NodeLeave(ItemId::from("ai")).into())
            .await
            .unwrap();
        tx.send(Input::NodeEnter(ItemId::from("ai")).into())
            .await
            .unwrap();

        // the leave changed nothing, so the next frame is the hover, not the hourly tick
        let frame = frame_rx.recv().await.unwrap();
        assert_eq!(frame.time, 0.0);
        assert_eq!(frame.hovered.unwrap().id, ItemId::from("ai"));

        handle.stop().await;
    }
}
