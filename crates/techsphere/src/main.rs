use clap::{Parser, Subcommand};
use orbitkit::SphereLayout;
use orbitkit::sphere::DEFAULT_RADIUS;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use techsphere::config::{self, Config};
use techsphere::locale::Locale;
use techsphere::render::{Presentation, SnapshotOptions, Surface, TextSurface, snapshot_factory};
use techsphere::scene::{Frame, Input, ItemId, Scene, SceneKind};
use techsphere::sys::{animator, runtime};

#[derive(Parser, Debug)]
#[command(name = "techsphere", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Socket of the running instance (overrides the config file)
    #[arg(short = 's', long, global = true)]
    socket: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the points of a Fibonacci sphere.
    Layout {
        #[arg(short = 'n', long, default_value_t = 18)]
        count: usize,
        #[arg(short = 'r', long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        #[arg(long)]
        json: bool,
    },
    /// Resolve a single frame of a scene.
    Frame {
        #[arg(long)]
        scene: Option<SceneKind>,
        /// Seconds since mount
        #[arg(short = 't', long, default_value_t = 0.0)]
        time: f64,
        /// Item to hover
        #[arg(long)]
        hover: Option<String>,
        #[arg(long)]
        locale: Option<Locale>,
        #[arg(long)]
        json: bool,
        /// Also rasterize the frame to a PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Run the animation loop with the control socket and live config reload.
    Run {
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,
    },
    /// Send protocol lines to a running instance.
    Send {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Write the default config file and print its path.
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            count,
            radius,
            json,
        } => print_layout(count, radius, json),
        Commands::Frame {
            scene,
            time,
            hover,
            locale,
            json,
            png,
        } => {
            let mut config = config::load_or_default();
            if let Some(scene) = scene {
                config.scene = scene;
            }
            if let Some(locale) = locale {
                config.locale = locale;
            }
            print_frame(&config, time, hover, json, png)
        }
        Commands::Run { frames } => {
            let mut config = config::load_or_default();
            if let Some(socket) = cli.socket {
                config.socket_path = socket;
            }
            run(config, frames).await
        }
        Commands::Send { lines } => {
            let socket = match cli.socket {
                Some(socket) => socket,
                None => config::load_or_default().socket_path,
            };
            send_lines(&socket, &lines)
        }
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn print_layout(count: usize, radius: f64, json: bool) -> anyhow::Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        anyhow::bail!("radius must be a positive number, got {}", radius);
    }

    let layout = SphereLayout::new(count, radius);
    if json {
        println!("{}", serde_json::to_string_pretty(layout.points())?);
    } else {
        for (i, p) in layout.points().iter().enumerate() {
            println!("{:>3} {}", i, p);
        }
    }
    Ok(())
}

fn mount(config: &Config) -> anyhow::Result<Scene> {
    Ok(Scene::mount(
        config.catalog()?,
        config.tracker_settings(),
        config.scene.default_bounds(),
        config.locale,
        config.view_settings(),
    ))
}

fn print_frame(
    config: &Config,
    time: f64,
    hover: Option<String>,
    json: bool,
    png: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !time.is_finite() || time < 0.0 {
        anyhow::bail!("time must be a non-negative number, got {}", time);
    }

    let mut scene = mount(config)?;
    if let Some(id) = hover {
        let id = ItemId::new(id);
        if !scene.catalog().contains(&id) {
            anyhow::bail!("no item '{}' in the {} scene", id, scene.kind());
        }
        scene.handle(Input::NodeEnter(id));
    }

    // a live run ticks once at mount with dt 0, then once per frame interval
    scene.advance(0.0);
    let dt = config.frame_interval().as_secs_f64();
    scene.fast_forward((time / dt).round() as u64, dt);

    let frame = scene
        .frame()
        .ok_or_else(|| anyhow::anyhow!("scene is not mounted"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        TextSurface::new(std::io::stdout().lock()).draw(&frame)?;
    }

    if let Some(path) = png {
        let options = SnapshotOptions::for_kind(scene.kind());
        let mut presentation = Presentation::mount(snapshot_factory(path.clone(), options));
        match presentation.fallback_text(frame.locale) {
            Some(message) => eprintln!("{}", message),
            None => {
                presentation.present(&frame)?;
                eprintln!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}

async fn run(config: Config, limit: Option<u64>) -> anyhow::Result<()> {
    let scene = mount(&config)?;
    let events = async_channel::bounded(32);
    let (frame_tx, frame_rx) = async_channel::bounded::<Frame>(4);

    let config_path = match config::get_config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    let services =
        runtime::start_background_services(config_path, config.socket_path.clone(), events.0.clone());
    let handle = animator::spawn(
        scene,
        config.frame_interval(),
        events,
        frame_tx,
        config::load_config,
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut count = 0u64;
    let mut hovered: Option<ItemId> = None;
    loop {
        tokio::select! {
            frame = frame_rx.recv() => {
                let Ok(frame) = frame else { break };
                count += 1;

                let current = frame.hovered.as_ref().map(|panel| panel.id.clone());
                if current != hovered {
                    match &frame.hovered {
                        Some(panel) => log::info!("{}: {}", panel.label, panel.description),
                        None => log::info!("{}", frame.hint.unwrap_or_default()),
                    }
                    hovered = current;
                }

                if limit.is_some_and(|limit| count >= limit) {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    services.shutdown();
    if let Some(scene) = handle.stop().await {
        println!(
            "{} frames, {:.2}s, yaw {:.3}",
            count,
            scene.time(),
            scene.rotation().yaw
        );
    }
    Ok(())
}

fn send_lines(socket: &Path, lines: &[String]) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to techsphere at {}: {}. Is it running?",
            socket.display(),
            e
        )
    })?;

    for line in lines {
        writeln!(stream, "{}", line)?;
    }
    Ok(())
}
