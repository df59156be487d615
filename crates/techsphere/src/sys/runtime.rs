use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Control socket and config watcher, running on the current tokio runtime.
pub struct Services {
    tasks: Vec<JoinHandle<()>>,
}

impl Services {
    pub fn shutdown(mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Services {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

pub fn start_background_services(
    config_path: Option<PathBuf>,
    socket_path: PathBuf,
    tx: Sender<AppEvent>,
) -> Services {
    let mut tasks = Vec::new();

    {
        let tx = tx.clone();
        tasks.push(tokio::spawn(async move {
            crate::sys::server::run_server(&socket_path, tx).await;
        }));
    }

    match config_path {
        Some(config_path) => {
            let tx = tx.clone();
            tasks.push(tokio::spawn(async move {
                crate::config::run_async_watcher(config_path, tx).await;
            }));
        }
        None => log::warn!("No config path, live reload disabled"),
    }

    Services { tasks }
}
