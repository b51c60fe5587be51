//! Config file change monitor: watches the TOML file and sends reload events.

use std::path::Path;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use winit::event_loop::EventLoopProxy;

use super::config_path;
use crate::app::MenuEvent;

/// Quiet period after the last file event before a reload is sent.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// How often an idle watcher thread checks for shutdown.
const SHUTDOWN_POLL: Duration = Duration::from_millis(500);

/// Watches the config file's parent directory for changes and sends
/// `MenuEvent::ConfigReload` through the event loop proxy when the
/// config file is modified.
pub struct ConfigMonitor {
    shutdown_tx: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl ConfigMonitor {
    /// Start watching the config file for changes.
    /// Returns `None` if the parent directory doesn't exist.
    pub fn new(proxy: EventLoopProxy<MenuEvent>) -> Option<Self> {
        let path = config_path();
        let parent = path.parent()?.to_path_buf();

        if !parent.exists() {
            log::info!(
                "config_monitor: {} does not exist, not watching",
                parent.display()
            );
            return None;
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (notify_tx, notify_rx) = mpsc::channel();

        let mut watcher = match notify::recommended_watcher(notify_tx) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config_monitor: failed to create watcher: {e}");
                return None;
            }
        };

        if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
            log::warn!("config_monitor: failed to watch {}: {e}", parent.display());
            return None;
        }

        log::debug!("config_monitor: watching {}", parent.display());

        let thread = std::thread::Builder::new()
            .name("config-watcher".into())
            .spawn(move || {
                // The watcher stops when dropped.
                let _watcher = watcher;
                watch_loop(&path, &proxy, &notify_rx, &shutdown_rx);
            })
            .ok()?;

        Some(Self {
            shutdown_tx,
            thread: Some(thread),
        })
    }

    /// Shut down the watcher thread.
    pub fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

fn watch_loop(
    config_file: &Path,
    proxy: &EventLoopProxy<MenuEvent>,
    notify_rx: &mpsc::Receiver<Result<notify::Event, notify::Error>>,
    shutdown_rx: &mpsc::Receiver<()>,
) {
    loop {
        let event = match notify_rx.recv_timeout(SHUTDOWN_POLL) {
            Ok(event) => event,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if shutdown_rx.try_recv().is_ok() {
                    return;
                }
                continue;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => return,
        };
        if shutdown_rx.try_recv().is_ok() {
            return;
        }
        if !concerns(&event, config_file) {
            continue;
        }

        // Editors write in bursts; wait for the burst to end.
        while notify_rx.recv_timeout(DEBOUNCE).is_ok() {}

        if shutdown_rx.try_recv().is_ok() {
            return;
        }

        log::debug!("config_monitor: config file changed, sending reload event");
        if proxy.send_event(MenuEvent::ConfigReload).is_err() {
            // Event loop closed.
            return;
        }
    }
}

/// Whether a watcher event touched the config file.
fn concerns(event: &Result<notify::Event, notify::Error>, config_file: &Path) -> bool {
    match event {
        Ok(ev) => ev.paths.iter().any(|p| p == config_file),
        Err(_) => false,
    }
}
