//! Config file change monitor — watches the TOML and sends reload events.

use std::sync::mpsc;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use winit::event_loop::EventLoopProxy;

use super::config_path;
use crate::app::ViewEvent;
use crate::log;

/// Debounce window after the first change event; editors often write a
/// config file several times in quick succession.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the config file's parent directory and sends
/// `ViewEvent::ConfigReload` through the event loop proxy whenever the file
/// changes. The watcher thread shuts down when the monitor is dropped.
pub struct ConfigMonitor {
    shutdown_tx: mpsc::Sender<()>,
}

impl ConfigMonitor {
    /// Start watching. Returns `None` when the directory cannot be watched
    /// (missing, or the platform watcher fails) — the viewer then simply
    /// runs without hot reload.
    pub fn new(proxy: EventLoopProxy<ViewEvent>) -> Option<Self> {
        let config_file = config_path();
        let parent = config_file.parent()?.to_path_buf();
        if !parent.exists() {
            log(&format!(
                "config_monitor: {} does not exist, hot reload disabled",
                parent.display()
            ));
            return None;
        }

        let (notify_tx, notify_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let mut watcher = notify::recommended_watcher(notify_tx)
            .map_err(|e| log(&format!("config_monitor: watcher failed: {e}")))
            .ok()?;
        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|e| log(&format!("config_monitor: watch failed: {e}")))
            .ok()?;

        log(&format!("config_monitor: watching {}", parent.display()));

        // Detached: the thread exits via the shutdown channel or when the
        // event loop side goes away.
        let _ = std::thread::Builder::new()
            .name("config-watcher".into())
            .spawn(move || {
                // The watcher must live as long as the thread.
                let _watcher = watcher;
                loop {
                    let event = match notify_rx.recv() {
                        Ok(ev) => ev,
                        Err(_) => return,
                    };
                    if shutdown_rx.try_recv().is_ok() {
                        return;
                    }
                    let ours = matches!(&event, Ok(ev) if ev.paths.iter().any(|p| *p == config_file));
                    if !ours {
                        continue;
                    }
                    // Swallow the burst, then report once.
                    while notify_rx.recv_timeout(DEBOUNCE).is_ok() {}
                    if shutdown_rx.try_recv().is_ok() {
                        return;
                    }
                    log("config_monitor: config changed, requesting reload");
                    if proxy.send_event(ViewEvent::ConfigReload).is_err() {
                        return;
                    }
                }
            })
            .ok()?;

        Some(Self { shutdown_tx })
    }
}

impl Drop for ConfigMonitor {
    fn drop(&mut self) {
        // The thread notices on its next wakeup; no join, it may be
        // blocked in recv() until a further filesystem event arrives.
        let _ = self.shutdown_tx.send(());
    }
}
