pub mod rect;
pub mod surface;
pub mod reconcile;
pub mod input;
pub mod source;
pub mod view;
pub mod config;
pub mod gpu;
pub mod app;

use std::io::Write;

pub fn log_path() -> std::path::PathBuf {
    std::env::current_exe()
        .unwrap_or_default()
        .parent()
        .unwrap_or(std::path::Path::new("."))
        .join("webtex_debug.log")
}

pub fn log(msg: &str) {
    use std::fs::OpenOptions;
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
        .and_then(|mut f| {
            Write::write_all(&mut f, msg.as_bytes())?;
            Write::write_all(&mut f, b"\n")
        });
}
