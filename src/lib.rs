#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod scenes;

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
