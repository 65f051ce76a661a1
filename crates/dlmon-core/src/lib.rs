pub mod app_dirs;
pub mod config;
pub mod logging;

pub mod classify;
pub mod estimator;
pub mod finder;
pub mod library;
pub mod locator;
pub mod monitor;
pub mod pause_signal;
pub mod title;
pub mod vdf;
