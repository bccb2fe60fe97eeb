pub mod config;
pub mod encode;
pub mod error;
pub mod event;
pub mod format;
pub mod logging;
pub mod monitor;
pub mod package;
pub mod schedule;
pub mod system;
pub mod tracker;
