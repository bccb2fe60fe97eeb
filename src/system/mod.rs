pub mod collector;
pub mod platform;
pub mod process;
