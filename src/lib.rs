pub mod alert;
pub mod arc;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod util;

// Decoupled game loop architecture
pub mod actors;
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
