//! Core module wiring the fixed simulation tick.
pub mod plugin;

pub use plugin::CorePlugin;
