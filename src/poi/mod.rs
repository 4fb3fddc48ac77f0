//! Points of interest and the selection flow that aims the off-screen pointer.
pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::PoiPlugin;
