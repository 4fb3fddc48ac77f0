//! World module housing the scene, the fly camera, and occluding scenery.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
