//! Off-screen pointer: classifies a target's visibility each fixed tick and
//! steers a screen-space indicator toward it when it cannot be seen.
pub mod angle;
pub mod components;
pub mod config;
pub mod errors;
pub mod plugin;
pub mod projection;
pub mod sink;
pub mod state;
pub mod systems;
pub mod viewport;

pub use components::{PointerCamera, PointerTarget};
pub use plugin::PointerPlugin;
