//! PointerPlugin registers the indicator, its configuration, and the fixed-tick engine.
use bevy::prelude::*;

use super::{
    components::PointerTarget,
    config::PointerSettings,
    systems::{
        refresh_main_viewport, spawn_pointer_icon, toggle_pointer_enabled,
        update_offscreen_pointer,
    },
    viewport::MainViewport,
};

#[cfg(feature = "pointer_debug")]
use super::systems::{spawn_pointer_debug_text, update_pointer_debug_text};

/// Plugin providing the off-screen pointer.
///
/// # System Ordering
///
/// 1. `refresh_main_viewport` - Recomputes the viewport extent (FixedUpdate)
/// 2. `update_offscreen_pointer` - Runs the state machine against the extent (FixedUpdate)
///
/// # Dependencies
///
/// - A camera tagged with `PointerCamera` (spawned by `WorldPlugin`)
/// - A selection collaborator writing `PointerTarget` (provided by `PoiPlugin`)
pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        let settings = PointerSettings::load_or_default();
        info!(
            "Pointer configured: indicator {:.0}x{:.0}px, insets t{:.0} b{:.0} l{:.0} r{:.0}, enabled {}",
            settings.footprint.x,
            settings.footprint.y,
            settings.insets.top,
            settings.insets.bottom,
            settings.insets.left,
            settings.insets.right,
            settings.start_enabled
        );

        app.insert_resource(PointerTarget::new(settings.start_enabled))
            .insert_resource(settings)
            .init_resource::<MainViewport>()
            .add_systems(Startup, spawn_pointer_icon)
            .add_systems(Update, toggle_pointer_enabled)
            .add_systems(
                FixedUpdate,
                (refresh_main_viewport, update_offscreen_pointer).chain(),
            );

        #[cfg(feature = "pointer_debug")]
        {
            app.add_systems(Startup, spawn_pointer_debug_text)
                .add_systems(Update, update_pointer_debug_text);
        }
    }
}
