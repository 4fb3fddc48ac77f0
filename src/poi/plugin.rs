//! PoiPlugin spawns points of interest and wires the selection collaborator.
use bevy::prelude::*;

use super::{
    components::PoiSelection,
    config::PoiSettings,
    events::PoiSelectionRequest,
    systems::{apply_poi_selection, read_selection_keys, spawn_points_of_interest},
};

/// Plugin providing selectable points of interest.
///
/// Selecting a point writes its entity into `PointerTarget`; deselecting clears it.
/// Requires `PointerPlugin` for the `PointerTarget` resource.
pub struct PoiPlugin;

impl Plugin for PoiPlugin {
    fn build(&self, app: &mut App) {
        let settings = PoiSettings::load_or_default();
        info!(
            "Points of interest configured: {} (radius {:.2})",
            settings.points.len(),
            settings.radius
        );

        app.insert_resource(settings)
            .init_resource::<PoiSelection>()
            .add_message::<PoiSelectionRequest>()
            .add_systems(Startup, spawn_points_of_interest)
            .add_systems(
                Update,
                (read_selection_keys, apply_poi_selection).chain(),
            );
    }
}
