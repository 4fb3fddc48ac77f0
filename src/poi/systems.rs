//! Systems spawning points of interest and applying selection changes.
use bevy::{ecs::message::MessageReader, prelude::*};

use crate::pointer::PointerTarget;

use super::{
    components::{PoiId, PoiSelection, PointOfInterest},
    config::PoiSettings,
    events::PoiSelectionRequest,
};

const NUMBER_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];
const DESELECT_KEY: KeyCode = KeyCode::Escape;

/// Spawns one sphere per configured point of interest, each with its own material.
pub fn spawn_points_of_interest(
    mut commands: Commands,
    settings: Res<PoiSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(settings.radius));

    for (index, point) in settings.points.iter().enumerate() {
        let id = PoiId::new(index as u32 + 1);
        let material = materials.add(StandardMaterial {
            base_color: settings.idle_color,
            perceptual_roughness: 0.6,
            ..default()
        });

        commands.spawn((
            Name::new(point.label.clone()),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(point.position),
            PointOfInterest::new(id, point.label.clone()),
        ));
        debug!("Spawned {} ({}) at {:?}", id, point.label, point.position);
    }

    info!("Spawned {} points of interest", settings.points.len());
}

/// Maps number keys to selection requests and Escape to deselection.
pub fn read_selection_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<PoiSelectionRequest>,
) {
    if keyboard.just_pressed(DESELECT_KEY) {
        requests.write(PoiSelectionRequest::Deselect);
        return;
    }

    if let Some(id) = keyboard
        .get_just_pressed()
        .find_map(|key| poi_id_for_key(*key))
    {
        requests.write(PoiSelectionRequest::Select(id));
    }
}

/// Applies selection requests: recolours points and aims the pointer.
pub fn apply_poi_selection(
    mut requests: MessageReader<PoiSelectionRequest>,
    settings: Res<PoiSettings>,
    mut selection: ResMut<PoiSelection>,
    mut pointer_target: ResMut<PointerTarget>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    poi_query: Query<(Entity, &PointOfInterest, &MeshMaterial3d<StandardMaterial>)>,
) {
    let mut changed = false;

    for request in requests.read() {
        match *request {
            PoiSelectionRequest::Select(id) => {
                let Some((entity, poi, _)) = poi_query.iter().find(|(_, poi, _)| poi.id == id)
                else {
                    warn!("Cannot select {}: no such point of interest", id);
                    continue;
                };

                if !selection.select(id) {
                    continue;
                }

                pointer_target.set_target(entity);
                info!("Selected {} ({})", id, poi.label);
                changed = true;
            }
            PoiSelectionRequest::Deselect => {
                let Some(previous) = selection.deselect() else {
                    continue;
                };

                pointer_target.clear_target();
                info!("Deselected {}", previous);
                changed = true;
            }
        }
    }

    if !changed {
        return;
    }

    for (_, poi, material) in poi_query.iter() {
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };
        material.base_color = if selection.is_active(poi.id) {
            settings.selected_color
        } else {
            settings.idle_color
        };
    }
}

/// Number key `n` selects the point with id `n`.
pub fn poi_id_for_key(key: KeyCode) -> Option<PoiId> {
    NUMBER_KEYS
        .iter()
        .position(|candidate| *candidate == key)
        .map(|index| PoiId::new(index as u32 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_map_to_ids() {
        assert_eq!(poi_id_for_key(KeyCode::Digit1), Some(PoiId::new(1)));
        assert_eq!(poi_id_for_key(KeyCode::Digit9), Some(PoiId::new(9)));
        assert_eq!(poi_id_for_key(KeyCode::Digit0), None);
        assert_eq!(poi_id_for_key(KeyCode::KeyW), None);
    }
}
