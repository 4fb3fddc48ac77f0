//! WorldPlugin sets up the scene and the camera the pointer projects through.
use bevy::prelude::*;

use crate::world::systems::{
    fly_camera_mouse_look, fly_camera_translate, spawn_world_environment, update_cursor_grab,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment).add_systems(
            Update,
            (
                update_cursor_grab,
                fly_camera_mouse_look.after(update_cursor_grab),
                fly_camera_translate,
            ),
        );
    }
}
