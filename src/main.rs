use bevy::prelude::*;

mod core;
mod poi;
mod pointer;
mod world;

use crate::{core::CorePlugin, poi::PoiPlugin, pointer::PointerPlugin, world::WorldPlugin};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            WorldPlugin,
            PointerPlugin,
            PoiPlugin, // After PointerPlugin to write PointerTarget
        ))
        .run();
}
