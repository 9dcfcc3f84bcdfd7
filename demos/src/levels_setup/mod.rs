mod helper;
pub mod first_person_level;

pub use helper::LevelSetupHelper3d;

use bevy::prelude::*;

#[derive(Component)]
pub struct LevelObject;

#[derive(Component)]
pub struct IsPlayer;
