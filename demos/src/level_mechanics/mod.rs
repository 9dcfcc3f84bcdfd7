use bevy::prelude::*;
use bevy_hood::HoodOutline;

pub struct LevelMechanicsPlugin;

impl Plugin for LevelMechanicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tint_outlined_objects);
    }
}

/// bevy-hood only flips [`HoodOutline`]. This demo draws it as an emissive glow.
fn tint_outlined_objects(
    query: Query<(&HoodOutline, &MeshMaterial3d<StandardMaterial>), Changed<HoodOutline>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (outline, material) in query.iter() {
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };
        material.emissive = if outline.0 {
            LinearRgba::rgb(0.8, 0.5, 0.0)
        } else {
            LinearRgba::BLACK
        };
    }
}
