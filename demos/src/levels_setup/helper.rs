use bevy::{
    ecs::system::{EntityCommands, SystemParam},
    prelude::*,
};
use bevy_hood::HoodMaterial;
use bevy_rapier3d::prelude as rapier;

use crate::levels_setup::LevelObject;

#[derive(SystemParam, Deref, DerefMut)]
pub struct LevelSetupHelper3d<'w, 's> {
    #[deref]
    pub commands: Commands<'w, 's>,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl LevelSetupHelper3d<'_, '_> {
    pub fn spawn_named(&'_ mut self, name: impl ToString) -> EntityCommands<'_> {
        self.commands.spawn((LevelObject, Name::new(name.to_string())))
    }

    pub fn spawn_floor(&'_ mut self, color: impl Into<Color>) -> EntityCommands<'_> {
        let mesh = self.meshes.add(Plane3d::default().mesh().size(128.0, 128.0));
        let material = self.materials.add(color.into());
        let mut cmd = self.spawn_named("Floor");
        cmd.insert((Mesh3d(mesh), MeshMaterial3d(material)));
        cmd.insert(rapier::RigidBody::Fixed);
        cmd.insert(rapier::Collider::cuboid(64.0, 0.01, 64.0));
        cmd
    }

    /// A box the power can see. Each box gets its own render material, so that it can be tinted
    /// on its own when outlined.
    pub fn spawn_crate(
        &'_ mut self,
        name: impl ToString,
        color: impl Into<Color>,
        material_name: &str,
        transform: Transform,
        size: Vec3,
        mass: f32,
    ) -> EntityCommands<'_> {
        let mesh = self.meshes.add(Cuboid::from_size(size));
        let material = self.materials.add(color.into());
        let mut cmd = self.spawn_named(name);
        cmd.insert((Mesh3d(mesh), MeshMaterial3d(material), transform));
        cmd.insert(rapier::RigidBody::Dynamic);
        cmd.insert(rapier::Collider::cuboid(0.5 * size.x, 0.5 * size.y, 0.5 * size.z));
        cmd.insert(rapier::ColliderMassProperties::Mass(mass));
        cmd.insert(HoodMaterial::new(material_name));
        cmd
    }
}
