use bevy::{ecs::system::SystemParam, prelude::*};
use bevy_hood_physics_integration_layer::data_for_backends::{
    HoodHitRecord, HoodMaterial, HoodMobility,
};
use bevy_rapier3d::prelude::*;

/// Looks up what bevy-hood needs to know about a collider hit by a ray.
///
/// A collider that is not a rigid body itself takes its mobility and mass from the rigid body it
/// is attached to.
#[derive(SystemParam)]
pub struct HoodHitTargetsRapier3d<'w, 's> {
    targets_query: Query<
        'w,
        's,
        (
            Option<&'static Name>,
            Option<&'static ChildOf>,
            Option<&'static HoodMaterial>,
            Option<&'static RigidBody>,
            Option<&'static ReadMassProperties>,
        ),
    >,
}

fn mobility_of(rigid_body: &RigidBody) -> HoodMobility {
    match rigid_body {
        RigidBody::Dynamic => HoodMobility::Movable,
        RigidBody::Fixed => HoodMobility::Static,
        RigidBody::KinematicPositionBased | RigidBody::KinematicVelocityBased => {
            HoodMobility::Stationary
        }
    }
}

impl HoodHitTargetsRapier3d<'_, '_> {
    pub fn hit_record(&self, entity: Entity, impact_point: Vec3, distance: f32) -> HoodHitRecord {
        let (name, parent, material, rigid_body, mass_properties) =
            self.targets_query.get(entity).unwrap_or_default();
        let attach_parent = parent.map(ChildOf::parent);

        let (rigid_body, mass_properties) = if rigid_body.is_some() {
            (rigid_body, mass_properties)
        } else if let Some((_, _, _, parent_body, parent_mass)) =
            attach_parent.and_then(|parent| self.targets_query.get(parent).ok())
        {
            (parent_body, parent_mass)
        } else {
            (None, None)
        };

        HoodHitRecord {
            entity,
            attach_parent,
            name: name.map(|name| name.as_str().to_owned()),
            material: material.map(|material| material.name.clone()),
            mobility: rigid_body.map(mobility_of).unwrap_or_default(),
            mass: mass_properties
                .map(|mass_properties| mass_properties.get().mass)
                .unwrap_or(f32::INFINITY),
            impact_point,
            distance,
        }
    }
}
