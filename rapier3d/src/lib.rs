//! # bevy_rapier3d Integration for bevy-hood
//!
//! In addition to the instruction in bevy-hood's documentation:
//!
//! * Add [`HoodRapier3dPlugin`] to the Bevy app.
//! * Give the colliders the power should affect a
//!   [`HoodMaterial`](bevy_hood_physics_integration_layer::data_for_backends::HoodMaterial).
//! * Give the key's collider [`ActiveEvents::COLLISION_EVENTS`] so that overlapping it can be
//!   detected.
mod helpers;
mod hit_targets;

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use bevy_hood_physics_integration_layer::data_for_backends::{
    HoodActuation, HoodCharacterMotor, HoodMaterial, HoodOverlapStarted, HoodPhysicsActuation,
    HoodToggle, HoodViewSensor,
};
use bevy_hood_physics_integration_layer::{HoodPipelineSystems, HoodSystems};
pub use hit_targets::HoodHitTargetsRapier3d;

use self::helpers::{cast_hood_ray, PretendToBeRapierContext};

pub mod prelude {
    pub use crate::{HoodHitTargetsRapier3d, HoodRapier3dPlugin};
}

/// Add this plugin to use bevy_rapier3d as a physics backend.
///
/// This plugin should be used in addition to `HoodPlugin`, and both plugins must use the same
/// schedule - which should match the schedule Rapier runs in. By default, Rapier runs in
/// [`PostUpdate`] - which means this plugin and `HoodPlugin` should run in [`Update`].
pub struct HoodRapier3dPlugin {
    schedule: InternedScheduleLabel,
}

impl HoodRapier3dPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for HoodRapier3dPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for HoodRapier3dPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<HoodCharacterMotor, Velocity>()
            .register_required_components::<HoodMaterial, ReadMassProperties>();
        app.add_event::<HoodOverlapStarted>();
        app.configure_sets(
            self.schedule,
            HoodSystems.before(PhysicsSet::SyncBackend).run_if(
                |rapier_config: Single<&RapierConfiguration>| rapier_config.physics_pipeline_active,
            ),
        );
        app.add_systems(
            self.schedule,
            (update_view_sensors_system, forward_collision_events_system)
                .in_set(HoodPipelineSystems::Sensors),
        );
        app.add_systems(
            self.schedule,
            (replay_actuations_system, apply_motors_system).in_set(HoodPipelineSystems::Motors),
        );
    }
}

#[allow(clippy::type_complexity)]
fn update_view_sensors_system(
    rapier_context_query: Query<PretendToBeRapierContext>,
    mut sensor_query: Query<(
        Entity,
        &RapierContextEntityLink,
        &mut HoodViewSensor,
        Option<&HoodToggle>,
    )>,
    hit_targets: HoodHitTargetsRapier3d,
) {
    for (owner_entity, rapier_context_entity_link, mut sensor, hood_toggle) in
        sensor_query.iter_mut()
    {
        match hood_toggle.copied().unwrap_or_default() {
            HoodToggle::Disabled => continue,
            HoodToggle::SenseOnly => {}
            HoodToggle::Enabled => {}
        }

        let Ok(rapier_context) = rapier_context_query.get(rapier_context_entity_link.0) else {
            continue;
        };

        let query_filter = QueryFilter::new().exclude_rigid_body(owner_entity);
        let output = cast_hood_ray(&rapier_context, query_filter, &sensor.ray()).map(
            |(entity, impact_point, distance)| hit_targets.hit_record(entity, impact_point, distance),
        );
        sensor.output = output;
    }
}

fn forward_collision_events_system(
    mut collision_reader: EventReader<CollisionEvent>,
    mut overlap_writer: EventWriter<HoodOverlapStarted>,
) {
    for collision in collision_reader.read() {
        if let CollisionEvent::Started(entity1, entity2, _) = collision {
            overlap_writer.write(HoodOverlapStarted {
                entity: *entity1,
                other: *entity2,
            });
            overlap_writer.write(HoodOverlapStarted {
                entity: *entity2,
                other: *entity1,
            });
        }
    }
}

#[allow(clippy::type_complexity)]
fn replay_actuations_system(
    mut characters_query: Query<(&mut HoodPhysicsActuation, Option<&HoodToggle>)>,
    mut bodies_query: Query<(
        Option<&'static mut GravityScale>,
        Option<&'static mut ExternalImpulse>,
    )>,
    mut commands: Commands,
) {
    for (mut actuation, hood_toggle) in characters_query.iter_mut() {
        if actuation.is_empty() {
            continue;
        }
        match hood_toggle.copied().unwrap_or_default() {
            HoodToggle::Disabled | HoodToggle::SenseOnly => {
                actuation.clear();
                continue;
            }
            HoodToggle::Enabled => {}
        }
        for request in actuation.drain() {
            match request {
                HoodActuation::SetGravityEnabled { target, enabled } => {
                    let gravity_scale = GravityScale(if enabled { 1.0 } else { 0.0 });
                    match bodies_query.get_mut(target) {
                        Ok((Some(mut current), _)) => {
                            *current = gravity_scale;
                        }
                        Ok((None, _)) => {
                            commands.entity(target).try_insert(gravity_scale);
                        }
                        Err(_) => {
                            debug!("Cannot set gravity of {target}, which no longer exists");
                        }
                    }
                }
                HoodActuation::ApplyImpulse { target, impulse } => {
                    match bodies_query.get_mut(target) {
                        Ok((_, Some(mut external_impulse))) => {
                            external_impulse.impulse += impulse;
                        }
                        Ok((_, None)) => {
                            commands.entity(target).try_insert(ExternalImpulse {
                                impulse,
                                torque_impulse: Vec3::ZERO,
                            });
                        }
                        Err(_) => {
                            debug!("Cannot apply impulse to {target}, which no longer exists");
                        }
                    }
                }
            }
        }
    }
}

fn apply_motors_system(
    mut query: Query<(&HoodCharacterMotor, &mut Velocity, Option<&HoodToggle>)>,
) {
    for (motor, mut velocity, hood_toggle) in query.iter_mut() {
        match hood_toggle.copied().unwrap_or_default() {
            HoodToggle::Disabled | HoodToggle::SenseOnly => continue,
            HoodToggle::Enabled => {}
        }
        velocity.linvel.x = motor.desired_velocity.x;
        velocity.linvel.z = motor.desired_velocity.z;
        if let Some(jump_velocity) = motor.jump_velocity {
            // Only start a jump when not already moving vertically.
            if velocity.linvel.y.abs() < 0.1 {
                velocity.linvel.y = jump_velocity;
            }
        }
    }
}
