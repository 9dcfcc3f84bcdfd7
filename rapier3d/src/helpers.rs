use bevy::prelude::*;
use bevy_hood_physics_integration_layer::data_for_backends::HoodRay;
use bevy_rapier3d::prelude::*;

#[derive(bevy::ecs::query::QueryData)]
pub struct PretendToBeRapierContext<'a> {
    pub simulation: &'a RapierContextSimulation,
    pub colliders: &'a RapierContextColliders,
    pub rigidbody_set: &'a RapierRigidBodySet,
}

/// The first collider along `ray` that passes `filter`, and where it was hit.
pub fn cast_hood_ray(
    context: &PretendToBeRapierContextItem,
    filter: QueryFilter,
    ray: &HoodRay,
) -> Option<(Entity, Vec3, f32)> {
    RapierQueryPipeline::new_scoped(
        &context.simulation.broad_phase,
        context.colliders,
        context.rigidbody_set,
        &filter,
        &bevy_rapier3d::parry::query::DefaultQueryDispatcher,
        |query_pipeline| {
            query_pipeline
                .cast_ray_and_get_normal(ray.origin, *ray.direction, ray.range, false)
                .map(|(entity, hit)| (entity, hit.point, hit.time_of_impact))
        },
    )
}
