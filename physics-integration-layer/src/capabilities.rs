use bevy::prelude::*;

use crate::data_for_backends::{HoodHitRecord, HoodRay, HoodViewSensor};

/// Casts rays into the physics world.
pub trait HoodRaycastProvider {
    /// Find the first collider along `ray`, up to its range.
    fn cast_ray(&self, ray: &HoodRay) -> Option<HoodHitRecord>;
}

/// Applies physical effects to bodies in the physics world.
///
/// Implementations must tolerate targets that no longer exist (e.g. despawned since they were
/// hit) by ignoring them.
pub trait HoodPhysicsActuator {
    fn set_gravity_enabled(&mut self, target: Entity, enabled: bool);

    /// Apply an instantaneous impulse to the target's center of mass.
    fn apply_impulse(&mut self, target: Entity, impulse: Vec3);

    fn set_outlined(&mut self, target: Entity, outlined: bool);
}

/// The sensor serves the cast the backend already performed for it this frame.
///
/// It only knows about its own ray - asking it about any other ray yields no hit.
impl HoodRaycastProvider for HoodViewSensor {
    fn cast_ray(&self, ray: &HoodRay) -> Option<HoodHitRecord> {
        if *ray != self.ray() {
            debug!("View sensor asked for {ray:?} which it did not cast");
            return None;
        }
        self.output.clone()
    }
}
