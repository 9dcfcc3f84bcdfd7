use bevy::prelude::*;

/// Allows disabling bevy-hood for a specific character.
///
/// This can be used to let some other system temporarily take control over a character.
///
/// This component is not mandatory - if omitted, bevy-hood will just assume it is enabled for
/// that entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum HoodToggle {
    /// Do not update the view sensor, and do not run the power logic.
    ///
    /// Outlines and the remembered outlined target keep their last value from before
    /// `HoodToggle::Disabled` was set.
    Disabled,
    /// Update the view sensor and run the power logic (including outlines), but the backend must
    /// not apply impulses, gravity changes or character motion.
    SenseOnly,
    #[default]
    /// The backend behaves normally - it updates the sensors and applies the motors.
    Enabled,
}

/// A ray in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoodRay {
    pub origin: Vec3,
    pub direction: Dir3,
    /// Maximum distance along `direction`.
    pub range: f32,
}

impl HoodRay {
    /// The point at the far end of the ray.
    pub fn end(&self) -> Vec3 {
        self.origin + self.range * *self.direction
    }
}

/// How a physics body may move, as reported by the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum HoodMobility {
    /// No rigid body, or a fixed one.
    #[default]
    Static,
    /// Moved by code (e.g. kinematic bodies) but not by the simulation.
    Stationary,
    /// Simulated by the physics engine. Only these can be pushed or pulled.
    Movable,
}

/// The physical material of a collider.
///
/// The power ability only affects movable bodies whose material name contains the configured
/// metal marker. A collider without this component is treated as having an empty material name.
#[derive(Component, Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoodMaterial {
    pub name: String,
}

impl HoodMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Render flag for the "outlined" highlight.
///
/// Drawing the highlight is left to the renderer - bevy-hood only toggles the flag. At most one
/// entity per character has it set at any time.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoodOutline(pub bool);

/// Everything the backend knows about the first collider hit by a [`HoodRay`].
#[derive(Debug, Clone, PartialEq)]
pub struct HoodHitRecord {
    /// The entity of the collider detected by the ray.
    pub entity: Entity,
    /// The hierarchy parent of the detected entity, if any.
    pub attach_parent: Option<Entity>,
    /// The entity's [`Name`], if it has one.
    pub name: Option<String>,
    /// The entity's [`HoodMaterial`] name, if it has one.
    pub material: Option<String>,
    pub mobility: HoodMobility,
    /// Mass of the body. Backends report [`f32::INFINITY`] when the mass is unknown.
    pub mass: f32,
    pub impact_point: Vec3,
    /// Distance from the ray origin to the impact point.
    pub distance: f32,
}

/// The character's view ray and whatever it hit this frame.
///
/// bevy-hood aims the sensor during
/// [`HoodPipelineSystems::Controls`](crate::HoodPipelineSystems::Controls). The physics backend
/// is responsible for casting it and updating [`output`](Self::output) during
/// [`HoodPipelineSystems::Sensors`](crate::HoodPipelineSystems::Sensors).
#[derive(Component, Debug, Clone)]
pub struct HoodViewSensor {
    /// The cast origin in world coordinates.
    pub cast_origin: Vec3,
    /// The cast direction in world coordinates.
    pub cast_direction: Dir3,
    pub cast_range: f32,
    pub output: Option<HoodHitRecord>,
}

impl Default for HoodViewSensor {
    fn default() -> Self {
        Self {
            cast_origin: Vec3::ZERO,
            cast_direction: Dir3::NEG_Z,
            cast_range: 0.0,
            output: None,
        }
    }
}

impl HoodViewSensor {
    /// The ray this sensor is (or was last) cast along.
    pub fn ray(&self) -> HoodRay {
        HoodRay {
            origin: self.cast_origin,
            direction: self.cast_direction,
            range: self.cast_range,
        }
    }
}

/// A single physical effect requested by the gameplay logic.
///
/// Outlines are not physical and never go through the buffer - bevy-hood sets [`HoodOutline`]
/// itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoodActuation {
    SetGravityEnabled { target: Entity, enabled: bool },
    ApplyImpulse { target: Entity, impulse: Vec3 },
}

/// Physical actuations requested by a character during the current frame, in order.
///
/// bevy-hood clears and refills this during
/// [`HoodPipelineSystems::Logic`](crate::HoodPipelineSystems::Logic). The physics backend is
/// responsible for draining it, in order and within the same frame, during
/// [`HoodPipelineSystems::Motors`](crate::HoodPipelineSystems::Motors). Gravity that gets
/// disabled for an impulse is re-enabled later in the same buffer, so applying the whole buffer
/// always leaves gravity restored.
#[derive(Component, Default, Debug)]
pub struct HoodPhysicsActuation(Vec<HoodActuation>);

impl HoodPhysicsActuation {
    pub fn set_gravity_enabled(&mut self, target: Entity, enabled: bool) {
        self.0.push(HoodActuation::SetGravityEnabled { target, enabled });
    }

    pub fn apply_impulse(&mut self, target: Entity, impulse: Vec3) {
        self.0.push(HoodActuation::ApplyImpulse { target, impulse });
    }

    pub fn iter(&self) -> impl Iterator<Item = &HoodActuation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Take the buffered actuations out, in the order they were requested.
    pub fn drain(&mut self) -> impl Iterator<Item = HoodActuation> + '_ {
        self.0.drain(..)
    }
}

/// Instructions on how to move the character's own rigid body.
///
/// bevy-hood updates this during
/// [`HoodPipelineSystems::Controls`](crate::HoodPipelineSystems::Controls). The physics backend
/// is responsible for reading it during
/// [`HoodPipelineSystems::Motors`](crate::HoodPipelineSystems::Motors).
#[derive(Component, Default, Debug, Clone)]
pub struct HoodCharacterMotor {
    /// Horizontal velocity the character should move at.
    pub desired_velocity: Vec3,
    /// Upward velocity to start a jump with, if the character wants to jump this frame.
    pub jump_velocity: Option<f32>,
}

/// Written by the physics backend when two colliders start overlapping.
///
/// Backends write one event for each side of the pair, so that `entity` can be matched against
/// the character.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoodOverlapStarted {
    pub entity: Entity,
    pub other: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actuations_drain_in_request_order() {
        let body = Entity::from_raw(4);
        let mut actuation = HoodPhysicsActuation::default();
        actuation.set_gravity_enabled(body, false);
        actuation.apply_impulse(body, Vec3::X);
        actuation.set_gravity_enabled(body, true);

        let drained: Vec<HoodActuation> = actuation.drain().collect();
        assert_eq!(
            drained,
            [
                HoodActuation::SetGravityEnabled {
                    target: body,
                    enabled: false
                },
                HoodActuation::ApplyImpulse {
                    target: body,
                    impulse: Vec3::X
                },
                HoodActuation::SetGravityEnabled {
                    target: body,
                    enabled: true
                },
            ]
        );
        assert!(actuation.is_empty());
    }
}
