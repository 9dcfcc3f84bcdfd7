use bevy::prelude::*;

/// Tuning of the power ability.
#[derive(Component, Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoodPowerConfig {
    /// How far the view ray reaches.
    pub distance_power: f32,

    /// Bodies at or above this mass get outlined but are never pushed or pulled.
    pub mass_limit_power: f32,

    /// A movable body is affected only if its material name contains this.
    pub metal_marker: String,

    /// The [`Name`] that marks an entity as a key.
    ///
    /// Keys are highlighted and pushed through their holder (the entity they are attached to)
    /// regardless of material, and are picked up when the character overlaps them.
    pub key_actor_name: String,

    /// Lower bound of the power magnitude.
    pub min_power: f32,

    /// Upper bound of the power magnitude.
    pub max_power: f32,

    /// How much one unit of the `ChangePowerValue` axis changes the power magnitude.
    pub power_step: f32,
}

impl Default for HoodPowerConfig {
    fn default() -> Self {
        Self {
            distance_power: 50.0,
            mass_limit_power: 100.0,
            metal_marker: "Metal".to_owned(),
            key_actor_name: "Keys".to_owned(),
            min_power: 1.0,
            max_power: 500.0,
            power_step: 5.0,
        }
    }
}

impl HoodPowerConfig {
    /// Whether a material name marks a metal body.
    ///
    /// A missing material is the same as an empty name, which is never metal.
    pub fn is_metal(&self, material: Option<&str>) -> bool {
        material.unwrap_or_default().contains(self.metal_marker.as_str())
    }

    /// Whether an entity name marks a key.
    pub fn is_key(&self, name: Option<&str>) -> bool {
        name == Some(self.key_actor_name.as_str())
    }
}

/// Tuning of the character's look and movement.
#[derive(Component, Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoodCharacterConfig {
    /// Degrees per second of yaw at full `TurnRate` input.
    pub turn_rate: f32,

    /// Degrees per second of pitch at full `LookUpRate` input.
    pub look_up_rate: f32,

    /// Degrees of yaw per unit of `Turn` input (e.g. per pixel of mouse motion).
    pub yaw_input_scale: f32,

    /// Degrees of pitch per unit of `LookUp` input.
    pub pitch_input_scale: f32,

    /// The view cannot pitch further up or down than this many degrees.
    pub max_pitch: f32,

    pub walk_speed: f32,
    pub crouched_walk_speed: f32,

    /// Upward velocity when starting a jump.
    pub jump_speed: f32,

    /// Height of the view ray origin above the character's translation.
    pub eye_height: f32,

    /// Height of the view ray origin while crouched.
    pub crouched_eye_height: f32,
}

impl Default for HoodCharacterConfig {
    fn default() -> Self {
        Self {
            turn_rate: 45.0,
            look_up_rate: 45.0,
            yaw_input_scale: 0.1,
            pitch_input_scale: 0.1,
            max_pitch: 89.0,
            walk_speed: 6.0,
            crouched_walk_speed: 3.0,
            jump_speed: 5.0,
            eye_height: 0.64,
            crouched_eye_height: 0.2,
        }
    }
}
