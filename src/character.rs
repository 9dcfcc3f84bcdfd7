use bevy::prelude::*;
use bevy_hood_physics_integration_layer::data_for_backends::{
    HoodCharacterMotor, HoodPhysicsActuation, HoodToggle, HoodViewSensor,
};

use crate::config::{HoodCharacterConfig, HoodPowerConfig};
use crate::hud::HoodHudState;
use crate::input::{HoodAxis, HoodInputState};
use crate::power::HoodPowerState;

/// The main component of a first-person character controlled by bevy-hood.
///
/// The entity must also be configured as a dynamic rigid body of the physics backend. All the
/// other components bevy-hood needs are required components and get added automatically with
/// their defaults.
#[derive(Component, Debug, Clone)]
#[require(
    HoodInputState,
    HoodCharacterConfig,
    HoodPowerConfig,
    HoodPowerState,
    HoodViewAngles,
    HoodViewSensor,
    HoodCharacterMotor,
    HoodPhysicsActuation,
    HoodHudState
)]
pub struct HoodCharacter {
    /// Impulse magnitude of the power ability.
    pub power: f32,
    pub crouched: bool,
    /// Set once the character picks up the key.
    pub has_key: bool,
}

impl Default for HoodCharacter {
    fn default() -> Self {
        Self {
            power: 50.0,
            crouched: false,
            has_key: false,
        }
    }
}

/// Change of stance caused by [`HoodCharacter::toggle_crouch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoodStanceChange {
    Crouched,
    StoodUp,
}

impl HoodCharacter {
    /// Flip between crouching and standing.
    pub fn toggle_crouch(&mut self) -> HoodStanceChange {
        if self.crouched {
            self.crouched = false;
            HoodStanceChange::StoodUp
        } else {
            self.crouched = true;
            HoodStanceChange::Crouched
        }
    }

    /// Grow or shrink the power magnitude, keeping it within the configured bounds.
    pub fn adjust_power(&mut self, value: f32, config: &HoodPowerConfig) {
        if value == 0.0 {
            return;
        }
        self.power = (self.power + value * config.power_step).clamp(config.min_power, config.max_power);
    }
}

/// Where the character is looking, in radians.
///
/// Yaw turns the whole character. Pitch only affects the view (and with it the power's ray).
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct HoodViewAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl HoodViewAngles {
    /// Apply one frame of look input.
    pub fn apply_look(&mut self, input: &HoodInputState, config: &HoodCharacterConfig, dt: f32) {
        let yaw_degrees = input.axis(HoodAxis::Turn) * config.yaw_input_scale
            + input.axis(HoodAxis::TurnRate) * config.turn_rate * dt;
        let pitch_degrees = input.axis(HoodAxis::LookUp) * config.pitch_input_scale
            + input.axis(HoodAxis::LookUpRate) * config.look_up_rate * dt;

        // Positive turn input turns right, which is negative rotation around Y.
        self.yaw -= yaw_degrees.to_radians();
        let max_pitch = config.max_pitch.to_radians();
        self.pitch = (self.pitch + pitch_degrees.to_radians()).clamp(-max_pitch, max_pitch);
    }

    /// Rotation of the character's body.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Rotation of the view (camera).
    pub fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// The direction the character is looking at.
    pub fn view_forward(&self) -> Dir3 {
        self.view_rotation() * Dir3::NEG_Z
    }

    /// The horizontal direction the character is facing.
    pub fn actor_forward(&self) -> Dir3 {
        self.body_rotation() * Dir3::NEG_Z
    }

    pub fn actor_right(&self) -> Dir3 {
        self.body_rotation() * Dir3::X
    }
}

/// Sum one frame of movement axes along the character's forward and right directions.
///
/// Axes that are exactly zero contribute nothing.
pub fn movement_input(angles: &HoodViewAngles, input: &HoodInputState) -> Vec3 {
    let mut movement = Vec3::ZERO;
    for (axis, direction) in [
        (HoodAxis::MoveForward, angles.actor_forward()),
        (HoodAxis::MoveRight, angles.actor_right()),
    ] {
        let value = input.axis(axis);
        if value != 0.0 {
            movement += value * *direction;
        }
    }
    movement
}

#[allow(clippy::type_complexity)]
pub(crate) fn apply_character_controls_system(
    time: Res<Time>,
    mut query: Query<(
        &mut HoodCharacter,
        &mut HoodInputState,
        &HoodCharacterConfig,
        &HoodPowerConfig,
        &mut HoodViewAngles,
        &mut HoodCharacterMotor,
        &mut HoodViewSensor,
        &mut Transform,
        Option<&HoodToggle>,
    )>,
) {
    let dt = time.delta_secs();
    for (
        mut character,
        mut input,
        config,
        power_config,
        mut angles,
        mut motor,
        mut sensor,
        mut transform,
        toggle,
    ) in query.iter_mut()
    {
        if toggle.copied().unwrap_or_default() == HoodToggle::Disabled {
            continue;
        }

        angles.apply_look(&input, config, dt);
        transform.rotation = angles.body_rotation();

        if input.take_crouch_request() {
            let change = character.toggle_crouch();
            debug!("Character {change:?}");
        }
        character.adjust_power(input.axis(HoodAxis::ChangePowerValue), power_config);

        let speed = if character.crouched {
            config.crouched_walk_speed
        } else {
            config.walk_speed
        };
        motor.desired_velocity = movement_input(&angles, &input).clamp_length_max(1.0) * speed;
        motor.jump_velocity = (input.jump_held && !character.crouched).then_some(config.jump_speed);

        let eye_height = if character.crouched {
            config.crouched_eye_height
        } else {
            config.eye_height
        };
        sensor.cast_origin = transform.translation + eye_height * Vec3::Y;
        sensor.cast_direction = angles.view_forward();
        sensor.cast_range = power_config.distance_power;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn crouch_alternates() {
        let mut character = HoodCharacter::default();
        assert_eq!(character.toggle_crouch(), HoodStanceChange::Crouched);
        assert!(character.crouched);
        assert_eq!(character.toggle_crouch(), HoodStanceChange::StoodUp);
        assert!(!character.crouched);
    }

    #[test]
    fn power_adjustment_is_clamped() {
        let config = HoodPowerConfig {
            min_power: 10.0,
            max_power: 100.0,
            power_step: 20.0,
            ..Default::default()
        };
        let mut character = HoodCharacter {
            power: 50.0,
            ..Default::default()
        };

        character.adjust_power(1.0, &config);
        assert_eq!(character.power, 70.0);
        character.adjust_power(5.0, &config);
        assert_eq!(character.power, 100.0);
        character.adjust_power(-10.0, &config);
        assert_eq!(character.power, 10.0);
    }

    #[test]
    fn turn_rate_is_scaled_by_time() {
        let config = HoodCharacterConfig::default();
        let mut input = HoodInputState::default();
        input.set_axis(HoodAxis::TurnRate, 1.0);
        let mut angles = HoodViewAngles::default();

        angles.apply_look(&input, &config, 2.0);

        // 45 degrees per second to the right, for two seconds.
        assert!((angles.yaw + FRAC_PI_2).abs() < 1e-5);
        assert!(angles.actor_forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn pitch_is_clamped() {
        let config = HoodCharacterConfig::default();
        let mut input = HoodInputState::default();
        input.set_axis(HoodAxis::LookUp, 10_000.0);
        let mut angles = HoodViewAngles::default();

        angles.apply_look(&input, &config, 0.0);

        assert!((angles.pitch - config.max_pitch.to_radians()).abs() < 1e-5);
        assert!(angles.view_forward().y > 0.99);
    }

    #[test]
    fn movement_follows_body_orientation() {
        let mut input = HoodInputState::default();
        input.set_axis(HoodAxis::MoveForward, 1.0);
        input.set_axis(HoodAxis::MoveRight, -1.0);
        let angles = HoodViewAngles {
            yaw: 0.0,
            pitch: 0.5,
        };

        let movement = movement_input(&angles, &input);

        assert!(movement.abs_diff_eq(Vec3::new(-1.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn zero_axes_do_not_move() {
        let input = HoodInputState::default();
        assert_eq!(
            movement_input(&HoodViewAngles::default(), &input),
            Vec3::ZERO
        );
    }
}
