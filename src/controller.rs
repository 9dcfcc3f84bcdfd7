use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;
use bevy_hood_physics_integration_layer::capabilities::HoodPhysicsActuator;
use bevy_hood_physics_integration_layer::data_for_backends::{
    HoodOutline, HoodOverlapStarted, HoodPhysicsActuation, HoodToggle, HoodViewSensor,
};
use bevy_hood_physics_integration_layer::{HoodPipelineSystems, HoodSystems};

use crate::character::{apply_character_controls_system, HoodCharacter};
use crate::config::HoodPowerConfig;
use crate::hud::update_hud_system;
use crate::input::HoodInputState;
use crate::pickup::handle_pickup_system;
use crate::power::{HoodPowerInput, HoodPowerState};
use crate::widget::assign_widget_owners_system;

/// The main plugin for bevy-hood.
///
/// A physics backend plugin (e.g. `HoodRapier3dPlugin`) is also needed, and both must use the
/// same schedule.
pub struct HoodPlugin {
    schedule: InternedScheduleLabel,
}

impl HoodPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for HoodPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for HoodPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                HoodPipelineSystems::Input,
                HoodPipelineSystems::Controls,
                HoodPipelineSystems::Sensors,
                HoodPipelineSystems::Logic,
                HoodPipelineSystems::Motors,
            )
                .chain()
                .in_set(HoodSystems),
        );
        app.add_event::<HoodOverlapStarted>();
        app.add_systems(
            self.schedule,
            apply_character_controls_system.in_set(HoodPipelineSystems::Controls),
        );
        app.add_systems(
            self.schedule,
            (
                apply_power_system,
                handle_pickup_system,
                update_hud_system,
            )
                .chain()
                .in_set(HoodPipelineSystems::Logic),
        );
        app.add_systems(self.schedule, assign_widget_owners_system);
    }
}

/// Outlines are flipped right away. Everything else waits in the actuation buffer for the
/// backend.
struct LogicActuator<'a, 'q, 'qw, 'qs, 'c, 'cw, 'cs> {
    outlines: &'q mut Query<'qw, 'qs, &'static mut HoodOutline>,
    commands: &'c mut Commands<'cw, 'cs>,
    actuation: &'a mut HoodPhysicsActuation,
}

impl HoodPhysicsActuator for LogicActuator<'_, '_, '_, '_, '_, '_, '_> {
    fn set_gravity_enabled(&mut self, target: Entity, enabled: bool) {
        self.actuation.set_gravity_enabled(target, enabled);
    }

    fn apply_impulse(&mut self, target: Entity, impulse: Vec3) {
        self.actuation.apply_impulse(target, impulse);
    }

    fn set_outlined(&mut self, target: Entity, outlined: bool) {
        if let Ok(mut outline) = self.outlines.get_mut(target) {
            outline.set_if_neq(HoodOutline(outlined));
            return;
        }
        if !outlined {
            return;
        }
        match self.commands.get_entity(target) {
            Ok(mut target_commands) => {
                target_commands.try_insert(HoodOutline(true));
            }
            Err(_) => {
                debug!("Cannot outline {target}, which no longer exists");
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn apply_power_system(
    mut query: Query<(
        Entity,
        &HoodCharacter,
        &HoodInputState,
        &HoodPowerConfig,
        &HoodViewSensor,
        &mut HoodPowerState,
        &mut HoodPhysicsActuation,
        Option<&HoodToggle>,
    )>,
    mut outlines_query: Query<&'static mut HoodOutline>,
    mut commands: Commands,
) {
    for (entity, character, input, config, sensor, mut power_state, mut actuation, toggle) in
        query.iter_mut()
    {
        actuation.clear();
        if toggle.copied().unwrap_or_default() == HoodToggle::Disabled {
            continue;
        }

        let mut actuator = LogicActuator {
            outlines: &mut outlines_query,
            commands: &mut commands,
            actuation: &mut *actuation,
        };
        let power_input = HoodPowerInput {
            held: input.active_power_held,
            power: character.power,
            push_mode: input.push_mode,
        };
        if let Err(err) = power_state.tick(
            config,
            power_input,
            &sensor.ray(),
            sensor,
            &mut actuator,
        ) {
            error!("Power of {entity} failed: {err}");
        }
    }
}
