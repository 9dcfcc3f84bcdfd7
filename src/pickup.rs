use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy_hood_physics_integration_layer::data_for_backends::{HoodOverlapStarted, HoodToggle};

use crate::character::HoodCharacter;
use crate::config::HoodPowerConfig;
use crate::error::HoodError;
use crate::power::HoodPowerState;

/// A key together with the holder it is attached to. Both are removed when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoodPickup {
    pub key: Entity,
    pub holder: Entity,
}

/// Decide whether overlapping `other` picks up a key.
///
/// Returns `Ok(None)` when `other` is not a key.
pub fn resolve_pickup(
    config: &HoodPowerConfig,
    other: Entity,
    name: Option<&str>,
    parent: Option<Entity>,
) -> Result<Option<HoodPickup>, HoodError> {
    if !config.is_key(name) {
        return Ok(None);
    }
    let holder = parent.ok_or(HoodError::KeyWithoutHolder { key: other })?;
    Ok(Some(HoodPickup { key: other, holder }))
}

pub(crate) fn handle_pickup_system(
    mut overlap_reader: EventReader<HoodOverlapStarted>,
    mut characters_query: Query<(
        &mut HoodCharacter,
        &HoodPowerConfig,
        &mut HoodPowerState,
        Option<&HoodToggle>,
    )>,
    others_query: Query<(Option<&Name>, Option<&ChildOf>)>,
    mut commands: Commands,
) {
    let mut picked_keys = HashSet::new();
    for overlap in overlap_reader.read() {
        let Ok((mut character, config, mut power_state, toggle)) =
            characters_query.get_mut(overlap.entity)
        else {
            continue;
        };
        if toggle.copied().unwrap_or_default() != HoodToggle::Enabled {
            continue;
        }
        if picked_keys.contains(&overlap.other) {
            continue;
        }
        let Ok((name, parent)) = others_query.get(overlap.other) else {
            continue;
        };
        match resolve_pickup(
            config,
            overlap.other,
            name.map(Name::as_str),
            parent.map(ChildOf::parent),
        ) {
            Ok(None) => {}
            Ok(Some(HoodPickup { key, holder })) => {
                picked_keys.insert(key);
                power_state.forget(key);
                power_state.forget(holder);
                commands.entity(key).try_despawn();
                commands.entity(holder).try_despawn();
                character.has_key = true;
                info!("Character {} picked up key {key}", overlap.entity);
            }
            Err(err) => {
                error!("Cannot pick up: {err}");
            }
        }
    }
}
