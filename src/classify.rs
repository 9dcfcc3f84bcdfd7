use bevy::prelude::*;
use bevy_hood_physics_integration_layer::data_for_backends::{HoodHitRecord, HoodMobility};

use crate::config::HoodPowerConfig;
use crate::error::HoodError;

/// Whether a body is light enough to be pushed or pulled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoodMassClass {
    Liftable,
    TooHeavy { mass: f32 },
}

/// What the view ray hit, as far as the power ability is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoodTargetKind {
    /// A key attached to a holder. The holder is the physical body that gets outlined and moved.
    Key { key: Entity, holder: Entity },
    /// A movable body made of metal.
    Metal {
        entity: Entity,
        mass_class: HoodMassClass,
    },
    /// Anything the power does not affect - static bodies, non-metal materials, or colliders
    /// without a material.
    Other { entity: Entity },
}

impl HoodTargetKind {
    /// Classify a hit once, so that the power logic never needs to inspect the hit again.
    pub fn classify(hit: &HoodHitRecord, config: &HoodPowerConfig) -> Result<Self, HoodError> {
        if config.is_key(hit.name.as_deref()) {
            let holder = hit
                .attach_parent
                .ok_or(HoodError::KeyWithoutHolder { key: hit.entity })?;
            return Ok(Self::Key {
                key: hit.entity,
                holder,
            });
        }
        if hit.mobility == HoodMobility::Movable && config.is_metal(hit.material.as_deref()) {
            let mass_class = if hit.mass < config.mass_limit_power {
                HoodMassClass::Liftable
            } else {
                HoodMassClass::TooHeavy { mass: hit.mass }
            };
            return Ok(Self::Metal {
                entity: hit.entity,
                mass_class,
            });
        }
        Ok(Self::Other { entity: hit.entity })
    }
}
