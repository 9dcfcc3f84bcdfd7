//! # Physics integration layer for bevy-hood
//!
//! The data and capability seams between bevy-hood's gameplay logic and a physics backend. A
//! backend crate (e.g. `bevy-hood-rapier3d`) is responsible for:
//!
//! * Casting the ray of each [`HoodViewSensor`](data_for_backends::HoodViewSensor) with its own
//!   physics queries during [`HoodPipelineSystems::Sensors`], and writing the hit into
//!   [`HoodViewSensor::output`](data_for_backends::HoodViewSensor::output). The sensor then
//!   serves that cached hit to the gameplay logic as a
//!   [`HoodRaycastProvider`](capabilities::HoodRaycastProvider).
//! * Draining [`HoodPhysicsActuation`](data_for_backends::HoodPhysicsActuation) and applying
//!   [`HoodCharacterMotor`](data_for_backends::HoodCharacterMotor) during
//!   [`HoodPipelineSystems::Motors`].
//! * Writing [`HoodOverlapStarted`](data_for_backends::HoodOverlapStarted) events when colliders
//!   start overlapping.
use bevy::prelude::*;

pub mod capabilities;
pub mod data_for_backends;

/// Umbrella system set for [`HoodPipelineSystems`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct HoodSystems;

/// The various stages of the bevy-hood pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum HoodPipelineSystems {
    /// Device input is merged into the characters' input state. User code that feeds
    /// `HoodInputState` by other means should run here as well.
    Input,
    /// Look, movement and crouch are applied and the view sensors are aimed.
    Controls,
    /// Data is read from the physics backend.
    Sensors,
    /// The power policy, pickups and HUD decide what happens this frame.
    Logic,
    /// Impulses and character motion are applied in the physics backend.
    Motors,
}
