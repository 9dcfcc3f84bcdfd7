//! # bevy-hood
//!
//! First-person gameplay for Bevy: a "power" that pushes and pulls light metallic bodies the
//! character is looking at, a key that can be picked up, and the character controls that drive
//! them.
//!
//! bevy-hood does not talk to the physics engine directly. It needs a physics backend, provided
//! by a separate crate:
//!
//! * For Rapier 3D, use [bevy-hood-rapier3d](https://crates.io/crates/bevy-hood-rapier3d).
//!
//! Other backends can be written against
//! [bevy-hood-physics-integration-layer](bevy_hood_physics_integration_layer).
//!
//! ## Usage
//!
//! 1. Add [`HoodPlugin`] and the backend's plugin to the app. Add [`HoodInputPlugin`] too,
//!    unless the game feeds [`HoodInputState`] by itself.
//! 2. Spawn the player with a [`HoodCharacter`] and a dynamic rigid body. Everything else the
//!    character needs is added as required components.
//! 3. Mark bodies the power can move with a [`HoodMaterial`] whose name contains
//!    [`HoodPowerConfig::metal_marker`], and render [`HoodOutline`] however the game wants.
//! 4. Name the key entity [`HoodPowerConfig::key_actor_name`] and make it a child of its holder.
//!
//! ## Frame pipeline
//!
//! Everything runs in the [`HoodSystems`] set, split into the chained
//! [`HoodPipelineSystems`] stages: input is merged, the controls turn the character and aim its
//! view sensor, the backend casts the sensor, the power and pickup logic decide what happens,
//! and the backend applies the requested impulses and motion.
mod character;
mod classify;
mod config;
mod controller;
mod error;
mod hud;
mod input;
mod pickup;
mod power;
mod widget;

pub mod prelude {
    pub use crate::{
        HoodCharacter, HoodCharacterConfig, HoodInputPlugin, HoodInputState, HoodPlugin,
        HoodPowerConfig,
    };
    pub use bevy_hood_physics_integration_layer::data_for_backends::{
        HoodMaterial, HoodOutline, HoodToggle,
    };
}

pub use bevy_hood_physics_integration_layer::capabilities::{
    HoodPhysicsActuator, HoodRaycastProvider,
};
pub use bevy_hood_physics_integration_layer::data_for_backends::{
    HoodActuation, HoodCharacterMotor, HoodHitRecord, HoodMaterial, HoodMobility, HoodOutline,
    HoodOverlapStarted, HoodPhysicsActuation, HoodRay, HoodToggle, HoodViewSensor,
};
pub use bevy_hood_physics_integration_layer::{HoodPipelineSystems, HoodSystems};

pub use character::{movement_input, HoodCharacter, HoodStanceChange, HoodViewAngles};
pub use classify::{HoodMassClass, HoodTargetKind};
pub use config::{HoodCharacterConfig, HoodPowerConfig};
pub use controller::HoodPlugin;
pub use error::HoodError;
pub use hud::{outcome_label, HoodCrosshair, HoodHudState};
pub use input::{
    HoodAction, HoodAxis, HoodAxisSource, HoodButton, HoodInputBindings, HoodInputPlugin,
    HoodInputState,
};
pub use pickup::{resolve_pickup, HoodPickup};
pub use power::{HoodOutlinedTarget, HoodPowerInput, HoodPowerOutcome, HoodPowerState};
pub use widget::{HoodActorWidget, HoodWidgetComponent, HoodWidgetSpace};
