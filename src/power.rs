use bevy::prelude::*;
use bevy_hood_physics_integration_layer::capabilities::{HoodPhysicsActuator, HoodRaycastProvider};
use bevy_hood_physics_integration_layer::data_for_backends::HoodRay;

use crate::classify::{HoodMassClass, HoodTargetKind};
use crate::config::HoodPowerConfig;
use crate::error::HoodError;

/// The entity whose outline was turned on, and what it was turned on for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoodOutlinedTarget {
    /// The holder of a key carries the key's outline.
    Key { key: Entity, holder: Entity },
    Component(Entity),
}

impl HoodOutlinedTarget {
    /// The entity that has its [`HoodOutline`](crate::HoodOutline) flag set.
    pub fn outlined_entity(&self) -> Entity {
        match self {
            Self::Key { holder, .. } => *holder,
            Self::Component(entity) => *entity,
        }
    }

    /// Whether this target involves `entity` in any role.
    pub fn involves(&self, entity: Entity) -> bool {
        match self {
            Self::Key { key, holder } => *key == entity || *holder == entity,
            Self::Component(component) => *component == entity,
        }
    }
}

/// What the power ability is doing this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoodPowerOutcome {
    /// The view ray did not hit anything.
    NoTarget,
    /// The view ray hit something the power does not affect.
    Inert { entity: Entity },
    /// The target is outlined but the power is not being used on it.
    Highlighted { target: HoodOutlinedTarget },
    /// The target is outlined, but too heavy to move.
    TooHeavy {
        target: HoodOutlinedTarget,
        mass: f32,
    },
    /// The target was pushed or pulled.
    Actuated {
        target: HoodOutlinedTarget,
        body: Entity,
        impulse: Vec3,
    },
}

impl HoodPowerOutcome {
    pub fn outlined(&self) -> Option<HoodOutlinedTarget> {
        match self {
            Self::NoTarget | Self::Inert { .. } => None,
            Self::Highlighted { target }
            | Self::TooHeavy { target, .. }
            | Self::Actuated { target, .. } => Some(*target),
        }
    }
}

/// The parts of the character's input the power ability reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoodPowerInput {
    /// Whether the power button is currently held.
    pub held: bool,
    /// Impulse magnitude. Zero or negative never moves anything.
    pub power: f32,
    /// Push away from the character when `true`, pull towards it when `false`.
    pub push_mode: bool,
}

/// Per-character memory of the power ability between ticks.
#[derive(Component, Default, Debug)]
pub struct HoodPowerState {
    last_outlined: Option<HoodOutlinedTarget>,
    last_impact_point: Option<Vec3>,
    last_outcome: Option<HoodPowerOutcome>,
}

impl HoodPowerState {
    /// The target outlined during the last tick.
    pub fn last_outlined(&self) -> Option<HoodOutlinedTarget> {
        self.last_outlined
    }

    /// Where the view ray last hit something. Not cleared when the ray stops hitting things.
    pub fn last_impact_point(&self) -> Option<Vec3> {
        self.last_impact_point
    }

    pub fn last_outcome(&self) -> Option<HoodPowerOutcome> {
        self.last_outcome
    }

    /// Drop the outlined target without clearing its outline, if it involves `entity`.
    ///
    /// Used when the entity is about to be despawned.
    pub fn forget(&mut self, entity: Entity) {
        if self
            .last_outlined
            .is_some_and(|outlined| outlined.involves(entity))
        {
            self.last_outlined = None;
        }
    }

    /// Run the power ability for one tick.
    ///
    /// The previous tick's outline is always cleared before casting, so that a target the ray
    /// moved away from never stays outlined. The current target (which may be the same one) gets
    /// outlined again.
    pub fn tick(
        &mut self,
        config: &HoodPowerConfig,
        input: HoodPowerInput,
        ray: &HoodRay,
        raycaster: &impl HoodRaycastProvider,
        actuator: &mut impl HoodPhysicsActuator,
    ) -> Result<HoodPowerOutcome, HoodError> {
        if let Some(previous) = self.last_outlined.take() {
            actuator.set_outlined(previous.outlined_entity(), false);
        }
        self.last_outcome = None;

        let Some(hit) = raycaster.cast_ray(ray) else {
            self.last_outcome = Some(HoodPowerOutcome::NoTarget);
            return Ok(HoodPowerOutcome::NoTarget);
        };
        self.last_impact_point = Some(hit.impact_point);
        debug!(
            "Power ray hit {} ({:?}) at {}",
            hit.entity,
            hit.name.as_deref().unwrap_or_default(),
            hit.impact_point,
        );

        let outcome = match HoodTargetKind::classify(&hit, config)? {
            HoodTargetKind::Key { key, holder } => {
                let target = HoodOutlinedTarget::Key { key, holder };
                self.outline(target, actuator);
                Self::actuate_if_used(target, holder, input, ray, actuator)
            }
            HoodTargetKind::Metal { entity, mass_class } => {
                let target = HoodOutlinedTarget::Component(entity);
                self.outline(target, actuator);
                match mass_class {
                    HoodMassClass::Liftable => {
                        Self::actuate_if_used(target, entity, input, ray, actuator)
                    }
                    HoodMassClass::TooHeavy { mass } => HoodPowerOutcome::TooHeavy { target, mass },
                }
            }
            HoodTargetKind::Other { entity } => HoodPowerOutcome::Inert { entity },
        };
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    fn outline(&mut self, target: HoodOutlinedTarget, actuator: &mut impl HoodPhysicsActuator) {
        actuator.set_outlined(target.outlined_entity(), true);
        self.last_outlined = Some(target);
    }

    fn actuate_if_used(
        target: HoodOutlinedTarget,
        body: Entity,
        input: HoodPowerInput,
        ray: &HoodRay,
        actuator: &mut impl HoodPhysicsActuator,
    ) -> HoodPowerOutcome {
        if !input.held || input.power <= 0.0 {
            return HoodPowerOutcome::Highlighted { target };
        }
        let direction = if input.push_mode {
            *ray.direction
        } else {
            -*ray.direction
        };
        let impulse = input.power * direction;
        // Gravity must be back on before the tick ends.
        actuator.set_gravity_enabled(body, false);
        actuator.apply_impulse(body, impulse);
        actuator.set_gravity_enabled(body, true);
        HoodPowerOutcome::Actuated {
            target,
            body,
            impulse,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bevy_hood_physics_integration_layer::data_for_backends::{HoodHitRecord, HoodMobility};

    use super::*;

    #[derive(Default)]
    struct FakeWorld {
        hit: Option<HoodHitRecord>,
    }

    impl HoodRaycastProvider for FakeWorld {
        fn cast_ray(&self, _ray: &HoodRay) -> Option<HoodHitRecord> {
            self.hit.clone()
        }
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Gravity(Entity, bool),
        Impulse(Entity, Vec3),
    }

    #[derive(Default)]
    struct FakeActuator {
        outlines: HashMap<Entity, bool>,
        gravity: HashMap<Entity, bool>,
        calls: Vec<Call>,
    }

    impl FakeActuator {
        fn outlined(&self) -> Vec<Entity> {
            let mut outlined: Vec<Entity> = self
                .outlines
                .iter()
                .filter_map(|(entity, on)| on.then_some(*entity))
                .collect();
            outlined.sort();
            outlined
        }

        fn impulses(&self) -> Vec<(Entity, Vec3)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Impulse(entity, impulse) => Some((*entity, *impulse)),
                    Call::Gravity(..) => None,
                })
                .collect()
        }
    }

    impl HoodPhysicsActuator for FakeActuator {
        fn set_gravity_enabled(&mut self, target: Entity, enabled: bool) {
            self.gravity.insert(target, enabled);
            self.calls.push(Call::Gravity(target, enabled));
        }

        fn apply_impulse(&mut self, target: Entity, impulse: Vec3) {
            assert_eq!(
                self.gravity.get(&target),
                Some(&false),
                "impulse must be applied with gravity disabled"
            );
            self.calls.push(Call::Impulse(target, impulse));
        }

        fn set_outlined(&mut self, target: Entity, outlined: bool) {
            self.outlines.insert(target, outlined);
        }
    }

    const CRATE: Entity = Entity::from_raw(10);
    const OTHER_CRATE: Entity = Entity::from_raw(11);
    const KEY: Entity = Entity::from_raw(20);
    const HOLDER: Entity = Entity::from_raw(21);

    fn ray() -> HoodRay {
        HoodRay {
            origin: Vec3::ZERO,
            direction: Dir3::X,
            range: 50.0,
        }
    }

    fn metal(entity: Entity, mass: f32) -> HoodHitRecord {
        HoodHitRecord {
            entity,
            attach_parent: None,
            name: Some("Crate".to_owned()),
            material: Some("M_Metal_Steel".to_owned()),
            mobility: HoodMobility::Movable,
            mass,
            impact_point: Vec3::new(3.0, 0.0, 0.0),
            distance: 3.0,
        }
    }

    fn key() -> HoodHitRecord {
        HoodHitRecord {
            entity: KEY,
            attach_parent: Some(HOLDER),
            name: Some("Keys".to_owned()),
            material: None,
            mobility: HoodMobility::Static,
            mass: f32::INFINITY,
            impact_point: Vec3::new(2.0, 0.0, 0.0),
            distance: 2.0,
        }
    }

    fn holding(power: f32, push_mode: bool) -> HoodPowerInput {
        HoodPowerInput {
            held: true,
            power,
            push_mode,
        }
    }

    const IDLE: HoodPowerInput = HoodPowerInput {
        held: false,
        power: 500.0,
        push_mode: true,
    };

    #[test]
    fn push_applies_impulse_along_forward_and_restores_gravity() {
        let config = HoodPowerConfig::default();
        let world = FakeWorld {
            hit: Some(metal(CRATE, 10.0)),
        };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        let outcome = state
            .tick(&config, holding(500.0, true), &ray(), &world, &mut actuator)
            .unwrap();

        assert_eq!(
            outcome,
            HoodPowerOutcome::Actuated {
                target: HoodOutlinedTarget::Component(CRATE),
                body: CRATE,
                impulse: Vec3::new(500.0, 0.0, 0.0),
            }
        );
        assert_eq!(
            actuator.calls,
            vec![
                Call::Gravity(CRATE, false),
                Call::Impulse(CRATE, Vec3::new(500.0, 0.0, 0.0)),
                Call::Gravity(CRATE, true),
            ]
        );
        assert_eq!(actuator.gravity.get(&CRATE), Some(&true));
        assert_eq!(actuator.outlined(), vec![CRATE]);
    }

    #[test]
    fn pull_applies_impulse_against_forward() {
        let config = HoodPowerConfig::default();
        let world = FakeWorld {
            hit: Some(metal(CRATE, 10.0)),
        };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        state
            .tick(&config, holding(500.0, false), &ray(), &world, &mut actuator)
            .unwrap();

        assert_eq!(
            actuator.impulses(),
            vec![(CRATE, Vec3::new(-500.0, 0.0, 0.0))]
        );
        assert_eq!(actuator.gravity.get(&CRATE), Some(&true));
    }

    #[test]
    fn wood_is_inert_even_when_movable() {
        let config = HoodPowerConfig::default();
        let mut wood = metal(CRATE, 10.0);
        wood.material = Some("Wood_Movable".to_owned());
        let world = FakeWorld { hit: Some(wood) };

        for input in [IDLE, holding(500.0, true)] {
            let mut actuator = FakeActuator::default();
            let mut state = HoodPowerState::default();
            let outcome = state
                .tick(&config, input, &ray(), &world, &mut actuator)
                .unwrap();
            assert_eq!(outcome, HoodPowerOutcome::Inert { entity: CRATE });
            assert!(actuator.outlined().is_empty());
            assert!(actuator.calls.is_empty());
            assert_eq!(state.last_outlined(), None);
        }
    }

    #[test]
    fn non_positive_power_never_actuates() {
        let config = HoodPowerConfig::default();
        let world = FakeWorld {
            hit: Some(metal(CRATE, 10.0)),
        };

        for power in [0.0, -500.0] {
            let mut actuator = FakeActuator::default();
            let mut state = HoodPowerState::default();
            let outcome = state
                .tick(&config, holding(power, true), &ray(), &world, &mut actuator)
                .unwrap();
            assert_eq!(
                outcome,
                HoodPowerOutcome::Highlighted {
                    target: HoodOutlinedTarget::Component(CRATE)
                }
            );
            assert!(actuator.calls.is_empty());
            assert_eq!(actuator.outlined(), vec![CRATE]);
        }
    }

    #[test]
    fn heavy_metal_is_outlined_but_not_moved() {
        let config = HoodPowerConfig::default();
        let world = FakeWorld {
            hit: Some(metal(CRATE, config.mass_limit_power + 1.0)),
        };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        let outcome = state
            .tick(&config, holding(500.0, true), &ray(), &world, &mut actuator)
            .unwrap();

        assert!(matches!(outcome, HoodPowerOutcome::TooHeavy { .. }));
        assert_eq!(actuator.outlined(), vec![CRATE]);
        assert!(actuator.calls.is_empty());
    }

    #[test]
    fn key_outlines_and_moves_its_holder() {
        let config = HoodPowerConfig::default();
        let world = FakeWorld { hit: Some(key()) };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(actuator.outlined(), vec![HOLDER]);
        assert!(actuator.calls.is_empty());

        let outcome = state
            .tick(&config, holding(50.0, true), &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(actuator.outlined(), vec![HOLDER]);
        assert_eq!(
            outcome,
            HoodPowerOutcome::Actuated {
                target: HoodOutlinedTarget::Key {
                    key: KEY,
                    holder: HOLDER
                },
                body: HOLDER,
                impulse: Vec3::new(50.0, 0.0, 0.0),
            }
        );
        assert_eq!(actuator.gravity.get(&HOLDER), Some(&true));
    }

    #[test]
    fn key_without_holder_is_reported() {
        let config = HoodPowerConfig::default();
        let mut orphan = key();
        orphan.attach_parent = None;
        let world = FakeWorld { hit: Some(orphan) };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        let result = state.tick(&config, holding(50.0, true), &ray(), &world, &mut actuator);

        assert_eq!(result, Err(HoodError::KeyWithoutHolder { key: KEY }));
        assert!(actuator.outlined().is_empty());
        assert!(actuator.calls.is_empty());
        assert_eq!(state.last_impact_point(), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn previous_outline_is_cleared_when_target_changes() {
        let config = HoodPowerConfig::default();
        let mut world = FakeWorld {
            hit: Some(metal(CRATE, 10.0)),
        };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(actuator.outlined(), vec![CRATE]);

        world.hit = Some(metal(OTHER_CRATE, 10.0));
        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(actuator.outlined(), vec![OTHER_CRATE]);

        world.hit = Some(key());
        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(actuator.outlined(), vec![HOLDER]);

        world.hit = None;
        let outcome = state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        assert_eq!(outcome, HoodPowerOutcome::NoTarget);
        assert!(actuator.outlined().is_empty());
        assert_eq!(state.last_outlined(), None);
        // The last known impact point survives a miss.
        assert_eq!(state.last_impact_point(), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn forgotten_target_is_not_cleared() {
        let config = HoodPowerConfig::default();
        let mut world = FakeWorld { hit: Some(key()) };
        let mut actuator = FakeActuator::default();
        let mut state = HoodPowerState::default();

        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        state.forget(KEY);
        assert_eq!(state.last_outlined(), None);

        actuator.outlines.clear();
        world.hit = None;
        state
            .tick(&config, IDLE, &ray(), &world, &mut actuator)
            .unwrap();
        // Nothing touched the despawned holder.
        assert!(actuator.outlines.is_empty());
    }
}
