use bevy::prelude::*;

use crate::character::HoodCharacter;
use crate::input::HoodInputState;
use crate::power::{HoodPowerOutcome, HoodPowerState};

/// Everything a HUD needs to draw for a character, refreshed every tick.
///
/// bevy-hood does not draw anything itself. Games read this component (and use
/// [`HoodCrosshair`] for placing the crosshair) with whatever UI they prefer.
#[derive(Component, Default, Debug, Clone, PartialEq)]
pub struct HoodHudState {
    /// Where the power's ray last hit something.
    pub reticle: Option<Vec3>,
    /// Whether the power currently outlines a target.
    pub highlighted: bool,
    pub has_key: bool,
    pub power: f32,
    pub push_mode: bool,
    /// Short description of what the power did this tick.
    pub outcome_label: &'static str,
}

/// A short, human readable description of a power outcome.
pub fn outcome_label(outcome: Option<HoodPowerOutcome>) -> &'static str {
    match outcome {
        None => "",
        Some(HoodPowerOutcome::NoTarget) => "no target",
        Some(HoodPowerOutcome::Inert { .. }) => "inert",
        Some(HoodPowerOutcome::Highlighted { .. }) => "highlighted",
        Some(HoodPowerOutcome::TooHeavy { .. }) => "too heavy",
        Some(HoodPowerOutcome::Actuated { .. }) => "actuated",
    }
}

/// Placement of the crosshair texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoodCrosshair {
    pub texture_size: Vec2,
    /// Pixels between the viewport's centre and the texture's top-left corner, downwards.
    pub vertical_offset: f32,
}

impl Default for HoodCrosshair {
    fn default() -> Self {
        Self {
            texture_size: Vec2::splat(16.0),
            vertical_offset: 20.0,
        }
    }
}

impl HoodCrosshair {
    /// Top-left corner of the crosshair texture, in pixels from the viewport's top-left corner.
    pub fn draw_position(&self, viewport_size: Vec2) -> Vec2 {
        0.5 * viewport_size + Vec2::new(0.0, self.vertical_offset)
    }
}

pub(crate) fn update_hud_system(
    mut query: Query<(
        &HoodCharacter,
        &HoodInputState,
        &HoodPowerState,
        &mut HoodHudState,
    )>,
) {
    for (character, input, power_state, mut hud) in query.iter_mut() {
        hud.set_if_neq(HoodHudState {
            reticle: power_state.last_impact_point(),
            highlighted: power_state.last_outlined().is_some(),
            has_key: character.has_key,
            power: character.power,
            push_mode: input.push_mode,
            outcome_label: outcome_label(power_state.last_outcome()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosshair_is_below_centre() {
        let crosshair = HoodCrosshair::default();
        assert_eq!(
            crosshair.draw_position(Vec2::new(1280.0, 720.0)),
            Vec2::new(640.0, 380.0)
        );
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome_label(None), "");
        assert_eq!(outcome_label(Some(HoodPowerOutcome::NoTarget)), "no target");
        assert_eq!(
            outcome_label(Some(HoodPowerOutcome::Inert {
                entity: Entity::from_raw(3)
            })),
            "inert"
        );
    }
}
