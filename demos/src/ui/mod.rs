use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_hood::{HoodActorWidget, HoodCharacter, HoodCrosshair, HoodHudState};

use crate::levels_setup::IsPlayer;

pub struct DemoUi;

impl Plugin for DemoUi {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ui);
        app.add_systems(
            Update,
            (place_crosshair, update_status_widget).run_if(any_with_component::<IsPlayer>),
        );
    }
}

#[derive(Component)]
pub struct Crosshair(pub HoodCrosshair);

/// The text widget that shows the status of its owning actor.
#[derive(Component)]
pub struct StatusWidget;

fn setup_ui(mut commands: Commands) {
    let crosshair = HoodCrosshair::default();
    commands.spawn((
        Crosshair(crosshair),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(crosshair.texture_size.x),
            height: Val::Px(crosshair.texture_size.y),
            ..Default::default()
        },
        BackgroundColor(Color::WHITE.with_alpha(0.6)),
    ));

    let mut actor_widget = HoodActorWidget::default();
    actor_widget.observe_owning_actor(|owner| {
        info!("Status widget now follows {owner:?}");
    });
    commands.spawn((
        StatusWidget,
        actor_widget,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..Default::default()
        },
        Text::default(),
    ));
}

fn place_crosshair(
    window: Single<&Window, With<PrimaryWindow>>,
    mut query: Query<(&Crosshair, &mut Node)>,
) {
    for (Crosshair(crosshair), mut node) in query.iter_mut() {
        let top_left = crosshair.draw_position(window.size());
        node.left = Val::Px(top_left.x);
        node.top = Val::Px(top_left.y);
    }
}

fn update_status_widget(
    mut widgets_query: Query<(&HoodActorWidget, &mut Text), With<StatusWidget>>,
    actors_query: Query<(&HoodCharacter, &HoodHudState)>,
) {
    for (widget, mut text) in widgets_query.iter_mut() {
        let Some((character, hud)) = widget
            .owning_actor()
            .and_then(|actor| actors_query.get(actor).ok())
        else {
            continue;
        };
        text.0 = format!(
            "Power: {:.0} ({})\nTarget: {}\nCrouched: {}\nKey: {}",
            hud.power,
            if hud.push_mode { "push" } else { "pull" },
            hud.outcome_label,
            character.crouched,
            if hud.has_key { "yes" } else { "no" },
        );
    }
}
