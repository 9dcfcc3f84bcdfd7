use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_hood::prelude::*;
use bevy_hood::{HoodSystems, HoodViewAngles, HoodWidgetComponent};
use bevy_hood_rapier3d::prelude::*;
use bevy_rapier3d::{prelude as rapier, prelude::*};

use hood_demos_crate::app_setup_options::{AppSetupConfiguration, ScheduleToUse};
use hood_demos_crate::level_mechanics::LevelMechanicsPlugin;
use hood_demos_crate::levels_setup::first_person_level::setup_level;
use hood_demos_crate::levels_setup::IsPlayer;
use hood_demos_crate::ui::{DemoUi, StatusWidget};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins);

    let app_setup_configuration = AppSetupConfiguration::from_environment();
    app.insert_resource(app_setup_configuration.clone());

    match app_setup_configuration.schedule_to_use {
        ScheduleToUse::Update => {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
            // To use bevy-hood with bevy_rapier3d, you need the `HoodRapier3dPlugin` plugin from
            // bevy-hood-rapier3d.
            app.add_plugins(HoodRapier3dPlugin::default());
            // This is bevy-hood's main plugin.
            app.add_plugins(HoodPlugin::default());
            app.add_plugins(HoodInputPlugin::default());
        }
        ScheduleToUse::FixedUpdate => {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
            app.add_plugins(HoodRapier3dPlugin::new(FixedUpdate));
            app.add_plugins(HoodPlugin::new(FixedUpdate));
            // Input is sampled once per frame, and kept until the fixed step reads it.
            app.add_plugins(HoodInputPlugin::default());
        }
    }

    app.add_systems(Startup, (setup_lights, setup_level, setup_player));
    app.add_systems(Startup, grab_cursor);
    app.add_systems(PostStartup, attach_status_widget);
    app.add_systems(
        match app_setup_configuration.schedule_to_use {
            ScheduleToUse::Update => Update.intern(),
            ScheduleToUse::FixedUpdate => FixedUpdate.intern(),
        },
        follow_view_with_camera.after(HoodSystems),
    );
    app.add_plugins(DemoUi);
    app.add_plugins(LevelMechanicsPlugin);
    app.run();
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..Default::default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: true,
            ..Default::default()
        },
        Transform::default().looking_at(-Vec3::Y, Vec3::Z),
    ));
}

#[derive(Component)]
struct PlayerCamera;

fn setup_player(mut commands: Commands) {
    let mut cmd = commands.spawn((IsPlayer, Name::new("Player")));
    cmd.insert(Transform::from_xyz(0.0, 1.0, 0.0));

    // The character entity must be configured as a dynamic rigid body of the physics backend.
    cmd.insert(rapier::RigidBody::Dynamic);
    cmd.insert(rapier::Collider::capsule_y(0.5, 0.5));
    cmd.insert(rapier::LockedAxes::ROTATION_LOCKED);

    // This is bevy-hood's main component. Everything else it needs gets added with it.
    cmd.insert(HoodCharacter::default());
    cmd.insert(HoodCharacterConfig {
        walk_speed: 5.0,
        ..Default::default()
    });

    cmd.insert(HoodWidgetComponent {
        text: "Player".to_owned(),
        ..Default::default()
    });

    cmd.with_child((
        PlayerCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, HoodCharacterConfig::default().eye_height, 0.0),
    ));
}

// Runs after the UI is spawned. Changing the widget component hands the widget to the player.
fn attach_status_widget(
    status_widget: Single<Entity, With<StatusWidget>>,
    mut players_query: Query<&mut HoodWidgetComponent, With<IsPlayer>>,
) {
    for mut widget_component in players_query.iter_mut() {
        widget_component.widget = Some(*status_widget);
    }
}

fn follow_view_with_camera(
    players_query: Query<(&HoodViewAngles, &HoodCharacter, &HoodCharacterConfig)>,
    mut cameras_query: Query<(&ChildOf, &mut Transform), With<PlayerCamera>>,
) {
    for (child_of, mut transform) in cameras_query.iter_mut() {
        let Ok((angles, character, config)) = players_query.get(child_of.parent()) else {
            continue;
        };
        // The parent already carries the yaw.
        transform.rotation = Quat::from_rotation_x(angles.pitch);
        transform.translation.y = if character.crouched {
            config.crouched_eye_height
        } else {
            config.eye_height
        };
    }
}

fn grab_cursor(
    app_setup_configuration: Res<AppSetupConfiguration>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    if app_setup_configuration.free_cursor {
        return;
    }
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}
