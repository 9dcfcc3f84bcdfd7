use bevy::color::palettes::css;
use bevy::prelude::*;
use bevy_hood::HoodOutline;
use bevy_rapier3d::prelude as rapier;

use super::helper::LevelSetupHelper3d;
use super::LevelObject;

pub fn setup_level(mut helper: LevelSetupHelper3d) {
    helper.spawn_floor(css::DARK_OLIVEGREEN);

    for (i, x) in [-3.0, 0.0, 3.0].into_iter().enumerate() {
        helper
            .spawn_crate(
                format!("Metal Crate {i}"),
                css::SILVER,
                "M_Metal_Steel",
                Transform::from_xyz(x, 0.5, -6.0),
                Vec3::ONE,
                10.0,
            )
            .insert(HoodOutline::default());
    }

    // Metal, but too heavy for the power.
    helper
        .spawn_crate(
            "Metal Container",
            css::DIM_GRAY,
            "M_Metal_Steel",
            Transform::from_xyz(-7.0, 1.5, -10.0),
            Vec3::splat(3.0),
            1000.0,
        )
        .insert(HoodOutline::default());

    helper.spawn_crate(
        "Wooden Crate",
        css::BURLYWOOD,
        "Wood_Movable",
        Transform::from_xyz(6.0, 0.5, -4.0),
        Vec3::ONE,
        10.0,
    );

    let key_mesh = helper.meshes.add(Sphere::new(0.15));
    let key_material = helper.materials.add(Color::from(css::GOLD));
    helper
        .spawn_crate(
            "Key Holder",
            css::SADDLE_BROWN,
            "Wood_Movable",
            Transform::from_xyz(0.0, 0.3, -12.0),
            Vec3::new(0.8, 0.6, 0.8),
            5.0,
        )
        .insert(HoodOutline::default())
        .with_child((
            LevelObject,
            Name::new("Keys"),
            Mesh3d(key_mesh),
            MeshMaterial3d(key_material),
            Transform::from_xyz(0.0, 0.5, 0.0),
            rapier::Collider::ball(0.3),
            rapier::Sensor,
            rapier::ActiveEvents::COLLISION_EVENTS,
        ));
}
