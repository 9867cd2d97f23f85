use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use modkit_controller::{
    init_logger, spawn_player, CharacterMotor, MotorBackend,
    PlayerControllerConfig, PlayerControllerPlugin, PlayerSpawn, RapierPhysicsBackendPlugin,
};

mod camera;

use camera::{FirstPersonInputPlugin, LocalPlayer};

fn main() {
    init_logger();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Modkit - First Person Controller".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Controller + rapier backend
        .add_plugins((PlayerControllerPlugin, RapierPhysicsBackendPlugin))
        // Keyboard/mouse → controller events
        .add_plugins(FirstPersonInputPlugin)
        .add_systems(Startup, (setup_scene, setup_player))
        .run();
}

/// Ground plane, несколько препятствий, свет
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground (50x50m), верхняя грань на y = 0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(50.0, 0.2, 50.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(25.0, 0.1, 25.0),
    ));

    // Препятствия: стены и ступенька
    let crate_material = materials.add(Color::srgb(0.6, 0.45, 0.3));
    for (position, half_extents) in [
        (Vec3::new(4.0, 1.0, -6.0), Vec3::new(1.0, 1.0, 1.0)),
        (Vec3::new(-5.0, 0.25, -4.0), Vec3::new(2.0, 0.25, 2.0)),
        (Vec3::new(0.0, 1.5, -14.0), Vec3::new(8.0, 1.5, 0.5)),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        ));
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });
}

/// Игрок (rapier capsule), config из первого аргумента (JSON), если есть
fn setup_player(mut commands: Commands) -> Result {
    let config = match std::env::args().nth(1) {
        Some(path) => PlayerControllerConfig::load(path)?,
        None => PlayerControllerConfig::default(),
    };

    let player = spawn_player(
        &mut commands,
        PlayerSpawn {
            position: Vec3::new(0.0, 1.0, 0.0),
            config,
            motor: CharacterMotor::new(0.5, 2.0, MotorBackend::Rapier)?,
            ..default()
        },
    )?;
    commands.insert_resource(LocalPlayer(player));

    Ok(())
}
