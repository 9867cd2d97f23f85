//! Spawn helper для player entity
//!
//! Создаёт полный набор:
//! - body: Transform + FirstPersonController + CharacterMotor (+ InputSource)
//! - rapier backend: RigidBody + capsule Collider + KinematicCharacterController
//! - look target: child тела на высоте глаз

use bevy::prelude::*;

use super::{FirstPersonController, LookTarget};
use crate::config::PlayerControllerConfig;
use crate::error::ControllerError;
use crate::input::InputSource;
use crate::physics::{rapier, CharacterMotor, MotorBackend};

/// Параметры spawn'а игрока
#[derive(Debug, Clone)]
pub struct PlayerSpawn {
    /// Центр capsule в world space
    pub position: Vec3,
    pub config: PlayerControllerConfig,
    pub motor: CharacterMotor,
    /// Высота look target над центром тела (m)
    pub eye_height: f32,
    /// Подписать entity на input events
    pub with_input: bool,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0), // Capsule 2m стоит на y = 0
            config: PlayerControllerConfig::default(),
            motor: CharacterMotor::default(),
            eye_height: 0.7,
            with_input: true,
        }
    }
}

/// Spawn игрока с controller'ом
///
/// Невалидный config/collider → ошибка до spawn'а (ничего не создаётся).
pub fn spawn_player(
    commands: &mut Commands,
    spawn: PlayerSpawn,
) -> Result<Entity, ControllerError> {
    spawn.motor.validate()?;
    spawn.config.validate()?;

    let look_target = commands
        .spawn((LookTarget, Transform::from_xyz(0.0, spawn.eye_height, 0.0)))
        .id();
    let controller = FirstPersonController::new(spawn.config, look_target)?;

    let mut body = commands.spawn((
        Transform::from_translation(spawn.position),
        spawn.motor,
        controller,
    ));

    if spawn.with_input {
        body.insert(InputSource);
    }

    if spawn.motor.backend == MotorBackend::Rapier {
        body.insert(rapier::rapier_body_components(&spawn.motor));
    }

    body.add_child(look_target);
    let entity = body.id();

    crate::log_info(&format!(
        "Spawned player {:?} at {:?} ({:?} backend, look target {:?})",
        entity, spawn.position, spawn.motor.backend, look_target
    ));

    Ok(entity)
}

/// То же, что `spawn_player`, но сразу в World (вне систем: headless main, тесты)
pub fn spawn_player_in_world(
    world: &mut World,
    spawn: PlayerSpawn,
) -> Result<Entity, ControllerError> {
    let entity = {
        let mut commands = world.commands();
        spawn_player(&mut commands, spawn)?
    };
    world.flush();
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LocomotionState;
    use crate::input::InputLatch;

    #[test]
    fn test_spawn_builds_body_and_look_target() {
        let mut world = World::new();
        let player = spawn_player_in_world(&mut world, PlayerSpawn::default()).unwrap();

        let controller = world.get::<FirstPersonController>(player).unwrap();
        let look_target = controller.look_target;
        assert!(controller.can_move);

        // Required components
        assert!(world.get::<InputLatch>(player).is_some());
        assert!(world.get::<LocomotionState>(player).is_some());
        assert!(world.get::<InputSource>(player).is_some());

        assert!(world.get::<LookTarget>(look_target).is_some());
        assert_eq!(world.get::<ChildOf>(look_target).map(|c| c.parent()), Some(player));
        assert_eq!(
            world.get::<Transform>(look_target).unwrap().translation,
            Vec3::new(0.0, 0.7, 0.0)
        );
    }

    #[test]
    fn test_spawn_without_input_source() {
        let mut world = World::new();
        let player = spawn_player_in_world(
            &mut world,
            PlayerSpawn {
                with_input: false,
                ..default()
            },
        )
        .unwrap();

        assert!(world.get::<InputSource>(player).is_none());
        assert!(world.get::<FirstPersonController>(player).is_some());
    }

    #[test]
    fn test_invalid_collider_spawns_nothing() {
        let mut world = World::new();
        let result = spawn_player_in_world(
            &mut world,
            PlayerSpawn {
                motor: CharacterMotor {
                    radius: 1.0,
                    height: 1.0,
                    ..default()
                },
                ..default()
            },
        );

        assert!(matches!(result, Err(ControllerError::InvalidCollider { .. })));
        assert_eq!(world.entities().len(), 0);
    }
}
