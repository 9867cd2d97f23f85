//! Controller systems (ECS)

use bevy::prelude::*;
use bevy_rapier3d::prelude::KinematicCharacterController;
use std::collections::HashSet;

use super::{FirstPersonController, LocomotionState, LookTarget, WorldGravity};
use crate::error::ControllerError;
use crate::input::InputLatch;
use crate::physics::{CharacterMotor, MotorBackend};

/// Startup preconditions одного controller'а
///
/// - нет CharacterMotor → некуда применять displacement
/// - rapier motor без KinematicCharacterController → то же самое
/// - look_target не указывает на LookTarget entity
pub fn check_controller_dependencies(
    entity: Entity,
    motor: Option<&CharacterMotor>,
    has_kinematic_controller: bool,
    has_look_target: bool,
) -> Result<(), ControllerError> {
    let Some(motor) = motor else {
        return Err(ControllerError::MissingMover(entity));
    };

    if motor.backend == MotorBackend::Rapier && !has_kinematic_controller {
        return Err(ControllerError::MissingMover(entity));
    }
    motor.validate()?;

    if !has_look_target {
        return Err(ControllerError::MissingLookTarget(entity));
    }

    Ok(())
}

/// Система: проверка новых controller'ов
///
/// Ошибка фатальна (default error handler Bevy паникует): controller без mover'а
/// не должен молча стоять на месте.
pub fn verify_controller_dependencies(
    controllers: Query<
        (
            Entity,
            &FirstPersonController,
            Option<&CharacterMotor>,
            Has<KinematicCharacterController>,
        ),
        Added<FirstPersonController>,
    >,
    look_targets: Query<(), With<LookTarget>>,
) -> Result {
    for (entity, controller, motor, has_kinematic_controller) in controllers.iter() {
        let has_look_target = look_targets.contains(controller.look_target);
        if let Err(error) =
            check_controller_dependencies(entity, motor, has_kinematic_controller, has_look_target)
        {
            crate::log_error(&format!("Controller precondition failed: {}", error));
            return Err(error.into());
        }
    }
    Ok(())
}

/// Система: input → velocity/rotation для всех controller'ов
///
/// Ground flag уже посчитан backend'ом (ControllerSet::DetectGround),
/// displacement забирает backend в ControllerSet::ApplyMotion.
///
/// Look target пропал после spawn'а (despawn) → warning один раз, тело продолжает
/// двигаться и падать, pitch пишется во временный Transform.
pub fn update_controllers(
    time: Res<Time>,
    gravity: Res<WorldGravity>,
    mut controllers: Query<
        (
            Entity,
            &FirstPersonController,
            &mut LocomotionState,
            &mut InputLatch,
            &mut Transform,
        ),
        Without<LookTarget>,
    >,
    mut look_targets: Query<&mut Transform, With<LookTarget>>,
    mut orphaned: Local<HashSet<Entity>>,
) {
    let dt = time.delta_secs();

    for (entity, controller, mut state, mut latch, mut body) in controllers.iter_mut() {
        let mut detached_look = Transform::IDENTITY;
        let look_target = match look_targets.get_mut(controller.look_target) {
            Ok(look_target) => {
                orphaned.remove(&entity);
                look_target.into_inner()
            }
            Err(_) => {
                if orphaned.insert(entity) {
                    crate::log_warning(&ControllerError::MissingLookTarget(entity).to_string());
                }
                &mut detached_look
            }
        };

        controller.update(
            &mut state,
            &mut latch,
            &mut body,
            look_target,
            gravity.0,
            dt,
        );
    }
}
