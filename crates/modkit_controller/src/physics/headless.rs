//! Headless physics backend (без Rapier)
//!
//! Бесконечная плоскость пола на `FlatGround.height`:
//! - ground check: аналитический sphere sweep против плоскости
//! - mover: Transform += displacement, затем выталкивание из пола
//!
//! Используется в тестах и headless бинарнике (как direct integration
//! velocity → Transform, когда Rapier не подключен).

use bevy::prelude::*;

use super::{CharacterMotor, CharacterMover, GroundFilter, MotorBackend, ShapeCaster};
use crate::controller::{FirstPersonController, LocomotionState};
use crate::locomotion::is_grounded;
use crate::ControllerSet;

/// Плоскость пола (y = height) для headless режима
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct FlatGround {
    pub height: f32,
    /// Collision groups поверхности (для GroundFilter)
    pub groups: u32,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self {
            height: 0.0,
            groups: 1,
        }
    }
}

impl ShapeCaster for FlatGround {
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        filter: GroundFilter,
    ) -> bool {
        if !filter.matches(self.groups) {
            return false;
        }

        // Нижняя точка сферы в конце sweep'а
        let descent = (-direction.y).max(0.0) * max_distance;
        origin.y - radius - descent <= self.height
    }
}

/// Mover: двигает Transform напрямую, пол - единственный constraint
pub struct TransformMover<'a> {
    pub transform: &'a mut Transform,
    pub motor: CharacterMotor,
    pub ground: FlatGround,
}

impl CharacterMover for TransformMover<'_> {
    fn request_move(&mut self, displacement: Vec3) {
        self.transform.translation += displacement;

        // Capsule не проваливается под пол
        let min_center = self.ground.height + self.motor.half_height();
        if self.transform.translation.y < min_center {
            self.transform.translation.y = min_center;
        }
    }

    fn collider(&self) -> CharacterMotor {
        self.motor
    }
}

/// Система: ground check против FlatGround
pub fn detect_ground_headless(
    ground: Res<FlatGround>,
    mut controllers: Query<(
        &FirstPersonController,
        &CharacterMotor,
        &Transform,
        &mut LocomotionState,
    )>,
) {
    for (controller, motor, transform, mut state) in controllers.iter_mut() {
        if motor.backend != MotorBackend::Headless {
            continue;
        }

        state.grounded = is_grounded(
            &*ground,
            transform.translation,
            motor,
            controller.config().ground_check_margin,
        );
    }
}

/// Система: применяет pending_move через TransformMover
pub fn apply_headless_motion(
    ground: Res<FlatGround>,
    mut controllers: Query<
        (&CharacterMotor, &mut LocomotionState, &mut Transform),
        With<FirstPersonController>,
    >,
) {
    for (motor, mut state, mut transform) in controllers.iter_mut() {
        if motor.backend != MotorBackend::Headless {
            continue;
        }

        let Some(displacement) = state.pending_move.take() else {
            continue;
        };

        let mut mover = TransformMover {
            transform: &mut *transform,
            motor: *motor,
            ground: *ground,
        };
        mover.request_move(displacement);
    }
}

/// Plugin headless backend'а
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlatGround>()
            .register_type::<FlatGround>()
            .add_systems(
                Update,
                (
                    detect_ground_headless.in_set(ControllerSet::DetectGround),
                    apply_headless_motion.in_set(ControllerSet::ApplyMotion),
                ),
            );
    }
}
