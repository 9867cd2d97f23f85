//! First-person controller: один update loop на entity
//!
//! Архитектура:
//! - FirstPersonController (config + look target + can_move gate)
//! - LocomotionState (velocity, grounded, pending move)
//! - InputLatch (last input, см. `input`)
//! - CharacterMotor (collision-aware mover, см. `physics`)
//!
//! Frame (ECS порядок, `ControllerSet`):
//! 1. LatchInput - events → InputLatch
//! 2. DetectGround - backend считает `LocomotionState.grounded`
//! 3. Integrate - velocity + rotation + pitch clamp (этот модуль)
//! 4. ApplyMotion - backend применяет `pending_move`

use bevy::prelude::*;

use crate::config::PlayerControllerConfig;
use crate::error::ConfigError;
use crate::input::InputLatch;
use crate::locomotion::{desired_direction, integrate_velocity, is_grounded, LocomotionStep};
use crate::orientation::{apply_look_input, clamp_look_pitch};
use crate::physics::{CharacterMover, ShapeCaster};

pub mod spawn;
pub mod systems;

pub use spawn::{spawn_player, spawn_player_in_world, PlayerSpawn};
pub use systems::{
    check_controller_dependencies, update_controllers, verify_controller_dependencies,
};

/// Мировая гравитация по Y (m/s²)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct WorldGravity(pub f32);

impl Default for WorldGravity {
    fn default() -> Self {
        Self(-9.81)
    }
}

/// Marker для look target (camera pivot, child тела)
///
/// Вращается только по pitch; yaw наследует от тела через hierarchy.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LookTarget;

/// Состояние движения (владелец - controller entity)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Текущая velocity (m/s, world space)
    pub velocity: Vec3,
    /// Результат ground check этого frame (не авторитетен между frame'ами)
    pub grounded: bool,
    /// Displacement для mover'а, забирается backend'ом в ApplyMotion
    pub pending_move: Option<Vec3>,
}

/// First-person character controller
///
/// Конфиг копируется при создании и дальше только читается.
/// `can_move = false` замораживает движение/прыжок/look, но pitch clamp продолжает работать.
#[derive(Component, Debug, Clone)]
#[require(InputLatch, LocomotionState)]
pub struct FirstPersonController {
    config: PlayerControllerConfig,
    /// Entity с LookTarget (обычно child тела)
    pub look_target: Entity,
    pub can_move: bool,
}

impl FirstPersonController {
    pub fn new(config: PlayerControllerConfig, look_target: Entity) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            look_target,
            can_move: true,
        })
    }

    pub fn config(&self) -> &PlayerControllerConfig {
        &self.config
    }

    /// Один frame: latched input → velocity, yaw/pitch, pitch clamp
    ///
    /// `state.grounded` должен быть уже посчитан для этого frame.
    /// Возвращает displacement для mover'а (None, если движение запрещено).
    pub fn update(
        &self,
        state: &mut LocomotionState,
        latch: &mut InputLatch,
        body: &mut Transform,
        look_target: &mut Transform,
        gravity: f32,
        dt: f32,
    ) -> Option<Vec3> {
        // Jump edge забираем всегда: нажатие при can_move = false не "копится"
        let jump = latch.take_jump();

        let displacement = if self.can_move {
            // Базис берём до поворота этого frame
            let direction = desired_direction(*body.right(), *body.forward(), latch.movement);
            let step = LocomotionStep {
                direction,
                grounded: state.grounded,
                jump,
                gravity,
                dt,
            };
            state.velocity = integrate_velocity(state.velocity, &step, &self.config);

            apply_look_input(
                body,
                look_target,
                latch.look_delta,
                self.config.mouse_sensitivity,
                dt,
            );

            Some(state.velocity * dt)
        } else {
            None
        };

        clamp_look_pitch(look_target, self.config.camera_bounds);

        state.pending_move = displacement;
        displacement
    }

    /// Полный frame без ECS: ground check → update → mover
    ///
    /// Для хостов, которые сами владеют physics (и для тестов с mock backend'ами).
    #[allow(clippy::too_many_arguments)]
    pub fn step_with_backend(
        &self,
        state: &mut LocomotionState,
        latch: &mut InputLatch,
        body: &mut Transform,
        look_target: &mut Transform,
        caster: &impl ShapeCaster,
        mover: &mut impl CharacterMover,
        gravity: f32,
        dt: f32,
    ) {
        let motor = mover.collider();
        state.grounded = is_grounded(
            caster,
            body.translation,
            &motor,
            self.config.ground_check_margin,
        );

        if let Some(displacement) = self.update(state, latch, body, look_target, gravity, dt) {
            mover.request_move(displacement);
            state.pending_move = None;
        }
    }
}
