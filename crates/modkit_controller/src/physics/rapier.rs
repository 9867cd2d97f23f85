//! Rapier physics backend
//!
//! - Ground check: `RapierContext::cast_shape` (ball, вниз), self исключён из query
//! - Mover: `KinematicCharacterController.translation` - slide/stop решает Rapier
//!   на PhysicsSet шаге в PostUpdate
//!
//! Body: RigidBody::KinematicPositionBased + capsule Collider (см. `rapier_body_components`)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{CharacterMotor, CharacterMover, GroundFilter, MotorBackend, ShapeCaster};
use crate::controller::{FirstPersonController, LocomotionState};
use crate::locomotion::is_grounded;
use crate::ControllerSet;

/// ShapeCaster поверх Rapier query pipeline
pub struct RapierShapeCaster<'a, 'c> {
    context: &'a RapierContext<'c>,
    /// Сам персонаж (его capsule не должна считаться землёй)
    exclude: Entity,
}

impl<'a, 'c> RapierShapeCaster<'a, 'c> {
    pub fn new(context: &'a RapierContext<'c>, exclude: Entity) -> Self {
        Self { context, exclude }
    }
}

/// QueryFilter для ground sweep'а: без сенсоров, без самого тела, только ground groups
pub fn ground_query_filter(exclude: Entity, filter: GroundFilter) -> QueryFilter<'static> {
    QueryFilter::new()
        .exclude_sensors()
        .exclude_rigid_body(exclude)
        .groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(filter.groups),
        ))
}

impl ShapeCaster for RapierShapeCaster<'_, '_> {
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        filter: GroundFilter,
    ) -> bool {
        let shape = Collider::ball(radius);
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

        self.context
            .cast_shape(
                origin,
                Quat::IDENTITY,
                *direction,
                &*shape.raw,
                options,
                ground_query_filter(self.exclude, filter),
            )
            .is_some()
    }
}

/// Mover поверх KinematicCharacterController
pub struct RapierMover<'a> {
    pub controller: &'a mut KinematicCharacterController,
    pub motor: CharacterMotor,
}

impl CharacterMover for RapierMover<'_> {
    fn request_move(&mut self, displacement: Vec3) {
        self.controller.translation = Some(displacement);
    }

    fn collider(&self) -> CharacterMotor {
        self.motor
    }
}

/// Rapier компоненты тела персонажа
///
/// snap_to_ground выключен: прижатием к полу управляет controller (grounded floor velocity).
pub fn rapier_body_components(
    motor: &CharacterMotor,
) -> (RigidBody, Collider, KinematicCharacterController) {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(motor.capsule_half_segment(), motor.radius),
        KinematicCharacterController {
            up: Vec3::Y,
            snap_to_ground: None,
            ..default()
        },
    )
}

/// Система: ground check через Rapier shape cast
pub fn detect_ground_rapier(
    read_rapier_context: ReadRapierContext,
    mut controllers: Query<(
        Entity,
        &FirstPersonController,
        &CharacterMotor,
        &Transform,
        &mut LocomotionState,
    )>,
) {
    let Ok(rapier_context) = read_rapier_context.single() else {
        return;
    };

    for (entity, controller, motor, transform, mut state) in controllers.iter_mut() {
        if motor.backend != MotorBackend::Rapier {
            continue;
        }

        let caster = RapierShapeCaster::new(&rapier_context, entity);
        state.grounded = is_grounded(
            &caster,
            transform.translation,
            motor,
            controller.config().ground_check_margin,
        );
    }
}

/// Система: pending_move → KinematicCharacterController.translation
pub fn apply_rapier_motion(
    mut controllers: Query<
        (
            &CharacterMotor,
            &mut LocomotionState,
            &mut KinematicCharacterController,
        ),
        With<FirstPersonController>,
    >,
) {
    for (motor, mut state, mut kinematic_controller) in controllers.iter_mut() {
        if motor.backend != MotorBackend::Rapier {
            continue;
        }

        let Some(displacement) = state.pending_move.take() else {
            continue;
        };

        let mut mover = RapierMover {
            controller: &mut *kinematic_controller,
            motor: *motor,
        };
        mover.request_move(displacement);
    }
}

/// Plugin Rapier backend'а (включает RapierPhysicsPlugin)
pub struct RapierPhysicsBackendPlugin;

impl Plugin for RapierPhysicsBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .add_systems(
                Update,
                (
                    detect_ground_rapier.in_set(ControllerSet::DetectGround),
                    apply_rapier_motion.in_set(ControllerSet::ApplyMotion),
                ),
            );
    }
}
