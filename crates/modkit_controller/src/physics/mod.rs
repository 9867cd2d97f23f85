//! Physics boundary: shape cast + collision-aware mover
//!
//! Контроллер не знает про конкретный physics engine. Ему нужны две вещи:
//! - `ShapeCaster`: sphere cast вниз для ground check (bool)
//! - `CharacterMover`: "сдвинь на displacement, разреши контакты сам"
//!
//! Backends:
//! - `headless`: плоский пол на y = const, Transform двигаем напрямую
//! - `rapier`: ReadRapierContext::cast_shape + KinematicCharacterController

use bevy::prelude::*;

use crate::error::ControllerError;

pub mod headless;
pub mod rapier;

pub use headless::{FlatGround, HeadlessPhysicsPlugin, TransformMover};
pub use rapier::{RapierMover, RapierPhysicsBackendPlugin, RapierShapeCaster};

/// Фильтр поверхностей для ground check (bitmask collision groups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct GroundFilter {
    pub groups: u32,
}

impl GroundFilter {
    pub const ALL: Self = Self { groups: u32::MAX };

    pub fn new(groups: u32) -> Self {
        Self { groups }
    }

    pub fn matches(&self, surface_groups: u32) -> bool {
        self.groups & surface_groups != 0
    }
}

impl Default for GroundFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Shape cast query (используется только для ground check)
pub trait ShapeCaster {
    /// Sphere `radius` из `origin` по `direction` на `max_distance`: задели ли поверхность из `filter`
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        filter: GroundFilter,
    ) -> bool;
}

/// Collision-aware mover: применяет displacement, контакты (slide/stop) - его забота
pub trait CharacterMover {
    fn request_move(&mut self, displacement: Vec3);

    /// Радиус и высота коллайдера (для ground sweep)
    fn collider(&self) -> CharacterMotor;
}

/// Какой backend двигает персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MotorBackend {
    #[default]
    Headless,
    Rapier,
}

/// Collision-aware mover персонажа (capsule)
///
/// Без этого компонента controller не может двигаться - это startup precondition,
/// проверяется `verify_controller_dependencies`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterMotor {
    /// Радиус capsule (m)
    pub radius: f32,
    /// Полная высота capsule (m), включая полусферы
    pub height: f32,
    /// Слой(и) поверхностей, считающихся землёй
    pub ground_filter: GroundFilter,
    pub backend: MotorBackend,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            ground_filter: GroundFilter::ALL,
            backend: MotorBackend::Headless,
        }
    }
}

impl CharacterMotor {
    pub fn new(radius: f32, height: f32, backend: MotorBackend) -> Result<Self, ControllerError> {
        let motor = Self {
            radius,
            height,
            backend,
            ..default()
        };
        motor.validate()?;
        Ok(motor)
    }

    pub fn with_ground_filter(mut self, ground_filter: GroundFilter) -> Self {
        self.ground_filter = ground_filter;
        self
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        let valid = self.radius.is_finite()
            && self.height.is_finite()
            && self.radius > 0.0
            && self.height >= 2.0 * self.radius;
        if valid {
            Ok(())
        } else {
            Err(ControllerError::InvalidCollider {
                radius: self.radius,
                height: self.height,
            })
        }
    }

    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Половина длины цилиндрической части (для Collider::capsule_y)
    pub fn capsule_half_segment(&self) -> f32 {
        self.half_height() - self.radius
    }
}
