//! Locomotion: velocity integration + ground check
//!
//! Чистые функции, ECS обвязка - в `controller`.

pub mod ground;
pub mod integrator;

pub use ground::{is_grounded, GroundSweep};
pub use integrator::{
    desired_direction, integrate_velocity, move_towards, move_towards_horizontal, LocomotionStep,
};
