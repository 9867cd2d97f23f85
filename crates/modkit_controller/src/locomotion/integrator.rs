//! Locomotion integrator: latched input → velocity
//!
//! Чистая математика, без ECS. Порядок за один frame:
//! 1. direction = right·x + forward·y
//! 2. target = direction · movement_speed
//! 3. horizontal velocity → target (per-axis, ≤ accel·dt, без overshoot)
//! 4. нет input → ещё одно торможение к нулю (≤ deceleration·dt)
//! 5. jump (только grounded): velocity.y = sqrt(2·g·h)
//! 6. gravity каждый frame; grounded + падение → velocity.y = grounded floor

use bevy::prelude::*;

use crate::config::PlayerControllerConfig;

/// Входные данные одного шага интеграции
#[derive(Debug, Clone, Copy)]
pub struct LocomotionStep {
    /// Желаемое направление в world space (из `desired_direction`)
    pub direction: Vec3,
    pub grounded: bool,
    /// Jump edge, прочитанный из latch в этом frame
    pub jump: bool,
    /// Мировая гравитация по Y (обычно -9.81)
    pub gravity: f32,
    pub dt: f32,
}

/// Направление движения в базисе тела (x = strafe, y = forward)
pub fn desired_direction(right: Vec3, forward: Vec3, input: Vec2) -> Vec3 {
    right * input.x + forward * input.y
}

/// Сдвигает `current` к `target` не больше чем на `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Per-axis move_towards для X/Z, Y не трогаем (им управляет gravity/jump)
pub fn move_towards_horizontal(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    Vec3::new(
        move_towards(current.x, target.x, max_delta),
        current.y,
        move_towards(current.z, target.z, max_delta),
    )
}

/// Один шаг интеграции velocity
pub fn integrate_velocity(
    velocity: Vec3,
    step: &LocomotionStep,
    config: &PlayerControllerConfig,
) -> Vec3 {
    let target = step.direction * config.movement_speed;
    let rate = config.acceleration(step.grounded);

    let mut velocity = move_towards_horizontal(velocity, target, rate * step.dt);

    // Второй проход только без input: остановка резче, чем симметричный разгон
    if step.direction == Vec3::ZERO {
        velocity = move_towards_horizontal(
            velocity,
            Vec3::new(0.0, velocity.y, 0.0),
            config.ground_deceleration * step.dt,
        );
    }

    if step.jump && step.grounded {
        velocity.y = config.jump_takeoff_speed(step.gravity);
    }

    velocity.y += step.gravity * config.gravity_multiplier * step.dt;

    if step.grounded && velocity.y < 0.0 {
        velocity.y = config.grounded_vertical_velocity;
    }

    velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f32 = -9.81;

    fn horizontal_speed(velocity: Vec3) -> f32 {
        Vec2::new(velocity.x, velocity.z).length()
    }

    fn step(direction: Vec3, grounded: bool, dt: f32) -> LocomotionStep {
        LocomotionStep {
            direction,
            grounded,
            jump: false,
            gravity: GRAVITY,
            dt,
        }
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        assert_eq!(move_towards(0.0, 1.0, 0.4), 0.4);
        assert_eq!(move_towards(0.9, 1.0, 0.4), 1.0);
        assert_eq!(move_towards(0.0, -1.0, 0.4), -0.4);
        assert_eq!(move_towards(-0.9, -1.0, 0.4), -1.0);
        assert_eq!(move_towards(3.0, 3.0, 0.0), 3.0);
    }

    #[test]
    fn test_desired_direction_uses_body_basis() {
        // Тело повернуто на 90° вправо: right = -Z, forward = -X
        let right = Vec3::NEG_Z;
        let forward = Vec3::NEG_X;

        assert_eq!(desired_direction(right, forward, Vec2::new(0.0, 1.0)), Vec3::NEG_X);
        assert_eq!(desired_direction(right, forward, Vec2::new(1.0, 0.0)), Vec3::NEG_Z);
        assert_eq!(desired_direction(right, forward, Vec2::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_forward_scenario_saturates_on_frame_six() {
        // speed=6, groundAccel=10, dt=0.1 → +1 m/s за frame
        let config = PlayerControllerConfig::default();
        let forward = Vec3::NEG_Z;
        let mut velocity = Vec3::ZERO;

        for frame in 1..=10 {
            velocity = integrate_velocity(velocity, &step(forward, true, 0.1), &config);
            let speed = -velocity.z;

            if frame < 6 {
                assert!((speed - frame as f32).abs() < 1e-4, "frame {}: {}", frame, speed);
            } else {
                assert_eq!(speed, 6.0, "frame {}", frame);
            }
        }
    }

    #[test]
    fn test_strafe_follows_min_speed_accel_t() {
        let config = PlayerControllerConfig::default();
        let dt = 1.0 / 60.0;
        let mut velocity = Vec3::ZERO;

        for frame in 1..=120 {
            velocity = integrate_velocity(velocity, &step(Vec3::X, true, dt), &config);
            let elapsed = frame as f32 * dt;
            let expected = (config.ground_acceleration * elapsed).min(config.movement_speed);
            assert!(
                (velocity.x - expected).abs() < 1e-3,
                "t={}: vx={}, expected {}",
                elapsed,
                velocity.x,
                expected
            );
        }
        assert_eq!(velocity.x, config.movement_speed);
    }

    #[test]
    fn test_zero_input_converges_monotonically() {
        let config = PlayerControllerConfig::default();
        let mut velocity = Vec3::new(4.0, 0.0, -3.0);
        let mut previous = horizontal_speed(velocity);

        for _ in 0..200 {
            velocity = integrate_velocity(velocity, &step(Vec3::ZERO, true, 0.02), &config);
            let current = horizontal_speed(velocity);
            assert!(current <= previous + 1e-6);
            previous = current;
        }

        assert_eq!(velocity.x, 0.0);
        assert_eq!(velocity.z, 0.0);
    }

    #[test]
    fn test_no_input_stops_faster_than_acceleration_alone() {
        // Два прохода: accel (10) + deceleration (10) → 20 m/s² торможения
        let config = PlayerControllerConfig::default();
        let velocity = Vec3::new(6.0, 0.0, 0.0);

        let next = integrate_velocity(velocity, &step(Vec3::ZERO, true, 0.1), &config);
        assert!((next.x - 4.0).abs() < 1e-5, "vx = {}", next.x);
    }

    #[test]
    fn test_airborne_uses_air_acceleration() {
        let config = PlayerControllerConfig::default();
        let next = integrate_velocity(Vec3::ZERO, &step(Vec3::X, false, 0.1), &config);
        // air_acceleration = 5 → 0.5 m/s за 0.1s
        assert!((next.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_grounded_fall_is_clamped_to_floor() {
        let config = PlayerControllerConfig::default();
        let next = integrate_velocity(Vec3::ZERO, &step(Vec3::ZERO, true, 0.016), &config);
        assert_eq!(next.y, config.grounded_vertical_velocity);
    }

    #[test]
    fn test_airborne_gravity_accumulates() {
        let config = PlayerControllerConfig::default();
        let mut velocity = Vec3::ZERO;
        for _ in 0..10 {
            velocity = integrate_velocity(velocity, &step(Vec3::ZERO, false, 0.1), &config);
        }
        assert!((velocity.y - GRAVITY).abs() < 1e-4, "vy = {}", velocity.y);
    }

    #[test]
    fn test_jump_ignored_when_airborne() {
        let config = PlayerControllerConfig::default();
        let jump = LocomotionStep {
            jump: true,
            ..step(Vec3::ZERO, false, 0.1)
        };
        let next = integrate_velocity(Vec3::ZERO, &jump, &config);
        assert!(next.y < 0.0);
    }

    #[test]
    fn test_jump_apex_matches_jump_height() {
        let config = PlayerControllerConfig::default();
        let dt = 0.0005;

        let takeoff = LocomotionStep {
            jump: true,
            ..step(Vec3::ZERO, true, dt)
        };
        let mut velocity = integrate_velocity(Vec3::ZERO, &takeoff, &config);
        let mut height = velocity.y * dt;

        while velocity.y > 0.0 {
            velocity = integrate_velocity(velocity, &step(Vec3::ZERO, false, dt), &config);
            height += velocity.y.max(0.0) * dt;
        }

        assert!(
            (height - config.jump_height).abs() < 0.01,
            "apex {} vs jump_height {}",
            height,
            config.jump_height
        );
    }

    #[test]
    fn test_time_to_apex() {
        // t = v / (k·|g|)
        let config = PlayerControllerConfig {
            gravity_multiplier: 2.0,
            ..default()
        };
        let v = config.jump_takeoff_speed(GRAVITY);
        let t = v / (config.gravity_multiplier * GRAVITY.abs());

        let dt = 0.001;
        let mut velocity = Vec3::new(0.0, v, 0.0);
        let mut elapsed = 0.0;
        while velocity.y > 0.0 {
            velocity = integrate_velocity(velocity, &step(Vec3::ZERO, false, dt), &config);
            elapsed += dt;
        }

        assert!((elapsed - t).abs() < 2.0 * dt, "elapsed {} vs {}", elapsed, t);
    }
}
