//! Orientation controller: yaw тела + pitch look target
//!
//! Конвенции:
//! - углы в градусах
//! - yaw положительный = поворот вправо (по часовой, если смотреть сверху).
//!   В Bevy (right-handed, Y up) это вращение вокруг +Y на отрицательный угол.
//! - pitch положительный = взгляд вверх (вращение вокруг local +X)
//! - mouse delta в screen space: x вправо +, y вниз +
//!
//! Yaw никогда не клампится. Pitch клампится каждый frame (даже при can_move = false).

use bevy::prelude::*;

/// Приводит угол к диапазону (-180, 180]
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Поворот тела вокруг local up
pub fn apply_yaw(body: &mut Transform, degrees: f32) {
    body.rotate_local_y(-degrees.to_radians());
}

/// Поворот look target вокруг local right
pub fn apply_pitch(look_target: &mut Transform, degrees: f32) {
    look_target.rotate_local_x(degrees.to_radians());
}

/// Mouse delta → yaw тела и pitch look target
///
/// Вертикальная delta инвертируется: мышь вверх (y < 0) → взгляд вверх.
pub fn apply_look_input(
    body: &mut Transform,
    look_target: &mut Transform,
    delta: Vec2,
    sensitivity: f32,
    dt: f32,
) {
    apply_yaw(body, delta.x * sensitivity * dt);
    apply_pitch(look_target, -delta.y * sensitivity * dt);
}

/// Текущий yaw тела в градусах, (-180, 180]
pub fn yaw_degrees(body: &Transform) -> f32 {
    let q = body.rotation;
    // Twist вокруг Y, знак инвертирован под конвенцию "вправо = +"
    normalize_angle(-(2.0 * q.y.atan2(q.w)).to_degrees())
}

/// Local pitch look target в градусах, (-180, 180]
pub fn pitch_degrees(look_target: &Transform) -> f32 {
    let q = look_target.rotation;
    normalize_angle((2.0 * q.x.atan2(q.w)).to_degrees())
}

/// Clamp pass: pitch ∈ [-bounds, bounds], yaw/roll look target обнуляются
///
/// Возвращает записанный pitch.
pub fn clamp_look_pitch(look_target: &mut Transform, bounds: f32) -> f32 {
    let pitch = pitch_degrees(look_target).clamp(-bounds, bounds);
    look_target.rotation = Quat::from_rotation_x(pitch.to_radians());
    pitch
}
