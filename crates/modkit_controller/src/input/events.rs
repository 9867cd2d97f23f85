//! Input events
//!
//! Три независимых уведомления от input source. Доставляются в InputLatch
//! только тем entities, у которых есть `InputSource`.

use bevy::prelude::*;

/// Movement vector (WASD / stick)
///
/// # Coordinate System
/// - `x`: -1.0 (left) → +1.0 (right)
/// - `y`: -1.0 (backward) → +1.0 (forward)
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveInput {
    pub entity: Entity,
    pub direction: Vec2,
}

/// Jump trigger (just_pressed, без payload)
#[derive(Event, Debug, Clone, Copy)]
pub struct JumpInput {
    pub entity: Entity,
}

/// Mouse look delta (screen space: x вправо +, y вниз +)
#[derive(Event, Debug, Clone, Copy)]
pub struct LookInput {
    pub entity: Entity,
    pub delta: Vec2,
}

/// Marker: entity подписан на input events
///
/// Добавление = subscribe, удаление/despawn = unsubscribe + очистка InputLatch.
/// Controller без InputSource работает, но никогда не получает input.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(super::InputLatch)]
pub struct InputSource;
