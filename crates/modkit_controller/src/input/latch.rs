//! InputLatch - последние значения input-сигналов

use bevy::prelude::*;

/// Последний полученный input игрока
///
/// Семантика last-write-wins: промежуточные значения между frame'ами теряются.
/// Значения не валидируются и не клампятся.
///
/// # Fields
/// - `movement`: x = strafe (right +), y = forward (+)
/// - `look_delta`: mouse delta в screen space (x вправо +, y вниз +)
/// - `jump_pending`: edge trigger, сбрасывается при чтении (`take_jump`)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InputLatch {
    pub movement: Vec2,
    pub look_delta: Vec2,
    pub jump_pending: bool,
}

impl InputLatch {
    pub fn on_move(&mut self, movement: Vec2) {
        self.movement = movement;
    }

    pub fn on_jump(&mut self) {
        self.jump_pending = true;
    }

    pub fn on_look(&mut self, delta: Vec2) {
        self.look_delta = delta;
    }

    /// Забрать jump edge (true максимум один раз на каждый on_jump)
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut latch = InputLatch::default();

        latch.on_move(Vec2::new(1.0, 0.0));
        latch.on_move(Vec2::new(0.0, -1.0));
        latch.on_look(Vec2::new(3.0, 4.0));
        latch.on_look(Vec2::new(-2.0, 0.5));

        assert_eq!(latch.movement, Vec2::new(0.0, -1.0));
        assert_eq!(latch.look_delta, Vec2::new(-2.0, 0.5));
    }

    #[test]
    fn test_values_pass_through_unclamped() {
        let mut latch = InputLatch::default();
        latch.on_move(Vec2::new(5.0, -7.0));
        assert_eq!(latch.movement, Vec2::new(5.0, -7.0));
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut latch = InputLatch::default();
        assert!(!latch.take_jump());

        latch.on_jump();
        latch.on_jump(); // Без очереди: два нажатия за frame = один прыжок
        assert!(latch.take_jump());
        assert!(!latch.take_jump());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut latch = InputLatch::default();
        latch.on_move(Vec2::ONE);
        latch.on_look(Vec2::ONE);
        latch.on_jump();

        latch.clear();
        assert_eq!(latch, InputLatch::default());
    }
}
