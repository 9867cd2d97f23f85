//! Scripted input source для headless режима
//!
//! Заменяет клавиатуру/мышь: каждый frame шлёт MoveInput/LookInput,
//! периодически JumpInput. Look jitter берётся из DeterministicRng,
//! поэтому одинаковый seed = одинаковая траектория.

use bevy::prelude::*;
use rand::Rng;

use super::events::{JumpInput, LookInput, MoveInput};
use crate::DeterministicRng;

/// Детерминированный "бот" вместо игрока
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ScriptedInput {
    /// Постоянный movement input
    pub move_direction: Vec2,
    /// Максимальный |delta| mouse jitter по каждой оси
    pub max_look_delta: f32,
    /// Прыжок каждые N frame'ов (0 = никогда)
    pub jump_interval: u32,
    /// Счётчик frame'ов (для jump_interval)
    pub frame: u32,
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self {
            move_direction: Vec2::new(0.0, 1.0), // Вперёд
            max_look_delta: 2.0,
            jump_interval: 120,
            frame: 0,
        }
    }
}

impl ScriptedInput {
    /// Прыгать ли на текущем frame
    pub fn wants_jump(&self) -> bool {
        self.jump_interval > 0 && self.frame > 0 && self.frame % self.jump_interval == 0
    }
}

/// Система: ScriptedInput → input events
pub fn drive_scripted_input(
    mut rng: ResMut<DeterministicRng>,
    mut scripts: Query<(Entity, &mut ScriptedInput)>,
    mut move_events: EventWriter<MoveInput>,
    mut jump_events: EventWriter<JumpInput>,
    mut look_events: EventWriter<LookInput>,
) {
    for (entity, mut script) in scripts.iter_mut() {
        script.frame = script.frame.wrapping_add(1);

        move_events.write(MoveInput {
            entity,
            direction: script.move_direction,
        });

        let delta = if script.max_look_delta > 0.0 {
            let range = script.max_look_delta;
            Vec2::new(
                rng.rng.gen_range(-range..=range),
                rng.rng.gen_range(-range..=range),
            )
        } else {
            Vec2::ZERO
        };
        look_events.write(LookInput { entity, delta });

        if script.wants_jump() {
            jump_events.write(JumpInput { entity });
        }
    }
}
