//! Input latch systems (ECS)
//!
//! - `latch_player_input`: events → InputLatch (только подписанные entities)
//! - observers на InputSource: subscribe / unsubscribe lifecycle

use bevy::prelude::*;

use super::events::{InputSource, JumpInput, LookInput, MoveInput};
use super::latch::InputLatch;

/// Переносит input events в InputLatch
///
/// Events для entities без InputSource (ещё не подписан / уже отписан) отбрасываются.
/// Несколько events за frame → остаётся последний (last-write-wins).
pub fn latch_player_input(
    mut move_events: EventReader<MoveInput>,
    mut jump_events: EventReader<JumpInput>,
    mut look_events: EventReader<LookInput>,
    mut latches: Query<&mut InputLatch, With<InputSource>>,
) {
    for event in move_events.read() {
        if let Ok(mut latch) = latches.get_mut(event.entity) {
            latch.on_move(event.direction);
        }
    }

    for event in jump_events.read() {
        if let Ok(mut latch) = latches.get_mut(event.entity) {
            latch.on_jump();
        }
    }

    for event in look_events.read() {
        if let Ok(mut latch) = latches.get_mut(event.entity) {
            latch.on_look(event.delta);
        }
    }
}

/// Observer: InputSource добавлен → entity подписан
///
/// InputLatch приходит через Required Components, тут только лог.
pub fn on_input_source_added(trigger: Trigger<OnAdd, InputSource>) {
    crate::log_info(&format!(
        "Input source subscribed for entity {:?}",
        trigger.target()
    ));
}

/// Observer: InputSource удалён (или entity despawn) → отписка
///
/// Сбрасываем latch, чтобы последний movement/look не применялся бесконечно.
pub fn on_input_source_removed(
    trigger: Trigger<OnRemove, InputSource>,
    mut latches: Query<&mut InputLatch>,
) {
    let entity = trigger.target();
    if let Ok(mut latch) = latches.get_mut(entity) {
        latch.clear();
    }
    crate::log_info(&format!("Input source unsubscribed for entity {:?}", entity));
}
