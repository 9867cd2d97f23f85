use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use modkit_controller::{FirstPersonController, JumpInput, LookInput, LookTarget, MoveInput};

/// Локальный игрок (получатель клавиатуры/мыши)
#[derive(Resource, Debug, Clone, Copy)]
pub struct LocalPlayer(pub Entity);

pub struct FirstPersonInputPlugin;

impl Plugin for FirstPersonInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, lock_cursor)
            .add_systems(
                Update,
                (
                    attach_camera,
                    toggle_control,
                    send_player_input.run_if(resource_exists::<LocalPlayer>),
                )
                    .chain()
                    .before(modkit_controller::ControllerSet::LatchInput),
            );
    }
}

fn set_cursor_locked(window: &mut Window, locked: bool) {
    if locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Курсор захвачен и скрыт с первого кадра
fn lock_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        set_cursor_locked(&mut window, true);
    }
}

/// Камера живёт на look target (pitch от него, yaw от тела через hierarchy)
fn attach_camera(mut commands: Commands, look_targets: Query<Entity, Added<LookTarget>>) {
    for look_target in look_targets.iter() {
        commands.entity(look_target).with_child(Camera3d::default());
    }
}

/// Escape: вкл/выкл управление (can_move) и отпускает курсор
fn toggle_control(
    keys: Res<ButtonInput<KeyCode>>,
    player: Option<Res<LocalPlayer>>,
    mut controllers: Query<&mut FirstPersonController>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    let Some(player) = player else {
        return;
    };
    let Ok(mut controller) = controllers.get_mut(player.0) else {
        return;
    };

    controller.can_move = !controller.can_move;
    if let Ok(mut window) = windows.single_mut() {
        set_cursor_locked(&mut window, controller.can_move);
    }
}

/// WASD / Space / mouse → input events контроллера
///
/// Move и look шлём каждый frame (в т.ч. нулевые), иначе latch держит старое значение.
fn send_player_input(
    player: Res<LocalPlayer>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut move_events: EventWriter<MoveInput>,
    mut jump_events: EventWriter<JumpInput>,
    mut look_events: EventWriter<LookInput>,
) {
    let entity = player.0;

    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    // Диагональ не быстрее прямой
    move_events.write(MoveInput {
        entity,
        direction: direction.normalize_or_zero(),
    });

    if keys.just_pressed(KeyCode::Space) {
        jump_events.write(JumpInput { entity });
    }

    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    look_events.write(LookInput { entity, delta });
}
