//! Headless прогон контроллера
//!
//! Запускает Bevy App без рендера: scripted input гоняет игрока по FlatGround.
//!
//! Usage: `modkit_headless [config.json] [seed]`

use modkit_controller::{
    create_headless_app, log_info, spawn_player_in_world, ControllerError, LocomotionState,
    PlayerControllerConfig, PlayerSpawn, ScriptedInput,
};

fn main() -> Result<(), ControllerError> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut app = create_headless_app(seed);
    log_info(&format!("Starting headless controller run (seed: {})", seed));

    let config = match config_path {
        Some(path) => PlayerControllerConfig::load(path)?,
        None => PlayerControllerConfig::default(),
    };

    let player = spawn_player_in_world(
        app.world_mut(),
        PlayerSpawn {
            config,
            ..Default::default()
        },
    )?;
    app.world_mut()
        .entity_mut(player)
        .insert(ScriptedInput::default());

    // 1000 frame'ов по 1/60 s
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            if let (Some(transform), Some(state)) = (
                world.get::<bevy::prelude::Transform>(player),
                world.get::<LocomotionState>(player),
            ) {
                log_info(&format!(
                    "Tick {}: position {:?}, velocity {:?}, grounded {}",
                    tick, transform.translation, state.velocity, state.grounded
                ));
            }
        }
    }

    log_info("Headless run complete");
    Ok(())
}
