//! Modkit first-person controller
//!
//! Locomotion + mouse-look контроллер на Bevy 0.16 (ECS).
//!
//! Слои:
//! - input: events от input source → InputLatch
//! - locomotion / orientation: чистая математика (velocity, yaw/pitch)
//! - controller: ECS обвязка, один update на entity за frame
//! - physics: ground check + mover за trait'ами (headless / rapier backend)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod orientation;
pub mod physics;

// Re-export для удобства
pub use config::PlayerControllerConfig;
pub use controller::{
    spawn_player, spawn_player_in_world, FirstPersonController, LocomotionState, LookTarget,
    PlayerSpawn, WorldGravity,
};
pub use error::{ConfigError, ControllerError};
pub use input::{InputLatch, InputSource, JumpInput, LookInput, MoveInput, ScriptedInput};
pub use logger::*;
pub use physics::{
    CharacterMotor, CharacterMover, FlatGround, GroundFilter, HeadlessPhysicsPlugin,
    MotorBackend, RapierPhysicsBackendPlugin, ShapeCaster,
};

/// Порядок controller systems внутри frame (Update)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Input events → InputLatch
    LatchInput,
    /// Backend: ground check
    DetectGround,
    /// Velocity, rotation, pitch clamp
    Integrate,
    /// Backend: displacement → mover
    ApplyMotion,
}

/// Главный plugin контроллера (без physics backend'а)
///
/// Backend добавляется отдельно: `HeadlessPhysicsPlugin` или `RapierPhysicsBackendPlugin`.
pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveInput>()
            .add_event::<JumpInput>()
            .add_event::<LookInput>()
            .init_resource::<WorldGravity>()
            .register_type::<WorldGravity>()
            .register_type::<InputLatch>()
            .register_type::<InputSource>()
            .register_type::<LocomotionState>()
            .register_type::<LookTarget>()
            .register_type::<CharacterMotor>()
            .register_type::<PlayerControllerConfig>()
            .configure_sets(
                Update,
                (
                    ControllerSet::LatchInput,
                    ControllerSet::DetectGround,
                    ControllerSet::Integrate,
                    ControllerSet::ApplyMotion,
                )
                    .chain(),
            )
            .add_observer(input::on_input_source_added)
            .add_observer(input::on_input_source_removed)
            .add_systems(
                Update,
                (
                    input::latch_player_input.in_set(ControllerSet::LatchInput),
                    (
                        controller::verify_controller_dependencies,
                        controller::update_controllers,
                    )
                        .chain()
                        .in_set(ControllerSet::Integrate),
                ),
            );
    }
}

/// Scripted input (headless бинарник, тесты детерминизма)
pub struct ScriptedInputPlugin;

impl Plugin for ScriptedInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeterministicRng>()
            .register_type::<ScriptedInput>()
            .add_systems(
                Update,
                input::drive_scripted_input
                    .in_set(ControllerSet::LatchInput)
                    .before(input::latch_player_input),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Шаг frame'а в headless режиме (60Hz)
pub const HEADLESS_FRAME_SECS: f64 = 1.0 / 60.0;

/// Создаёт minimal Bevy App для headless режима
///
/// Controller + headless backend + scripted input, RNG с заданным seed.
/// Время ручное (HEADLESS_FRAME_SECS на update), первый update идёт с dt = 0.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins((
            PlayerControllerPlugin,
            HeadlessPhysicsPlugin,
            ScriptedInputPlugin,
        ))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            HEADLESS_FRAME_SECS,
        )));

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);

        let xs: Vec<f32> = (0..16).map(|_| a.rng.gen_range(-1.0..1.0)).collect();
        let ys: Vec<f32> = (0..16).map(|_| b.rng.gen_range(-1.0..1.0)).collect();

        assert_eq!(xs, ys);
    }

    #[test]
    fn test_headless_app_has_controller_resources() {
        let app = create_headless_app(1);

        assert_eq!(app.world().resource::<DeterministicRng>().seed, 1);
        assert!(app.world().contains_resource::<WorldGravity>());
        assert!(app.world().contains_resource::<FlatGround>());
    }
}
