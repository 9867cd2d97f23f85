//! Input latch module
//!
//! Хранит последние значения input-сигналов игрока, контроллер читает их раз в frame.
//!
//! # Архитектура
//!
//! ```text
//! Input source (client keyboard/mouse, ScriptedInput, тесты)
//!     ↓
//! MoveInput / JumpInput / LookInput (ECS events) - events.rs
//!     ↓
//! latch_player_input (только entities с InputSource) - systems.rs
//!     ↓
//! InputLatch (component) - latch.rs
//!     ↓
//! update_controllers (controller module)
//! ```
//!
//! # Компоненты модуля
//!
//! - `latch` - InputLatch (last-write-wins хранилище)
//! - `events` - ECS события от input source
//! - `systems` - latch system + subscribe/unsubscribe observers
//! - `scripted` - детерминированный input source для headless режима

pub mod events;
pub mod latch;
pub mod scripted;
pub mod systems;

pub use events::*;
pub use latch::*;
pub use scripted::*;
pub use systems::*;
