//! Конфиг контроллера (tunable параметры движения и камеры)
//!
//! Загружается один раз при активации (defaults или JSON), дальше read-only:
//! FirstPersonController хранит копию в приватном поле.
//!
//! JSON формат - плоский объект, все поля опциональны (`#[serde(default)]`):
//! ```json
//! { "movement_speed": 6.0, "jump_height": 1.5, "camera_bounds": 80.0 }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Скорость прижатия к земле (m/s), пока персонаж grounded и падает.
///
/// Не ноль: иначе следующий ground check промахивается по поверхности и grounded мигает.
/// Подобрано под capsule высотой ~2m.
pub const DEFAULT_GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Запас (m) к дистанции ground check sweep'а
pub const DEFAULT_GROUND_CHECK_MARGIN: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PlayerControllerConfig {
    /// Целевая горизонтальная скорость (m/s)
    pub movement_speed: f32,
    /// Разгон на земле (m/s²)
    pub ground_acceleration: f32,
    /// Дополнительное торможение без input (m/s²), применяется и в воздухе
    pub ground_deceleration: f32,
    /// Разгон в воздухе (m/s²)
    pub air_acceleration: f32,
    /// Высота апекса прыжка (m)
    pub jump_height: f32,
    /// Множитель мировой гравитации
    pub gravity_multiplier: f32,
    /// Симметричный лимит pitch камеры (градусы)
    pub camera_bounds: f32,
    /// Градусы поворота на единицу mouse delta в секунду
    pub mouse_sensitivity: f32,
    pub grounded_vertical_velocity: f32,
    pub ground_check_margin: f32,
}

impl Default for PlayerControllerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 6.0,
            ground_acceleration: 10.0,
            ground_deceleration: 10.0,
            air_acceleration: 5.0,
            jump_height: 1.5,
            gravity_multiplier: 1.0,
            camera_bounds: 80.0,
            mouse_sensitivity: 100.0,
            grounded_vertical_velocity: DEFAULT_GROUNDED_VERTICAL_VELOCITY,
            ground_check_margin: DEFAULT_GROUND_CHECK_MARGIN,
        }
    }
}

impl PlayerControllerConfig {
    /// Проверка инвариантов: всё finite, скорости изменения ≥ 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("movement_speed", self.movement_speed),
            ("ground_acceleration", self.ground_acceleration),
            ("ground_deceleration", self.ground_deceleration),
            ("air_acceleration", self.air_acceleration),
            ("jump_height", self.jump_height),
            ("gravity_multiplier", self.gravity_multiplier),
            ("camera_bounds", self.camera_bounds),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("grounded_vertical_velocity", self.grounded_vertical_velocity),
            ("ground_check_margin", self.ground_check_margin),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let non_negative = [
            ("ground_acceleration", self.ground_acceleration),
            ("ground_deceleration", self.ground_deceleration),
            ("air_acceleration", self.air_acceleration),
            ("jump_height", self.jump_height),
            ("gravity_multiplier", self.gravity_multiplier),
            ("camera_bounds", self.camera_bounds),
            ("ground_check_margin", self.ground_check_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.grounded_vertical_velocity > 0.0 {
            return Err(ConfigError::Positive {
                field: "grounded_vertical_velocity",
                value: self.grounded_vertical_velocity,
            });
        }

        Ok(())
    }

    /// Парсит JSON и валидирует. Отсутствующие поля берутся из Default.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        crate::log_info(&format!("Loaded controller config from {}", path.display()));
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Скорость отрыва для прыжка на `jump_height`: v = sqrt(2·g·h)
    ///
    /// `gravity` - мировая гравитация (знак не важен, берётся модуль).
    pub fn jump_takeoff_speed(&self, gravity: f32) -> f32 {
        (self.jump_height * 2.0 * gravity.abs() * self.gravity_multiplier).sqrt()
    }

    pub fn acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_acceleration
        } else {
            self.air_acceleration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlayerControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.movement_speed, 6.0);
        assert_eq!(config.camera_bounds, 80.0);
        assert_eq!(config.grounded_vertical_velocity, -2.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config =
            PlayerControllerConfig::from_json_str(r#"{ "movement_speed": 9.5, "camera_bounds": 60 }"#)
                .unwrap();

        assert_eq!(config.movement_speed, 9.5);
        assert_eq!(config.camera_bounds, 60.0);
        assert_eq!(config.ground_acceleration, 10.0);
        assert_eq!(config.jump_height, 1.5);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let config = PlayerControllerConfig {
            air_acceleration: 2.5,
            mouse_sensitivity: 42.0,
            ..default()
        };
        let json = config.to_json_pretty().unwrap();
        let parsed = PlayerControllerConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_negative_acceleration_rejected() {
        let result = PlayerControllerConfig::from_json_str(r#"{ "ground_acceleration": -1.0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Negative { field: "ground_acceleration", .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = PlayerControllerConfig {
            movement_speed: f32::NAN,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "movement_speed", .. })
        ));
    }

    #[test]
    fn test_positive_ground_floor_rejected() {
        let config = PlayerControllerConfig {
            grounded_vertical_velocity: 0.5,
            ..default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Positive { .. })));
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        let result = PlayerControllerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = PlayerControllerConfig::load("/definitely/not/here/controller.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_takeoff_speed_reaches_jump_height() {
        let config = PlayerControllerConfig::default();
        let gravity = -9.81;
        let v = config.jump_takeoff_speed(gravity);

        // v² = 2·g·h
        let expected = 2.0 * config.gravity_multiplier * gravity.abs() * config.jump_height;
        assert!((v * v - expected).abs() < 1e-4, "v² = {}, expected {}", v * v, expected);
    }

    #[test]
    fn test_acceleration_selects_by_grounded() {
        let config = PlayerControllerConfig::default();
        assert_eq!(config.acceleration(true), 10.0);
        assert_eq!(config.acceleration(false), 5.0);
    }
}
