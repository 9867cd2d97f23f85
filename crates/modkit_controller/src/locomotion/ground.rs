//! Ground check: короткий sphere sweep вниз
//!
//! Sphere радиуса коллайдера стартует из центра тела, летит вниз на
//! `height/2 - radius + margin` - т.е. до подошвы capsule плюс небольшой запас.
//! Нормаль/угол поверхности не сохраняем, результат - только bool.

use bevy::prelude::*;

use crate::physics::{CharacterMotor, GroundFilter, ShapeCaster};

/// Параметры одного ground sweep'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSweep {
    pub origin: Vec3,
    pub radius: f32,
    pub max_distance: f32,
    pub filter: GroundFilter,
}

impl GroundSweep {
    pub fn for_motor(center: Vec3, motor: &CharacterMotor, margin: f32) -> Self {
        Self {
            origin: center,
            radius: motor.radius,
            max_distance: motor.capsule_half_segment() + margin,
            filter: motor.ground_filter,
        }
    }

    pub fn cast(&self, caster: &impl ShapeCaster) -> bool {
        caster.cast_sphere(
            self.origin,
            self.radius,
            Dir3::NEG_Y,
            self.max_distance,
            self.filter,
        )
    }
}

/// Grounded ли персонаж с центром в `center`
pub fn is_grounded(
    caster: &impl ShapeCaster,
    center: Vec3,
    motor: &CharacterMotor,
    margin: f32,
) -> bool {
    GroundSweep::for_motor(center, motor, margin).cast(caster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Запоминает последний запрос и отвечает заданным значением
    struct RecordingCaster {
        hit: bool,
        last: RefCell<Option<(Vec3, f32, Dir3, f32, GroundFilter)>>,
    }

    impl ShapeCaster for RecordingCaster {
        fn cast_sphere(
            &self,
            origin: Vec3,
            radius: f32,
            direction: Dir3,
            max_distance: f32,
            filter: GroundFilter,
        ) -> bool {
            *self.last.borrow_mut() = Some((origin, radius, direction, max_distance, filter));
            self.hit
        }
    }

    #[test]
    fn test_sweep_uses_collider_dimensions() {
        // Capsule 2m / r=0.5, margin 0.1 → sphere r=0.5 на 0.6m вниз
        let caster = RecordingCaster {
            hit: true,
            last: RefCell::new(None),
        };
        let motor = CharacterMotor::default().with_ground_filter(GroundFilter::new(0b10));

        assert!(is_grounded(&caster, Vec3::new(1.0, 1.0, 2.0), &motor, 0.1));

        let (origin, radius, direction, distance, filter) = caster.last.borrow().unwrap();
        assert_eq!(origin, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(radius, 0.5);
        assert_eq!(direction, Dir3::NEG_Y);
        assert!((distance - 0.6).abs() < 1e-6);
        assert_eq!(filter, GroundFilter::new(0b10));
    }

    #[test]
    fn test_result_passes_through() {
        let caster = RecordingCaster {
            hit: false,
            last: RefCell::new(None),
        };
        assert!(!is_grounded(&caster, Vec3::ZERO, &CharacterMotor::default(), 0.1));
    }
}
