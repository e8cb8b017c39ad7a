//! Mouse look: body yaw and clamped camera pitch.
//!
//! Angles are tracked in degrees. Positive pitch tilts the camera down and is
//! bounded by `lower_limit`; negative pitch tilts it up and is bounded by
//! `upper_limit`. Positive yaw turns the body to the right.

use bevy::prelude::*;

use crate::config::LookConfig;

/// Result of one look step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookUpdate {
    /// Yaw to add to the body this step, in degrees.
    pub yaw_delta: f32,
    /// Absolute camera pitch after clamping, in degrees.
    pub pitch: f32,
}

impl LookUpdate {
    /// Rotation to apply to the body around world up.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw_delta.to_radians())
    }

    /// Camera local rotation, about its horizontal axis only.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.pitch.to_radians())
    }
}

/// Accumulated camera pitch.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct LookController {
    pitch: f32,
}

impl LookController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pitch in degrees.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Apply one frame of look input.
    pub fn look(&mut self, input: Vec2, dt: f32, config: &LookConfig) -> LookUpdate {
        let yaw_delta = input.x * dt * config.x_sensitivity;

        self.pitch -= input.y * dt * config.y_sensitivity;
        // f32::clamp panics on inverted limits; the lower bound wins here.
        let (min, max) = (-config.upper_limit, config.lower_limit);
        if self.pitch < min {
            self.pitch = min;
        } else if self.pitch > max {
            self.pitch = max;
        }

        LookUpdate {
            yaw_delta,
            pitch: self.pitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_stays_clamped_under_extreme_input() {
        let config = LookConfig {
            upper_limit: 70.0,
            lower_limit: 50.0,
            ..default()
        };
        let mut look = LookController::new();

        for _ in 0..500 {
            let update = look.look(Vec2::new(0.0, 1000.0), 0.02, &config);
            assert!(update.pitch >= -70.0 && update.pitch <= 50.0);
        }
        assert_eq!(look.pitch(), -70.0);

        for _ in 0..500 {
            let update = look.look(Vec2::new(0.0, -1000.0), 0.02, &config);
            assert!(update.pitch >= -70.0 && update.pitch <= 50.0);
        }
        assert_eq!(look.pitch(), 50.0);
    }

    #[test]
    fn upward_input_decreases_pitch() {
        let mut look = LookController::new();
        let update = look.look(Vec2::new(0.0, 2.0), 0.1, &LookConfig::default());

        assert!((update.pitch + 3.0).abs() < 1e-5);
    }

    #[test]
    fn yaw_is_unbounded() {
        let config = LookConfig::default();
        let mut look = LookController::new();
        let update = look.look(Vec2::new(100.0, 0.0), 1.0, &config);

        assert_eq!(update.yaw_delta, 1500.0);
        assert_eq!(look.pitch(), 0.0);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let update = LookUpdate {
            yaw_delta: 90.0,
            pitch: 0.0,
        };
        let forward = update.body_rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn positive_pitch_looks_down() {
        let update = LookUpdate {
            yaw_delta: 0.0,
            pitch: 30.0,
        };
        let forward = update.camera_rotation() * Vec3::NEG_Z;
        assert!(forward.y < 0.0);
        assert!(forward.x.abs() < 1e-6);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let config = LookConfig {
            upper_limit: -10.0,
            lower_limit: -20.0,
            ..default()
        };
        let mut look = LookController::new();
        let update = look.look(Vec2::new(0.0, 1.0), 0.1, &config);
        assert_eq!(update.pitch, 10.0);

        let update = look.look(Vec2::new(0.0, -100.0), 0.1, &config);
        assert_eq!(update.pitch, 10.0);
    }
}
