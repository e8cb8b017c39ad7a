//! Head bob: vertical camera oscillation while walking.

use bevy::prelude::*;

use crate::config::HeadBobConfig;
use crate::speed::Locomotion;

/// Horizontal speed (per world axis) below which the character counts as
/// standing still for head bob purposes.
pub const BOB_VELOCITY_THRESHOLD: f32 = 0.1;

/// Inputs the animator needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct BobContext {
    pub enabled: bool,
    pub grounded: bool,
    /// Stairs underfoot switch head bob off regardless of stance.
    pub on_stairs: bool,
    pub velocity: Vec3,
    pub locomotion: Locomotion,
}

impl BobContext {
    /// Whether the character's horizontal velocity counts as moving.
    pub fn is_moving(&self) -> bool {
        self.velocity.x.abs() > BOB_VELOCITY_THRESHOLD
            || self.velocity.z.abs() > BOB_VELOCITY_THRESHOLD
    }
}

/// Phase accumulator and camera baseline.
///
/// While inactive the phase is frozen and the camera is left where it was;
/// nothing resets to the baseline.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadBobAnimator {
    phase: f32,
    baseline: Option<f32>,
}

impl HeadBobAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animator with an already known camera baseline height.
    pub fn with_baseline(baseline: f32) -> Self {
        Self {
            phase: 0.0,
            baseline: Some(baseline),
        }
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    /// Record the camera's resting height. Only the first call has an effect.
    pub fn capture_baseline(&mut self, camera_height: f32) {
        self.baseline.get_or_insert(camera_height);
    }

    /// Advance one frame and return the new camera height, or `None` when the
    /// camera should stay where it is.
    pub fn update(&mut self, dt: f32, context: BobContext, config: &HeadBobConfig) -> Option<f32> {
        if !context.enabled || !context.grounded || context.on_stairs || !context.is_moving() {
            return None;
        }
        let (speed, amount) = context.locomotion.bob(config)?;
        let baseline = self.baseline?;

        self.phase += dt * speed;
        Some(baseline + self.phase.sin() * amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walking() -> BobContext {
        BobContext {
            enabled: true,
            grounded: true,
            on_stairs: false,
            velocity: Vec3::new(0.0, 0.0, -3.0),
            locomotion: Locomotion::Walking,
        }
    }

    #[test]
    fn walking_follows_sine() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBobAnimator::with_baseline(1.6);

        let height = bob.update(0.1, walking(), &config).unwrap();
        let expected = 1.6 + (0.1_f32 * config.walk_speed).sin() * config.walk_amount;

        assert!((height - expected).abs() < 1e-6);
        assert!((bob.phase() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sprint_and_crouch_use_their_own_constants() {
        let config = HeadBobConfig::default();

        let mut sprint = HeadBobAnimator::with_baseline(0.0);
        let context = BobContext {
            locomotion: Locomotion::Sprinting,
            ..walking()
        };
        let height = sprint.update(0.1, context, &config).unwrap();
        assert!((height - (1.5_f32).sin() * config.sprint_amount).abs() < 1e-6);

        let mut crouch = HeadBobAnimator::with_baseline(0.0);
        let context = BobContext {
            locomotion: Locomotion::Crouching,
            ..walking()
        };
        let height = crouch.update(0.1, context, &config).unwrap();
        assert!((height - (0.5_f32).sin() * config.crouch_amount).abs() < 1e-6);
    }

    #[test]
    fn inactive_frames_freeze_phase() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBobAnimator::with_baseline(1.6);
        bob.update(0.1, walking(), &config);
        let phase = bob.phase();

        let disabled = BobContext {
            enabled: false,
            ..walking()
        };
        let airborne = BobContext {
            grounded: false,
            ..walking()
        };
        let still = BobContext {
            velocity: Vec3::new(0.05, -4.0, 0.05),
            ..walking()
        };
        let stairs = BobContext {
            locomotion: Locomotion::OnStairs,
            ..walking()
        };
        let crouched_on_stairs = BobContext {
            on_stairs: true,
            locomotion: Locomotion::Crouching,
            ..walking()
        };

        for context in [disabled, airborne, still, stairs, crouched_on_stairs] {
            assert!(bob.update(0.1, context, &config).is_none());
            assert_eq!(bob.phase(), phase);
        }
    }

    #[test]
    fn movement_threshold_checks_each_axis() {
        let mut context = walking();
        context.velocity = Vec3::new(0.11, 0.0, 0.0);
        assert!(context.is_moving());

        context.velocity = Vec3::new(0.0, 5.0, 0.1);
        assert!(!context.is_moving());
    }

    #[test]
    fn baseline_is_captured_once() {
        let mut bob = HeadBobAnimator::new();
        assert!(bob.update(0.1, walking(), &HeadBobConfig::default()).is_none());

        bob.capture_baseline(1.6);
        bob.capture_baseline(2.0);
        assert_eq!(bob.baseline(), Some(1.6));
    }
}
