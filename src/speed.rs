//! Locomotion mode and speed resolution.

use bevy::prelude::*;

use crate::config::{HeadBobConfig, SpeedConfig};

/// What the character is currently doing with its legs.
///
/// Resolved with strict priority: crouching, then stairs, then sprinting,
/// then walking.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locomotion {
    #[default]
    Walking,
    Sprinting,
    Crouching,
    OnStairs,
}

impl Locomotion {
    pub fn resolve(crouching: bool, on_stairs: bool, sprinting: bool) -> Self {
        if crouching {
            Locomotion::Crouching
        } else if on_stairs {
            Locomotion::OnStairs
        } else if sprinting {
            Locomotion::Sprinting
        } else {
            Locomotion::Walking
        }
    }

    /// Horizontal speed for this mode.
    pub fn speed(self, speeds: &SpeedConfig) -> f32 {
        match self {
            Locomotion::Walking => speeds.walk,
            Locomotion::Sprinting => speeds.sprint,
            Locomotion::Crouching => speeds.crouch,
            Locomotion::OnStairs => speeds.stairs,
        }
    }

    /// Head bob `(speed, amount)` for this mode, `None` on stairs.
    pub fn bob(self, head_bob: &HeadBobConfig) -> Option<(f32, f32)> {
        match self {
            Locomotion::Walking => Some((head_bob.walk_speed, head_bob.walk_amount)),
            Locomotion::Sprinting => Some((head_bob.sprint_speed, head_bob.sprint_amount)),
            Locomotion::Crouching => Some((head_bob.crouch_speed, head_bob.crouch_amount)),
            Locomotion::OnStairs => None,
        }
    }
}

/// Resolve the horizontal speed for the given flags.
#[inline]
pub fn resolve_speed(
    crouching: bool,
    on_stairs: bool,
    sprinting: bool,
    speeds: &SpeedConfig,
) -> f32 {
    Locomotion::resolve(crouching, on_stairs, sprinting).speed(speeds)
}
