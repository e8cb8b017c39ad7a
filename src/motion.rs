//! Fixed-step movement integration.
//!
//! Horizontal velocity is rebuilt every tick from input, speed and facing;
//! vertical velocity carries over between ticks so gravity and jumps
//! accumulate.

use bevy::prelude::*;

/// Velocity state and sprint latch.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionIntegrator {
    velocity: Vec3,
    sprinting: bool,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Velocity of the last tick in world space.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.velocity.y
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Integrate one tick and return the displacement to sweep the capsule by.
    ///
    /// `facing` is the body rotation; forward is its local `-Z`, right its
    /// local `+X`. Gravity is only applied when `grounded` is false and is not
    /// capped.
    pub fn integrate(
        &mut self,
        input: Vec2,
        facing: Quat,
        speed: f32,
        gravity: f32,
        grounded: bool,
        dt: f32,
    ) -> Vec3 {
        let forward = facing * Vec3::NEG_Z;
        let right = facing * Vec3::X;
        let vertical = self.velocity.y;

        self.velocity = forward * (input.y * speed) + right * (input.x * speed);
        self.velocity.y = vertical;

        if !grounded {
            self.velocity.y -= gravity * dt;
        }

        self.velocity * dt
    }

    /// Launch upwards. The caller has already checked grounding and toggles.
    pub fn launch(&mut self, jump_force: f32) {
        self.velocity.y = jump_force;
    }

    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }
}
