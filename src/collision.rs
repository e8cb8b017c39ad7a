//! Collision query results and character capsule data.
//!
//! These types carry what the physics collaborator reports back to the
//! controller: ray cast hits tagged with the kind of surface they struck, and
//! the capsule dimensions the crouch transition animates.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of walkable surface a collider represents.
///
/// Attach this component to level colliders. Colliders without it are
/// treated as [`SurfaceKind::Normal`].
#[derive(
    Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum SurfaceKind {
    /// Regular ground.
    #[default]
    Normal,
    /// Stairs: slows the character down and suppresses head bob.
    Stairs,
}

impl SurfaceKind {
    #[inline]
    pub fn is_stairs(self) -> bool {
        self == SurfaceKind::Stairs
    }
}

/// Information about a ray cast hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionData {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
    /// Kind of surface that was hit.
    pub surface: SurfaceKind,
}

impl CollisionData {
    /// Create a hit on a [`SurfaceKind::Normal`] surface.
    pub fn new(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
            surface: SurfaceKind::Normal,
        }
    }

    /// Builder: set the surface kind of the hit.
    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = surface;
        self
    }
}

/// Capsule collision volume of a character.
///
/// `height` is the full height including both caps and `center` is the local
/// offset of the capsule's middle from the body origin.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CharacterCapsule {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
}

impl Default for CharacterCapsule {
    fn default() -> Self {
        Self {
            height: 1.75,
            radius: 0.3,
            center: Vec3::ZERO,
        }
    }
}

impl CharacterCapsule {
    pub fn new(height: f32, radius: f32, center: Vec3) -> Self {
        Self {
            height,
            radius,
            center,
        }
    }

    /// Same radius, different height and center.
    pub fn with_shape(self, height: f32, center: Vec3) -> Self {
        Self {
            height,
            center,
            ..self
        }
    }

    /// Linearly interpolate height and center towards `target`.
    ///
    /// `t` is clamped to `[0, 1]`; the radius of `self` is kept.
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            height: self.height + (target.height - self.height) * t,
            radius: self.radius,
            center: self.center.lerp(target.center, t),
        }
    }

    /// Half length of the capsule's inner segment (height without the caps).
    pub fn half_segment(&self) -> f32 {
        ((self.height - 2.0 * self.radius) * 0.5).max(0.0)
    }
}
