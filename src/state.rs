//! State marker components.
//!
//! These mirror the [`FirstPersonController`](crate::controller::FirstPersonController)
//! state so gameplay code can filter queries on it. They are added and removed
//! by [`sync_state_markers`](crate::systems::sync_state_markers) every frame.

use bevy::prelude::*;

/// The character rests on walkable ground.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use first_person_controller::prelude::*;
///
/// fn count_grounded(q: Query<(), With<Grounded>>) -> usize {
///     q.iter().count()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// The character is not touching the ground. Mutually exclusive with
/// [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// The character has finished crouching down.
///
/// Present from the end of the crouch transition until the stand-up
/// transition completes.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Crouching;

/// The sprint latch is set.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Sprinting;

/// The stairs probe found stairs underfoot.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct OnStairs;
