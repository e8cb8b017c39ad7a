//! # `first_person_controller`
//!
//! A first-person character controller for Bevy with physics backend
//! abstraction.
//!
//! This crate provides the gameplay core of a first-person character:
//! - Camera-relative walking with gravity and jumping
//! - Mouse look with body yaw and clamped camera pitch
//! - Sprinting, crouching with a timed capsule transition and headroom check
//! - Slower movement on stairs, detected with a downward probe
//! - Procedural head bob while moving on the ground
//! - A physics backend seam (Rapier3D included behind the `rapier3d` feature)
//!
//! ## Architecture
//!
//! [`FirstPersonController`](controller::FirstPersonController) owns all
//! controller state and is driven through a
//! [`CharacterBody`](backend::CharacterBody), so it can run with or without an
//! `App`. The plugin drives it from ECS:
//! 1. `FixedUpdate`: movement is integrated and the capsule swept
//! 2. `Update`: queued actions (jump, sprint, crouch) are applied, then the
//!    crouch transition and head bob advance
//! 3. `PostUpdate`: look input rotates the body and the camera
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use first_person_controller::prelude::*;
//!
//! let config = ControllerConfig::default().with_speeds(3.0, 5.0);
//! let controller = FirstPersonController::new(&config);
//! let intent = ControllerIntent::default();
//!
//! // Spawn these with a CharacterCapsule and a ControllerCamera pointing at
//! // the camera entity.
//! # let _ = (controller, intent);
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod backend;
pub mod collision;
pub mod config;
pub mod controller;
pub mod crouch;
pub mod error;
pub mod head_bob;
pub mod intent;
pub mod look;
pub mod motion;
pub mod speed;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{CharacterBody, CharacterPhysicsBackend, WorldCharacter};
    pub use crate::collision::{CharacterCapsule, CollisionData, SurfaceKind};
    pub use crate::config::{
        ControllerConfig, ControllerFeatures, CrouchConfig, HeadBobConfig, LookConfig,
        ProbeConfig, SpeedConfig,
    };
    pub use crate::controller::FirstPersonController;
    pub use crate::crouch::CrouchState;
    pub use crate::error::ConfigError;
    pub use crate::intent::{ControllerAction, ControllerCamera, ControllerIntent};
    pub use crate::speed::Locomotion;
    pub use crate::state::{Airborne, Crouching, Grounded, OnStairs, Sprinting};
    pub use crate::{FirstPersonControllerPlugin, FirstPersonSet};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle};
}

/// System sets for the controller, in the order they run within a frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstPersonSet {
    /// `FixedUpdate`: movement integration and capsule sweep.
    Movement,
    /// `Update`: queued jump, sprint and crouch actions.
    Actions,
    /// `Update`: crouch transition, head bob and state markers.
    Frame,
    /// `PostUpdate`: body yaw and camera pitch.
    Look,
}

/// Main plugin for the first-person controller.
///
/// Generic over a physics backend `B` which answers ground and ray queries
/// and moves the capsule.
///
/// # Examples
///
/// With the Rapier3D backend:
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use first_person_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(FirstPersonControllerPlugin::<Rapier3dBackend>::default())
///     .run();
/// ```
pub struct FirstPersonControllerPlugin<B: backend::CharacterPhysicsBackend> {
    _marker: PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend> Default for FirstPersonControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend> Plugin for FirstPersonControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<controller::FirstPersonController>();
        app.register_type::<config::ControllerConfig>();
        app.register_type::<collision::CharacterCapsule>();
        app.register_type::<collision::SurfaceKind>();
        app.register_type::<intent::ControllerIntent>();
        app.register_type::<intent::ControllerCamera>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::Crouching>();
        app.register_type::<state::Sprinting>();
        app.register_type::<state::OnStairs>();

        app.add_plugins(B::plugin());

        app.add_systems(
            FixedUpdate,
            systems::apply_movement::<B>.in_set(FirstPersonSet::Movement),
        );

        app.configure_sets(Update, (FirstPersonSet::Actions, FirstPersonSet::Frame).chain());
        app.add_systems(
            Update,
            (
                systems::apply_actions::<B>.in_set(FirstPersonSet::Actions),
                (systems::update_frame::<B>, systems::sync_state_markers)
                    .chain()
                    .in_set(FirstPersonSet::Frame),
            ),
        );

        app.configure_sets(
            PostUpdate,
            FirstPersonSet::Look.before(TransformSystem::TransformPropagate),
        );
        app.add_systems(
            PostUpdate,
            systems::apply_look::<B>.in_set(FirstPersonSet::Look),
        );
    }
}
