//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.
//!
//! Characters are kinematic: movement goes through Rapier's
//! [`KinematicCharacterController`], which sweeps the capsule during the next
//! physics step and reports ground contact back through
//! [`KinematicCharacterControllerOutput`].

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::collision::{CharacterCapsule, CollisionData};
use crate::FirstPersonSet;

/// Rapier3D physics backend for the first-person controller.
pub struct Rapier3dBackend;

impl CharacterPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn is_grounded(world: &World, entity: Entity) -> bool {
        world
            .get::<KinematicCharacterControllerOutput>(entity)
            .is_some_and(|output| output.grounded)
    }

    fn move_character(world: &mut World, entity: Entity, displacement: Vec3) {
        // Several fixed ticks may run before Rapier consumes the translation.
        if let Some(mut controller) = world.get_mut::<KinematicCharacterController>(entity) {
            let pending = controller.translation.unwrap_or(Vec3::ZERO);
            controller.translation = Some(pending + displacement);
        }
    }

    fn raycast(
        world: &mut World,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        exclude_entity: Entity,
    ) -> Option<CollisionData> {
        let mut state: SystemState<ReadRapierContext> = SystemState::new(world);
        let rapier_context = state.get_mut(world);
        let Ok(context) = rapier_context.single() else {
            return None;
        };

        let filter = QueryFilter::default()
            .exclude_collider(exclude_entity)
            .exclude_sensors();

        context
            .cast_ray_and_get_normal(origin, direction.as_vec3(), max_distance, true, filter)
            .map(|(hit_entity, hit)| {
                CollisionData::new(hit.time_of_impact, hit.normal, hit.point, Some(hit_entity))
            })
    }
}

/// Plugin that sets up Rapier3D-specific systems for the controller.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        debug!("setting up Rapier3D character backend");

        // Capsule changes from crouching land in the collider before Rapier
        // syncs in PostUpdate.
        app.add_systems(
            Update,
            sync_capsule_colliders.after(FirstPersonSet::Frame),
        );
    }
}

/// Build the collider for a character capsule.
///
/// The capsule is wrapped in a compound so its center can be offset from the
/// entity origin.
pub fn capsule_collider(capsule: &CharacterCapsule) -> Collider {
    Collider::compound(vec![(
        capsule.center,
        Quat::IDENTITY,
        Collider::capsule_y(capsule.half_segment(), capsule.radius),
    )])
}

/// Rebuild colliders for capsules that changed this frame.
pub fn sync_capsule_colliders(
    mut commands: Commands,
    q_capsules: Query<(Entity, &CharacterCapsule), Changed<CharacterCapsule>>,
) {
    for (entity, capsule) in &q_capsules {
        commands.entity(entity).insert(capsule_collider(capsule));
    }
}

/// Components a Rapier-driven first-person character needs.
///
/// Add it next to the controller components:
///
/// ```ignore
/// commands.spawn((
///     FirstPersonController::new(&config),
///     config,
///     ControllerIntent::default(),
///     ControllerCamera::new(camera),
///     Rapier3dCharacterBundle::new(CharacterCapsule::default()),
/// ));
/// ```
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    pub rigid_body: RigidBody,
    pub character_controller: KinematicCharacterController,
    pub capsule: CharacterCapsule,
    pub collider: Collider,
}

impl Default for Rapier3dCharacterBundle {
    fn default() -> Self {
        Self::new(CharacterCapsule::default())
    }
}

impl Rapier3dCharacterBundle {
    pub fn new(capsule: CharacterCapsule) -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            character_controller: KinematicCharacterController {
                up: Vec3::Y,
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                ..default()
            },
            capsule,
            collider: capsule_collider(&capsule),
        }
    }

    /// Set how high a ledge the capsule steps over automatically.
    pub fn with_autostep(mut self, max_height: f32, min_width: f32) -> Self {
        self.character_controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(max_height),
            min_width: CharacterLength::Absolute(min_width),
            include_dynamic_bodies: false,
        });
        self
    }

    /// Set the steepest slope, in degrees, the character can walk up.
    pub fn with_max_slope(mut self, degrees: f32) -> Self {
        self.character_controller.max_slope_climb_angle = degrees.to_radians();
        self
    }
}
