//! Physics backend abstraction.
//!
//! Two seams separate the controller from the physics engine:
//!
//! - [`CharacterPhysicsBackend`] is implemented once per physics engine and
//!   works directly on the ECS [`World`] (Rapier3D, custom kinematics, ...).
//! - [`CharacterBody`] is the per-call view the controller core talks to: one
//!   character, its camera and the physics queries it needs. [`WorldCharacter`]
//!   builds it from a backend, so the core never sees the `World`.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::collision::{CharacterCapsule, CollisionData, SurfaceKind};

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the controller.
/// The backend answers ground contact and ray cast queries and performs the
/// capsule sweep-move.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Whether the character's capsule rests on walkable ground, as of the
    /// last move.
    fn is_grounded(world: &World, entity: Entity) -> bool;

    /// Sweep the character's capsule by `displacement`, resolving collisions.
    fn move_character(world: &mut World, entity: Entity, displacement: Vec3);

    /// Cast a ray and return the nearest hit.
    ///
    /// # Arguments
    /// * `world` - The ECS world for queries
    /// * `origin` - Ray origin in world space
    /// * `direction` - Ray direction
    /// * `max_distance` - Maximum cast distance
    /// * `exclude_entity` - Entity to exclude from cast (usually self)
    fn raycast(
        world: &mut World,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        exclude_entity: Entity,
    ) -> Option<CollisionData>;

    /// Classify the surface a ray hit.
    ///
    /// The default reads the [`SurfaceKind`] component of the hit entity.
    fn surface_kind(world: &World, hit: &CollisionData) -> SurfaceKind {
        hit.entity
            .and_then(|entity| world.get::<SurfaceKind>(entity))
            .copied()
            .unwrap_or_default()
    }

    /// Get the character's capsule.
    fn capsule(world: &World, entity: Entity) -> CharacterCapsule {
        world
            .get::<CharacterCapsule>(entity)
            .copied()
            .unwrap_or_default()
    }

    /// Resize the character's capsule.
    fn set_capsule(world: &mut World, entity: Entity, capsule: CharacterCapsule) {
        if let Ok(mut entity) = world.get_entity_mut(entity) {
            entity.insert(capsule);
        }
    }

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}

/// What the controller core needs from its surroundings for one character.
///
/// Covers both the physics collaborator (ground contact, sweep-move, ray
/// casts, capsule) and the transform collaborator (body and camera).
pub trait CharacterBody {
    fn is_grounded(&self) -> bool;

    /// Sweep the capsule by `displacement`.
    fn move_capsule(&mut self, displacement: Vec3);

    /// Nearest hit along a ray, with its surface classified.
    fn raycast(&mut self, origin: Vec3, direction: Dir3, max_distance: f32)
        -> Option<CollisionData>;

    fn capsule(&self) -> CharacterCapsule;

    fn set_capsule(&mut self, capsule: CharacterCapsule);

    /// Body rotation in world space.
    fn body_rotation(&self) -> Quat;

    /// Pre-multiply the body rotation by `rotation` (a world-space turn).
    fn rotate_body(&mut self, rotation: Quat);

    /// Camera position in world space.
    fn camera_position(&self) -> Vec3;

    /// Camera translation relative to the body.
    fn camera_translation(&self) -> Vec3;

    fn set_camera_translation(&mut self, translation: Vec3);

    fn set_camera_rotation(&mut self, rotation: Quat);
}

/// [`CharacterBody`] over a [`World`], a backend and a body/camera entity pair.
///
/// The camera's [`Transform`] is treated as local to the body.
pub struct WorldCharacter<'w, B: CharacterPhysicsBackend> {
    world: &'w mut World,
    body: Entity,
    camera: Entity,
    _backend: PhantomData<B>,
}

impl<'w, B: CharacterPhysicsBackend> WorldCharacter<'w, B> {
    pub fn new(world: &'w mut World, body: Entity, camera: Entity) -> Self {
        Self {
            world,
            body,
            camera,
            _backend: PhantomData,
        }
    }

    fn transform(&self, entity: Entity) -> Transform {
        self.world
            .get::<Transform>(entity)
            .copied()
            .unwrap_or_default()
    }
}

impl<B: CharacterPhysicsBackend> CharacterBody for WorldCharacter<'_, B> {
    fn is_grounded(&self) -> bool {
        B::is_grounded(self.world, self.body)
    }

    fn move_capsule(&mut self, displacement: Vec3) {
        B::move_character(self.world, self.body, displacement);
    }

    fn raycast(
        &mut self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<CollisionData> {
        let hit = B::raycast(self.world, origin, direction, max_distance, self.body)?;
        let surface = B::surface_kind(self.world, &hit);
        Some(hit.with_surface(surface))
    }

    fn capsule(&self) -> CharacterCapsule {
        B::capsule(self.world, self.body)
    }

    fn set_capsule(&mut self, capsule: CharacterCapsule) {
        B::set_capsule(self.world, self.body, capsule);
    }

    fn body_rotation(&self) -> Quat {
        self.transform(self.body).rotation
    }

    fn rotate_body(&mut self, rotation: Quat) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.body) {
            transform.rotation = (rotation * transform.rotation).normalize();
        }
    }

    fn camera_position(&self) -> Vec3 {
        let camera = self.transform(self.camera);
        self.transform(self.body).transform_point(camera.translation)
    }

    fn camera_translation(&self) -> Vec3 {
        self.transform(self.camera).translation
    }

    fn set_camera_translation(&mut self, translation: Vec3) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.camera) {
            transform.translation = translation;
        }
    }

    fn set_camera_rotation(&mut self, rotation: Quat) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.camera) {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend with no world geometry: never grounded, moves by translation.
    struct FreeBackend;

    impl CharacterPhysicsBackend for FreeBackend {
        fn plugin() -> impl Plugin {
            NoOpBackendPlugin
        }

        fn is_grounded(_world: &World, _entity: Entity) -> bool {
            false
        }

        fn move_character(world: &mut World, entity: Entity, displacement: Vec3) {
            if let Some(mut transform) = world.get_mut::<Transform>(entity) {
                transform.translation += displacement;
            }
        }

        fn raycast(
            world: &mut World,
            origin: Vec3,
            _direction: Dir3,
            _max_distance: f32,
            _exclude_entity: Entity,
        ) -> Option<CollisionData> {
            // Every ray hits the first entity carrying a SurfaceKind.
            let entity = world
                .query_filtered::<Entity, With<SurfaceKind>>()
                .iter(world)
                .next()?;
            Some(CollisionData::new(1.0, Vec3::Y, origin, Some(entity)))
        }
    }

    fn spawn_pair(world: &mut World) -> (Entity, Entity) {
        let body = world
            .spawn(Transform::from_xyz(1.0, 0.0, 0.0).with_rotation(Quat::from_rotation_y(
                std::f32::consts::FRAC_PI_2,
            )))
            .id();
        let camera = world.spawn(Transform::from_xyz(0.0, 1.6, -0.5)).id();
        (body, camera)
    }

    #[test]
    fn camera_position_composes_body_transform() {
        let mut world = World::new();
        let (body, camera) = spawn_pair(&mut world);
        let character = WorldCharacter::<FreeBackend>::new(&mut world, body, camera);

        // Body faces -X, so the camera's local -Z offset lands on world -X.
        let position = character.camera_position();
        assert!((position - Vec3::new(0.5, 1.6, 0.0)).length() < 1e-5);
    }

    #[test]
    fn raycast_classifies_surface() {
        let mut world = World::new();
        let (body, camera) = spawn_pair(&mut world);
        world.spawn(SurfaceKind::Stairs);

        let mut character = WorldCharacter::<FreeBackend>::new(&mut world, body, camera);
        let hit = character.raycast(Vec3::ZERO, Dir3::NEG_Y, 3.0).unwrap();

        assert_eq!(hit.surface, SurfaceKind::Stairs);
    }

    #[test]
    fn capsule_defaults_and_inserts() {
        let mut world = World::new();
        let (body, camera) = spawn_pair(&mut world);
        let mut character = WorldCharacter::<FreeBackend>::new(&mut world, body, camera);

        assert_eq!(character.capsule(), CharacterCapsule::default());

        let crouched = CharacterCapsule::default().with_shape(0.5, Vec3::new(0.0, 0.2, 0.0));
        character.set_capsule(crouched);
        assert_eq!(character.capsule(), crouched);
        assert_eq!(world.get::<CharacterCapsule>(body), Some(&crouched));
    }

    #[test]
    fn camera_setters_touch_only_the_camera() {
        let mut world = World::new();
        let (body, camera) = spawn_pair(&mut world);
        let mut character = WorldCharacter::<FreeBackend>::new(&mut world, body, camera);

        character.set_camera_translation(Vec3::new(0.0, 1.7, 0.0));
        character.set_camera_rotation(Quat::from_rotation_x(0.3));
        character.move_capsule(Vec3::new(0.0, -1.0, 0.0));

        assert_eq!(character.camera_translation(), Vec3::new(0.0, 1.7, 0.0));
        assert_eq!(world.get::<Transform>(body).unwrap().translation, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(world.get::<Transform>(camera).unwrap().rotation, Quat::from_rotation_x(0.3));
    }
}
