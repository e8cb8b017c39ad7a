//! Controller systems.
//!
//! These systems feed [`ControllerIntent`] into each [`FirstPersonController`].
//! They are exclusive and generic over the physics backend: each one snapshots
//! the controllers it needs, runs them against a [`WorldCharacter`], then
//! writes the updated controller back.

use bevy::prelude::*;

use crate::backend::{CharacterPhysicsBackend, WorldCharacter};
use crate::config::ControllerConfig;
use crate::controller::FirstPersonController;
use crate::intent::{ControllerAction, ControllerCamera, ControllerIntent};
use crate::state::{Airborne, Crouching, Grounded, OnStairs, Sprinting};

type Snapshot = (Entity, Entity, ControllerConfig, Vec2, FirstPersonController);
type ActionSnapshot = (
    Entity,
    Entity,
    ControllerConfig,
    Vec<ControllerAction>,
    FirstPersonController,
);

/// Collect every driven controller with one of its intent axes.
fn snapshot(world: &mut World, axis: impl Fn(&ControllerIntent) -> Vec2) -> Vec<Snapshot> {
    world
        .query::<(
            Entity,
            &ControllerCamera,
            &ControllerConfig,
            &ControllerIntent,
            &FirstPersonController,
        )>()
        .iter(world)
        .map(|(entity, camera, config, intent, controller)| {
            (
                entity,
                camera.entity,
                *config,
                axis(intent),
                controller.clone(),
            )
        })
        .collect()
}

fn write_back(world: &mut World, entity: Entity, controller: FirstPersonController) {
    if let Some(mut current) = world.get_mut::<FirstPersonController>(entity) {
        *current = controller;
    }
}

fn frame_delta(world: &World) -> f32 {
    world
        .get_resource::<Time>()
        .map(|t| t.delta_secs())
        .unwrap_or(0.0)
}

/// Integrate movement and sweep each character. Runs in `FixedUpdate`.
pub fn apply_movement<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);
    let entities = snapshot(world, |intent| intent.movement);

    for (entity, camera, config, input, mut controller) in entities {
        let mut body = WorldCharacter::<B>::new(world, entity, camera);
        controller.handle_movement(input, dt, &config, &mut body);
        write_back(world, entity, controller);
    }
}

/// Drain queued actions: jump, sprint press/release and crouch toggles.
pub fn apply_actions<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<ActionSnapshot> = world
        .query::<(
            Entity,
            &ControllerCamera,
            &ControllerConfig,
            &mut ControllerIntent,
            &FirstPersonController,
        )>()
        .iter_mut(world)
        .filter_map(|(entity, camera, config, mut intent, controller)| {
            if intent.pending_actions().is_empty() {
                return None;
            }
            Some((
                entity,
                camera.entity,
                *config,
                intent.take_actions(),
                controller.clone(),
            ))
        })
        .collect();

    for (entity, camera, config, actions, mut controller) in entities {
        let mut body = WorldCharacter::<B>::new(world, entity, camera);
        for action in actions {
            match action {
                ControllerAction::Jump => {
                    controller.handle_jump(&config, &body);
                }
                ControllerAction::StartSprint => controller.start_sprinting(),
                ControllerAction::StopSprint => controller.stop_sprinting(),
                ControllerAction::ToggleCrouch => {
                    controller.handle_crouch(&config, &mut body);
                }
            }
        }
        write_back(world, entity, controller);
    }
}

/// Per-frame crouch transition and head bob.
pub fn update_frame<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = frame_delta(world);
    let entities = snapshot(world, |_| Vec2::ZERO);

    for (entity, camera, config, _, mut controller) in entities {
        let mut body = WorldCharacter::<B>::new(world, entity, camera);
        controller.update(dt, &config, &mut body);
        write_back(world, entity, controller);
    }
}

/// Apply look input after movement so the camera never lags the body.
pub fn apply_look<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = frame_delta(world);
    let entities = snapshot(world, |intent| intent.look);

    for (entity, camera, config, input, mut controller) in entities {
        let mut body = WorldCharacter::<B>::new(world, entity, camera);
        controller.handle_camera(input, dt, &config, &mut body);
        write_back(world, entity, controller);
    }
}

fn sync_marker<M: Component + Default>(
    commands: &mut Commands,
    entity: Entity,
    want: bool,
    has: bool,
) {
    if want && !has {
        commands.entity(entity).insert(M::default());
    } else if !want && has {
        commands.entity(entity).remove::<M>();
    }
}

/// Sync state marker components with each controller's state.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(
        Entity,
        &FirstPersonController,
        Has<Grounded>,
        Has<Airborne>,
        Has<Crouching>,
        Has<Sprinting>,
        Has<OnStairs>,
    )>,
) {
    for (
        entity,
        controller,
        has_grounded,
        has_airborne,
        has_crouching,
        has_sprinting,
        has_stairs,
    ) in &q_controllers
    {
        let grounded = controller.is_grounded();
        let crouching = controller.is_crouching();
        let sprinting = controller.is_sprinting();
        let on_stairs = controller.is_on_stairs();
        sync_marker::<Grounded>(&mut commands, entity, grounded, has_grounded);
        sync_marker::<Airborne>(&mut commands, entity, !grounded, has_airborne);
        sync_marker::<Crouching>(&mut commands, entity, crouching, has_crouching);
        sync_marker::<Sprinting>(&mut commands, entity, sprinting, has_sprinting);
        sync_marker::<OnStairs>(&mut commands, entity, on_stairs, has_stairs);
    }
}
