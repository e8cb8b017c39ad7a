//! The first-person controller.
//!
//! [`FirstPersonController`] owns all mutable controller state and exposes the
//! entry points the input collaborator drives:
//!
//! | Entry point | Cadence |
//! |---|---|
//! | [`handle_movement`](FirstPersonController::handle_movement) | every fixed physics tick |
//! | [`handle_camera`](FirstPersonController::handle_camera) | every late tick |
//! | [`update`](FirstPersonController::update) | every frame |
//! | [`handle_jump`](FirstPersonController::handle_jump) | on jump trigger |
//! | [`start_sprinting`](FirstPersonController::start_sprinting) | on sprint press |
//! | [`stop_sprinting`](FirstPersonController::stop_sprinting) | on sprint release |
//! | [`handle_crouch`](FirstPersonController::handle_crouch) | on crouch trigger |
//!
//! Each call receives the [`ControllerConfig`] and a [`CharacterBody`]; the
//! controller itself holds no engine handles and can be driven without an
//! `App`.

use bevy::prelude::*;

use crate::backend::CharacterBody;
use crate::config::{ControllerConfig, ControllerFeatures};
use crate::crouch::{CrouchState, CrouchStateMachine};
use crate::head_bob::{BobContext, HeadBobAnimator};
use crate::look::LookController;
use crate::motion::MotionIntegrator;
use crate::speed::{resolve_speed, Locomotion};

/// First-person controller state.
///
/// Pair it with a [`ControllerConfig`], a
/// [`ControllerCamera`](crate::intent::ControllerCamera) and a
/// [`ControllerIntent`](crate::intent::ControllerIntent) to have the plugin's
/// systems drive it.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct FirstPersonController {
    /// Runtime feature toggles, copied from the configuration on creation.
    pub features: ControllerFeatures,
    motion: MotionIntegrator,
    look: LookController,
    crouch: CrouchStateMachine,
    head_bob: HeadBobAnimator,
    grounded: bool,
    on_stairs: bool,
}

impl FirstPersonController {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            features: config.features,
            ..default()
        }
    }

    // === Runtime toggles ===

    pub fn set_can_move(&mut self, enabled: bool) {
        self.features.can_move = enabled;
    }

    pub fn set_can_look(&mut self, enabled: bool) {
        self.features.can_look = enabled;
    }

    pub fn set_can_head_bob(&mut self, enabled: bool) {
        self.features.can_head_bob = enabled;
    }

    // === State accessors ===

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity()
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    #[inline]
    pub fn crouch_state(&self) -> CrouchState {
        self.crouch.state()
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    #[inline]
    pub fn is_crouch_transitioning(&self) -> bool {
        self.crouch.is_transitioning()
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.motion.is_sprinting()
    }

    /// Grounded state seen by the last call that queried it.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Stairs probe result from the last call that probed.
    #[inline]
    pub fn is_on_stairs(&self) -> bool {
        self.on_stairs
    }

    #[inline]
    pub fn head_bob(&self) -> &HeadBobAnimator {
        &self.head_bob
    }

    /// Current locomotion mode.
    pub fn locomotion(&self) -> Locomotion {
        Locomotion::resolve(self.is_crouching(), self.on_stairs, self.is_sprinting())
    }

    // === Entry points ===

    /// Integrate one fixed tick of movement and sweep the capsule.
    pub fn handle_movement(
        &mut self,
        input: Vec2,
        dt: f32,
        config: &ControllerConfig,
        body: &mut impl CharacterBody,
    ) {
        if !self.features.can_move {
            return;
        }

        self.grounded = body.is_grounded();
        self.on_stairs = self.probe_stairs(config, body);
        let speed = resolve_speed(
            self.is_crouching(),
            self.on_stairs,
            self.is_sprinting(),
            &config.speeds,
        );

        let displacement = self.motion.integrate(
            input,
            body.body_rotation(),
            speed,
            config.gravity,
            self.grounded,
            dt,
        );
        body.move_capsule(displacement);
        self.grounded = body.is_grounded();
    }

    /// Apply one late tick of look input: yaw the body, pitch the camera.
    pub fn handle_camera(
        &mut self,
        input: Vec2,
        dt: f32,
        config: &ControllerConfig,
        body: &mut impl CharacterBody,
    ) {
        if !self.features.can_look {
            return;
        }

        let update = self.look.look(input, dt, &config.look);
        body.rotate_body(update.body_rotation());
        body.set_camera_rotation(update.camera_rotation());
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn handle_jump(&mut self, config: &ControllerConfig, body: &impl CharacterBody) -> bool {
        if !self.features.can_move {
            return false;
        }

        self.grounded = body.is_grounded();
        if !self.grounded || !self.features.can_jump {
            return false;
        }

        self.motion.launch(config.jump_force);
        true
    }

    pub fn start_sprinting(&mut self) {
        if !self.features.can_move {
            return;
        }
        self.motion.set_sprinting(self.features.can_sprint);
    }

    pub fn stop_sprinting(&mut self) {
        self.motion.set_sprinting(false);
    }

    /// Start a crouch or stand-up transition. Returns whether one started.
    pub fn handle_crouch(
        &mut self,
        config: &ControllerConfig,
        body: &mut impl CharacterBody,
    ) -> bool {
        self.grounded = body.is_grounded();
        let current = body.capsule();
        let result = self.crouch.toggle(
            self.features.can_crouch,
            self.grounded,
            || Self::headroom_blocked(config, body),
            current,
            &config.crouch,
        );

        match result {
            Ok(()) => {
                debug!(
                    "crouch transition started from {:?} over {}s",
                    self.crouch.state(),
                    config.crouch.time_to_crouch
                );
                true
            }
            Err(_) => false,
        }
    }

    /// Per-frame work: step the crouch transition, then animate head bob.
    pub fn update(&mut self, dt: f32, config: &ControllerConfig, body: &mut impl CharacterBody) {
        self.grounded = body.is_grounded();
        self.head_bob.capture_baseline(body.camera_translation().y);

        if let Some(capsule) = self.crouch.step(dt) {
            body.set_capsule(capsule);
            if !self.crouch.is_transitioning() {
                debug!("crouch transition finished: {:?}", self.crouch.state());
            }
        }

        if !self.features.can_head_bob {
            return;
        }
        self.on_stairs = self.probe_stairs(config, body);

        let context = BobContext {
            enabled: self.features.can_head_bob,
            grounded: self.grounded,
            on_stairs: self.on_stairs,
            velocity: self.motion.velocity(),
            // Stairs gate the bob above; only stance picks the constants.
            locomotion: Locomotion::resolve(self.is_crouching(), false, self.is_sprinting()),
        };
        if let Some(height) = self.head_bob.update(dt, context, &config.head_bob) {
            let mut translation = body.camera_translation();
            translation.y = height;
            body.set_camera_translation(translation);
        }
    }

    fn probe_stairs(&self, config: &ControllerConfig, body: &mut impl CharacterBody) -> bool {
        let origin = body.camera_position();
        body.raycast(origin, Dir3::NEG_Y, config.probes.stairs_distance)
            .is_some_and(|hit| hit.surface.is_stairs())
    }

    fn headroom_blocked(config: &ControllerConfig, body: &mut impl CharacterBody) -> bool {
        let origin = body.camera_position();
        body.raycast(origin, Dir3::Y, config.probes.headroom_distance)
            .is_some()
    }
}
