//! Input intent components.
//!
//! Intents carry what the player (or AI) wants this frame. Continuous axes are
//! plain fields the input layer overwrites every frame; discrete actions are
//! queued and drained once by the controller systems.

use bevy::prelude::*;

/// A discrete controller action.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction {
    Jump,
    StartSprint,
    StopSprint,
    ToggleCrouch,
}

/// Movement and look input for a first-person controller.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use first_person_controller::prelude::*;
///
/// let mut intent = ControllerIntent::new();
/// intent.set_movement(Vec2::new(0.0, 1.0));
/// intent.request_jump();
///
/// assert_eq!(intent.take_actions(), vec![ControllerAction::Jump]);
/// assert!(intent.take_actions().is_empty());
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct ControllerIntent {
    /// Movement axes: x = strafe right, y = forward.
    pub movement: Vec2,
    /// Look axes: x = turn right, y = look up.
    pub look: Vec2,
    actions: Vec<ControllerAction>,
}

impl ControllerIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = movement;
    }

    pub fn set_look(&mut self, look: Vec2) {
        self.look = look;
    }

    pub fn request_jump(&mut self) {
        self.actions.push(ControllerAction::Jump);
    }

    pub fn press_sprint(&mut self) {
        self.actions.push(ControllerAction::StartSprint);
    }

    pub fn release_sprint(&mut self) {
        self.actions.push(ControllerAction::StopSprint);
    }

    pub fn request_crouch(&mut self) {
        self.actions.push(ControllerAction::ToggleCrouch);
    }

    /// Queued actions, oldest first.
    pub fn pending_actions(&self) -> &[ControllerAction] {
        &self.actions
    }

    /// Drain the queued actions.
    pub fn take_actions(&mut self) -> Vec<ControllerAction> {
        std::mem::take(&mut self.actions)
    }

    /// Zero both axes and drop queued actions.
    pub fn clear(&mut self) {
        self.movement = Vec2::ZERO;
        self.look = Vec2::ZERO;
        self.actions.clear();
    }
}

/// Points a controller at its camera entity.
///
/// The camera's [`Transform`] is read and written as local to the body, so the
/// camera is normally spawned as a child of the character.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct ControllerCamera {
    pub entity: Entity,
}

impl ControllerCamera {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
}
