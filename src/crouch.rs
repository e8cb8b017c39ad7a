//! Crouch state machine with a timed capsule transition.
//!
//! A toggle starts a [`CrouchTransition`] that is advanced once per frame by
//! [`CrouchStateMachine::step`]. The logical stance only flips when the
//! transition completes, and no second transition can start while one is in
//! flight.

use bevy::prelude::*;

use crate::collision::CharacterCapsule;
use crate::config::CrouchConfig;

/// Logical stance.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrouchState {
    #[default]
    Standing,
    Crouching,
}

impl CrouchState {
    pub fn toggled(self) -> Self {
        match self {
            CrouchState::Standing => CrouchState::Crouching,
            CrouchState::Crouching => CrouchState::Standing,
        }
    }
}

/// Why a toggle did not start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchRejection {
    Transitioning,
    Disabled,
    Airborne,
    Obstructed,
}

/// An in-flight capsule interpolation.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CrouchTransition {
    elapsed: f32,
    duration: f32,
    from: CharacterCapsule,
    to: CharacterCapsule,
}

impl CrouchTransition {
    pub fn new(from: CharacterCapsule, to: CharacterCapsule, duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            from,
            to,
        }
    }

    /// Advance by `dt` and return the capsule for this frame plus whether the
    /// transition is done. A finished transition returns the exact target.
    pub fn step(&mut self, dt: f32) -> (CharacterCapsule, bool) {
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.to, true);
        }
        (self.from.lerp(self.to, self.elapsed / self.duration), false)
    }
}

/// Standing/crouching stance and the transition between them.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct CrouchStateMachine {
    state: CrouchState,
    transition: Option<CrouchTransition>,
}

impl CrouchStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> CrouchState {
        self.state
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.state == CrouchState::Crouching
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Try to start a transition to the other stance.
    ///
    /// `obstructed` is only evaluated when standing up. `current` is the
    /// capsule as it is now; the transition starts from it.
    pub fn toggle(
        &mut self,
        enabled: bool,
        grounded: bool,
        obstructed: impl FnOnce() -> bool,
        current: CharacterCapsule,
        config: &CrouchConfig,
    ) -> Result<(), CrouchRejection> {
        if self.is_transitioning() {
            return Err(CrouchRejection::Transitioning);
        }
        if !enabled {
            return Err(CrouchRejection::Disabled);
        }
        if !grounded {
            return Err(CrouchRejection::Airborne);
        }
        if self.is_crouching() && obstructed() {
            return Err(CrouchRejection::Obstructed);
        }

        let target = match self.state {
            CrouchState::Crouching => {
                current.with_shape(config.standing_height, config.standing_center)
            }
            CrouchState::Standing => current.with_shape(config.crouch_height, config.crouch_center),
        };
        self.transition = Some(CrouchTransition::new(
            current,
            target,
            config.time_to_crouch,
        ));
        Ok(())
    }

    /// Advance the active transition, if any, and return the capsule to apply.
    pub fn step(&mut self, dt: f32) -> Option<CharacterCapsule> {
        let transition = self.transition.as_mut()?;
        let (capsule, done) = transition.step(dt);
        if done {
            self.transition = None;
            self.state = self.state.toggled();
        }
        Some(capsule)
    }
}
