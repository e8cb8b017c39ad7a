//! Controller configuration.
//!
//! [`ControllerConfig`] holds every tunable of the first-person controller:
//! feature toggles, locomotion speeds, look sensitivity and pitch limits,
//! jump and gravity, crouch dimensions, head bob and probe distances.
//!
//! The configuration is treated as already validated. Values are authored in
//! code through the `with_*` builders or loaded from RON; fields missing from a
//! RON file fall back to their defaults.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Feature toggles.
///
/// The controller copies these at construction; the copy can then be changed
/// at runtime without touching the authored configuration.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerFeatures {
    pub can_move: bool,
    pub can_look: bool,
    pub can_jump: bool,
    pub can_sprint: bool,
    pub can_crouch: bool,
    pub can_head_bob: bool,
}

impl Default for ControllerFeatures {
    fn default() -> Self {
        Self {
            can_move: true,
            can_look: true,
            can_jump: true,
            can_sprint: true,
            can_crouch: true,
            can_head_bob: true,
        }
    }
}

impl ControllerFeatures {
    /// Every feature disabled.
    pub fn none() -> Self {
        Self {
            can_move: false,
            can_look: false,
            can_jump: false,
            can_sprint: false,
            can_crouch: false,
            can_head_bob: false,
        }
    }
}

/// Horizontal speeds in units per second.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub walk: f32,
    pub sprint: f32,
    pub crouch: f32,
    pub stairs: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            walk: 3.0,
            sprint: 4.5,
            crouch: 1.0,
            stairs: 1.7,
        }
    }
}

/// Look sensitivity and pitch limits.
///
/// Sensitivities are degrees per second per unit of look input. The pitch is
/// clamped to `[-upper_limit, lower_limit]` degrees, positive pitch meaning
/// the camera tilts downwards.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub x_sensitivity: f32,
    pub y_sensitivity: f32,
    pub upper_limit: f32,
    pub lower_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            x_sensitivity: 15.0,
            y_sensitivity: 15.0,
            upper_limit: 80.0,
            lower_limit: 80.0,
        }
    }
}

/// Capsule dimensions for both stances and the transition duration.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrouchConfig {
    pub crouch_height: f32,
    pub standing_height: f32,
    pub crouch_center: Vec3,
    pub standing_center: Vec3,
    /// Seconds. Zero or negative completes the transition on its first step.
    pub time_to_crouch: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            crouch_height: 0.5,
            standing_height: 1.75,
            crouch_center: Vec3::new(0.0, 0.2, 0.0),
            standing_center: Vec3::ZERO,
            time_to_crouch: 0.25,
        }
    }
}

/// Head bob frequency (`*_speed`, radians of phase per second) and amplitude
/// (`*_amount`, units) for each locomotion mode.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    pub walk_speed: f32,
    pub walk_amount: f32,
    pub sprint_speed: f32,
    pub sprint_amount: f32,
    pub crouch_speed: f32,
    pub crouch_amount: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            walk_speed: 10.0,
            walk_amount: 0.03,
            sprint_speed: 15.0,
            sprint_amount: 0.07,
            crouch_speed: 5.0,
            crouch_amount: 0.01,
        }
    }
}

/// Ray cast distances, measured from the camera.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Downward reach of the stairs probe.
    pub stairs_distance: f32,
    /// Upward reach of the headroom probe used before standing up.
    pub headroom_distance: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            stairs_distance: 3.0,
            headroom_distance: 1.0,
        }
    }
}

/// Configuration parameters for the first-person controller.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ControllerConfig {
    pub features: ControllerFeatures,
    pub speeds: SpeedConfig,
    pub look: LookConfig,
    /// Vertical velocity set by a successful jump.
    pub jump_force: f32,
    /// Downward acceleration applied while airborne (units/second^2).
    pub gravity: f32,
    pub crouch: CrouchConfig,
    pub head_bob: HeadBobConfig,
    pub probes: ProbeConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            features: ControllerFeatures::default(),
            speeds: SpeedConfig::default(),
            look: LookConfig::default(),
            jump_force: 8.0,
            gravity: 30.0,
            crouch: CrouchConfig::default(),
            head_bob: HeadBobConfig::default(),
            probes: ProbeConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse a configuration from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Read and parse a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&source)?;
        info!("loaded controller config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Builder: set feature toggles.
    pub fn with_features(mut self, features: ControllerFeatures) -> Self {
        self.features = features;
        self
    }

    /// Builder: set walk and sprint speeds.
    pub fn with_speeds(mut self, walk: f32, sprint: f32) -> Self {
        self.speeds.walk = walk;
        self.speeds.sprint = sprint;
        self
    }

    /// Builder: set crouch speed.
    pub fn with_crouch_speed(mut self, speed: f32) -> Self {
        self.speeds.crouch = speed;
        self
    }

    /// Builder: set stairs speed.
    pub fn with_stairs_speed(mut self, speed: f32) -> Self {
        self.speeds.stairs = speed;
        self
    }

    /// Builder: set look sensitivities.
    pub fn with_sensitivity(mut self, x: f32, y: f32) -> Self {
        self.look.x_sensitivity = x;
        self.look.y_sensitivity = y;
        self
    }

    /// Builder: set pitch limits in degrees.
    pub fn with_look_limits(mut self, upper: f32, lower: f32) -> Self {
        self.look.upper_limit = upper;
        self.look.lower_limit = lower;
        self
    }

    /// Builder: set jump force.
    pub fn with_jump_force(mut self, force: f32) -> Self {
        self.jump_force = force;
        self
    }

    /// Builder: set gravity magnitude.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder: set crouch transition duration.
    pub fn with_time_to_crouch(mut self, seconds: f32) -> Self {
        self.crouch.time_to_crouch = seconds;
        self
    }

    /// Builder: set both stance heights.
    pub fn with_heights(mut self, standing: f32, crouching: f32) -> Self {
        self.crouch.standing_height = standing;
        self.crouch.crouch_height = crouching;
        self
    }

    /// Builder: set head bob parameters.
    pub fn with_head_bob(mut self, head_bob: HeadBobConfig) -> Self {
        self.head_bob = head_bob;
        self
    }

    /// Builder: set probe distances.
    pub fn with_probes(mut self, probes: ProbeConfig) -> Self {
        self.probes = probes;
        self
    }
}
