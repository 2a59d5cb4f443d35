//! Game settings, loadable from JSON supplied by the host page.

use serde::{Deserialize, Serialize};

use crate::api::game::GameConfig;
use crate::core::physics::ColliderMaterial;
use crate::error::ConfigError;
use crate::systems::vector::VectorColor;

/// Tunables for a drawing session. Every field has a default, so a host may send
/// a partial object such as `{"ball_radius": 12}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    // === Canvas ===
    /// Initial canvas width in pixels (the host sends the real size on resize).
    pub width: f32,
    /// Initial canvas height in pixels.
    pub height: f32,
    /// Gap the host keeps between the window edge and the canvas.
    pub canvas_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,

    // === Drawn lines ===
    /// Thickness of the static rectangle built for each segment.
    pub line_thickness: f32,
    pub line_restitution: f32,
    pub line_friction: f32,
    /// Segments must be strictly longer than this to become colliders.
    pub min_segment_length: f32,

    // === Walls ===
    pub wall_thickness: f32,

    // === Gravity ===
    /// Downward gravity used until orientation data arrives.
    pub fallback_gravity: f32,
    /// Pixels/s² per unit of gravity.
    pub gravity_scale: f32,
    /// Physics step advanced once per tick, in seconds.
    pub fixed_dt: f32,

    // === Rendering ===
    pub stroke_width: f32,
    pub stroke_color: VectorColor,
    pub ball_color: VectorColor,
    /// Outline every collider on top of the scene.
    pub debug_colliders: bool,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            canvas_margin: 20.0,

            ball_radius: 20.0,
            ball_restitution: 0.7,
            ball_friction: 0.001,

            line_thickness: 5.0,
            line_restitution: 0.7,
            line_friction: 0.0,
            min_segment_length: 2.0,

            wall_thickness: 2.0,

            fallback_gravity: 0.5,
            gravity_scale: 1000.0,
            fixed_dt: 1.0 / 60.0,

            stroke_width: 2.0,
            stroke_color: VectorColor::BLACK,
            ball_color: VectorColor::RED,
            debug_colliders: false,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("ball_radius", self.ball_radius),
            ("line_thickness", self.line_thickness),
            ("wall_thickness", self.wall_thickness),
            ("gravity_scale", self.gravity_scale),
            ("fixed_dt", self.fixed_dt),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.min_segment_length.is_finite() && self.min_segment_length >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_segment_length must be non-negative, got {}",
                self.min_segment_length
            )));
        }
        if !self.fallback_gravity.is_finite() {
            return Err(ConfigError::Invalid("fallback_gravity must be finite".into()));
        }
        Ok(())
    }

    /// Engine-level configuration derived from these settings.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.fixed_dt,
            world_width: self.width,
            world_height: self.height,
            gravity_scale: self.gravity_scale,
            fallback_gravity: self.fallback_gravity,
            ..GameConfig::default()
        }
    }

    pub fn ball_material(&self) -> ColliderMaterial {
        ColliderMaterial::new(self.ball_restitution, self.ball_friction)
    }

    pub fn line_material(&self) -> ColliderMaterial {
        ColliderMaterial::new(self.line_restitution, self.line_friction)
    }

    pub fn wall_material(&self) -> ColliderMaterial {
        ColliderMaterial::default()
    }
}
