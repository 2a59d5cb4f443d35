use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::physics::PhysicsBody;

/// A scene object: the ball, a boundary wall, or one committed line segment.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by role.
    pub tag: String,
    /// Position in canvas pixels, synced from physics after each step.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec2::ZERO,
            rotation: 0.0,
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}
