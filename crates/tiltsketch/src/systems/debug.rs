//! Collider outlines drawn over the scene when `debug_colliders` is enabled.
//! Handy for checking that drawn segments line up with their rectangles.

use glam::Vec2;

use crate::core::physics::{ColliderDesc, PhysicsWorld};
use crate::core::scene::Scene;
use crate::systems::vector::{VectorColor, VectorState};

const CIRCLE_SEGMENTS: usize = 24;

/// Outline every physics collider in the scene.
pub fn debug_draw_colliders(
    scene: &Scene,
    physics: &PhysicsWorld,
    vectors: &mut VectorState,
    line_width: f32,
    color: VectorColor,
) {
    for entity in scene.iter() {
        let Some(body) = &entity.body else {
            continue;
        };
        let Some(shape) = physics.collider_shape(body) else {
            continue;
        };
        let (pos, rot) = physics.body_position(body);
        let outline = collider_outline(pos, rot, &shape);
        vectors.stroke_polygon(&outline, line_width, color);
    }
}

/// Outline points for a collider shape at a given position and rotation.
fn collider_outline(center: Vec2, rot: f32, shape: &ColliderDesc) -> Vec<Vec2> {
    match *shape {
        ColliderDesc::Ball { radius } => (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = rot + (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                center + Vec2::from_angle(angle) * radius
            })
            .collect(),
        ColliderDesc::Cuboid {
            half_width,
            half_height,
        } => {
            let facing = Vec2::from_angle(rot);
            [
                Vec2::new(-half_width, -half_height),
                Vec2::new(half_width, -half_height),
                Vec2::new(half_width, half_height),
                Vec2::new(-half_width, half_height),
            ]
            .into_iter()
            .map(|corner| center + facing.rotate(corner))
            .collect()
        }
    }
}
