use glam::Vec2;

use crate::api::types::{event_kind, EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsWorld};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::orientation::calibrate::OrientationSample;
use crate::orientation::device::DeviceProfile;
use crate::orientation::gravity::GravityContext;
use crate::orientation::permission::{
    OrientationCapability, PermissionEvent, PermissionNegotiator, PermissionState, PlatformRequest,
};
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Physics step in seconds, advanced once per tick (default: 1/60).
    pub fixed_dt: f32,
    /// Initial canvas width in pixels.
    pub world_width: f32,
    /// Initial canvas height in pixels.
    pub world_height: f32,
    /// Maximum number of vector vertices in the shared buffer (default: 196608).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Pixels/s² per unit of gravity.
    pub gravity_scale: f32,
    /// Downward gravity used until orientation data arrives.
    pub fallback_gravity: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_vector_vertices: 196_608,
            max_events: 32,
            gravity_scale: 1000.0,
            fallback_gravity: 0.5,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One tick: consume input, then advance the world.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only redraw into the vector buffer.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub gravity: GravityContext,
    pub permission: PermissionNegotiator,
    pub events: Vec<GameEvent>,
    /// Current canvas size in pixels.
    pub canvas: Vec2,
    gravity_scale: f32,
    next_id: u32,
    reported_permission: Option<PermissionState>,
}

impl EngineContext {
    pub fn new(config: &GameConfig, profile: &DeviceProfile) -> Self {
        let gravity = GravityContext::new(profile.class, profile.rotation, config.fallback_gravity);
        let mut physics = PhysicsWorld::new(gravity.vector() * config.gravity_scale);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::new(),
            physics,
            gravity,
            permission: PermissionNegotiator::new(),
            events: Vec::new(),
            canvas: Vec2::new(config.world_width, config.world_height),
            gravity_scale: config.gravity_scale,
            next_id: 1,
            reported_permission: None,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    // -- Orientation --

    /// Resolve the initial permission state from the probed capability.
    pub fn start_permission(&mut self, capability: OrientationCapability) -> Option<PlatformRequest> {
        self.permission.start(capability)
    }

    pub fn negotiate(&mut self, event: PermissionEvent) -> Option<PlatformRequest> {
        self.permission.handle(event)
    }

    /// Apply an orientation sample as it arrives. Returns `true` if it set gravity.
    pub fn orientation_sample(&mut self, sample: &OrientationSample) -> bool {
        self.gravity.apply_sample(sample)
    }

    /// Emit `PERMISSION_STATE` if the negotiator moved since the last report.
    pub fn report_permission(&mut self) {
        let state = self.permission.state();
        if self.reported_permission != Some(state) {
            self.reported_permission = Some(state);
            self.emit_event(GameEvent::new(event_kind::PERMISSION_STATE, state.code(), 0.0, 0.0));
        }
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(&mut self, entity: Entity, desc: BodyDesc, material: ColliderMaterial) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity
            .with_pos(desc.position)
            .with_rotation(desc.rotation)
            .with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Step the physics simulation and sync positions back to entities.
    pub fn step_physics(&mut self) {
        self.physics.step();

        // Sync Rapier body positions back to entity positions
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }

    /// Apply this frame's gravity, then step once.
    pub fn step_frame(&mut self) {
        let gravity = self.gravity.frame_gravity() * self.gravity_scale;
        self.physics.set_gravity(gravity);
        self.step_physics();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default(), &DeviceProfile::default())
    }
}

/// Render context for the per-tick redraw.
pub struct RenderContext<'a> {
    pub vectors: &'a mut VectorState,
    pub scene: &'a Scene,
    pub physics: &'a PhysicsWorld,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::ColliderDesc;
    use crate::orientation::device::{DeviceClass, ScreenRotation};
    use crate::orientation::permission::PermissionResponse;

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::default();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
            .with_position(Vec2::new(100.0, 200.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.body.is_some());
        assert_eq!(entity.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::default();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 });

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        assert_eq!(ctx.physics.body_count(), 1);

        ctx.despawn(id);
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_frame_uses_fallback_gravity() {
        let mut ctx = EngineContext::default();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(100.0, 0.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_frame();
        }

        assert_eq!(ctx.physics.gravity(), Vec2::new(0.0, 500.0));
        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.y > 0.0, "should fall down: y={}", entity.pos.y);
        assert!((entity.pos.x - 100.0).abs() < 1e-3);
        assert!(ctx.velocity(id).y > 0.0);
    }

    #[test]
    fn orientation_takes_over_gravity() {
        let profile = DeviceProfile {
            class: DeviceClass::Phone,
            rotation: ScreenRotation::Rot0,
            capability: OrientationCapability::Open,
        };
        let mut ctx = EngineContext::new(&GameConfig::default(), &profile);
        assert!(ctx.orientation_sample(&OrientationSample::tilt(0.0, -45.0)));
        ctx.step_frame();
        assert_eq!(ctx.physics.gravity(), Vec2::new(-500.0, 0.0));

        // A null sample leaves the calibrated vector in place.
        assert!(!ctx.orientation_sample(&OrientationSample::default()));
        ctx.step_frame();
        assert_eq!(ctx.physics.gravity(), Vec2::new(-500.0, 0.0));
    }

    #[test]
    fn permission_state_reported_once_per_change() {
        let mut ctx = EngineContext::default();
        ctx.start_permission(OrientationCapability::ConsentGated);
        ctx.report_permission();
        ctx.report_permission();
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, event_kind::PERMISSION_STATE);
        assert_eq!(ctx.events[0].a, PermissionState::NotRequested.code());

        assert_eq!(
            ctx.negotiate(PermissionEvent::UserGesture),
            Some(PlatformRequest::RequestPermission)
        );
        ctx.negotiate(PermissionEvent::ApiResult(PermissionResponse::Denied));
        ctx.clear_frame_data();
        ctx.report_permission();
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].a, PermissionState::Denied.code());
    }
}
