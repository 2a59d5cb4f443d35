pub mod api;
pub mod bridge;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod orientation;
pub mod sketch;
pub mod stroke;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{event_kind, EntityId, GameEvent};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use components::entity::Entity;
pub use config::SketchConfig;
pub use core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld,
};
pub use core::scene::Scene;
pub use error::{ConfigError, OrientationError};
pub use input::queue::{InputEvent, InputQueue};
pub use orientation::calibrate::{calibrate, OrientationSample};
pub use orientation::device::{DeviceClass, DeviceProfile, NavigatorInfo, ScreenRotation};
pub use orientation::gravity::{GravityContext, GravitySource};
pub use orientation::permission::{
    OrientationCapability, PermissionEvent, PermissionNegotiator, PermissionResponse,
    PermissionState, PlatformRequest,
};
pub use sketch::SketchGame;
pub use stroke::{segment_points, ActiveStroke, Segment, Stroke, MIN_SEGMENT_LENGTH};
pub use systems::debug::debug_draw_colliders;
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
