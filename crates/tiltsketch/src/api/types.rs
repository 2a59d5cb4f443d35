use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A game event handed from Rust to the host page through the shared buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// `GameEvent::kind` values understood by the host page.
pub mod event_kind {
    /// Permission negotiation changed state. `a` = state code.
    pub const PERMISSION_STATE: f32 = 1.0;
    /// A stroke was committed. `a` = segments created, `b` = strokes so far.
    pub const STROKE_COMMITTED: f32 = 2.0;
}
