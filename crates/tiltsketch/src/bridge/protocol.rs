/// Shared buffer layout.
/// Must stay in sync with the host page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Vector vertices: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::orientation::permission::PermissionState;
use crate::systems::vector::VectorVertex;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_CANVAS_WIDTH: usize = 2;
pub const HEADER_CANVAS_HEIGHT: usize = 3;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 4;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_PERMISSION_STATE: usize = 8;
pub const HEADER_GRAVITY_X: usize = 9;
pub const HEADER_GRAVITY_Y: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_events: usize,

    /// Size of vector vertex section in floats.
    pub vector_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where vector vertices begin.
    pub vector_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_vector_vertices: usize, max_events: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VectorVertex::FLOATS;
        let event_data_floats = max_events * GameEvent::FLOATS;

        let vector_data_offset = HEADER_FLOATS;
        let event_data_offset = vector_data_offset + vector_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_vector_vertices,
            max_events,
            vector_data_floats,
            event_data_floats,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events)
    }
}

/// Per-frame header values. Counts are clamped to the layout's capacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub frame: u32,
    pub canvas: Vec2,
    pub vector_vertex_count: usize,
    pub event_count: usize,
    pub permission: PermissionState,
    /// Gravity in engine units, before scaling.
    pub gravity: Vec2,
}

impl FrameHeader {
    pub fn write_into(&self, layout: &ProtocolLayout, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_LOCK] = 0.0;
        header[HEADER_FRAME_COUNTER] = self.frame as f32;
        header[HEADER_CANVAS_WIDTH] = self.canvas.x;
        header[HEADER_CANVAS_HEIGHT] = self.canvas.y;
        header[HEADER_MAX_VECTOR_VERTICES] = layout.max_vector_vertices as f32;
        header[HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count.min(layout.max_vector_vertices) as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = self.event_count.min(layout.max_events) as f32;
        header[HEADER_PERMISSION_STATE] = self.permission.code();
        header[HEADER_GRAVITY_X] = self.gravity.x;
        header[HEADER_GRAVITY_Y] = self.gravity.y;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
