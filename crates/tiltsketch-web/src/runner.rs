use tiltsketch::bridge::protocol::{FrameHeader, HEADER_FLOATS};
use tiltsketch::{
    DeviceProfile, EngineContext, Game, GameConfig, InputEvent, InputQueue, OrientationSample,
    PermissionEvent, PermissionResponse, PlatformRequest, ProtocolLayout, RenderContext,
    ScreenRotation, VectorState, VectorVertex,
};

/// Generic game runner that wires up the engine loop.
///
/// The bridge keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs
/// directly. Methods that may need the browser to do something return a
/// [`PlatformRequest`]; the caller performs it once the runner is released.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    vectors: VectorState,
    config: GameConfig,
    layout: ProtocolLayout,
    profile: DeviceProfile,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
    overflow_warned: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, profile: DeviceProfile) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config, &profile),
            game,
            input: InputQueue::new(),
            vectors: VectorState::new(),
            config,
            layout,
            profile,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
            overflow_warned: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) -> Option<PlatformRequest> {
        let request = self.ctx.start_permission(self.profile.capability);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.write_header();
        request
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: input, gravity, one physics step, redraw.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                vectors: &mut self.vectors,
                scene: &self.ctx.scene,
                physics: &self.ctx.physics,
            };
            self.game.render(&mut render_ctx);
        }
        if self.vectors.vertex_count() > self.layout.max_vector_vertices && !self.overflow_warned {
            log::warn!(
                "{} vertices drawn, only the first {} reach the host",
                self.vectors.vertex_count(),
                self.layout.max_vector_vertices
            );
            self.overflow_warned = true;
        }

        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    // ---- Orientation plumbing ----

    /// A user gesture happened; on consent-gated platforms this starts the request.
    pub fn user_gesture(&mut self) -> Option<PlatformRequest> {
        self.ctx.negotiate(PermissionEvent::UserGesture)
    }

    pub fn permission_result(&mut self, response: PermissionResponse) -> Option<PlatformRequest> {
        self.ctx.negotiate(PermissionEvent::ApiResult(response))
    }

    /// Samples are applied as they arrive, between ticks.
    pub fn orientation_sample(&mut self, sample: &OrientationSample) -> bool {
        self.ctx.orientation_sample(sample)
    }

    pub fn set_screen_rotation(&mut self, rotation: ScreenRotation) {
        self.ctx.gravity.set_rotation(rotation);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    fn write_header(&mut self) {
        FrameHeader {
            frame: self.frame,
            canvas: self.ctx.canvas,
            vector_vertex_count: self.vectors.vertex_count(),
            event_count: self.ctx.events.len(),
            permission: self.ctx.permission.state(),
            gravity: self.ctx.gravity.vector(),
        }
        .write_into(&self.layout, &mut self.header);
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count().min(self.layout.max_vector_vertices) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn canvas_width(&self) -> f32 {
        self.ctx.canvas.x
    }

    pub fn canvas_height(&self) -> f32 {
        self.ctx.canvas.y
    }

    pub fn permission_state(&self) -> f32 {
        self.ctx.permission.state().code()
    }

    pub fn gravity_x(&self) -> f32 {
        self.ctx.gravity.vector().x
    }

    pub fn gravity_y(&self) -> f32 {
        self.ctx.gravity.vector().y
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    // ---- Capacity accessors ----

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn vertex_stride_floats(&self) -> u32 {
        VectorVertex::FLOATS as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
