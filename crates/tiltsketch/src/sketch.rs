//! The drawing game: a ball under tilt gravity, bouncing off whatever the
//! player draws.

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::api::types::{event_kind, EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::config::SketchConfig;
use crate::core::physics::{BodyDesc, ColliderDesc};
use crate::input::queue::{InputEvent, InputQueue};
use crate::stroke::{ActiveStroke, Stroke};
use crate::systems::debug::debug_draw_colliders;
use crate::systems::vector::VectorColor;

pub const TAG_BALL: &str = "ball";
pub const TAG_WALL: &str = "wall";
pub const TAG_SEGMENT: &str = "segment";

const DEBUG_LINE_WIDTH: f32 = 1.0;

pub struct SketchGame {
    config: SketchConfig,
    strokes: Vec<Stroke>,
    active: Option<ActiveStroke>,
    ball: Option<EntityId>,
    walls: Vec<EntityId>,
}

impl SketchGame {
    pub fn new() -> Self {
        Self::with_config(SketchConfig::default())
    }

    pub fn with_config(config: SketchConfig) -> Self {
        Self {
            config,
            strokes: Vec::new(),
            active: None,
            ball: None,
            walls: Vec::with_capacity(4),
        }
    }

    pub fn settings(&self) -> &SketchConfig {
        &self.config
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&ActiveStroke> {
        self.active.as_ref()
    }

    pub fn ball(&self) -> Option<EntityId> {
        self.ball
    }

    pub fn walls(&self) -> &[EntityId] {
        &self.walls
    }

    /// Four static rectangles along the canvas edges: top, bottom, left, right.
    fn build_walls(&mut self, ctx: &mut EngineContext) {
        for id in self.walls.drain(..) {
            ctx.despawn(id);
        }

        let Vec2 { x: w, y: h } = ctx.canvas;
        let t = self.config.wall_thickness;
        let edges = [
            (Vec2::new(w / 2.0, 0.0), Vec2::new(w, t)),
            (Vec2::new(w / 2.0, h), Vec2::new(w, t)),
            (Vec2::new(0.0, h / 2.0), Vec2::new(t, h)),
            (Vec2::new(w, h / 2.0), Vec2::new(t, h)),
        ];
        for (center, size) in edges {
            let id = ctx.next_id();
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: size.x / 2.0,
                half_height: size.y / 2.0,
            })
            .with_position(center);
            ctx.spawn_with_body(Entity::new(id).with_tag(TAG_WALL), desc, self.config.wall_material());
            self.walls.push(id);
        }
    }

    fn spawn_ball(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball {
            radius: self.config.ball_radius,
        })
        .with_position(ctx.canvas / 2.0)
        .with_ccd(true);
        ctx.spawn_with_body(Entity::new(id).with_tag(TAG_BALL), desc, self.config.ball_material());
        self.ball = Some(id);
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                if self.active.is_some() {
                    log::debug!("pointer down while drawing; dropping unfinished stroke");
                }
                self.active = Some(ActiveStroke::begin(Vec2::new(x, y)));
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(active) = &mut self.active {
                    active.push(Vec2::new(x, y));
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                if let Some(active) = self.active.take() {
                    self.commit(ctx, active);
                }
            }
            InputEvent::Resize { width, height } => self.resize(ctx, width, height),
        }
    }

    fn commit(&mut self, ctx: &mut EngineContext, active: ActiveStroke) {
        let Some(stroke) = active.commit() else {
            log::debug!("stroke too short; discarded");
            return;
        };

        let segments = stroke.segments(self.config.min_segment_length);
        for segment in &segments {
            let id = ctx.next_id();
            ctx.spawn_with_body(
                Entity::new(id).with_tag(TAG_SEGMENT),
                segment.body_desc(self.config.line_thickness),
                self.config.line_material(),
            );
        }
        self.strokes.push(stroke);

        log::debug!(
            "stroke committed: {} segments, {} strokes total",
            segments.len(),
            self.strokes.len()
        );
        ctx.emit_event(GameEvent::new(
            event_kind::STROKE_COMMITTED,
            segments.len() as f32,
            self.strokes.len() as f32,
            0.0,
        ));
    }

    fn resize(&mut self, ctx: &mut EngineContext, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        log::info!("canvas resized to {}x{}", width, height);
        ctx.canvas = Vec2::new(width, height);
        self.build_walls(ctx);
    }
}

impl Default for SketchGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SketchGame {
    fn config(&self) -> GameConfig {
        self.config.game_config()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.build_walls(ctx);
        self.spawn_ball(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, *event);
        }
        ctx.report_permission();
        ctx.step_frame();
    }

    fn render(&self, ctx: &mut RenderContext) {
        // Ball first: the host drops whatever lies past the buffer capacity.
        if let Some(ball) = self.ball.and_then(|id| ctx.scene.get(id)) {
            ctx.vectors
                .fill_circle(ball.pos, self.config.ball_radius, self.config.ball_color);
        }

        let width = self.config.stroke_width;
        let color = self.config.stroke_color;
        if let Some(active) = &self.active {
            ctx.vectors.stroke_polyline(active.points(), width, color);
        }
        for stroke in &self.strokes {
            ctx.vectors.stroke_polyline(stroke.points(), width, color);
        }

        if self.config.debug_colliders {
            debug_draw_colliders(ctx.scene, ctx.physics, ctx.vectors, DEBUG_LINE_WIDTH, VectorColor::GREEN);
        }
    }
}
