//! Whole-session scenarios driven the way the browser bridge drives the game.

use glam::Vec2;
use tiltsketch::sketch::{TAG_BALL, TAG_SEGMENT};
use tiltsketch::{
    event_kind, DeviceClass, DeviceProfile, EngineContext, Game, GravitySource, InputEvent,
    InputQueue, OrientationCapability, OrientationSample, PermissionEvent, PermissionResponse,
    PermissionState, PlatformRequest, RenderContext, ScreenRotation, SketchGame, VectorState,
};

struct Session {
    game: SketchGame,
    ctx: EngineContext,
    input: InputQueue,
    vectors: VectorState,
}

impl Session {
    fn start(class: DeviceClass, capability: OrientationCapability) -> (Self, Option<PlatformRequest>) {
        let game = SketchGame::new();
        let profile = DeviceProfile {
            class,
            rotation: ScreenRotation::Rot0,
            capability,
        };
        let mut ctx = EngineContext::new(&game.config(), &profile);
        let request = ctx.start_permission(capability);
        let mut session = Self {
            game,
            ctx,
            input: InputQueue::new(),
            vectors: VectorState::new(),
        };
        session.game.init(&mut session.ctx);
        (session, request)
    }

    fn tick(&mut self) {
        self.ctx.clear_frame_data();
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        self.vectors.clear();
        let mut render = RenderContext {
            vectors: &mut self.vectors,
            scene: &self.ctx.scene,
            physics: &self.ctx.physics,
        };
        self.game.render(&mut render);
    }

    fn draw(&mut self, points: &[(f32, f32)]) {
        let (first, rest) = points.split_first().expect("non-empty stroke");
        self.input.push(InputEvent::PointerDown { x: first.0, y: first.1 });
        for &(x, y) in rest {
            self.input.push(InputEvent::PointerMove { x, y });
        }
        self.input.push(InputEvent::PointerUp { x: 0.0, y: 0.0 });
    }

    fn ball_velocity(&self) -> Vec2 {
        self.ctx.velocity(self.game.ball().expect("ball spawned"))
    }

    fn ball_pos(&self) -> Vec2 {
        self.ctx.scene.find_by_tag(TAG_BALL).expect("ball spawned").pos
    }
}

#[test]
fn denied_permission_keeps_fallback_gravity() {
    let (mut s, request) = Session::start(DeviceClass::Phone, OrientationCapability::ConsentGated);
    assert_eq!(request, None);

    assert_eq!(
        s.ctx.negotiate(PermissionEvent::UserGesture),
        Some(PlatformRequest::RequestPermission)
    );
    assert_eq!(
        s.ctx.negotiate(PermissionEvent::ApiResult(PermissionResponse::Denied)),
        None
    );
    assert_eq!(s.ctx.permission.state(), PermissionState::Denied);
    assert!(!s.ctx.permission.listener_requested());

    for _ in 0..120 {
        s.tick();
        assert_eq!(s.ctx.gravity.vector(), Vec2::new(0.0, 0.5));
        assert_eq!(s.ctx.gravity.source(), GravitySource::StaticFallback);
    }
    // A later tap never re-prompts.
    assert_eq!(s.ctx.negotiate(PermissionEvent::UserGesture), None);
}

#[test]
fn permission_changes_are_reported_as_events() {
    let (mut s, _) = Session::start(DeviceClass::Tablet, OrientationCapability::ConsentGated);
    s.ctx.negotiate(PermissionEvent::UserGesture);
    s.tick();
    let reported: Vec<f32> = s
        .ctx
        .events
        .iter()
        .filter(|e| e.kind == event_kind::PERMISSION_STATE)
        .map(|e| e.a)
        .collect();
    assert_eq!(reported, vec![PermissionState::Requesting.code()]);

    s.tick();
    assert!(s.ctx.events.is_empty());
}

#[test]
fn three_point_stroke_creates_two_bodies() {
    let (mut s, _) = Session::start(DeviceClass::Other, OrientationCapability::Unsupported);
    let bodies_before = s.ctx.physics.body_count();

    s.draw(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
    s.tick();

    assert_eq!(s.ctx.physics.body_count(), bodies_before + 2);
    assert_eq!(s.ctx.scene.count_tag(TAG_SEGMENT), 2);
    assert_eq!(s.game.strokes().len(), 1);
}

#[test]
fn ball_bounces_off_drawn_line() {
    let (mut s, _) = Session::start(DeviceClass::Other, OrientationCapability::Unsupported);
    // Ball starts at (400, 300); a flat line 100 px below it.
    s.draw(&[(250.0, 400.0), (400.0, 400.0), (550.0, 400.0)]);

    let mut fell = false;
    let mut bounced = false;
    for _ in 0..180 {
        s.tick();
        let vy = s.ball_velocity().y;
        if vy > 100.0 {
            fell = true;
        }
        if fell && vy < -100.0 {
            bounced = true;
            break;
        }
    }
    assert!(fell, "ball never fell");
    assert!(bounced, "ball never bounced: {:?}", s.ball_pos());
    assert!(s.ball_pos().y < 400.0);
}

#[test]
fn tilt_latches_and_survives_null_samples() {
    let (mut s, request) = Session::start(DeviceClass::Phone, OrientationCapability::Open);
    assert_eq!(request, Some(PlatformRequest::AttachOrientationListener));

    s.tick();
    assert_eq!(s.ctx.gravity.vector(), Vec2::new(0.0, 0.5));

    // Tilted hard to the left, screen flat.
    assert!(s.ctx.orientation_sample(&OrientationSample::tilt(0.0, -90.0)));
    for _ in 0..5 {
        s.ctx.orientation_sample(&OrientationSample::default());
        s.tick();
    }
    assert_eq!(s.ctx.gravity.vector(), Vec2::new(-1.0, 0.0));
    assert_eq!(s.ctx.physics.gravity(), Vec2::new(-1000.0, 0.0));
    assert!(s.ball_velocity().x < 0.0);
}

#[test]
fn redraw_covers_strokes_in_progress() {
    let (mut s, _) = Session::start(DeviceClass::Other, OrientationCapability::Unsupported);
    s.tick();
    let ball_only = s.vectors.vertex_count();

    s.input.push(InputEvent::PointerDown { x: 20.0, y: 20.0 });
    s.input.push(InputEvent::PointerMove { x: 120.0, y: 60.0 });
    s.tick();
    assert!(s.game.active_stroke().is_some());
    assert!(s.vectors.vertex_count() > ball_only);
    assert_eq!(s.ctx.scene.count_tag(TAG_SEGMENT), 0);
}
