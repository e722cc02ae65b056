//! The character simulation: behaviour state machine plus point-mass physics.
//!
//! Everything here is plain Rust with no DOM access. The widget feeds it frame
//! timestamps, pointer events and viewport geometry, and reads back a [`Frame`]
//! describing what to draw.
//!
//! Transitions:
//!
//! ```text
//! Idle ──timer──> Walking ──arrive──> Idle
//!   └───timer──> Sitting ──timer───> Idle
//! (any) ──pointer down──> Dragging ──release──> Airborne
//! Airborne ──1st contact──> Airborne (one bounce)
//!          ──2nd contact──> Sliding ──stopped──> Idle
//!                       └─> Idle (no horizontal speed)
//! ```

mod body;
mod input;
mod state;
mod wrap;

pub use body::{Body, Facing, rebound_speed};
pub use input::{PointerInput, PointerTracker, ReleaseVelocity};
pub use state::{Anchor, BehaviorState, Pose, StateKind, Timer, TimerKind};
pub use wrap::{Geometry, WrapProjection, WrapProjector, WrapStep};

use tracing::{debug, info};

use crate::clock::FrameClock;
use crate::config::{Config, DurationRange};
use crate::error::Result;
use crate::rng::{RandomSource, Xorshift64};

/// Upper bound on timer callbacks handled in one tick. Zero-length durations
/// would otherwise chain Idle -> Sitting -> Idle forever.
const MAX_TIMER_FIRES_PER_TICK: usize = 8;

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub facing: Facing,
    pub pose: Pose,
    pub anchor: Anchor,
    pub state: StateKind,
    /// Mirrored x on the opposite edge while a portal crossing is in progress.
    pub ghost_x: Option<f64>,
}

pub struct Character<R: RandomSource = Xorshift64> {
    config: Config,
    rng: R,
    body: Body,
    state: BehaviorState,
    wrap: WrapProjector,
    tracker: PointerTracker,
    geometry: Geometry,
    clock: FrameClock,
    now_ms: f64,
    reduced_motion: bool,
    torn_down: bool,
}

impl<R: RandomSource> Character<R> {
    /// Place the character at a random on-screen x on the floor and start it
    /// sitting or idling.
    pub fn new(config: Config, geometry: Geometry, mut rng: R, now_ms: f64) -> Result<Self> {
        config.validate()?;
        let (min_x, max_x) = geometry.x_bounds();
        let x = rng.range(min_x, max_x);
        let mut character = Self {
            reduced_motion: config.reduced_motion.unwrap_or(false),
            clock: FrameClock::new(config.max_frame_dt),
            tracker: PointerTracker::new(config.sample_window_ms),
            config,
            rng,
            body: Body::at(x),
            state: BehaviorState::Idle {
                decide_at: None,
                flip_back_at: None,
            },
            wrap: WrapProjector::default(),
            geometry,
            now_ms,
            torn_down: false,
        };

        if !character.reduced_motion && character.rng.chance(character.config.initial_sit_chance) {
            let duration = character.draw(character.config.sit_duration);
            character.enter_sitting(duration);
        } else {
            character.enter_idle();
        }
        info!(x, state = %character.state.kind(), "character created");
        Ok(character)
    }

    // --- Accessors -----------------------------------------------------------

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn projection(&self) -> Option<WrapProjection> {
        self.wrap.projection()
    }

    pub fn pending_timers(&self) -> Vec<Timer> {
        self.state.pending_timers()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Pointer currently holding the character, if any.
    pub fn drag_pointer(&self) -> Option<i32> {
        self.tracker.active_pointer()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            x: self.body.x,
            y: self.body.y,
            facing: self.body.facing,
            pose: self.state.pose(),
            anchor: self.state.anchor(),
            state: self.state.kind(),
            ghost_x: self.wrap.ghost_x(self.body.x),
        }
    }

    // --- Frame loop ----------------------------------------------------------

    /// Advance to `now_ms`: fire due timers, then step the active state's motion.
    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let dt = self.clock.step(now_ms);
        self.now_ms = now_ms;
        if self.torn_down {
            return self.frame();
        }

        self.fire_timers();

        match self.state {
            BehaviorState::Walking {
                target_x,
                direction,
            } => self.step_walking(target_x, direction, dt),
            BehaviorState::Airborne {
                has_bounced,
                peak_height,
            } => self.step_airborne(has_bounced, peak_height, dt),
            BehaviorState::Sliding => self.step_sliding(dt),
            BehaviorState::Idle { .. }
            | BehaviorState::Sitting { .. }
            | BehaviorState::Dragging { .. } => {}
        }
        self.frame()
    }

    fn fire_timers(&mut self) {
        for _ in 0..MAX_TIMER_FIRES_PER_TICK {
            let Some(timer) = self
                .state
                .pending_timers()
                .into_iter()
                .find(|t| t.due_ms <= self.now_ms)
            else {
                return;
            };
            debug!(kind = ?timer.kind, due_ms = timer.due_ms, "timer fired");
            match timer.kind {
                TimerKind::FlipBack => {
                    self.body.facing = Facing::Right;
                    if let BehaviorState::Idle { flip_back_at, .. } = &mut self.state {
                        *flip_back_at = None;
                    }
                }
                TimerKind::Decide => {
                    if self.rng.chance(self.config.sit_chance) {
                        let duration = self.draw(self.config.sit_duration);
                        self.enter_sitting(duration);
                    } else {
                        self.enter_walking();
                    }
                }
                TimerKind::SitEnd => self.enter_idle(),
            }
        }
    }

    fn step_walking(&mut self, mut target_x: f64, direction: f64, dt: f64) {
        let speed = self.config.walk_speed * self.geometry.sprite_width;
        let mut x = self.body.x + direction * speed * dt;

        if reached(x, target_x, direction) {
            self.body.x = target_x;
            self.enter_idle();
            return;
        }

        if self.wrap_enabled() {
            if let WrapStep::Teleported { offset } = self.wrap.update(&mut x, &self.geometry) {
                target_x -= offset;
                debug!(x, target_x, offset, "portal teleport while walking");
            }
        } else {
            let clamped = self.geometry.clamp_x(x);
            if clamped != x {
                // wall counts as arrival
                self.body.x = clamped;
                self.enter_idle();
                return;
            }
        }

        self.body.x = x;
        if reached(x, target_x, direction) {
            self.body.x = target_x;
            self.enter_idle();
            return;
        }
        self.state = BehaviorState::Walking {
            target_x,
            direction,
        };
    }

    fn step_airborne(&mut self, mut has_bounced: bool, mut peak_height: f64, dt: f64) {
        let gravity = self.config.gravity;
        self.body.integrate(gravity, dt);
        peak_height = peak_height.max(self.body.y);
        self.track_edges();

        if self.body.y <= 0.0 && self.body.vy < 0.0 {
            self.body.y = 0.0;
            if !has_bounced {
                let rebound_height = self.config.bounce_fraction * peak_height;
                self.body.vy = rebound_speed(gravity, rebound_height);
                has_bounced = true;
                debug!(peak_height, rebound_height, vy = self.body.vy, "bounce");
                peak_height = 0.0;
            } else {
                self.body.vy = 0.0;
                if self.body.vx.abs() > self.config.rest_speed {
                    self.enter_sliding();
                } else {
                    self.enter_idle();
                }
                return;
            }
        }

        self.state = BehaviorState::Airborne {
            has_bounced,
            peak_height,
        };
    }

    fn step_sliding(&mut self, dt: f64) {
        self.body.slide(self.config.slide_friction, dt);
        self.track_edges();
        if self.body.vx.abs() < self.config.rest_speed {
            self.enter_idle();
        }
    }

    /// Portal wrap for free-moving states, or stop dead at the wall when
    /// wrapping is off.
    fn track_edges(&mut self) {
        let mut x = self.body.x;
        if self.wrap_enabled() {
            self.wrap.update(&mut x, &self.geometry);
        } else {
            let clamped = self.geometry.clamp_x(x);
            if clamped != x {
                x = clamped;
                self.body.vx = 0.0;
            }
        }
        self.body.x = x;
    }

    fn wrap_enabled(&self) -> bool {
        self.config.screen_wrap && self.geometry.can_wrap()
    }

    // --- Pointer input -------------------------------------------------------

    /// Pick the character up. Ignored for non-primary buttons, presses outside
    /// the sprite, and while another pointer already holds it.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        if self.torn_down || input.button != 0 || self.tracker.is_tracking() {
            return false;
        }
        if !self.hit_test(input.x, input.y) {
            return false;
        }
        self.now_ms = input.time_ms;
        if !self.tracker.begin(&input) {
            return false;
        }
        self.enter_dragging(input.pointer_id);
        self.follow_pointer(&input);
        true
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> bool {
        if !self.is_dragged_by(input.pointer_id) || !self.tracker.record(&input) {
            return false;
        }
        self.now_ms = input.time_ms;
        self.follow_pointer(&input);
        true
    }

    /// Let go: a slow release drops straight down, a fast one is thrown.
    pub fn pointer_up(&mut self, input: PointerInput) -> bool {
        if !self.is_dragged_by(input.pointer_id) {
            return false;
        }
        let Some(velocity) = self.tracker.finish(&input) else {
            return false;
        };
        self.now_ms = input.time_ms;
        self.release(velocity);
        true
    }

    pub fn pointer_cancel(&mut self, input: PointerInput) -> bool {
        self.pointer_up(input)
    }

    /// Whether screen point (`x`, `y`) lies on the sprite.
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        let g = &self.geometry;
        let bottom = g.viewport_height - self.body.y;
        let top = bottom - g.sprite_height;
        let hit = |cx: f64| (cx - g.half_width()..=cx + g.half_width()).contains(&x);
        let on_body = hit(self.body.x) || self.wrap.ghost_x(self.body.x).is_some_and(hit);
        on_body && (top..=bottom).contains(&y)
    }

    fn is_dragged_by(&self, pointer_id: i32) -> bool {
        matches!(self.state, BehaviorState::Dragging { pointer_id: id } if id == pointer_id)
    }

    /// The pointer holds the sprite by its top-centre.
    fn follow_pointer(&mut self, input: &PointerInput) {
        self.body.x = input.x;
        self.body.y = (self.geometry.viewport_height - input.y - self.geometry.sprite_height).max(0.0);
    }

    fn release(&mut self, velocity: ReleaseVelocity) {
        let speed = velocity.speed();
        let (mut vx, mut vy) = (velocity.vx, -velocity.vy);
        if speed < self.config.drop_speed_threshold {
            vx = 0.0;
            vy = 0.0;
        } else if speed > self.config.max_throw_speed {
            let scale = self.config.max_throw_speed / speed;
            vx *= scale;
            vy *= scale;
        }
        debug!(vx, vy, speed, "released");

        if self.reduced_motion {
            self.body.ground();
            self.enter_idle();
            return;
        }
        self.enter_airborne(vx, vy);
    }

    // --- Environment ---------------------------------------------------------

    /// Per-frame geometry update (pose changes alter the sprite size).
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Viewport resize: keep the character on-screen. Timers are untouched.
    pub fn resize(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        let dragging = matches!(self.state, BehaviorState::Dragging { .. });
        if !dragging && self.wrap.projection().is_none() {
            self.body.x = self.geometry.clamp_x(self.body.x);
        }
        debug!(
            viewport_width = geometry.viewport_width,
            viewport_height = geometry.viewport_height,
            "resized"
        );
    }

    /// Reduced motion holds the idle pose with no autonomous behaviour and no
    /// physics. Turning it off resumes the normal idle cycle.
    pub fn set_reduced_motion(&mut self, on: bool) {
        if self.reduced_motion == on || self.torn_down {
            return;
        }
        self.reduced_motion = on;
        info!(reduced_motion = on, "motion preference changed");
        match self.state {
            BehaviorState::Dragging { .. } => {}
            _ if on => {
                self.body.ground();
                self.enter_idle();
            }
            BehaviorState::Idle { decide_at: None, .. } => self.enter_idle(),
            _ => {}
        }
    }

    /// Cancel every timer, release the drag and stop. The character ignores
    /// further input afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.tracker.reset();
        self.wrap.cancel();
        self.body.stop();
        self.transition(BehaviorState::Idle {
            decide_at: None,
            flip_back_at: None,
        });
        self.torn_down = true;
        info!("character torn down");
    }

    // --- State entry ---------------------------------------------------------

    /// Swap in `next`. The old state, and every timer it owned, is dropped here.
    fn transition(&mut self, next: BehaviorState) {
        debug!(from = %self.state.kind(), to = %next.kind(), x = self.body.x, "state transition");
        self.state = next;
    }

    fn enter_idle(&mut self) {
        self.body.ground();
        self.settle();
        let next = if self.reduced_motion {
            BehaviorState::Idle {
                decide_at: None,
                flip_back_at: None,
            }
        } else {
            let flip_back_at =
                (self.body.facing == Facing::Left).then(|| self.now_ms + self.config.flip_back_ms);
            let wait = self.draw(self.config.idle_wait);
            BehaviorState::Idle {
                decide_at: Some(self.now_ms + wait),
                flip_back_at,
            }
        };
        self.transition(next);
    }

    fn enter_sitting(&mut self, duration_ms: f64) {
        self.body.ground();
        self.settle();
        self.body.facing = Facing::Right;
        self.transition(BehaviorState::Sitting {
            until: self.now_ms + duration_ms,
        });
    }

    fn enter_walking(&mut self) {
        self.body.ground();
        let target_x = self.pick_walk_target();
        let direction = if target_x >= self.body.x { 1.0 } else { -1.0 };
        self.body.facing = Facing::toward(direction);
        self.transition(BehaviorState::Walking {
            target_x,
            direction,
        });
    }

    fn enter_dragging(&mut self, pointer_id: i32) {
        self.body.stop();
        self.wrap.cancel();
        self.body.facing = Facing::Right;
        self.transition(BehaviorState::Dragging { pointer_id });
    }

    fn enter_airborne(&mut self, vx: f64, vy: f64) {
        self.body.vx = vx;
        self.body.vy = vy;
        self.transition(BehaviorState::Airborne {
            has_bounced: false,
            peak_height: self.body.y,
        });
    }

    fn enter_sliding(&mut self) {
        self.body.y = 0.0;
        self.body.vy = 0.0;
        self.transition(BehaviorState::Sliding);
    }

    /// Coming to rest never leaves the sprite straddling an edge.
    fn settle(&mut self) {
        let mut x = self.body.x;
        if let Some(offset) = self.wrap.resolve(&mut x, &self.geometry) {
            debug!(x, offset, "portal committed on rest");
        }
        self.body.x = self.geometry.clamp_x(x);
    }

    /// Random on-screen target at least `walk_min_distance` away. After
    /// `walk_target_attempts` misses the farther screen bound is used instead.
    fn pick_walk_target(&mut self) -> f64 {
        let (min_x, max_x) = self.geometry.x_bounds();
        let x = self.body.x;
        for _ in 0..self.config.walk_target_attempts {
            let t = self.rng.range(min_x, max_x);
            if (t - x).abs() >= self.config.walk_min_distance {
                return t;
            }
        }
        if (max_x - x).abs() >= (x - min_x).abs() {
            max_x
        } else {
            min_x
        }
    }

    fn draw(&mut self, range: DurationRange) -> f64 {
        self.rng.range(range.min_ms, range.max_ms)
    }
}

/// Direction-aware arrival: a step may overshoot, so compare, don't equate.
fn reached(x: f64, target_x: f64, direction: f64) -> bool {
    if direction > 0.0 {
        x >= target_x
    } else {
        x <= target_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws, then repeats the last one.
    struct Scripted {
        values: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.values[self.next.min(self.values.len() - 1)];
            self.next += 1;
            v
        }
    }

    fn geometry() -> Geometry {
        Geometry::new(1000.0, 800.0, 50.0, 80.0)
    }

    // x draw 0.5 -> 500, initial sit roll 0.9 -> idle, idle wait 0.0 -> 5 s
    fn idle_character(extra: &[f64]) -> Character<Scripted> {
        let mut draws = vec![0.5, 0.9, 0.0];
        draws.extend_from_slice(extra);
        Character::new(Config::default(), geometry(), Scripted::new(&draws), 0.0).unwrap()
    }

    #[test]
    fn starts_idle_on_the_floor() {
        let c = idle_character(&[]);
        assert_eq!(c.state().kind(), StateKind::Idle);
        assert_eq!(c.body().y, 0.0);
        assert!((c.body().x - 500.0).abs() < 1e-9);
        let timers = c.pending_timers();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].kind, TimerKind::Decide);
        assert_eq!(timers[0].due_ms, 5_000.0);
    }

    #[test]
    fn starts_sitting_on_low_roll() {
        let c = Character::new(
            Config::default(),
            geometry(),
            Scripted::new(&[0.5, 0.1, 0.0]),
            0.0,
        )
        .unwrap();
        assert_eq!(c.state(), &BehaviorState::Sitting { until: 10_000.0 });
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = Config {
            gravity: 0.0,
            ..Config::default()
        };
        assert!(Character::new(config, geometry(), Scripted::new(&[0.5]), 0.0).is_err());
    }

    #[test]
    fn walk_target_respects_minimum_distance() {
        // decide roll 0.9 -> walk; candidates 0.5 (too close, x = 500), then 0.9
        let mut c = idle_character(&[0.9, 0.5, 0.9]);
        c.tick(5_000.0);
        let BehaviorState::Walking {
            target_x,
            direction,
        } = *c.state()
        else {
            panic!("expected walking, got {:?}", c.state());
        };
        assert!((target_x - (25.0 + 0.9 * 950.0)).abs() < 1e-9);
        assert_eq!(direction, 1.0);
        assert_eq!(c.body().facing, Facing::Right);
    }

    #[test]
    fn exhausted_target_attempts_use_farther_bound() {
        let config = Config {
            walk_min_distance: 10_000.0,
            walk_target_attempts: 3,
            ..Config::default()
        };
        // x = 25 + 0.2 * 950 = 215, left bound is closer
        let mut c =
            Character::new(config, geometry(), Scripted::new(&[0.2, 0.9, 0.0, 0.9, 0.5]), 0.0)
                .unwrap();
        c.tick(5_000.0);
        assert!(matches!(
            *c.state(),
            BehaviorState::Walking { target_x, .. } if target_x == 975.0
        ));
    }

    #[test]
    fn pointer_outside_sprite_is_ignored() {
        let mut c = idle_character(&[]);
        assert!(!c.pointer_down(PointerInput::new(1, 100.0, 790.0, 10.0)));
        assert!(!c.pointer_down(PointerInput {
            button: 2,
            ..PointerInput::new(1, 500.0, 790.0, 10.0)
        }));
        assert!(c.pointer_down(PointerInput::new(1, 500.0, 790.0, 10.0)));
        assert_eq!(c.state(), &BehaviorState::Dragging { pointer_id: 1 });
        assert!(c.pending_timers().is_empty());
    }

    #[test]
    fn drag_slaves_position_to_pointer_top_center() {
        let mut c = idle_character(&[]);
        c.pointer_down(PointerInput::new(1, 500.0, 780.0, 0.0));
        c.pointer_move(PointerInput::new(1, 300.0, 400.0, 16.0));
        assert_eq!(c.body().x, 300.0);
        // bottom edge sits one sprite height under the pointer
        assert_eq!(c.body().y, 800.0 - 400.0 - 80.0);
        assert_eq!(c.frame().anchor, Anchor::TopCenter);
        assert_eq!(c.frame().pose, Pose::Dangle);
        // other pointers don't move it
        assert!(!c.pointer_move(PointerInput::new(2, 0.0, 0.0, 20.0)));
        assert_eq!(c.body().x, 300.0);
    }

    #[test]
    fn throw_speed_is_capped() {
        let mut c = idle_character(&[]);
        c.pointer_down(PointerInput::new(1, 500.0, 780.0, 0.0));
        c.pointer_move(PointerInput::new(1, 600.0, 400.0, 10.0));
        c.pointer_move(PointerInput::new(1, 700.0, 400.0, 20.0));
        c.pointer_up(PointerInput::new(1, 700.0, 400.0, 20.0));
        assert_eq!(c.state().kind(), StateKind::Airborne);
        assert!((c.body().speed() - 1_500.0).abs() < 1e-6);
    }

    #[test]
    fn screen_velocity_is_flipped_to_up_positive() {
        let mut c = idle_character(&[]);
        c.pointer_down(PointerInput::new(1, 500.0, 780.0, 0.0));
        // the press itself falls out of the sample window
        c.pointer_move(PointerInput::new(1, 500.0, 500.0, 100.0));
        c.pointer_move(PointerInput::new(1, 500.0, 495.0, 110.0));
        c.pointer_up(PointerInput::new(1, 500.0, 495.0, 110.0));
        // pointer moved up the screen at 500 px/s
        assert!((c.body().vy - 500.0).abs() < 1e-6);
        assert_eq!(c.body().vx, 0.0);
    }

    #[test]
    fn reduced_motion_holds_idle_without_timers() {
        let mut c = idle_character(&[0.0]);
        c.set_reduced_motion(true);
        assert!(c.pending_timers().is_empty());
        c.tick(60_000.0);
        assert_eq!(c.state().kind(), StateKind::Idle);

        // a throw just lands
        c.pointer_down(PointerInput::new(1, 500.0, 780.0, 60_000.0));
        c.pointer_move(PointerInput::new(1, 500.0, 300.0, 60_010.0));
        c.pointer_move(PointerInput::new(1, 900.0, 100.0, 60_020.0));
        c.pointer_up(PointerInput::new(1, 900.0, 100.0, 60_020.0));
        assert_eq!(c.state().kind(), StateKind::Idle);
        assert_eq!(c.body().y, 0.0);
        assert_eq!(c.body().speed(), 0.0);

        c.set_reduced_motion(false);
        assert_eq!(c.pending_timers().len(), 1);
    }

    #[test]
    fn resize_clamps_but_keeps_timers() {
        let mut c = idle_character(&[]);
        let before = c.pending_timers();
        c.resize(Geometry::new(300.0, 800.0, 50.0, 80.0));
        assert_eq!(c.body().x, 275.0);
        assert_eq!(c.pending_timers(), before);
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut c = idle_character(&[]);
        c.pointer_down(PointerInput::new(1, 500.0, 780.0, 0.0));
        assert_eq!(c.drag_pointer(), Some(1));
        c.teardown();
        assert!(c.is_torn_down());
        assert_eq!(c.drag_pointer(), None);
        assert!(c.pending_timers().is_empty());
        assert!(!c.pointer_move(PointerInput::new(1, 10.0, 10.0, 5.0)));
        assert!(!c.pointer_down(PointerInput::new(2, 500.0, 790.0, 6.0)));
        c.tick(100_000.0);
        assert_eq!(c.state().kind(), StateKind::Idle);
    }

    #[test]
    fn zero_length_durations_do_not_spin() {
        let config = Config {
            idle_wait: DurationRange::new(0.0, 0.0),
            sit_duration: DurationRange::new(0.0, 0.0),
            sit_chance: 1.0,
            ..Config::default()
        };
        let mut c = Character::new(config, geometry(), Scripted::new(&[0.5, 0.9, 0.0]), 0.0)
            .unwrap();
        let frame = c.tick(1.0);
        assert!(matches!(frame.state, StateKind::Idle | StateKind::Sitting));
    }
}
