//! Pointer drag tracking and release velocity estimation.
//!
//! Only one pointer may drag at a time. Samples are kept for a short trailing
//! window and the release velocity is the secant slope between the oldest and
//! newest retained sample. Very short drags therefore give a noisy estimate;
//! that's accepted rather than smoothed.

use std::collections::VecDeque;

/// A pointer event as the simulation sees it: screen coordinates (y down),
/// timestamp in ms on the same clock as the frame loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub pointer_id: i32,
    pub x: f64,
    pub y: f64,
    pub button: i16,
    pub time_ms: f64,
}

impl PointerInput {
    pub fn new(pointer_id: i32, x: f64, y: f64, time_ms: f64) -> Self {
        Self {
            pointer_id,
            x,
            y,
            button: 0,
            time_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    t: f64,
    x: f64,
    y: f64,
}

/// Screen-space velocity (px/s, y down) measured at release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReleaseVelocity {
    pub vx: f64,
    pub vy: f64,
}

impl ReleaseVelocity {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

#[derive(Clone, Debug)]
pub struct PointerTracker {
    active: Option<i32>,
    samples: VecDeque<Sample>,
    window_ms: f64,
}

impl PointerTracker {
    pub fn new(window_ms: f64) -> Self {
        Self {
            active: None,
            samples: VecDeque::new(),
            window_ms,
        }
    }

    pub fn active_pointer(&self) -> Option<i32> {
        self.active
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Start tracking `input`'s pointer. Fails while another drag is live.
    pub fn begin(&mut self, input: &PointerInput) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(input.pointer_id);
        self.samples.clear();
        self.push(input);
        true
    }

    /// Record a move. Returns `false` for pointers we aren't tracking.
    pub fn record(&mut self, input: &PointerInput) -> bool {
        if self.active != Some(input.pointer_id) {
            return false;
        }
        self.push(input);
        true
    }

    /// Stop tracking and estimate the release velocity. Samples that fell out
    /// of the window by the release time are discarded first, so a pointer
    /// that paused before letting go releases with zero velocity.
    pub fn finish(&mut self, input: &PointerInput) -> Option<ReleaseVelocity> {
        if self.active != Some(input.pointer_id) {
            return None;
        }
        self.active = None;
        self.evict(input.time_ms);
        let velocity = match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) if self.samples.len() >= 2 && last.t > first.t => {
                let dt = (last.t - first.t) / 1000.0;
                ReleaseVelocity {
                    vx: (last.x - first.x) / dt,
                    vy: (last.y - first.y) / dt,
                }
            }
            _ => ReleaseVelocity::default(),
        };
        self.samples.clear();
        Some(velocity)
    }

    /// Drop the drag without producing a velocity.
    pub fn reset(&mut self) {
        self.active = None;
        self.samples.clear();
    }

    fn push(&mut self, input: &PointerInput) {
        self.samples.push_back(Sample {
            t: input.time_ms,
            x: input.x,
            y: input.y,
        });
        self.evict(input.time_ms);
    }

    fn evict(&mut self, now_ms: f64) {
        while let Some(front) = self.samples.front() {
            if now_ms - front.t > self.window_ms {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}
