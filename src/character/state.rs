use std::fmt;

/// The single active behaviour. Timers live inside the variant that owns
/// them, so replacing the state drops every pending timer of the old one.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorState {
    /// Standing still. `decide_at` is `None` only under reduced motion.
    Idle {
        decide_at: Option<f64>,
        flip_back_at: Option<f64>,
    },
    Sitting {
        until: f64,
    },
    Walking {
        target_x: f64,
        /// -1 or +1, fixed for the whole walk.
        direction: f64,
    },
    Dragging {
        pointer_id: i32,
    },
    Airborne {
        has_bounced: bool,
        peak_height: f64,
    },
    Sliding,
}

impl BehaviorState {
    pub fn kind(&self) -> StateKind {
        match self {
            BehaviorState::Idle { .. } => StateKind::Idle,
            BehaviorState::Sitting { .. } => StateKind::Sitting,
            BehaviorState::Walking { .. } => StateKind::Walking,
            BehaviorState::Dragging { .. } => StateKind::Dragging,
            BehaviorState::Airborne { .. } => StateKind::Airborne,
            BehaviorState::Sliding => StateKind::Sliding,
        }
    }

    pub fn pose(&self) -> Pose {
        match self {
            BehaviorState::Idle { .. } => Pose::Idle,
            BehaviorState::Walking { .. } => Pose::Walk,
            BehaviorState::Sitting { .. } | BehaviorState::Sliding => Pose::Sit,
            BehaviorState::Dragging { .. } | BehaviorState::Airborne { .. } => Pose::Dangle,
        }
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            BehaviorState::Dragging { .. } | BehaviorState::Airborne { .. } => Anchor::TopCenter,
            _ => Anchor::BottomCenter,
        }
    }

    /// Timers owned by this state, soonest first.
    pub fn pending_timers(&self) -> Vec<Timer> {
        let mut timers = Vec::new();
        match *self {
            BehaviorState::Idle {
                decide_at,
                flip_back_at,
            } => {
                if let Some(due_ms) = flip_back_at {
                    timers.push(Timer {
                        kind: TimerKind::FlipBack,
                        due_ms,
                    });
                }
                if let Some(due_ms) = decide_at {
                    timers.push(Timer {
                        kind: TimerKind::Decide,
                        due_ms,
                    });
                }
            }
            BehaviorState::Sitting { until } => timers.push(Timer {
                kind: TimerKind::SitEnd,
                due_ms: until,
            }),
            _ => {}
        }
        timers.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        timers
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Sitting,
    Walking,
    Dragging,
    Airborne,
    Sliding,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Sitting => "sitting",
            StateKind::Walking => "walking",
            StateKind::Dragging => "dragging",
            StateKind::Airborne => "airborne",
            StateKind::Sliding => "sliding",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which looping animation the presentation layer should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Walk,
    Sit,
    Dangle,
}

impl Pose {
    pub const ALL: [Pose; 4] = [Pose::Idle, Pose::Walk, Pose::Sit, Pose::Dangle];
}

/// Point of the sprite pinned to the body position: the feet on the floor, or
/// the head when dangling from the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    BottomCenter,
    TopCenter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Idle is over: roll for sit or walk.
    Decide,
    /// Turn a left-facing idle character back to the right.
    FlipBack,
    /// Sitting is over.
    SitEnd,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    pub kind: TimerKind,
    pub due_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_belong_to_their_state() {
        let idle = BehaviorState::Idle {
            decide_at: Some(7_000.0),
            flip_back_at: Some(1_000.0),
        };
        let kinds: Vec<_> = idle.pending_timers().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TimerKind::FlipBack, TimerKind::Decide]);

        assert!(BehaviorState::Sliding.pending_timers().is_empty());
        assert!(
            BehaviorState::Walking {
                target_x: 0.0,
                direction: 1.0
            }
            .pending_timers()
            .is_empty()
        );
    }

    #[test]
    fn poses_and_anchors() {
        let air = BehaviorState::Airborne {
            has_bounced: false,
            peak_height: 0.0,
        };
        assert_eq!(air.pose(), Pose::Dangle);
        assert_eq!(air.anchor(), Anchor::TopCenter);
        assert_eq!(BehaviorState::Sliding.pose(), Pose::Sit);
        assert_eq!(BehaviorState::Sliding.anchor(), Anchor::BottomCenter);
        assert_eq!(StateKind::Airborne.to_string(), "airborne");
    }
}
