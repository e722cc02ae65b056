// --- Frame Clock ------------------------------------------------------------

/// FrameClock turns animation-frame timestamps (ms, `performance.now()` base)
/// into a physics step in seconds.
///
/// The step is clamped to `max_dt` so a long stall (background tab, debugger)
/// can't launch the character through the floor on the next frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: Option<f64>, // timestamp of the previous frame
    max_dt: f64,          // seconds
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Advance to `now_ms` and return the clamped delta in seconds.
    /// The first frame (and any frame whose timestamp runs backwards) yields 0.
    pub fn step(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
