//! Portal wrap: horizontal motion continues across the viewport edges.
//!
//! While the sprite straddles an edge a mirrored "ghost" is drawn on the
//! opposite side. Once the ghost is fully on-screen the body teleports onto it,
//! so the crossing never pops.

/// Viewport and sprite dimensions in CSS pixels, read fresh each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub sprite_width: f64,
    pub sprite_height: f64,
}

impl Geometry {
    pub fn new(viewport_width: f64, viewport_height: f64, sprite_width: f64, sprite_height: f64) -> Self {
        Self {
            viewport_width: finite_or_zero(viewport_width),
            viewport_height: finite_or_zero(viewport_height),
            sprite_width: finite_or_zero(sprite_width),
            sprite_height: finite_or_zero(sprite_height),
        }
    }

    pub fn half_width(&self) -> f64 {
        self.sprite_width / 2.0
    }

    /// Range of centre positions that keep the whole sprite on-screen.
    /// Never narrower than one pixel, even on a viewport thinner than the sprite.
    pub fn x_bounds(&self) -> (f64, f64) {
        let min = self.half_width();
        let max = (self.viewport_width - self.half_width()).max(min + 1.0);
        (min, max)
    }

    pub fn clamp_x(&self, x: f64) -> f64 {
        let (min, max) = self.x_bounds();
        x.clamp(min, max)
    }

    pub fn fully_visible(&self, x: f64) -> bool {
        x - self.half_width() >= 0.0 && x + self.half_width() <= self.viewport_width
    }

    /// A ghost can only ever be fully visible when the sprite fits the viewport.
    pub fn can_wrap(&self) -> bool {
        self.sprite_width > 0.0 && self.sprite_width < self.viewport_width
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapProjection {
    /// -1 when leaving through the left edge, +1 through the right.
    pub direction: f64,
    /// `viewport_width * direction`, fixed at activation.
    pub offset: f64,
}

impl WrapProjection {
    pub fn ghost_x(&self, x: f64) -> f64 {
        x - self.offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WrapStep {
    /// Sprite fully on-screen, nothing to draw twice.
    Clear,
    /// Sprite straddles an edge; the ghost sits at this x.
    Straddling { ghost_x: f64 },
    /// The body moved onto its ghost; any target must shift by `-offset`.
    Teleported { offset: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct WrapProjector {
    active: Option<WrapProjection>,
}

impl WrapProjector {
    pub fn projection(&self) -> Option<WrapProjection> {
        self.active
    }

    pub fn ghost_x(&self, x: f64) -> Option<f64> {
        self.active.map(|p| p.ghost_x(x))
    }

    /// Check the body's (already advanced) x against the edges, activating or
    /// committing a projection as needed. `x` is rewritten on teleport.
    pub fn update(&mut self, x: &mut f64, geom: &Geometry) -> WrapStep {
        let w = geom.viewport_width;
        if self.active.is_none() {
            let direction = if *x - geom.half_width() < 0.0 {
                -1.0
            } else if *x + geom.half_width() > w {
                1.0
            } else {
                return WrapStep::Clear;
            };
            self.active = Some(WrapProjection {
                direction,
                offset: w * direction,
            });
        }

        let Some(projection) = self.active else {
            return WrapStep::Clear;
        };
        let ghost = projection.ghost_x(*x);
        if geom.fully_visible(ghost) {
            *x = ghost;
            self.active = None;
            return WrapStep::Teleported {
                offset: projection.offset,
            };
        }
        if geom.fully_visible(*x) {
            // walked back in the way it came
            self.active = None;
            return WrapStep::Clear;
        }
        WrapStep::Straddling { ghost_x: ghost }
    }

    /// Finish any crossing immediately: teleport when the ghost's centre is
    /// on-screen, otherwise drop the ghost. Returns the applied offset.
    pub fn resolve(&mut self, x: &mut f64, geom: &Geometry) -> Option<f64> {
        let projection = self.active.take()?;
        let ghost = projection.ghost_x(*x);
        if (0.0..=geom.viewport_width).contains(&ghost) {
            *x = ghost;
            Some(projection.offset)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
