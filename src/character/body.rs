//! Point-mass kinematics for the character.
//!
//! Coordinates: `x` is the sprite's horizontal centre in viewport pixels,
//! `y` is the height of the sprite's bottom edge above the floor (0 = resting).
//! Velocities are px/s with `vy > 0` meaning upward, so gravity lowers `vy`.

/// Horizontal orientation of the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Facing for a signed horizontal direction (zero counts as right).
    pub fn toward(dx: f64) -> Self {
        if dx < 0.0 { Facing::Left } else { Facing::Right }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub facing: Facing,
}

impl Body {
    pub fn at(x: f64) -> Self {
        Self {
            x,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
        }
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Put the body on the floor with no momentum.
    pub fn ground(&mut self) {
        self.y = 0.0;
        self.stop();
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// One semi-implicit Euler step under `gravity` (a magnitude, pulling down):
    /// velocity first, then position.
    pub fn integrate(&mut self, gravity: f64, dt: f64) {
        self.vy -= gravity * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// Coulomb friction on the horizontal axis. `vx` is clamped at zero and
    /// never reverses.
    pub fn slide(&mut self, friction: f64, dt: f64) {
        if self.vx == 0.0 {
            return;
        }
        let sign = self.vx.signum();
        self.vx -= sign * friction * dt;
        if self.vx * sign < 0.0 {
            self.vx = 0.0;
        }
        self.x += self.vx * dt;
    }
}

/// Upward speed that carries a body to `height` under `gravity`: `sqrt(2gh)`.
pub fn rebound_speed(gravity: f64, height: f64) -> f64 {
    (2.0 * gravity * height.max(0.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_reduces_upward_velocity() {
        let mut b = Body::at(100.0);
        b.vy = 50.0;
        b.integrate(300.0, 0.1);
        assert!((b.vy - 20.0).abs() < 1e-9);
        assert!((b.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn friction_never_reverses() {
        let mut b = Body::at(0.0);
        b.vx = -10.0;
        b.slide(500.0, 0.05);
        assert_eq!(b.vx, 0.0);
        b.slide(500.0, 0.05);
        assert_eq!(b.x, 0.0);
    }

    #[test]
    fn friction_decelerates_toward_zero() {
        let mut b = Body::at(0.0);
        b.vx = 200.0;
        b.slide(500.0, 0.1);
        assert!((b.vx - 150.0).abs() < 1e-9);
        assert!((b.x - 15.0).abs() < 1e-9);
    }

    #[test]
    fn rebound_speed_matches_energy() {
        let v = rebound_speed(300.0, 25.0);
        assert!((v - 122.474_487).abs() < 1e-5);
        assert_eq!(rebound_speed(300.0, -1.0), 0.0);
    }

    #[test]
    fn facing_toward() {
        assert_eq!(Facing::toward(-3.0), Facing::Left);
        assert_eq!(Facing::toward(0.0), Facing::Right);
    }
}
