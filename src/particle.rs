// Gas particle ejected from the vent. Keeps track of its own position, velocity and color,
// and paints its path onto the background as it moves.

use crate::color::Color;
use crate::gas::{GasKind, GasPolicy};
use crate::surface::TrailSurface;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Alive,
    Retired,
}

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    gas: GasKind,
    color: Color,
    pos: Vector2<f64>,
    vel: Vector2<f64>,
}

impl Particle {
    pub const VENT: Vector2<f64> = [320.0, 300.0];
    pub const IO_SURFACE_Y: f64 = 308.0;
    // pixels per tick, added to dy every tick
    pub const GRAVITY: f64 = 0.5;
    // SO2 speed in pixels per tick, other gases scale from it
    pub const BASE_SPEED: f64 = 8.0;
    // 90 is straight up
    pub const MIN_LAUNCH_DEG: f64 = 60.0;
    pub const MAX_LAUNCH_DEG: f64 = 120.0;

    /// New particle at the vent, with a gas from `policy` and a random launch angle.
    pub fn spawn<R: Rng + ?Sized>(policy: GasPolicy, rng: &mut R) -> Particle {
        let gas = policy.pick(rng);
        let orient = Uniform::new_inclusive(Particle::MIN_LAUNCH_DEG, Particle::MAX_LAUNCH_DEG)
            .sample(rng);
        Particle::launch(gas, orient)
    }

    /// New particle at the vent heading `orient_deg` degrees above the horizontal.
    pub fn launch(gas: GasKind, orient_deg: f64) -> Particle {
        let speed = Particle::BASE_SPEED * gas.vel_scalar();
        let radians = orient_deg.to_radians();
        Particle {
            gas,
            color: gas.color(),
            pos: Particle::VENT,
            // screen y grows downward, so upward motion is negative dy
            vel: [speed * radians.cos(), -speed * radians.sin()],
        }
    }

    pub fn gas(&self) -> GasKind {
        self.gas
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pos(&self) -> Vector2<f64> {
        self.pos
    }

    pub fn vel(&self) -> Vector2<f64> {
        self.vel
    }

    /// One tick: apply gravity, paint the segment about to be travelled, move,
    /// then check whether the particle has left the visible area.
    pub fn advance<S: TrailSurface + ?Sized>(&mut self, surface: &mut S, screen_width: f64) -> Status {
        self.vel[1] += Particle::GRAVITY;
        let next = vecmath::vec2_add(self.pos, self.vel);
        surface.draw_line(self.color, self.pos, next);
        self.pos = next;

        let [x, y] = self.pos;
        if x < 0.0 || x > screen_width {
            Status::Retired
        } else if y < 0.0 || y > Particle::IO_SURFACE_Y {
            Status::Retired
        } else {
            Status::Alive
        }
    }

    #[cfg(test)]
    pub(crate) fn at(gas: GasKind, pos: Vector2<f64>, vel: Vector2<f64>) -> Particle {
        Particle {
            gas,
            color: gas.color(),
            pos,
            vel,
        }
    }
}
