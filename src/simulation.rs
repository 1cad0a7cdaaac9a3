// Owns the trail background and the live particles, and steps them one tick at a time

use crate::color::Color;
use crate::gas::GasPolicy;
use crate::particle::{Particle, Status};
use crate::surface::PixelSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub gas_policy: GasPolicy,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub const WIDTH: u32 = 639;
    pub const HEIGHT: u32 = 360;
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: SimConfig::WIDTH,
            height: SimConfig::HEIGHT,
            gas_policy: GasPolicy::default(),
            seed: None,
        }
    }
}

pub struct Simulation {
    background: PixelSurface,
    particles: Vec<Particle>,
    rng: StdRng,
    gas_policy: GasPolicy,
    ticks: u64,
    spawned: u64,
    retired: u64,
}

impl Simulation {
    /// Simulation over a plain black background.
    pub fn new(config: SimConfig) -> Simulation {
        let background = PixelSurface::new(config.width, config.height, Color::BLACK);
        Simulation::with_background(config, background)
    }

    /// Simulation painting its trails onto `background`, which also sets the screen size.
    pub fn with_background(config: SimConfig, background: PixelSurface) -> Simulation {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Simulation {
            background,
            particles: Vec::new(),
            rng,
            gas_policy: config.gas_policy,
            ticks: 0,
            spawned: 0,
            retired: 0,
        }
    }

    /// Spawns one particle, then advances every live particle and drops the
    /// ones that retired. Returns how many retired this tick.
    pub fn tick(&mut self) -> usize {
        self.particles
            .push(Particle::spawn(self.gas_policy, &mut self.rng));
        self.spawned += 1;

        let screen_width = self.background.width() as f64;
        let background = &mut self.background;
        let before = self.particles.len();
        self.particles
            .retain_mut(|p| p.advance(background, screen_width) == Status::Alive);
        let retired = before - self.particles.len();

        self.retired += retired as u64;
        self.ticks += 1;
        log::debug!(
            "tick {}: {} live, {} retired",
            self.ticks,
            self.particles.len(),
            retired
        );
        retired
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn background(&self) -> &PixelSurface {
        &self.background
    }

    pub fn gas_policy(&self) -> GasPolicy {
        self.gas_policy
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn retired(&self) -> u64 {
        self.retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::GasKind;

    fn seeded(seed: u64, gas_policy: GasPolicy) -> Simulation {
        Simulation::new(SimConfig {
            seed: Some(seed),
            gas_policy,
            ..SimConfig::default()
        })
    }

    #[test]
    fn default_config_matches_window() {
        let config = SimConfig::default();
        assert_eq!((config.width, config.height), (639, 360));
        assert_eq!(config.gas_policy, GasPolicy::Fixed(GasKind::H2O));
    }

    #[test]
    fn first_tick_spawns_and_advances_one() {
        let mut sim = seeded(1, GasPolicy::default());
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.particles().len(), 1);
        let p = &sim.particles()[0];
        // already moved off the vent during its first tick
        assert!(p.pos()[1] < Particle::VENT[1]);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn live_count_matches_counters() {
        let mut sim = seeded(8, GasPolicy::Uniform);
        for _ in 0..400 {
            sim.tick();
            assert_eq!(sim.spawned() - sim.retired(), sim.particles().len() as u64);
        }
        assert_eq!(sim.spawned(), 400);
        assert!(sim.retired() > 0);
    }

    #[test]
    fn population_levels_off() {
        // water leaves through the top within a few dozen ticks, so one spawn per tick can't pile up
        let mut sim = seeded(21, GasPolicy::default());
        for _ in 0..1000 {
            sim.tick();
            assert!(sim.particles().len() <= 120);
        }
    }

    #[test]
    fn survivors_are_inside_the_bounds() {
        let mut sim = seeded(4, GasPolicy::Uniform);
        let width = sim.background().width() as f64;
        for _ in 0..300 {
            sim.tick();
            for p in sim.particles() {
                let [x, y] = p.pos();
                assert!(x >= 0.0 && x <= width);
                assert!(y >= 0.0 && y <= Particle::IO_SURFACE_Y);
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = seeded(77, GasPolicy::Uniform);
        let mut b = seeded(77, GasPolicy::Uniform);
        for _ in 0..150 {
            assert_eq!(a.tick(), b.tick());
        }
        let positions = |sim: &Simulation| sim.particles().iter().map(|p| p.pos()).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.background().pixels(), b.background().pixels());
    }

    #[test]
    fn trails_accumulate_on_background() {
        let mut sim = seeded(2, GasPolicy::default());
        let untouched = PixelSurface::new(SimConfig::WIDTH, SimConfig::HEIGHT, Color::BLACK);
        sim.tick();
        let vent_x = Particle::VENT[0] as i32;
        let vent_y = Particle::VENT[1] as i32;
        assert_eq!(sim.background().pixel(vent_x, vent_y), Some(Color::WHITE));

        for _ in 0..200 {
            sim.tick();
        }
        // nothing ever clears the trails
        assert_eq!(sim.background().pixel(vent_x, vent_y), Some(Color::WHITE));
        assert_ne!(sim.background().pixels(), untouched.pixels());
    }

    #[test]
    fn custom_background_sets_screen_width() {
        let background = PixelSurface::new(100, 360, Color::BLACK);
        let config = SimConfig {
            seed: Some(5),
            gas_policy: GasPolicy::Fixed(GasKind::SO2),
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_background(config, background);
        for _ in 0..50 {
            sim.tick();
        }
        // the vent sits right of a 100 pixel wide screen, every particle retires at once
        assert!(sim.particles().is_empty());
        assert_eq!(sim.retired(), 50);
    }
}
