//! Wander simulation for the world view.
//!
//! Unlocked animals roam a rectangular field. Each step:
//!   1. every pair closer than `3 × animal_size` pushes apart with force
//!      `(3 × size − distance) × repulsion` along their separation,
//!   2. a small random jitter is added,
//!   3. velocity is capped at `max_speed`,
//!   4. position advances by `velocity × movement_speed × dt`,
//!   5. edges reflect the offending velocity component with damping.
//!
//! Positions are sprite top-left corners, in pixels. `dt` is milliseconds.

use std::f32::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::WorldConfig;
use crate::registry::Registry;
use crate::types::AnimalId;

/// Attempts at finding a spawn point that keeps the separation distance.
const SPAWN_ATTEMPTS: usize = 100;

/// 2D vector in pixels (position) or pixels per step (velocity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        Self::new(self.x - other.x, self.y - other.y).length()
    }
}

/// One animal sprite in the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wanderer {
    /// Which animal this sprite shows.
    pub animal: AnimalId,
    /// Top-left corner.
    pub position: Point,
    /// Current heading and speed.
    pub velocity: Point,
}

/// The world-view simulation state.
#[derive(Debug, Clone)]
pub struct WanderField {
    width: f32,
    height: f32,
    config: WorldConfig,
    wanderers: Vec<Wanderer>,
    rng: StdRng,
}

fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

impl WanderField {
    /// Empty field of the given size, seeded for reproducibility.
    #[must_use]
    pub fn new(width: f32, height: f32, config: WorldConfig, seed: u64) -> Self {
        Self {
            width,
            height,
            config,
            wanderers: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current sprites.
    #[must_use]
    pub fn wanderers(&self) -> &[Wanderer] {
        &self.wanderers
    }

    /// Field dimensions.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Resize the field (window resize); sprites are pulled back inside on
    /// the next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn margin(&self) -> f32 {
        self.config.animal_size / 2.0
    }

    fn separation(&self) -> f32 {
        self.config.animal_size * 3.0
    }

    fn max_x(&self) -> f32 {
        (self.width - self.config.animal_size - self.margin()).max(self.margin())
    }

    fn max_y(&self) -> f32 {
        (self.height - self.config.animal_size - self.margin()).max(self.margin())
    }

    /// Spawn interval along one axis: `2 × animal_size` in from both edges,
    /// clamped to the step bounds so a fresh sprite never starts on a wall.
    fn spawn_range(&self, extent: f32, max: f32) -> (f32, f32) {
        let inset = self.config.animal_size * 2.0;
        let lo = inset.clamp(self.margin(), max);
        let hi = (extent - inset).clamp(lo, max);
        (lo, hi)
    }

    /// Add a sprite at a random free spot with a random heading.
    pub fn spawn(&mut self, animal: AnimalId) {
        let (x_lo, x_hi) = self.spawn_range(self.width, self.max_x());
        let (y_lo, y_hi) = self.spawn_range(self.height, self.max_y());
        let separation = self.separation();
        let mut position = Point::default();
        for _ in 0..SPAWN_ATTEMPTS {
            position = Point::new(
                sample(&mut self.rng, x_lo, x_hi),
                sample(&mut self.rng, y_lo, y_hi),
            );
            if self
                .wanderers
                .iter()
                .all(|w| w.position.distance(position) > separation)
            {
                break;
            }
        }
        let angle = sample(&mut self.rng, 0.0, TAU);
        let speed = self.config.movement_speed;
        self.wanderers.push(Wanderer {
            animal,
            position,
            velocity: Point::new(angle.cos() * speed, angle.sin() * speed),
        });
    }

    /// Match the sprite set to the registry's unlocked animals: spawn new
    /// ones, drop ones that are no longer playable.
    pub fn sync(&mut self, registry: &Registry) {
        self.wanderers
            .retain(|w| registry.get(w.animal).is_ok_and(|a| a.unlocked));
        let missing: Vec<AnimalId> = registry
            .unlocked()
            .map(|a| a.id)
            .filter(|id| !self.wanderers.iter().any(|w| w.animal == *id))
            .collect();
        for id in missing {
            self.spawn(id);
        }
    }

    /// Advance the simulation by `dt_ms` milliseconds.
    pub fn step(&mut self, dt_ms: f32) {
        let separation = self.separation();
        let repulsion = self.config.repulsion;
        let speed = self.config.movement_speed;
        let max_speed = self.config.max_speed;
        let damping = self.config.edge_damping;
        let margin = self.margin();
        let (max_x, max_y) = (self.max_x(), self.max_y());

        for i in 0..self.wanderers.len() {
            let here = self.wanderers[i].position;
            let mut force = Point::default();
            for (j, other) in self.wanderers.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = here.x - other.position.x;
                let dy = here.y - other.position.y;
                let distance = dx.hypot(dy);
                if distance > 0.0 && distance < separation {
                    let push = (separation - distance) * repulsion;
                    force.x += dx / distance * push;
                    force.y += dy / distance * push;
                }
            }

            let jitter = sample(&mut self.rng, 0.0, TAU);
            force.x += jitter.cos() * speed * 0.1;
            force.y += jitter.sin() * speed * 0.1;

            let w = &mut self.wanderers[i];
            w.velocity.x += force.x;
            w.velocity.y += force.y;
            let v = w.velocity.length();
            if v > max_speed {
                let scale = max_speed / v;
                w.velocity.x *= scale;
                w.velocity.y *= scale;
            }

            let mut x = w.position.x + w.velocity.x * speed * dt_ms;
            let mut y = w.position.y + w.velocity.y * speed * dt_ms;
            if x <= margin || x >= max_x {
                w.velocity.x *= -damping;
                x = x.clamp(margin, max_x);
            }
            if y <= margin || y >= max_y {
                w.velocity.y *= -damping;
                y = y.clamp(margin, max_y);
            }
            w.position = Point::new(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::animal;
    use crate::types::Vitals;

    fn field() -> WanderField {
        WanderField::new(1200.0, 800.0, WorldConfig::default(), 7)
    }

    #[test]
    fn spawn_keeps_sprites_inside() {
        let mut f = field();
        for id in 0..6 {
            f.spawn(AnimalId(id));
        }
        let (max_x, max_y) = (f.max_x(), f.max_y());
        assert_eq!((max_x, max_y), (1056.0, 656.0));
        for s in f.wanderers() {
            assert!(s.position.x >= 192.0 && s.position.x <= max_x);
            assert!(s.position.y >= 192.0 && s.position.y <= max_y);
        }
    }

    #[test]
    fn crowded_spawn_never_lands_past_the_step_bounds() {
        let mut f = WanderField::new(1280.0, 720.0, WorldConfig::default(), 11);
        for id in 0..16 {
            f.spawn(AnimalId(id));
        }
        assert_eq!((f.max_x(), f.max_y()), (1136.0, 576.0));
        let before: Vec<Point> = f.wanderers().iter().map(|w| w.position).collect();
        for p in &before {
            assert!(p.x >= 48.0 && p.x <= 1136.0, "x = {}", p.x);
            assert!(p.y >= 48.0 && p.y <= 576.0, "y = {}", p.y);
        }

        // The first step must not snap anyone back from outside the field.
        f.step(0.0);
        for (w, p) in f.wanderers().iter().zip(&before) {
            assert_eq!(w.position, *p);
        }
    }

    #[test]
    fn tiny_field_spawns_at_the_margin() {
        let mut f = WanderField::new(100.0, 100.0, WorldConfig::default(), 3);
        f.spawn(AnimalId(1));
        assert_eq!(f.wanderers()[0].position, Point::new(48.0, 48.0));
    }

    #[test]
    fn steps_respect_bounds_and_speed_cap() {
        let mut f = field();
        for id in 0..8 {
            f.spawn(AnimalId(id));
        }
        for _ in 0..500 {
            f.step(16.0);
            for s in f.wanderers() {
                assert!(s.position.x >= 48.0 && s.position.x <= 1200.0 - 96.0 - 48.0 + 0.001);
                assert!(s.position.y >= 48.0 && s.position.y <= 800.0 - 96.0 - 48.0 + 0.001);
                assert!(s.velocity.length() <= 0.4 + 0.001);
            }
        }
    }

    #[test]
    fn overlapping_sprites_push_apart() {
        let mut f = WanderField::new(2000.0, 2000.0, WorldConfig::default(), 1);
        f.wanderers = vec![
            Wanderer { animal: AnimalId(1), position: Point::new(1000.0, 1000.0), velocity: Point::default() },
            Wanderer { animal: AnimalId(2), position: Point::new(1010.0, 1000.0), velocity: Point::default() },
        ];
        let before = f.wanderers[0].position.distance(f.wanderers[1].position);
        f.step(16.0);
        let after = f.wanderers[0].position.distance(f.wanderers[1].position);
        assert!(after > before);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let mut f = field();
            f.spawn(AnimalId(1));
            f.spawn(AnimalId(2));
            for _ in 0..50 {
                f.step(16.0);
            }
            f.wanderers().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn sync_tracks_unlocked_animals() {
        let mut reg = Registry::new(vec![
            animal(1, true, 0, Vitals::FULL),
            animal(2, false, 4, Vitals::FULL),
        ])
        .expect("registry");
        let mut f = field();
        f.sync(&reg);
        assert_eq!(f.wanderers().len(), 1);

        reg.set_unlocked(AnimalId(2), true).expect("unlock");
        f.sync(&reg);
        let ids: Vec<u32> = f.wanderers().iter().map(|w| w.animal.0).collect();
        assert_eq!(ids, vec![1, 2]);

        reg.set_unlocked(AnimalId(1), false).expect("lock");
        f.sync(&reg);
        assert_eq!(f.wanderers().len(), 1);
    }
}
