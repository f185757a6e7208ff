use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::entity::Mover;
use crate::powerup::Modifiers;
use crate::world::World;

/// Discrete heading used while wandering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..8) {
            0 => Self::North,
            1 => Self::NorthEast,
            2 => Self::East,
            3 => Self::SouthEast,
            4 => Self::South,
            5 => Self::SouthWest,
            6 => Self::West,
            _ => Self::NorthWest,
        }
    }

    pub fn delta(self) -> Vec2 {
        match self {
            Self::North => vec2(0.0, -1.0),
            Self::NorthEast => vec2(1.0, -1.0),
            Self::East => vec2(1.0, 0.0),
            Self::SouthEast => vec2(1.0, 1.0),
            Self::South => vec2(0.0, 1.0),
            Self::SouthWest => vec2(-1.0, 1.0),
            Self::West => vec2(-1.0, 0.0),
            Self::NorthWest => vec2(-1.0, -1.0),
        }
    }
}

/// A roaming mine. Wanders along a compass heading until the player comes
/// within chase range, then seeks (or flees, under the repel modifier) the
/// player directly. One-shot: destroyed on contact, revived by round reset.
pub struct Hazard {
    pub mover: Mover,
    pub heading: Compass,
    pub poison_tipped: bool,
}

impl Hazard {
    pub fn new(pos: Vec2, rng: &mut impl Rng) -> Self {
        let half = vec2(config::HAZARD_HALF_EXTENT.0, config::HAZARD_HALF_EXTENT.1);
        Self {
            mover: Mover::new(pos, half, config::HAZARD_ACCELERATION),
            heading: Compass::random(rng),
            poison_tipped: false,
        }
    }

    pub fn chasing(&self, player_pos: Vec2, modifiers: &Modifiers) -> bool {
        self.mover.pos.distance(player_pos) < config::CHASE_RADIUS && !modifiers.no_chase
    }

    pub fn update(
        &mut self,
        player_pos: Vec2,
        modifiers: &Modifiers,
        world: &World,
        rng: &mut impl Rng,
    ) {
        if self.chasing(player_pos, modifiers) {
            self.chase(player_pos, modifiers, world);
        } else {
            self.wander(world, rng, modifiers.slow_hazards);
        }
    }

    /// Seek the player: velocity grows with distance, damped by half each
    /// tick. Under repel the same vector is applied in reverse and the facing
    /// angle negated, so the hazard flees along its would-be pursuit path.
    fn chase(&mut self, player_pos: Vec2, modifiers: &Modifiers, world: &World) {
        self.mover.wanted_pos = player_pos;
        let d = player_pos - self.mover.pos;
        let slow = if modifiers.slow_hazards {
            config::SLOW_HAZARD_FACTOR
        } else {
            1.0
        };
        self.mover.velocity += d * self.mover.acceleration * slow;
        self.mover.velocity *= config::SEEK_DAMPING;

        if modifiers.repel {
            self.mover.pos -= self.mover.velocity;
            self.mover.rotation = -d.y.atan2(d.x);
        } else {
            self.mover.pos += self.mover.velocity;
            self.mover.rotation = d.y.atan2(d.x);
        }
        self.mover.pos = world.clamp(self.mover.pos, self.mover.half_extent);
    }

    /// Fixed-speed drift along the current heading; hitting an edge relevant
    /// to that heading re-rolls the heading.
    fn wander(&mut self, world: &World, rng: &mut impl Rng, slow: bool) {
        let mut speed = config::WANDER_SPEED;
        if slow {
            speed *= config::SLOW_HAZARD_FACTOR;
        }
        self.mover.pos += self.heading.delta() * speed;

        let half = self.mover.half_extent;
        let hit_top = self.mover.pos.y - half.y <= 0.0;
        let hit_bottom = self.mover.pos.y + half.y >= world.height;
        let hit_left = self.mover.pos.x - half.x <= 0.0;
        let hit_right = self.mover.pos.x + half.x >= world.width;

        let blocked = match self.heading {
            Compass::North => hit_top,
            Compass::NorthEast => hit_top || hit_right,
            Compass::East => hit_right,
            Compass::SouthEast => hit_bottom || hit_right,
            Compass::South => hit_bottom,
            Compass::SouthWest => hit_bottom || hit_left,
            Compass::West => hit_left,
            Compass::NorthWest => hit_top || hit_left,
        };
        if blocked {
            self.heading = Compass::random(rng);
        }
        self.mover.pos = world.clamp(self.mover.pos, half);
    }

    /// Presentation tint: poison-tipped hazards read as yellow-green.
    pub fn tint(&self) -> Color {
        if self.poison_tipped {
            Color::new(0.60, 0.80, 0.20, 1.0)
        } else {
            Color::new(0.50, 0.50, 0.50, 1.0)
        }
    }
}
