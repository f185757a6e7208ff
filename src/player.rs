use macroquad::prelude::*;
use ::rand::Rng;
use std::collections::HashSet;

use crate::config;
use crate::entity::Mover;
use crate::world::World;

/// The player-controlled organism: a kinematic seeker layered with health,
/// poison, and an invulnerability window.
pub struct Player {
    pub mover: Mover,
    health: i32,
    pub invul_ticks: u32,
    pub poisoned: bool,
    poison_tick: u32,
    /// Hazard slots that already damaged us this contact window, so one
    /// collision re-evaluated across ticks only counts once.
    hurt_by: HashSet<usize>,
}

impl Player {
    pub fn new(world: &World) -> Self {
        let half = vec2(config::PLAYER_HALF_EXTENT.0, config::PLAYER_HALF_EXTENT.1);
        let mut player = Self {
            mover: Mover::new(world.center(), half, config::PLAYER_ACCELERATION),
            health: config::MAX_HEALTH,
            invul_ticks: 0,
            poisoned: false,
            poison_tick: 0,
            hurt_by: HashSet::new(),
        };
        player.reset(world);
        player
    }

    /// Health is clamped on read; internal bookkeeping may briefly dip below zero.
    pub fn health(&self) -> i32 {
        self.health.clamp(0, config::MAX_HEALTH)
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health() + amount).min(config::MAX_HEALTH);
    }

    pub fn invulnerable(&self) -> bool {
        self.invul_ticks < config::INVUL_TICKS
    }

    /// Restore round-start defaults: full health, centered, fresh
    /// invulnerability window, damage-source record cleared.
    pub fn reset(&mut self, world: &World) {
        self.health = config::MAX_HEALTH;
        self.poisoned = false;
        self.poison_tick = 0;
        self.invul_ticks = 0;
        self.hurt_by.clear();
        self.mover.pos = world.center();
        self.mover.wanted_pos = self.mover.pos;
        self.mover.velocity = Vec2::ZERO;
        self.mover.rotation = 0.0;
        self.mover.moving = false;
        self.mover.active = true;
    }

    /// One tick of player state. Poison accumulates regardless of motion;
    /// while invulnerable only the window ticker advances and the kinematic
    /// update is skipped. Returns poison damage dealt this tick, if any.
    pub fn update(&mut self, world: &World, rng: &mut impl Rng) -> Option<i32> {
        let mut poison_damage = None;
        if self.poisoned {
            self.poison_tick += 1;
            if self.poison_tick >= config::POISON_CADENCE {
                let dmg = rng.gen_range(config::POISON_DAMAGE_MIN..config::POISON_DAMAGE_MAX);
                self.health -= dmg;
                self.poison_tick = 0;
                poison_damage = Some(dmg);
            }
        }

        if self.invulnerable() {
            self.invul_ticks += 1;
        } else {
            self.mover.advance(world);
        }
        poison_damage
    }

    /// Apply contact damage from a hazard slot. A source that already hurt us
    /// this contact window is a silent no-op. Returns whether damage landed.
    pub fn apply_damage(&mut self, amount: i32, source: usize) -> bool {
        if self.hurt_by.contains(&source) {
            return false;
        }
        self.health -= amount;
        self.hurt_by.insert(source);
        true
    }

    /// Collision box, deliberately tighter than the sprite extent.
    pub fn rect(&self) -> Rect {
        Rect::new(self.mover.pos.x - 20.0, self.mover.pos.y - 20.0, 30.0, 30.0)
    }

    /// Presentation tint: poison overrides the base color, invulnerability
    /// adds translucency on top.
    pub fn tint(&self) -> Color {
        let base = if self.poisoned {
            Color::new(0.68, 1.0, 0.18, 1.0)
        } else {
            WHITE
        };
        if self.invulnerable() {
            Color::new(base.r, base.g, base.b, 175.0 / 255.0)
        } else {
            base
        }
    }
}
