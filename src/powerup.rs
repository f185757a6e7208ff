use macroquad::prelude::*;
use ::rand::Rng;

use crate::alert::Alert;
use crate::config;
use crate::player::Player;
use crate::world::World;

/// The seven collectible variants: three instant heals and four timed
/// process-wide modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Heal5,
    Heal10,
    Heal25,
    NoChase,
    Repel,
    SlowPrey,
    SlowHazards,
}

impl PowerUpKind {
    fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..7) {
            0 => Self::Heal5,
            1 => Self::Heal10,
            2 => Self::Heal25,
            3 => Self::NoChase,
            4 => Self::Repel,
            5 => Self::SlowPrey,
            _ => Self::SlowHazards,
        }
    }

    pub fn is_heal(self) -> bool {
        matches!(self, Self::Heal5 | Self::Heal10 | Self::Heal25)
    }

    /// Short label drawn on the falling collectible.
    pub fn label(self) -> &'static str {
        match self {
            Self::Heal5 => "H5",
            Self::Heal10 => "H10",
            Self::Heal25 => "H25",
            Self::NoChase => "NC",
            Self::Repel => "RP",
            Self::SlowPrey => "SP",
            Self::SlowHazards => "SH",
        }
    }

    /// Color coding for the falling collectible. Heals share one color.
    pub fn color(self) -> Color {
        match self {
            Self::Heal5 | Self::Heal10 | Self::Heal25 => Color::new(0.56, 0.93, 0.56, 1.0),
            Self::NoChase => Color::new(0.53, 0.81, 0.98, 1.0),
            Self::Repel => Color::new(1.0, 0.71, 0.76, 1.0),
            Self::SlowPrey => Color::new(1.0, 1.0, 0.0, 1.0),
            Self::SlowHazards => Color::new(0.98, 0.50, 0.45, 1.0),
        }
    }
}

/// Process-wide modifier flags toggled by power-ups, read by every prey and
/// hazard update. Owned by the game state and passed in explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub no_chase: bool,
    pub repel: bool,
    pub slow_prey: bool,
    pub slow_hazards: bool,
}

/// The single power-up slot. One object exists for the whole game; spawning
/// re-rolls its kind and drops it from the top of the field.
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub active: bool,
    effect_ends: Option<u64>,
}

impl PowerUp {
    pub fn new() -> Self {
        Self {
            kind: PowerUpKind::Heal5,
            pos: Vec2::ZERO,
            active: false,
            effect_ends: None,
        }
    }

    /// Re-roll the kind and drop the collectible at a random X along the top.
    pub fn spawn(&mut self, world: &World, rng: &mut impl Rng) {
        self.kind = PowerUpKind::random(rng);
        self.pos = vec2(
            rng.gen_range(config::POWERUP_SPAWN_INSET..world.width - config::POWERUP_SPAWN_INSET),
            15.0,
        );
        self.active = true;
    }

    /// True while a timed effect is in flight. Always false for heal kinds.
    pub fn running(&self, tick: u64) -> bool {
        !self.kind.is_heal()
            && !self.active
            && self.effect_ends.map_or(false, |end| tick < end)
    }

    pub fn ticks_remaining(&self, tick: u64) -> u64 {
        self.effect_ends.map_or(0, |end| end.saturating_sub(tick))
    }

    /// While falling: descend at constant speed, deactivate on leaving the
    /// field uncollected. While idle: expire the timed effect when due.
    pub fn update(&mut self, modifiers: &mut Modifiers, world: &World, tick: u64) {
        if self.active {
            let off_field = self.pos.x + 20.0 < 0.0
                || self.pos.y + 60.0 < 0.0
                || self.pos.x - 20.0 > world.width
                || self.pos.y - 60.0 > world.height;
            if off_field {
                self.active = false;
            } else {
                self.pos.y += config::POWERUP_FALL_SPEED;
            }
        } else if let Some(end) = self.effect_ends {
            if tick >= end {
                self.end_effect(modifiers);
            }
        }
    }

    /// Apply the effect on pickup: heals are instant, modifier kinds arm
    /// their flag with a scheduled expiry. No-op while inactive. Returns
    /// whether the effect was applied.
    pub fn apply_effect(
        &mut self,
        player: &mut Player,
        modifiers: &mut Modifiers,
        alert: &mut Alert,
        tick: u64,
    ) -> bool {
        if !self.active {
            return false;
        }
        match self.kind {
            PowerUpKind::Heal5 => {
                player.heal(5);
                alert.show("Health +5", Color::new(0.60, 0.98, 0.60, 1.0), tick);
            }
            PowerUpKind::Heal10 => {
                player.heal(10);
                alert.show("Health +10", Color::new(0.60, 0.98, 0.60, 1.0), tick);
            }
            PowerUpKind::Heal25 => {
                player.heal(25);
                alert.show("Health +25", Color::new(0.60, 0.98, 0.60, 1.0), tick);
            }
            PowerUpKind::NoChase => {
                modifiers.no_chase = true;
                alert.show("No-chase activated", Color::new(0.25, 0.41, 0.88, 1.0), tick);
            }
            PowerUpKind::Repel => {
                modifiers.repel = true;
                alert.show("Repel activated", Color::new(1.0, 0.71, 0.76, 1.0), tick);
            }
            PowerUpKind::SlowPrey => {
                modifiers.slow_prey = true;
                alert.show("Slow prey activated", Color::new(1.0, 1.0, 0.0, 1.0), tick);
            }
            PowerUpKind::SlowHazards => {
                modifiers.slow_hazards = true;
                alert.show("Slow hazards activated", Color::new(0.98, 0.50, 0.45, 1.0), tick);
            }
        }
        self.active = false;
        self.effect_ends = Some(tick + config::POWERUP_EFFECT_TICKS);
        true
    }

    /// Clear exactly the modifier flag this kind owns. Heals have nothing to
    /// clear. Called on expiry and unconditionally on round reset so no timed
    /// effect survives a reset.
    pub fn end_effect(&mut self, modifiers: &mut Modifiers) {
        match self.kind {
            PowerUpKind::NoChase => modifiers.no_chase = false,
            PowerUpKind::Repel => modifiers.repel = false,
            PowerUpKind::SlowPrey => modifiers.slow_prey = false,
            PowerUpKind::SlowHazards => modifiers.slow_hazards = false,
            PowerUpKind::Heal5 | PowerUpKind::Heal10 | PowerUpKind::Heal25 => {}
        }
        self.effect_ends = None;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x - 30.0, self.pos.y - 10.0, 60.0, 20.0)
    }
}
