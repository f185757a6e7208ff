use macroquad::prelude::*;

use crate::config;

/// One frame-animated splat: red blood at a consumption site, or a
/// green-yellow cloud where the player was poisoned.
#[derive(Clone, Copy)]
pub struct Splat {
    pub pos: Vec2,
    pub color: Color,
    pub frame: u32,
    frame_tick: u32,
}

/// Transient visual effects. Cleared wholesale on round reset.
pub struct EffectSystem {
    splats: Vec<Splat>,
}

impl EffectSystem {
    pub fn new() -> Self {
        Self { splats: Vec::new() }
    }

    pub fn emit_blood(&mut self, pos: Vec2) {
        self.emit(pos, Color::new(1.0, 0.0, 0.0, 175.0 / 255.0));
    }

    pub fn emit_poison_cloud(&mut self, pos: Vec2) {
        self.emit(pos, Color::new(0.68, 1.0, 0.18, 175.0 / 255.0));
    }

    fn emit(&mut self, pos: Vec2, color: Color) {
        self.splats.push(Splat {
            pos,
            color,
            frame: 0,
            frame_tick: 0,
        });
    }

    /// Advance every splat one tick; expired splats are dropped.
    pub fn update(&mut self) {
        for s in &mut self.splats {
            s.frame_tick += 1;
            if s.frame_tick >= config::EFFECT_FRAME_TICKS {
                s.frame_tick = 0;
                s.frame += 1;
            }
        }
        self.splats.retain(|s| s.frame < config::EFFECT_FRAMES);
    }

    pub fn clear(&mut self) {
        self.splats.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Splat> {
        self.splats.iter()
    }

    pub fn count(&self) -> usize {
        self.splats.len()
    }
}
