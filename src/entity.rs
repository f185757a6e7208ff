use macroquad::prelude::*;

use crate::config;
use crate::world::World;

/// Common kinematic state shared by every movable object: the player seeks its
/// wanted position directly, hazards reuse the same fields while chasing, and
/// prey drive the fields from the flocking rules instead.
#[derive(Clone, Debug)]
pub struct Mover {
    pub pos: Vec2,
    /// Seek target. `Vec2::ZERO` is the "no target" sentinel.
    pub wanted_pos: Vec2,
    pub velocity: Vec2,
    pub terminal_velocity: Vec2,
    pub acceleration: f32,
    pub rotation: f32,
    pub half_extent: Vec2,
    pub moving: bool,
    pub active: bool,
}

impl Mover {
    pub fn new(pos: Vec2, half_extent: Vec2, acceleration: f32) -> Self {
        Self {
            pos,
            wanted_pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            terminal_velocity: Vec2::splat(config::DEFAULT_TERMINAL_VELOCITY),
            acceleration,
            rotation: 0.0,
            half_extent,
            moving: false,
            active: true,
        }
    }

    /// Whether the object has reached its wanted position. Positions are
    /// rounded before comparing so the asymptotic seek actually terminates.
    pub fn at_destination(&self) -> bool {
        self.wanted_pos == Vec2::ZERO || self.pos.round() == self.wanted_pos
    }

    /// Seek toward the wanted position for one tick. Velocity grows with the
    /// distance left and is damped by half each tick to prevent rubber-banding.
    pub fn advance(&mut self, world: &World) {
        if !self.active {
            return;
        }

        if self.at_destination() {
            self.velocity = Vec2::ZERO;
            self.moving = false;
        } else {
            let diff = self.wanted_pos - self.pos;
            self.rotation = diff.y.atan2(diff.x);
            self.velocity += diff * self.acceleration;
            self.velocity *= config::SEEK_DAMPING;
            self.moving = true;
        }

        self.pos += self.velocity;
        self.pos = world.clamp(self.pos, self.half_extent);
    }

    /// Deactivate only. Objects are pooled and revived by round reset.
    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - self.half_extent.x,
            self.pos.y - self.half_extent.y,
            self.half_extent.x * 2.0,
            self.half_extent.y * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        World::new(800.0, 600.0)
    }

    fn test_mover(pos: Vec2) -> Mover {
        Mover::new(pos, vec2(10.0, 10.0), 0.075)
    }

    #[test]
    fn inactive_mover_does_not_advance() {
        let world = test_world();
        let mut m = test_mover(vec2(100.0, 100.0));
        m.wanted_pos = vec2(300.0, 300.0);
        m.active = false;

        m.advance(&world);
        assert_eq!(m.pos, vec2(100.0, 100.0));
        assert!(!m.moving);
    }

    #[test]
    fn zero_wanted_pos_means_no_seek() {
        let world = test_world();
        let mut m = test_mover(vec2(100.0, 100.0));
        m.velocity = vec2(5.0, -3.0);

        m.advance(&world);
        assert_eq!(m.velocity, Vec2::ZERO);
        assert!(!m.moving);
        assert_eq!(m.pos, vec2(100.0, 100.0));
    }

    #[test]
    fn seeks_toward_wanted_position_and_stops() {
        let world = test_world();
        let mut m = test_mover(vec2(100.0, 100.0));
        m.wanted_pos = vec2(200.0, 150.0);

        m.advance(&world);
        assert!(m.moving);
        assert!(m.pos.x > 100.0 && m.pos.y > 100.0);

        for _ in 0..2000 {
            m.advance(&world);
        }
        assert!(m.at_destination());
        assert_eq!(m.velocity, Vec2::ZERO);
        assert!(!m.moving);
    }

    #[test]
    fn rotation_faces_the_target() {
        let world = test_world();
        let mut m = test_mover(vec2(100.0, 100.0));
        m.wanted_pos = vec2(200.0, 100.0); // due east

        m.advance(&world);
        assert!(m.rotation.abs() < 1e-6);
    }

    #[test]
    fn position_clamped_to_field_minus_half_extent() {
        let world = test_world();
        let mut m = test_mover(vec2(20.0, 20.0));
        m.wanted_pos = vec2(-500.0, -500.0);

        for _ in 0..200 {
            m.advance(&world);
        }
        assert_eq!(m.pos, vec2(10.0, 10.0));
    }

    #[test]
    fn destroy_deactivates_without_clearing_state() {
        let mut m = test_mover(vec2(50.0, 60.0));
        m.destroy();
        assert!(!m.active);
        assert_eq!(m.pos, vec2(50.0, 60.0));
    }
}
