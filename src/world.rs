use macroquad::prelude::*;
use ::rand::Rng;

/// The bounded play field. Positions are always clamped, never wrapped.
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    /// Clamp a position so an object with the given half extent stays on the field.
    pub fn clamp(&self, pos: Vec2, half_extent: Vec2) -> Vec2 {
        vec2(
            pos.x.clamp(half_extent.x, self.width - half_extent.x),
            pos.y.clamp(half_extent.y, self.height - half_extent.y),
        )
    }

    pub fn random_pos(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height))
    }

    /// Random position at least `margin` away from every field edge.
    pub fn random_pos_in(&self, rng: &mut impl Rng, margin: f32) -> Vec2 {
        vec2(
            rng.gen_range(margin..self.width - margin),
            rng.gen_range(margin..self.height - margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn clamp_keeps_half_extent_inside_bounds() {
        let world = World::new(800.0, 600.0);
        let half = vec2(10.0, 20.0);

        let p = world.clamp(vec2(-50.0, 700.0), half);
        assert_eq!(p, vec2(10.0, 580.0));

        let q = world.clamp(vec2(400.0, 300.0), half);
        assert_eq!(q, vec2(400.0, 300.0));
    }

    #[test]
    fn random_pos_in_respects_margin() {
        let world = World::new(800.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let p = world.random_pos_in(&mut rng, 50.0);
            assert!(p.x >= 50.0 && p.x <= 750.0);
            assert!(p.y >= 50.0 && p.y <= 550.0);
        }
    }
}
