use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::entity::Mover;
use crate::powerup::Modifiers;
use crate::world::World;

/// A flock member. The lone `cure` flag marks the member whose consumption
/// lifts the player's poison.
pub struct Prey {
    pub mover: Mover,
    pub cure: bool,
}

impl Prey {
    pub fn new(pos: Vec2) -> Self {
        let half = vec2(config::PREY_HALF_EXTENT.0, config::PREY_HALF_EXTENT.1);
        Self {
            mover: Mover::new(pos, half, config::PREY_ACCELERATION),
            cure: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    /// Presentation tint: the cure member reads as spring green.
    pub fn tint(&self) -> Color {
        if self.cure {
            Color::new(0.0, 1.0, 0.5, 1.0)
        } else {
            WHITE
        }
    }
}

/// Peer state frozen at the start of the tick, so every member steers against
/// the same snapshot rather than a partially-updated flock.
#[derive(Clone, Copy)]
struct Peer {
    pos: Vec2,
    velocity: Vec2,
    active: bool,
}

/// Objects the flock steers clear of: hazards plus the player.
#[derive(Clone, Copy)]
pub struct AvoidPoint {
    pub pos: Vec2,
    pub active: bool,
}

/// Advance every active flock member one tick: boid rules against the peer
/// snapshot, avoidance of hazards/player, velocity clamp, position update
/// with bounded jitter.
pub fn update_flock(
    prey: &mut [Prey],
    avoids: &[AvoidPoint],
    modifiers: &Modifiers,
    world: &World,
    rng: &mut impl Rng,
) {
    let peers: Vec<Peer> = prey
        .iter()
        .map(|p| Peer {
            pos: p.mover.pos,
            velocity: p.mover.velocity,
            active: p.mover.active,
        })
        .collect();
    let active_count = peers.iter().filter(|p| p.active).count();

    let terminal = if modifiers.slow_prey {
        config::PREY_SLOW_TERMINAL_VELOCITY
    } else {
        config::PREY_TERMINAL_VELOCITY
    };

    for (idx, p) in prey.iter_mut().enumerate() {
        if !p.mover.active {
            continue;
        }
        p.mover.terminal_velocity = Vec2::splat(terminal);
        steer_member(&mut p.mover, idx, &peers, active_count, avoids, world, rng);
    }
}

fn steer_member(
    m: &mut Mover,
    idx: usize,
    peers: &[Peer],
    active_count: usize,
    avoids: &[AvoidPoint],
    world: &World,
    rng: &mut impl Rng,
) {
    reflect_at_edges(m, world, rng);

    m.velocity += cohesion(m.pos, idx, peers, active_count)
        + separation(m.pos, idx, peers, active_count)
        + alignment(m.velocity, idx, peers, active_count);

    avoid_objects(m, active_count, avoids);

    m.velocity = vec2(
        m.velocity.x.clamp(-m.terminal_velocity.x, m.terminal_velocity.x),
        m.velocity.y.clamp(-m.terminal_velocity.y, m.terminal_velocity.y),
    );

    // Face the direction of travel.
    m.rotation = m.velocity.y.atan2(m.velocity.x);

    m.pos += m.velocity * m.acceleration;
    m.pos = vec2(
        (m.pos.x + m.velocity.x * (m.acceleration + 0.1)).clamp(0.0, world.width) + jitter(rng),
        (m.pos.y + m.velocity.y * (m.acceleration + 0.1)).clamp(0.0, world.height) + jitter(rng),
    );
    // Plain kinematic move on top of the steering adjustments.
    m.pos += m.velocity;
}

/// On reaching either field edge the velocity on that axis is reflected,
/// perturbed by a shared random kick, and halved.
fn reflect_at_edges(m: &mut Mover, world: &World, rng: &mut impl Rng) {
    let next = m.pos + m.velocity;
    if next.x <= 0.0 || next.x > world.width {
        let kick = rng.gen_range(-config::EDGE_KICK..config::EDGE_KICK) as f32;
        m.velocity = (vec2(-m.velocity.x, m.velocity.y) + Vec2::splat(kick)) * 0.5;
    }
    let next = m.pos + m.velocity;
    if next.y <= 0.0 || next.y > world.height {
        let kick = rng.gen_range(-config::EDGE_KICK..config::EDGE_KICK) as f32;
        m.velocity = (vec2(m.velocity.x, -m.velocity.y) + Vec2::splat(kick)) * 0.5;
    }
}

/// Head toward the average position of the other active members. The
/// influence shrinks as the flock grows, which avoids a "panic" correction
/// when many members are alive. Zero for a lone member.
fn cohesion(pos: Vec2, idx: usize, peers: &[Peer], active_count: usize) -> Vec2 {
    if active_count < 2 {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    for (i, peer) in peers.iter().enumerate() {
        if i != idx && peer.active {
            sum += peer.pos;
        }
    }
    let avg = sum / (active_count - 1) as f32;
    let damping = 1000.0 - (100.0 * active_count as f32).min(650.0);
    (avg - pos) / damping
}

/// Keep clear of members closer than a flock-size-dependent radius.
fn separation(pos: Vec2, idx: usize, peers: &[Peer], active_count: usize) -> Vec2 {
    let radius = (active_count as f32 * 0.45).max(config::SEPARATION_MIN_RADIUS);
    let mut v = Vec2::ZERO;
    for (i, peer) in peers.iter().enumerate() {
        if i != idx && peer.active && peer.pos.distance(pos) < radius {
            v -= peer.pos - pos;
        }
    }
    v / 100.0
}

/// Drift toward the average velocity of the other active members. Zero for a
/// lone member.
fn alignment(velocity: Vec2, idx: usize, peers: &[Peer], active_count: usize) -> Vec2 {
    if active_count < 2 {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    for (i, peer) in peers.iter().enumerate() {
        if i != idx && peer.active {
            sum += peer.velocity;
        }
    }
    let avg = sum / (active_count - 1) as f32;
    (avg - velocity) / 6.0
}

/// Step directly away from any nearby avoid object. The push grows with the
/// flock size, clamped to a sane band.
fn avoid_objects(m: &mut Mover, active_count: usize, avoids: &[AvoidPoint]) {
    let push = ((active_count / 5) as f32).clamp(2.0, 8.0);
    for a in avoids {
        if a.active && m.pos.distance(a.pos) < config::AVOID_RADIUS {
            let away = (m.pos - a.pos).normalize_or_zero();
            m.pos += away * push;
        }
    }
}

/// Bounded non-zero jitter in (-1, 1).
fn jitter(rng: &mut impl Rng) -> f32 {
    loop {
        let r: f32 = rng.gen_range(-1.0..1.0);
        if r != 0.0 {
            return r;
        }
    }
}
