// All tunable simulation constants in one place.

// Play field
pub const FIELD_WIDTH: f32 = 1280.0;
pub const FIELD_HEIGHT: f32 = 800.0;

// Simulation
pub const FIXED_DT: f32 = 1.0 / 30.0;

// Kinematics
pub const SEEK_DAMPING: f32 = 0.5;
pub const DEFAULT_TERMINAL_VELOCITY: f32 = 20.0;

// Player
pub const PLAYER_ACCELERATION: f32 = 0.075;
pub const PLAYER_HALF_EXTENT: (f32, f32) = (40.0, 27.5);
pub const MAX_HEALTH: i32 = 100;
pub const INVUL_TICKS: u32 = 180; // 6 seconds
pub const POISON_CADENCE: u32 = 250;
pub const POISON_DAMAGE_MIN: i32 = 2;
pub const POISON_DAMAGE_MAX: i32 = 8;
pub const INPUT_STEP: f32 = 18.0;
pub const INPUT_OVERSCAN: f32 = 30.0;

// Prey / flocking
pub const PREY_ACCELERATION: f32 = 0.025;
pub const PREY_HALF_EXTENT: (f32, f32) = (16.0, 5.0);
pub const PREY_TERMINAL_VELOCITY: f32 = 15.0;
pub const PREY_SLOW_TERMINAL_VELOCITY: f32 = 3.0;
pub const AVOID_RADIUS: f32 = 60.0;
pub const SEPARATION_MIN_RADIUS: f32 = 15.0;
pub const EDGE_KICK: i32 = 15;
pub const SPAWN_MARGIN: f32 = 50.0;

// Hazards
pub const HAZARD_ACCELERATION: f32 = 0.015;
pub const HAZARD_HALF_EXTENT: (f32, f32) = (30.0, 30.0);
pub const CHASE_RADIUS: f32 = 200.0;
pub const WANDER_SPEED: f32 = 2.5;
pub const SLOW_HAZARD_FACTOR: f32 = 0.25;
pub const POISON_TIP_CHANCE: u32 = 5; // 1-in-5 per hazard per round
pub const CONTACT_RADIUS: f32 = 40.0;
pub const CONTACT_DAMAGE_MIN: i32 = 10;
pub const CONTACT_DAMAGE_MAX: i32 = 15;

// Power-ups
pub const POWERUP_SPAWN_TICKS: u64 = 900; // one every 30 seconds
pub const POWERUP_EFFECT_TICKS: u64 = 600; // timed effects last 20 seconds
pub const POWERUP_FALL_SPEED: f32 = 1.0;
pub const POWERUP_SPAWN_INSET: f32 = 20.0;

// Levels
pub const MAX_LEVEL: usize = 5;
pub const PREY_PER_LEVEL: [usize; MAX_LEVEL] = [30, 40, 50, 65, 100];
pub const HAZARDS_PER_LEVEL: [usize; MAX_LEVEL] = [10, 15, 18, 23, 30];

// Alerts / transient effects
pub const ALERT_HOLD_TICKS: u64 = 30;
pub const ALERT_FADE_STEP: f32 = 5.0 / 255.0;
pub const EFFECT_FRAME_TICKS: u32 = 3;
pub const EFFECT_FRAMES: u32 = 7;
