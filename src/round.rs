use macroquad::prelude::*;
use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::alert::Alert;
use crate::config;
use crate::effects::EffectSystem;
use crate::events::GameEvent;
use crate::flock::{self, AvoidPoint, Prey};
use crate::hazard::Hazard;
use crate::player::Player;
use crate::powerup::{Modifiers, PowerUp};
use crate::world::World;

/// Terminal round outcomes are normal state transitions, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    GameOver,
    GameWon,
}

/// The whole simulation: entity pools, the power-up slot, modifier flags and
/// the per-tick collision/resolution pipeline. Pools are sized for the
/// largest level and reused across rounds; a round transition deactivates and
/// re-seeds, it never destroys.
pub struct Game {
    pub world: World,
    pub player: Player,
    pub prey: Vec<Prey>,
    pub hazards: Vec<Hazard>,
    pub power_up: PowerUp,
    pub modifiers: Modifiers,
    pub effects: EffectSystem,
    pub alert: Alert,
    pub events: Vec<GameEvent>,
    pub rng: ChaCha8Rng,
    pub tick_count: u64,
    pub level: u32,
    pub god_mode: bool,
    pub pointer_control: bool,
    pub outcome: Outcome,
    prey_per_level: Vec<usize>,
    hazards_per_level: Vec<usize>,
    power_up_ticker: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_levels(
            seed,
            config::PREY_PER_LEVEL.to_vec(),
            config::HAZARDS_PER_LEVEL.to_vec(),
        )
    }

    /// Build a game with custom per-level tables (the last level is the final
    /// one). Pools are sized for the largest configured counts.
    pub fn with_levels(seed: u64, prey_per_level: Vec<usize>, hazards_per_level: Vec<usize>) -> Self {
        assert_eq!(prey_per_level.len(), hazards_per_level.len());
        assert!(!prey_per_level.is_empty());

        let world = World::new(config::FIELD_WIDTH, config::FIELD_HEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let prey_pool = prey_per_level.iter().copied().max().unwrap_or(0);
        let hazard_pool = hazards_per_level.iter().copied().max().unwrap_or(0);

        let prey = (0..prey_pool)
            .map(|_| Prey::new(world.random_pos(&mut rng)))
            .collect();
        let hazards = (0..hazard_pool)
            .map(|_| Hazard::new(world.random_pos(&mut rng), &mut rng))
            .collect();
        let player = Player::new(&world);

        let mut game = Self {
            world,
            player,
            prey,
            hazards,
            power_up: PowerUp::new(),
            modifiers: Modifiers::default(),
            effects: EffectSystem::new(),
            alert: Alert::new(),
            events: Vec::new(),
            rng,
            tick_count: 0,
            level: 1,
            god_mode: false,
            pointer_control: false,
            outcome: Outcome::Playing,
            prey_per_level,
            hazards_per_level,
            power_up_ticker: 0,
        };
        game.reset_round();
        game
    }

    pub fn max_level(&self) -> u32 {
        self.prey_per_level.len() as u32
    }

    pub fn active_prey_count(&self) -> usize {
        self.prey.iter().filter(|p| p.mover.active).count()
    }

    pub fn active_hazard_count(&self) -> usize {
        self.hazards.iter().filter(|h| h.mover.active).count()
    }

    /// One fixed simulation step.
    pub fn tick(&mut self) {
        if self.outcome != Outcome::Playing {
            return;
        }
        self.tick_count += 1;
        self.alert.update(self.tick_count);

        // Player state first: poison cadence, invulnerability ticker, seek.
        if let Some(dmg) = self.player.update(&self.world, &mut self.rng) {
            self.events.push(GameEvent::PlayerDamaged(dmg));
        }

        // Death costs a level; at the floor level it ends the game.
        if self.player.health() <= 0 {
            if self.level <= 1 {
                self.outcome = Outcome::GameOver;
                self.events.push(GameEvent::GameOver);
            } else {
                self.level -= 1;
                self.reset_round();
                self.events.push(GameEvent::LevelRegressed(self.level));
            }
            return;
        }

        // The world holds still during the invulnerability window.
        if self.player.invulnerable() {
            return;
        }

        // Power-up cadence: never spawn over a live or still-running slot.
        self.power_up_ticker += 1;
        if self.power_up_ticker >= config::POWERUP_SPAWN_TICKS
            && !self.power_up.active
            && !self.power_up.running(self.tick_count)
        {
            self.power_up.spawn(&self.world, &mut self.rng);
            self.power_up_ticker = 0;
            self.events.push(GameEvent::PowerUpSpawned(self.power_up.kind));
        }
        self.power_up
            .update(&mut self.modifiers, &self.world, self.tick_count);

        // Flock and hazards read the modifier flags set above.
        let mut avoids: Vec<AvoidPoint> = self
            .hazards
            .iter()
            .map(|h| AvoidPoint {
                pos: h.mover.pos,
                active: h.mover.active,
            })
            .collect();
        avoids.push(AvoidPoint {
            pos: self.player.mover.pos,
            active: self.player.mover.active,
        });
        flock::update_flock(
            &mut self.prey,
            &avoids,
            &self.modifiers,
            &self.world,
            &mut self.rng,
        );

        let player_pos = self.player.mover.pos;
        for hazard in &mut self.hazards {
            if hazard.mover.active {
                hazard.update(player_pos, &self.modifiers, &self.world, &mut self.rng);
            }
        }

        self.effects.update();

        self.check_collisions();
    }

    /// Detect-then-resolve: collision candidates are collected against a
    /// snapshot of this tick's positions before any deactivation is applied,
    /// so resolution order cannot double-count.
    fn check_collisions(&mut self) {
        let player_rect = self.player.rect();
        let player_pos = self.player.mover.pos;

        // Power-up pickup.
        if self.power_up.active && self.power_up.rect().overlaps(&player_rect) {
            let kind = self.power_up.kind;
            if self.power_up.apply_effect(
                &mut self.player,
                &mut self.modifiers,
                &mut self.alert,
                self.tick_count,
            ) {
                self.events.push(GameEvent::PowerUpCollected(kind));
            }
        }

        // Prey consumption.
        let eaten: Vec<usize> = self
            .prey
            .iter()
            .enumerate()
            .filter(|(_, p)| p.mover.active && p.rect().overlaps(&player_rect))
            .map(|(i, _)| i)
            .collect();
        for i in eaten {
            let pos = self.prey[i].mover.pos;
            self.prey[i].mover.destroy();
            self.effects.emit_blood(pos);
            self.events.push(GameEvent::PreyConsumed);
            if self.prey[i].cure && self.player.poisoned {
                self.player.poisoned = false;
            }
        }

        // Hazard contact. Hazards are near-circular, so a distance test is
        // enough. One-shot: a hazard that lands a hit is destroyed.
        if !self.god_mode {
            let contacts: Vec<usize> = self
                .hazards
                .iter()
                .enumerate()
                .filter(|(_, h)| {
                    h.mover.active && h.mover.pos.distance(player_pos) < config::CONTACT_RADIUS
                })
                .map(|(i, _)| i)
                .collect();
            for i in contacts {
                if self.hazards[i].poison_tipped && !self.player.poisoned {
                    self.player.poisoned = true;
                    self.effects.emit_poison_cloud(self.hazards[i].mover.pos);
                    self.alert
                        .show("You have been poisoned!", ORANGE, self.tick_count);
                    self.events.push(GameEvent::PlayerPoisoned);
                    // The first entry of the active set carries the cure: a
                    // deterministic, order-dependent policy kept on purpose.
                    if let Some(first) = self.prey.iter_mut().find(|p| p.mover.active) {
                        first.cure = true;
                    }
                }
                let dmg = self
                    .rng
                    .gen_range(config::CONTACT_DAMAGE_MIN..config::CONTACT_DAMAGE_MAX);
                if self.player.apply_damage(dmg, i) {
                    self.events.push(GameEvent::PlayerDamaged(dmg));
                }
                self.hazards[i].mover.destroy();
            }
        }

        // None or one prey left ends the round.
        if self.active_prey_count() < 2 {
            self.level_complete();
        }
    }

    fn level_complete(&mut self) {
        if self.level >= self.max_level() {
            self.outcome = Outcome::GameWon;
            self.events.push(GameEvent::GameWon);
        } else {
            self.level += 1;
            self.reset_round();
            self.events.push(GameEvent::LevelAdvanced(self.level));
        }
    }

    /// Reset the round for the current level: player defaults, transient
    /// effects cleared, timed power-up effect aborted, pools re-seeded with
    /// exactly the level's configured counts active.
    pub fn reset_round(&mut self) {
        self.player.reset(&self.world);
        self.effects.clear();
        self.power_up.end_effect(&mut self.modifiers);
        self.power_up.deactivate();

        let level_idx = self.level as usize - 1;

        let prey_goal = self.prey_per_level[level_idx];
        for (i, p) in self.prey.iter_mut().enumerate() {
            p.mover.pos = self.world.random_pos_in(&mut self.rng, config::SPAWN_MARGIN);
            p.mover.rotation = self.rng.gen_range(-1.0..1.0);
            p.cure = false;
            p.mover.active = i < prey_goal;
        }

        let hazard_goal = self.hazards_per_level[level_idx];
        for (i, h) in self.hazards.iter_mut().enumerate() {
            h.mover.pos = self.world.random_pos(&mut self.rng);
            h.mover.active = i < hazard_goal;
            h.poison_tipped =
                h.mover.active && self.rng.gen_range(0..config::POISON_TIP_CHANCE) == 0;
        }
    }

    /// Fresh game from level 1. Used by the shell after a terminal outcome.
    pub fn restart(&mut self) {
        self.level = 1;
        self.outcome = Outcome::Playing;
        self.power_up_ticker = 0;
        self.reset_round();
    }

    /// Directional input intent: move the wanted position by a delta, clamped
    /// to the field plus a small overscan margin. Ignored while invulnerable.
    pub fn nudge_player(&mut self, delta: Vec2) {
        if self.player.invulnerable() {
            return;
        }
        let wanted = self.player.mover.wanted_pos + delta;
        self.player.mover.wanted_pos = self.clamp_wanted(wanted);
    }

    /// Absolute pointer intent.
    pub fn point_player(&mut self, pos: Vec2) {
        if self.player.invulnerable() {
            return;
        }
        self.player.mover.wanted_pos = self.clamp_wanted(pos);
    }

    fn clamp_wanted(&self, pos: Vec2) -> Vec2 {
        vec2(
            pos.x.clamp(-config::INPUT_OVERSCAN, self.world.width + config::INPUT_OVERSCAN),
            pos.y.clamp(-config::INPUT_OVERSCAN, self.world.height + config::INPUT_OVERSCAN),
        )
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerup::PowerUpKind;

    /// Park the player where nothing can collide with it.
    fn park_player(game: &mut Game) {
        game.player.mover.pos = vec2(-100.0, -100.0);
        game.player.mover.wanted_pos = game.player.mover.pos;
    }

    fn end_invulnerability(game: &mut Game) {
        game.player.invul_ticks = config::INVUL_TICKS;
    }

    fn move_prey_away(game: &mut Game) {
        for (i, p) in game.prey.iter_mut().enumerate() {
            p.mover.pos = vec2(900.0 + (i as f32 % 8.0) * 40.0, 80.0 + (i / 8) as f32 * 40.0);
            p.mover.velocity = Vec2::ZERO;
        }
    }

    #[test]
    fn reset_round_is_idempotent_on_state_shape() {
        let mut game = Game::new(42);
        game.reset_round();
        let prey_once = game.active_prey_count();
        let hazards_once = game.active_hazard_count();

        game.reset_round();
        assert_eq!(game.active_prey_count(), prey_once);
        assert_eq!(game.active_hazard_count(), hazards_once);
        assert_eq!(prey_once, config::PREY_PER_LEVEL[0]);
        assert_eq!(hazards_once, config::HAZARDS_PER_LEVEL[0]);
        assert_eq!(game.player.health(), 100);
        assert!(game.player.invulnerable());
        assert!(!game.player.poisoned);
        assert_eq!(game.modifiers, Modifiers::default());
    }

    #[test]
    fn world_holds_still_while_player_is_invulnerable() {
        let mut game = Game::with_levels(1, vec![3], vec![1]);
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].poison_tipped = false;
        let prey_pos = game.prey[0].mover.pos;

        for _ in 0..10 {
            game.tick();
        }
        assert_eq!(game.player.health(), 100);
        assert!(game.hazards[0].mover.active);
        assert_eq!(game.prey[0].mover.pos, prey_pos);
    }

    #[test]
    fn consuming_down_to_one_prey_on_final_level_wins() {
        // Scenario A: one prey, no hazards, max level 1.
        let mut game = Game::with_levels(7, vec![1], vec![0]);
        end_invulnerability(&mut game);
        game.prey[0].mover.pos = game.player.mover.pos;

        game.tick();
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PreyConsumed));
        assert!(events.contains(&GameEvent::GameWon));
        assert_eq!(game.outcome, Outcome::GameWon);
        assert_eq!(game.active_prey_count(), 0);
    }

    #[test]
    fn death_above_first_level_costs_a_level_and_resets() {
        // Scenario B: lethal hazard contact on level 2 drops back to level 1.
        let mut game = Game::with_levels(9, vec![5, 5], vec![1, 1]);
        game.level = 2;
        game.reset_round();
        end_invulnerability(&mut game);
        move_prey_away(&mut game);
        game.player.apply_damage(92, usize::MAX); // health now 8
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].mover.active = true;
        game.hazards[0].poison_tipped = false;

        game.tick(); // contact deals at least 10, health clamps to 0
        assert_eq!(game.player.health(), 0);
        assert_eq!(game.level, 2);

        game.tick(); // death is observed, level regresses, round resets
        assert_eq!(game.level, 1);
        assert_eq!(game.player.health(), 100);
        assert!(game.player.invulnerable());
        assert_eq!(game.outcome, Outcome::Playing);
        assert!(game.drain_events().contains(&GameEvent::LevelRegressed(1)));
    }

    #[test]
    fn death_on_first_level_is_game_over() {
        let mut game = Game::with_levels(9, vec![5], vec![1]);
        end_invulnerability(&mut game);
        move_prey_away(&mut game);
        game.player.apply_damage(95, usize::MAX);
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].poison_tipped = false;

        game.tick();
        game.tick();
        assert_eq!(game.outcome, Outcome::GameOver);
        assert!(game.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn poison_contact_marks_one_cure_and_only_the_cure_lifts_poison() {
        // Scenario C.
        let mut game = Game::with_levels(11, vec![3], vec![1]);
        end_invulnerability(&mut game);
        move_prey_away(&mut game);
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].poison_tipped = true;

        game.tick();
        assert!(game.player.poisoned);
        assert!(!game.hazards[0].mover.active);
        let cures: Vec<usize> = game
            .prey
            .iter()
            .enumerate()
            .filter(|(_, p)| p.cure)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(cures, vec![0], "exactly the first active prey is the cure");
        assert!(game.drain_events().contains(&GameEvent::PlayerPoisoned));

        // Consuming a non-cure prey leaves the poison in place.
        game.prey[1].mover.pos = game.player.mover.pos;
        game.tick();
        assert!(!game.prey[1].mover.active);
        assert!(game.player.poisoned);

        // Consuming the cure clears it.
        game.prey[0].mover.pos = game.player.mover.pos;
        game.tick();
        assert!(!game.prey[0].mover.active);
        assert!(!game.player.poisoned);
    }

    #[test]
    fn slow_prey_effect_applies_immediately_and_reverts_exactly_at_expiry() {
        // Scenario D.
        let mut game = Game::with_levels(13, vec![4], vec![0]);
        end_invulnerability(&mut game);
        park_player(&mut game);
        move_prey_away(&mut game);

        game.power_up.kind = PowerUpKind::SlowPrey;
        game.power_up.active = true;
        let applied = game.power_up.apply_effect(
            &mut game.player,
            &mut game.modifiers,
            &mut game.alert,
            game.tick_count,
        );
        assert!(applied);
        let expiry = game.tick_count + config::POWERUP_EFFECT_TICKS;

        while game.tick_count < expiry - 1 {
            game.tick();
            assert!(game.modifiers.slow_prey);
            for p in game.prey.iter().filter(|p| p.mover.active) {
                assert_eq!(
                    p.mover.terminal_velocity,
                    Vec2::splat(config::PREY_SLOW_TERMINAL_VELOCITY)
                );
            }
        }

        game.tick(); // the expiry tick itself
        assert!(!game.modifiers.slow_prey);
        for p in game.prey.iter().filter(|p| p.mover.active) {
            assert_eq!(
                p.mover.terminal_velocity,
                Vec2::splat(config::PREY_TERMINAL_VELOCITY)
            );
        }
        assert_eq!(game.outcome, Outcome::Playing);
    }

    #[test]
    fn power_up_spawns_on_cadence() {
        let mut game = Game::with_levels(17, vec![8], vec![0]);
        end_invulnerability(&mut game);
        park_player(&mut game);

        let mut spawned = 0;
        for _ in 0..config::POWERUP_SPAWN_TICKS {
            game.tick();
            spawned += game
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerUpSpawned(_)))
                .count();
        }
        assert_eq!(spawned, 1);

        for _ in 0..config::POWERUP_SPAWN_TICKS {
            game.tick();
            spawned += game
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerUpSpawned(_)))
                .count();
        }
        assert_eq!(spawned, 2);
    }

    #[test]
    fn god_mode_skips_hazard_contact() {
        let mut game = Game::with_levels(19, vec![5], vec![1]);
        end_invulnerability(&mut game);
        move_prey_away(&mut game);
        game.god_mode = true;
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].poison_tipped = true;

        for _ in 0..5 {
            game.tick();
        }
        assert_eq!(game.player.health(), 100);
        assert!(!game.player.poisoned);
        assert!(game.hazards[0].mover.active);
    }

    #[test]
    fn hazard_contact_is_one_shot_and_damages_once() {
        let mut game = Game::with_levels(23, vec![5], vec![2]);
        end_invulnerability(&mut game);
        move_prey_away(&mut game);
        game.hazards[0].mover.pos = game.player.mover.pos;
        game.hazards[0].poison_tipped = false;
        game.hazards[1].mover.active = false;

        game.tick();
        let after_first = game.player.health();
        assert!(after_first <= 100 - config::CONTACT_DAMAGE_MIN);
        assert!(!game.hazards[0].mover.active);

        // The destroyed hazard cannot hurt the player again.
        game.tick();
        assert_eq!(game.player.health(), after_first);
    }

    #[test]
    fn wanted_position_is_clamped_to_overscan_margin() {
        let mut game = Game::with_levels(29, vec![5], vec![0]);
        end_invulnerability(&mut game);

        game.point_player(vec2(-500.0, 5000.0));
        assert_eq!(
            game.player.mover.wanted_pos,
            vec2(-config::INPUT_OVERSCAN, game.world.height + config::INPUT_OVERSCAN)
        );
    }

    #[test]
    fn input_is_ignored_while_invulnerable() {
        let mut game = Game::with_levels(31, vec![5], vec![0]);
        let wanted = game.player.mover.wanted_pos;

        game.nudge_player(vec2(config::INPUT_STEP, 0.0));
        assert_eq!(game.player.mover.wanted_pos, wanted);
    }
}
