use macroquad::prelude::*;

use crate::config;
use crate::effects::EffectSystem;
use crate::flock::Prey;
use crate::hazard::Hazard;
use crate::player::Player;
use crate::powerup::PowerUp;
use crate::round::{Game, Outcome};

const BG_COLOR: Color = Color::new(0.02, 0.08, 0.14, 1.0);
const HUD_BG: Color = Color::new(0.0, 0.0, 0.0, 100.0 / 255.0);

/// Draw the whole frame: field, entities, effects, then the HUD on top.
pub fn draw(game: &Game) {
    clear_background(BG_COLOR);

    draw_splats(&game.effects);
    draw_prey(&game.prey, game.tick_count);
    draw_hazards(&game.hazards);
    draw_power_up(&game.power_up);
    draw_player(&game.player, game.tick_count);

    draw_hud(game);
}

fn draw_prey(prey: &[Prey], tick: u64) {
    // Three-frame tail flutter shared by the whole flock.
    let wobble = match (tick / 10) % 3 {
        0 => 0.0,
        1 => 1.0,
        _ => -1.0,
    };
    for p in prey.iter().filter(|p| p.mover.active) {
        let angle = p.mover.rotation.to_degrees();
        draw_poly(p.mover.pos.x, p.mover.pos.y, 3, 8.0 + wobble, angle, p.tint());
    }
}

fn draw_player(player: &Player, tick: u64) {
    let mut radius = 16.0;
    // Two-frame bite cycle, only while actually swimming.
    if player.mover.moving && (tick / 10) % 2 == 0 {
        radius = 18.0;
    }
    let angle = player.mover.rotation.to_degrees();
    draw_poly(
        player.mover.pos.x,
        player.mover.pos.y,
        3,
        radius,
        angle,
        player.tint(),
    );
}

fn draw_hazards(hazards: &[Hazard]) {
    for h in hazards.iter().filter(|h| h.mover.active) {
        let pos = h.mover.pos;
        let tint = h.tint();
        draw_circle(pos.x, pos.y, 14.0, tint);
        for i in 0..8 {
            let a = i as f32 * std::f32::consts::FRAC_PI_4 + h.mover.rotation;
            let tip = pos + vec2(a.cos(), a.sin()) * 22.0;
            draw_line(pos.x, pos.y, tip.x, tip.y, 2.0, tint);
        }
    }
}

fn draw_power_up(power_up: &PowerUp) {
    if !power_up.active {
        return;
    }
    let rect = power_up.rect();
    let color = power_up.kind.color();
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, WHITE);
    let label = power_up.kind.label();
    let dims = measure_text(label, None, 16, 1.0);
    draw_text(
        label,
        power_up.pos.x - dims.width * 0.5,
        power_up.pos.y + dims.height * 0.5,
        16.0,
        BLACK,
    );
}

fn draw_splats(effects: &EffectSystem) {
    for splat in effects.iter() {
        let t = splat.frame as f32 / config::EFFECT_FRAMES as f32;
        let mut color = splat.color;
        color.a *= 1.0 - t;
        draw_circle(splat.pos.x, splat.pos.y, 6.0 + t * 18.0, color);
    }
}

fn draw_hud(game: &Game) {
    draw_health_bar(game);
    draw_effect_timer(game);
    draw_alert(game);

    draw_text(
        &format!("Level {} / {}", game.level, game.max_level()),
        12.0,
        game.world.height - 14.0,
        24.0,
        WHITE,
    );
    if game.god_mode {
        draw_text("GOD", 12.0, game.world.height - 40.0, 24.0, GOLD);
    }

    match game.outcome {
        Outcome::GameOver => draw_banner(game, "GAME OVER", RED),
        Outcome::GameWon => draw_banner(game, "YOU WIN", GREEN),
        Outcome::Playing => {}
    }
}

/// Health bar, top-right. Width tracks health directly; the fill turns
/// yellow-green while poisoned.
fn draw_health_bar(game: &Game) {
    let x = game.world.width - 220.0;
    draw_rectangle(x, 10.0, 210.0, 30.0, HUD_BG);
    let fill = if game.player.poisoned {
        Color::new(0.68, 1.0, 0.18, 150.0 / 255.0)
    } else {
        Color::new(1.0, 0.1, 0.1, 150.0 / 255.0)
    };
    draw_rectangle(x + 5.0, 15.0, game.player.health() as f32 * 2.0, 20.0, fill);
}

/// Countdown bar for a running timed effect, top-left. Shrinks by ten pixels
/// per remaining second.
fn draw_effect_timer(game: &Game) {
    if !game.power_up.running(game.tick_count) {
        return;
    }
    let ticks = game.power_up.ticks_remaining(game.tick_count) as f32;
    let seconds = ticks * config::FIXED_DT;
    draw_rectangle(10.0, 10.0, 210.0, 30.0, HUD_BG);
    draw_rectangle(15.0, 15.0, seconds * 10.0, 20.0, game.power_up.kind.color());
}

fn draw_alert(game: &Game) {
    let message = game.alert.message();
    if message.is_empty() {
        return;
    }
    let dims = measure_text(message, None, 32, 1.0);
    draw_text(
        message,
        (game.world.width - dims.width) * 0.5,
        80.0,
        32.0,
        game.alert.color(),
    );
}

fn draw_banner(game: &Game, text: &str, color: Color) {
    draw_rectangle(0.0, 0.0, game.world.width, game.world.height, HUD_BG);
    let dims = measure_text(text, None, 64, 1.0);
    draw_text(
        text,
        (game.world.width - dims.width) * 0.5,
        game.world.height * 0.5,
        64.0,
        color,
    );
    let hint = "Press R to restart";
    let hd = measure_text(hint, None, 24, 1.0);
    draw_text(
        hint,
        (game.world.width - hd.width) * 0.5,
        game.world.height * 0.5 + 48.0,
        24.0,
        WHITE,
    );
}
