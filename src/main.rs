use macroquad::prelude::*;

mod alert;
mod config;
mod effects;
mod entity;
mod events;
mod flock;
mod hazard;
mod player;
mod powerup;
mod renderer;
mod round;
mod world;

use events::GameEvent;
use round::{Game, Outcome};

fn window_conf() -> Conf {
    Conf {
        window_title: "Riptide".to_string(),
        window_width: config::FIELD_WIDTH as i32,
        window_height: config::FIELD_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let seed = ::rand::random::<u64>();
    eprintln!("[RIPTIDE] seed {seed}");
    let mut game = Game::new(seed);
    let mut accumulator = 0.0f64;
    let mut last_mouse = mouse_position();

    loop {
        handle_input(&mut game, &mut last_mouse);

        let frame_time = get_frame_time() as f64;
        accumulator += frame_time.min(0.1);
        while accumulator >= config::FIXED_DT as f64 {
            game.tick();
            accumulator -= config::FIXED_DT as f64;
        }

        for event in game.drain_events() {
            log_event(&event, &game);
        }

        renderer::draw(&game);
        next_frame().await;
    }
}

fn handle_input(game: &mut Game, last_mouse: &mut (f32, f32)) {
    if is_key_pressed(KeyCode::R) {
        if game.outcome == Outcome::Playing {
            game.reset_round();
        } else {
            game.restart();
        }
        eprintln!("[RIPTIDE] round reset (level {})", game.level);
    }
    if is_key_pressed(KeyCode::M) {
        game.pointer_control = !game.pointer_control;
        eprintln!("[RIPTIDE] pointer control {}", game.pointer_control);
    }
    if is_key_pressed(KeyCode::G) {
        game.god_mode = !game.god_mode;
        eprintln!("[RIPTIDE] god mode {}", game.god_mode);
    }

    if game.pointer_control {
        let mouse = mouse_position();
        if mouse != *last_mouse {
            *last_mouse = mouse;
            game.point_player(vec2(mouse.0, mouse.1));
        }
        return;
    }

    // One direction wins per frame, vertical before horizontal.
    let step = config::INPUT_STEP;
    if is_key_down(KeyCode::Up) {
        game.nudge_player(vec2(0.0, -step));
    } else if is_key_down(KeyCode::Down) {
        game.nudge_player(vec2(0.0, step));
    } else if is_key_down(KeyCode::Left) {
        game.nudge_player(vec2(-step, 0.0));
    } else if is_key_down(KeyCode::Right) {
        game.nudge_player(vec2(step, 0.0));
    }
}

fn log_event(event: &GameEvent, game: &Game) {
    match event {
        GameEvent::LevelAdvanced(level) => {
            eprintln!("[RIPTIDE] level complete, advancing to {level}");
        }
        GameEvent::LevelRegressed(level) => {
            eprintln!("[RIPTIDE] player died, dropping back to level {level}");
        }
        GameEvent::GameOver => eprintln!("[RIPTIDE] game over at tick {}", game.tick_count),
        GameEvent::GameWon => eprintln!("[RIPTIDE] game won at tick {}", game.tick_count),
        GameEvent::PowerUpSpawned(kind) => eprintln!("[RIPTIDE] power-up spawned: {kind:?}"),
        GameEvent::PowerUpCollected(kind) => eprintln!("[RIPTIDE] power-up collected: {kind:?}"),
        GameEvent::PlayerPoisoned => eprintln!("[RIPTIDE] player poisoned"),
        GameEvent::PlayerDamaged(_) | GameEvent::PreyConsumed => {}
    }
}
