/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::gamepad::PadState;
use ui::input::{InputState, Joypad};
use ui::renderer::Renderer;

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_A: &[KeyCode] = &[KeyCode::Char('z'), KeyCode::Char('Z')];
const KEYS_B: &[KeyCode] = &[KeyCode::Char('x'), KeyCode::Char('X')];
const KEYS_START: &[KeyCode] = &[KeyCode::Enter];
const KEYS_SELECT: &[KeyCode] = &[KeyCode::Tab, KeyCode::BackTab];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

fn main() {
    let config = GameConfig::load();
    let mut world = WorldState::new(&config);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Pictogrid!");
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut pad = PadState::new();
    pad.load_button_config(&config.gamepad);

    let frame = Duration::from_millis(config.frame_ms);

    loop {
        let frame_start = Instant::now();

        kb.drain_events();
        pad.update();

        if kb.ctrl_c() || kb.any_pressed(KEYS_QUIT) {
            break;
        }

        world.frame += 1;
        world.tick_palette();

        match world.phase {
            Phase::Title => {
                if step::title_step(sample_pressed(&kb, &pad)) {
                    step::enter_menu(world);
                }
            }
            Phase::Menu => {
                if let Some(id) = step::menu_step(world, sample_pressed(&kb, &pad)) {
                    step::enter_puzzle(world, id);
                }
            }
            Phase::Puzzle => {
                // One joypad sample per frame. Without debounce, held
                // buttons re-trigger every frame.
                let joy = if config.debounce {
                    sample_pressed(&kb, &pad)
                } else {
                    sample_down(&kb, &pad)
                };
                step::puzzle_step(world, joy);
            }
        }

        renderer.render(world)?;

        // Yield until the next display frame.
        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }

    Ok(())
}

/// Joypad sample of buttons currently down (continuous).
fn sample_down(kb: &InputState, pad: &PadState) -> Joypad {
    let mut joy = Joypad::none();
    joy.set(Joypad::LEFT, kb.any_down(KEYS_LEFT) || pad.left_down());
    joy.set(Joypad::RIGHT, kb.any_down(KEYS_RIGHT) || pad.right_down());
    joy.set(Joypad::UP, kb.any_down(KEYS_UP) || pad.up_down());
    joy.set(Joypad::DOWN, kb.any_down(KEYS_DOWN) || pad.down_down());
    joy.set(Joypad::A, kb.any_down(KEYS_A) || pad.a_down());
    joy.set(Joypad::B, kb.any_down(KEYS_B) || pad.b_down());
    joy.set(Joypad::START, kb.any_down(KEYS_START) || pad.start_down());
    joy.set(Joypad::SELECT, kb.any_down(KEYS_SELECT) || pad.select_down());
    joy
}

/// Joypad sample of buttons freshly pressed this frame (edge).
fn sample_pressed(kb: &InputState, pad: &PadState) -> Joypad {
    let mut joy = Joypad::none();
    joy.set(Joypad::LEFT, kb.any_pressed(KEYS_LEFT) || pad.left_pressed());
    joy.set(Joypad::RIGHT, kb.any_pressed(KEYS_RIGHT) || pad.right_pressed());
    joy.set(Joypad::UP, kb.any_pressed(KEYS_UP) || pad.up_pressed());
    joy.set(Joypad::DOWN, kb.any_pressed(KEYS_DOWN) || pad.down_pressed());
    joy.set(Joypad::A, kb.any_pressed(KEYS_A) || pad.a_pressed());
    joy.set(Joypad::B, kb.any_pressed(KEYS_B) || pad.b_pressed());
    joy.set(Joypad::START, kb.any_pressed(KEYS_START) || pad.start_pressed());
    joy.set(Joypad::SELECT, kb.any_pressed(KEYS_SELECT) || pad.select_pressed());
    joy
}
