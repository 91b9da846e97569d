/// Entry point and game loop.

mod config;
mod domain;
mod logging;
mod sim;
mod ui;

use std::time::Instant;

use crossterm::event::KeyCode;
use tracing::{debug, info, warn};

use config::GameConfig;
use sim::event::GameEvent;
use sim::session::GameSession;
use sim::words::WordList;
use ui::input::{InputEvent, InputState};
use ui::renderer::{HitTarget, Renderer};
use ui::router::{route_click, route_key};
use ui::sound::{process_sound_events, SoundEngine};

fn main() {
    let config = GameConfig::load();

    if let Err(e) = logging::init_logging(&config.log_file, &config.log_level) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let words = load_words(&config);
    let mut session = GameSession::new(words, config.timing.clone());

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.sound { SoundEngine::new() } else { None };

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    info!(rounds = session.round(), "exit");
    println!();
    println!("Thanks for playing Wordgrid!");
}

/// Word source: fixed word, then word file, then the embedded list.
/// Runs before the terminal is taken over, so problems go to stderr too.
fn load_words(config: &GameConfig) -> WordList {
    if let Some(word) = &config.fixed_word {
        match WordList::fixed(word) {
            Ok(list) => {
                info!(word = %word, "playing fixed target word");
                return list;
            }
            Err(e) => {
                warn!(error = %e, "ignoring fixed word");
                eprintln!("Warning: {e}");
            }
        }
    }
    match WordList::load(&config.words_file) {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, "falling back to embedded word list");
            eprintln!("Warning: {e}");
            eprintln!("Using built-in words.");
            WordList::embedded()
        }
    }
}

fn game_loop(
    session: &mut GameSession,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let frame = config.timing.frame();
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();
        if kb.quit_pressed() {
            break;
        }

        let mut events: Vec<GameEvent> = Vec::new();
        for input in kb.events.drain(..) {
            dispatch(session, |x, y| renderer.hit_test(x, y), input, &mut events);
        }

        // Timers (entry flag, win pause) run on wall time.
        let now = Instant::now();
        events.extend(session.advance(now - last_tick));
        last_tick = now;

        process_sound_events(sound, &events);

        renderer.render(session)?;
        if let Some(pos) = session.surface_ready(renderer.laid_out_rows()) {
            debug!(row = pos.row, col = pos.col, "deferred focus applied");
        }

        std::thread::sleep(frame);
    }

    Ok(())
}

/// Route one input event into the session. Clicks are resolved through
/// `hit_test`, which maps screen coordinates to the last drawn frame.
fn dispatch<H>(session: &mut GameSession, hit_test: H, input: InputEvent, events: &mut Vec<GameEvent>)
where
    H: Fn(u16, u16) -> Option<HitTarget>,
{
    match input {
        InputEvent::Key(key) => {
            let grid_focused = session.focused().is_some();
            if key.code == KeyCode::Esc && grid_focused {
                session.blur();
                return;
            }
            if let Some(req) = route_key(&key, grid_focused) {
                events.extend(session.handle(req));
            }
        }
        InputEvent::Click { x, y } => match hit_test(x, y) {
            Some(HitTarget::Key(label)) => {
                if let Some(req) = route_click(label) {
                    events.extend(session.handle(req));
                }
            }
            Some(HitTarget::Cell(pos)) => {
                session.focus_cell(pos.row, pos.col);
            }
            None => session.blur(),
        },
        InputEvent::Paste(text) => events.extend(session.paste(&text)),
    }
}
