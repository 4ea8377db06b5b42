mod display;

use std::collections::{HashMap, HashSet};
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use battallica::config::GameConfig;
use battallica::input::{Action, Keymap};
use battallica::stats::FrameStats;
use battallica::surface::{ScaledSurface, ScreenGeometry};
use battallica::{Result, World};

use display::Canvas;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 Hz) is refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

const HELD_ACTIONS: [Action; 5] = [
    Action::Left,
    Action::Right,
    Action::Up,
    Action::Down,
    Action::Fire,
];

#[derive(Parser, Debug)]
#[command(name = "battallica")]
#[command(about = "Scrolling vector-graphics arcade shooter")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for terrain and spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Draw scaled lines three strokes thick
    #[arg(long)]
    thick_lines: bool,

    /// Where log output goes (the terminal is busy with the game)
    #[arg(long, default_value = "battallica.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battallica=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(fps) = args.fps {
        config.frame_rate_hz = fps;
    }
    config.thick_lines |= args.thick_lines;
    config.validate()?;
    Ok(config)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Actions whose keys were seen within the last `HOLD_WINDOW` frames.
fn held_actions(key_frame: &HashMap<KeyCode, u64>, keymap: &Keymap, frame: u64) -> HashSet<Action> {
    key_frame
        .iter()
        .filter(|&(_, &last)| frame.saturating_sub(last) <= HOLD_WINDOW)
        .filter_map(|(key, _)| keymap.lookup(key))
        .filter(Action::is_held)
        .collect()
}

/// Tick, draw and present until the world asks to quit.
///
/// Held keys are tracked as a map of key → frame last seen.  Terminals
/// with keyboard enhancement send releases and keys drop out at once;
/// classic terminals only repeat presses, so keys expire after
/// `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    keymap: &Keymap,
    rx: &mpsc::Receiver<Event>,
    stats: &mut FrameStats,
) -> Result<()> {
    let tick = Duration::from_millis(world.config.tick_interval_ms());
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows.saturating_sub(1));
    let mut geometry = ScreenGeometry::new(world.config.thick_lines);
    geometry.mark_ready();
    geometry.configure(cols as i32, rows.saturating_sub(1) as i32);

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            world.quitting = true;
                            continue;
                        }
                        key_frame.insert(code, frame);
                        if let Some(action) = keymap.lookup(&code) {
                            if !action.is_held() {
                                world.handle_action(action, true);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(w, h) => {
                    canvas.resize(w, h.saturating_sub(1));
                    geometry.configure(w as i32, h.saturating_sub(1) as i32);
                }
                _ => {}
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        let held = held_actions(&key_frame, keymap, frame);
        for action in HELD_ACTIONS {
            world.handle_action(action, held.contains(&action));
        }

        world.tick();
        stats.record_frame();

        canvas.clear();
        world.render(&mut ScaledSurface::new(&mut canvas, &geometry))?;
        display::present(out, &canvas, world)?;

        if world.quitting {
            tracing::info!(frame = world.frame, "quitting");
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    let config = load_config(&args)?;

    let keymap = Keymap::default();
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, fps = config.frame_rate_hz, "battallica starting");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new(config, &mut rng)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ghostty / kitty-protocol terminals report releases; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let mut stats = FrameStats::start();
    let result = game_loop(&mut out, &mut world, &keymap, &rx, &mut stats);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("game loop failed: {e}");
    }
    println!("{}", stats.report());
    result
}
