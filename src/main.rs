mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use kanji_battle::build_info;
use kanji_battle::collection::persistence::{self, LOG_FILE, STAGES_FILE};
use kanji_battle::core::{BattleTuning, GameContext, GameEvent, ScreenError, TICK_INTERVAL_MS};
use kanji_battle::screens::{build_registry, names, ScreenInput, ScreenMachine};
use kanji_battle::stages::{builtin_catalog, StageCatalog};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{DrawContext, SpriteBook};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Kanji Battle - read kanji to defeat monsters\n");
                println!("Usage: kanji-battle [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Files live in ~/.kanji-battle (progress, settings, optional stages.json, log).");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'kanji-battle --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let save_dir = persistence::save_dir()?;
    setup_logging(&save_dir)?;

    let catalog = Rc::new(load_catalog(&save_dir));
    let mut ctx = GameContext::new(std::env::var("USER").unwrap_or_default());
    ctx.settings = persistence::load_settings(&save_dir);
    if persistence::load_progress(&save_dir, &mut ctx) {
        tracing::info!(player = %ctx.player_name, level = ctx.player.level, "progress loaded");
    }

    let mut machine = build_registry(
        catalog.clone(),
        BattleTuning::default(),
        Some(save_dir.clone()),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut machine, &mut ctx, &catalog, &save_dir);

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    save_all(&save_dir, &ctx);
    if let Err(e) = &result {
        tracing::error!(error = %e, "game stopped");
        eprintln!("kanji-battle: {}", e);
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    machine: &mut ScreenMachine,
    ctx: &mut GameContext,
    catalog: &StageCatalog,
    save_dir: &Path,
) -> io::Result<()> {
    let mut audio = TerminalAudio::default();
    let mut sprites = SpriteBook::default();
    let tick = Duration::from_millis(TICK_INTERVAL_MS);

    machine
        .change(ctx, names::TITLE, None)
        .map_err(fatal)?;
    let mut shown_screen = machine.current_name().map(str::to_string);
    let mut last_tick = Instant::now();

    loop {
        audio.play_pending(ctx);

        terminal.draw(|frame| {
            let draw = DrawContext {
                ctx: &*ctx,
                catalog,
            };
            ui::draw_ui(frame, &*machine, &draw, &mut sprites);
        })?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit(&key) {
                    return Ok(());
                }
                if let Some(input) = map_key(key.code) {
                    machine.handle_input(ctx, input).map_err(fatal)?;
                }
            }
        }

        if last_tick.elapsed() >= tick {
            let dt = last_tick.elapsed().as_secs_f64();
            last_tick = Instant::now();
            machine.update(ctx, dt).map_err(fatal)?;
        }

        // Save whenever the player moves between screens
        let current = machine.current_name().map(str::to_string);
        if current != shown_screen {
            shown_screen = current;
            if let Err(e) = persistence::save_progress(save_dir, ctx) {
                tracing::warn!(error = %e, "failed to save progress");
            }
        }
    }
}

/// An unknown screen is a programming error; stop the game.
fn fatal(e: ScreenError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

fn map_key(code: KeyCode) -> Option<ScreenInput> {
    let input = match code {
        KeyCode::Char(c) => ScreenInput::Char(c),
        KeyCode::Backspace => ScreenInput::Backspace,
        KeyCode::Enter => ScreenInput::Enter,
        KeyCode::Esc => ScreenInput::Escape,
        KeyCode::Up => ScreenInput::Up,
        KeyCode::Down => ScreenInput::Down,
        KeyCode::Left => ScreenInput::Left,
        KeyCode::Right => ScreenInput::Right,
        KeyCode::Tab => ScreenInput::Tab,
        KeyCode::PageUp => ScreenInput::PageUp,
        KeyCode::PageDown => ScreenInput::PageDown,
        KeyCode::F(n) => ScreenInput::Function(n),
        _ => return None,
    };
    Some(input)
}

/// Log to ~/.kanji-battle/kanji-battle.log so the terminal UI stays clean.
fn setup_logging(save_dir: &Path) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(save_dir.join(LOG_FILE))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(version = %build_info::version_line(), "logging initialized");
    Ok(())
}

/// Use ~/.kanji-battle/stages.json when present and valid.
fn load_catalog(save_dir: &Path) -> StageCatalog {
    let path = save_dir.join(STAGES_FILE);
    if !path.exists() {
        return builtin_catalog();
    }
    match StageCatalog::load(&path) {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), "custom stage catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "bad stage catalog, using built-in stages");
            builtin_catalog()
        }
    }
}

fn save_all(save_dir: &Path, ctx: &GameContext) {
    if let Err(e) = persistence::save_progress(save_dir, ctx) {
        tracing::warn!(error = %e, "failed to save progress");
    }
    if let Err(e) = persistence::save_settings(save_dir, &ctx.settings) {
        tracing::warn!(error = %e, "failed to save settings");
    }
}

/// Stand-in audio backend: the terminal build has no sound output, so the
/// events are logged with the volume they would play at.
#[derive(Default)]
struct TerminalAudio {
    current_music: Option<&'static str>,
}

impl TerminalAudio {
    fn play_pending(&mut self, ctx: &mut GameContext) {
        for event in ctx.drain_events() {
            match event {
                GameEvent::PlaySound(effect) => {
                    tracing::debug!(sound = effect.id(), volume = ctx.settings.se_volume, "play sound");
                }
                GameEvent::PlayMusic(track) => {
                    if self.current_music == Some(track.id()) {
                        continue;
                    }
                    self.current_music = Some(track.id());
                    tracing::debug!(music = track.id(), volume = ctx.settings.bgm_volume, "play music");
                }
                GameEvent::ChangeScreen { name, .. } => {
                    tracing::warn!(screen = %name, "screen request arrived outside the state machine");
                }
            }
        }
    }
}
