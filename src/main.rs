//! Colonnade entry point
//!
//! Terminal client: the menu flow around the game, the frame driver, and the
//! rendering host. The simulation itself lives in `colonnade::sim` and never
//! touches the terminal.

use std::io::{self, Write, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal,
};

use colonnade::assets::{self, LevelArt, Sprite};
use colonnade::catalog::{self, LevelCatalog, LevelSpec};
use colonnade::leaderboard::{Leaderboard, ScoreService};
use colonnade::render::scene::build_scene;
use colonnade::render::term::{self, PixelBuf, Viewport};
use colonnade::sim::{Difficulty, FrameClock, FrameInput, GameMode, GamePhase, GameState, step};

/// Driver pacing (~60 Hz); the clock normalizes the real elapsed time anyway
const FRAME: Duration = Duration::from_millis(16);

/// What a finished screen wants next
enum Action {
    Menu,
    LevelSelect,
    Story,
    Scores,
    /// Play a catalog room, or arcade when `None`
    Play(Option<usize>),
    Quit,
}

/// Choice made on a terminal overlay
enum Resume {
    Restart,
    Next,
    Menu,
}

struct App {
    catalog: LevelCatalog,
    board: Leaderboard,
    epoch: Instant,
}

impl App {
    fn new() -> Self {
        let catalog = match std::env::var("COLONNADE_LEVELS") {
            Ok(path) => match LevelCatalog::from_json_file(&path) {
                Ok(catalog) => {
                    log::info!("loaded level catalog from {path}");
                    catalog
                }
                Err(err) => {
                    log::warn!("ignoring catalog at {path}: {err}");
                    LevelCatalog::builtin()
                }
            },
            Err(_) => LevelCatalog::builtin(),
        };
        Self {
            catalog,
            board: Leaderboard::new(),
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

fn player_name() -> String {
    std::env::var("USER").unwrap_or_else(|_| "PLAYER".into())
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x1909)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut out);

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut io::Stdout) -> io::Result<()> {
    let mut app = App::new();
    let mut action = Action::Menu;
    loop {
        action = match action {
            Action::Menu => menu_screen(out)?,
            Action::LevelSelect => level_select_screen(out, &app.catalog)?,
            Action::Story => story_screen(out, &app.catalog)?,
            Action::Scores => scores_screen(out, &app.board)?,
            Action::Play(level) => play(out, &mut app, level)?,
            Action::Quit => return Ok(()),
        };
    }
}

// ---------------------------------------------------------------------------
// Frame driver
// ---------------------------------------------------------------------------

/// Run one play session to its exit action.
///
/// One simulation step per frame; the session only continues scheduling
/// while the phase is `Running`. Terminal phases hand control to the
/// overlays, which resolve into reset, advance or exit.
fn play(out: &mut io::Stdout, app: &mut App, level: Option<usize>) -> io::Result<Action> {
    let spec: Option<LevelSpec> = level.and_then(|i| app.catalog.level(i)).cloned();

    // An absent descriptor means arcade play with solid-color pillars
    let mode = match (level, &spec) {
        (Some(i), Some(_)) => GameMode::Levels { index: i as u32 },
        _ => GameMode::Arcade,
    };
    let art = spec
        .as_ref()
        .map(LevelArt::resolve)
        .unwrap_or_else(LevelArt::none);
    let pillar_color = catalog::pillar_color(mode.level_index());

    let seed = session_seed();
    log::info!("session start: {mode:?}, seed {seed}");
    let mut state = GameState::new(mode, seed);
    let mut clock = FrameClock::new();
    let mut input = FrameInput::default();

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut vp = Viewport::fit(buf.width(), buf.height());

    clock.anchor(app.now_ms());
    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => input.jump = true,
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Menu),
                    _ => {}
                },
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                    vp = Viewport::fit(buf.width(), buf.height());
                }
                _ => {}
            }
        }

        let d = clock.tick(app.now_ms());
        step(&mut state, &input, d);
        input.jump = false; // one-shot, consumed by the step

        let diff = Difficulty::at(state.mode, state.score);
        let scene = build_scene(&state, &diff, &art, pillar_color);
        term::paint(&scene, &mut buf, vp);
        buf.render(out, 0)?;

        match state.phase {
            GamePhase::Running => {}
            GamePhase::GameOver => {
                log::info!("game over at score {}", state.score);
                match game_over_screen(out, app, &state)? {
                    Resume::Restart => {
                        state.reset();
                        clock.anchor(app.now_ms());
                    }
                    _ => return Ok(Action::Menu),
                }
            }
            GamePhase::LevelComplete => {
                log::info!("milestone reached: {mode:?}");
                let has_next = level.is_some_and(|i| i + 1 < app.catalog.len());
                match milestone_screen(out, spec.as_ref(), art.milestone.as_ref(), has_next)? {
                    Resume::Next => {
                        // Advance: a fresh session in the next room, or the
                        // menu when the exhibition is over
                        return Ok(match (level, has_next) {
                            (Some(i), true) => Action::Play(Some(i + 1)),
                            _ => Action::Menu,
                        });
                    }
                    _ => return Ok(Action::Menu),
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

fn blank(out: &mut io::Stdout) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))
}

fn center(out: &mut io::Stdout, row: u16, text: &str) -> io::Result<()> {
    let (cols, _) = terminal::size()?;
    let col = (cols as usize).saturating_sub(text.chars().count()) / 2;
    queue!(out, cursor::MoveTo(col as u16, row), Print(text))
}

fn wait_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key.code);
            }
        }
    }
}

fn menu_screen(out: &mut io::Stdout) -> io::Result<Action> {
    blank(out)?;
    center(out, 2, "C O L O N N A D E")?;
    center(out, 4, "a flight through the exhibition")?;
    center(out, 7, "[1] Exhibition rooms")?;
    center(out, 8, "[2] Arcade")?;
    center(out, 9, "[3] Story")?;
    center(out, 10, "[4] Scores")?;
    center(out, 12, "[Q] Quit")?;
    out.flush()?;

    loop {
        match wait_key()? {
            KeyCode::Char('1') => return Ok(Action::LevelSelect),
            KeyCode::Char('2') => return Ok(Action::Play(None)),
            KeyCode::Char('3') => return Ok(Action::Story),
            KeyCode::Char('4') => return Ok(Action::Scores),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),
            _ => {}
        }
    }
}

fn level_select_screen(out: &mut io::Stdout, catalog: &LevelCatalog) -> io::Result<Action> {
    blank(out)?;
    center(out, 2, "Choose a room")?;
    for (i, level) in catalog.levels.iter().enumerate() {
        center(out, 4 + i as u16, &format!("[{}] {}", i + 1, level.name))?;
    }
    center(out, 5 + catalog.len() as u16, "[Esc] Back")?;
    out.flush()?;

    loop {
        match wait_key()? {
            KeyCode::Char(c) => {
                if let Some(i) = c.to_digit(10) {
                    let i = i as usize;
                    if i >= 1 && i <= catalog.len() {
                        return Ok(Action::Play(Some(i - 1)));
                    }
                }
            }
            KeyCode::Esc => return Ok(Action::Menu),
            _ => {}
        }
    }
}

fn story_screen(out: &mut io::Stdout, catalog: &LevelCatalog) -> io::Result<Action> {
    for (i, level) in catalog.levels.iter().enumerate() {
        blank(out)?;
        center(out, 1, &level.name)?;
        let art = level.milestone_image.as_deref().and_then(assets::load_sprite);
        let mut row = 3;
        if let Some(sprite) = art.as_ref() {
            row = draw_panel_image(out, sprite, row)?;
        }
        for line in level.milestone_text.lines() {
            center(out, row, line)?;
            row += 1;
        }
        let more = i + 1 < catalog.len();
        center(
            out,
            row + 1,
            if more { "[Space] Continue  [Esc] Back" } else { "[Esc] Back to menu" },
        )?;
        out.flush()?;

        loop {
            match wait_key()? {
                KeyCode::Char(' ') | KeyCode::Enter if more => break,
                KeyCode::Esc | KeyCode::Char('q') => return Ok(Action::Menu),
                KeyCode::Char(' ') | KeyCode::Enter => return Ok(Action::Menu),
                _ => {}
            }
        }
    }
    Ok(Action::Menu)
}

fn scores_screen(out: &mut io::Stdout, board: &Leaderboard) -> io::Result<Action> {
    blank(out)?;
    center(out, 2, "Best flights")?;
    if board.is_empty() {
        center(out, 5, "No scores yet - fly the arcade!")?;
    } else {
        for (i, entry) in board.top(10).iter().enumerate() {
            center(
                out,
                4 + i as u16,
                &format!("{:>2}. {:<12} {:>4}", i + 1, entry.name, entry.score),
            )?;
        }
    }
    center(out, 16, "[Esc] Back")?;
    out.flush()?;

    loop {
        if matches!(wait_key()?, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
            return Ok(Action::Menu);
        }
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn game_over_screen(out: &mut io::Stdout, app: &mut App, state: &GameState) -> io::Result<Resume> {
    blank(out)?;
    center(out, 3, "G A M E   O V E R")?;
    center(out, 5, &format!("Score: {}", state.score))?;

    // Arcade flights go on the board
    if state.mode == GameMode::Arcade && state.score > 0 {
        let name = player_name();
        let rank = app.board.submit(&name, state.score);
        center(
            out,
            7,
            &format!("{name} ranked #{rank} of {}", app.board.len()),
        )?;
    }

    center(out, 10, "[R] Restart    [M] Menu")?;
    out.flush()?;

    loop {
        match wait_key()? {
            KeyCode::Char('r') | KeyCode::Char(' ') | KeyCode::Enter => {
                return Ok(Resume::Restart);
            }
            KeyCode::Char('m') | KeyCode::Esc | KeyCode::Char('q') => return Ok(Resume::Menu),
            _ => {}
        }
    }
}

fn milestone_screen(
    out: &mut io::Stdout,
    spec: Option<&LevelSpec>,
    image: Option<&Sprite>,
    has_next: bool,
) -> io::Result<Resume> {
    blank(out)?;
    center(out, 1, "M I L E S T O N E")?;
    let mut row = 3;
    if let Some(spec) = spec {
        center(out, row, &format!("{} complete!", spec.name))?;
        row += 2;
        if let Some(sprite) = image {
            row = draw_panel_image(out, sprite, row)?;
        }
        for line in spec.milestone_text.lines() {
            center(out, row, line)?;
            row += 1;
        }
    }
    center(
        out,
        row + 1,
        if has_next { "[N] Next room    [M] Menu" } else { "[N] Finish    [M] Menu" },
    )?;
    out.flush()?;

    loop {
        match wait_key()? {
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => return Ok(Resume::Next),
            KeyCode::Char('m') | KeyCode::Esc | KeyCode::Char('q') => return Ok(Resume::Menu),
            _ => {}
        }
    }
}

/// Blit a sprite as a centered half-block panel; returns the next free row
fn draw_panel_image(out: &mut io::Stdout, sprite: &Sprite, row: u16) -> io::Result<u16> {
    let (cols, rows) = terminal::size()?;
    // Cap the panel at a third of the screen, keep the aspect ratio;
    // half-block pixels are close to square
    let max_h = (rows as i32 / 3).max(4) * 2;
    let max_w = (cols as i32 - 4).max(8);
    let aspect = sprite.width() as f32 / sprite.height() as f32;
    let h = (max_h.min((max_w as f32 / aspect) as i32).max(2) / 2) * 2;
    let w = ((h as f32 * aspect) as i32).max(1);

    let mut panel = PixelBuf::new(cols as usize, h as usize);
    panel.blit_sprite(sprite, (cols as i32 - w) / 2, 0, w, h);
    panel.render(out, row)?;
    Ok(row + (h / 2) as u16 + 1)
}
