use crate::audio::{Chime, Silent, TerminalBell};
use crate::cli::Args;
use crate::constants::{CELL_HEIGHT, CELL_WIDTH};
use crate::error::Result;
use crate::math::Point;
use crate::render::Renderer;
use crate::scene::Scene;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Puts the terminal into raw, alternate-screen, mouse-reporting mode and
/// restores it on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            warn!(%err, "failed to restore terminal");
        }
    }
}

/// What the loop should do after an input event
#[derive(Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Pointer position of a terminal cell, at the cell's centre
fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        (column as f64 + 0.5) * CELL_WIDTH,
        (row as f64 + 0.5) * CELL_HEIGHT,
    )
}

fn stage_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

fn handle_key(key: KeyEvent, renderer: &mut Renderer) -> Control {
    if key.kind != KeyEventKind::Press {
        return Control::Continue;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Control::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
        KeyCode::Char('d') | KeyCode::Char('D') => {
            renderer.debug = !renderer.debug;
            Control::Continue
        }
        _ => Control::Continue,
    }
}

fn handle_mouse(mouse: MouseEvent, scene: &mut Scene) {
    let at = cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => scene.pointer_down(at),
        MouseEventKind::Up(MouseButton::Left) => scene.pointer_up(at),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => scene.pointer_move(at),
        _ => {}
    }
}

fn handle_event(event: Event, scene: &mut Scene, renderer: &mut Renderer) -> Control {
    match event {
        Event::Key(key) => handle_key(key, renderer),
        Event::Mouse(mouse) => {
            handle_mouse(mouse, scene);
            Control::Continue
        }
        Event::Resize(cols, rows) => {
            scene.resize(cols, rows);
            Control::Continue
        }
        _ => Control::Continue,
    }
}

/// Where input events come from
trait EventSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Handles input until `next_frame` is due. The scene clock is brought up to
/// wall time before each event so handlers schedule from the event's moment.
fn pump_events<E: EventSource>(
    events: &mut E,
    scene: &mut Scene,
    renderer: &mut Renderer,
    start: Instant,
    next_frame: Instant,
) -> io::Result<Control> {
    let mut timeout = next_frame.saturating_duration_since(Instant::now());
    while events.poll(timeout)? {
        scene.advance_to(start.elapsed());
        if handle_event(events.read()?, scene, renderer) == Control::Quit {
            return Ok(Control::Quit);
        }
        let now = Instant::now();
        if now >= next_frame {
            break;
        }
        timeout = next_frame - now;
    }
    Ok(Control::Continue)
}

/// Runs the effects until the user quits
pub fn run(args: &Args) -> Result<()> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let chime: Box<dyn Chime> = if args.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(io::stdout()))
    };

    let (cols, rows) = stage_size()?;
    info!(cols, rows, fps = args.fps, dots = args.dots, "starting");

    let _guard = TerminalGuard::enter()?;
    let mut scene = Scene::new(cols, rows, args.dots as usize, rng, chime);
    let mut renderer = Renderer::new(args.debug);
    let mut stdout = io::stdout();

    let frame_interval = Duration::from_secs_f64(1.0 / args.fps as f64);
    let start = Instant::now();
    let mut next_frame = start + frame_interval;

    let mut events = TerminalEvents;

    loop {
        let control = pump_events(&mut events, &mut scene, &mut renderer, start, next_frame)?;
        if control == Control::Quit {
            break;
        }

        scene.frame(start.elapsed());
        renderer.paint(&scene, &mut stdout)?;
        next_frame += frame_interval;
        // after a stall, skip ahead rather than replay missed frames
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + frame_interval;
        }
    }

    stdout.flush()?;
    info!("quit");
    Ok(())
}
