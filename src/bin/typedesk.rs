//! Terminal frontend for the typed desk.
//!
//! Run with no arguments for the interactive desk (mouse and keys), or
//! `--headless` to print the finished desk as plain text.
//!
//! Keys: `q`/Esc/Ctrl-C quit, `s` skip, `p`/space pause, `1` terminal,
//! `2` portfolio, `3` gif window, arrows and PgUp/PgDn scroll the portfolio.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use typedesk::input::{Command, Event, InputParser, KeyCode, KeyEvent, PointerEvent, PointerKind};
use typedesk::page::ids;
use typedesk::renderer::{Canvas, Renderer, hotspot_at, paint};
use typedesk::terminal::{Terminal, is_tty, poll_readable, read_available, terminal_size};
use typedesk::{DeskOptions, Page, Result};

const HELP_TEXT: &str = "\
typedesk - a portfolio that types itself

USAGE:
    typedesk [OPTIONS]

OPTIONS:
    --headless [WxH]   Skip the animation and print the finished desk
    --skip             Start with the animation skipped
    -h, --help         Print help

ENVIRONMENT:
    TYPEDESK_LOG         File to write logs to
    TYPEDESK_LOG_LEVEL   Log filter (default: info)
    TYPEDESK_DEV         Fast typing
    TYPEDESK_SPEED_MS    Per-character delay in milliseconds
    TYPEDESK_PAUSE_MODE  every-tick | punctuation
    TYPEDESK_DOCK_REVEAL Hide the dock until it is typed (true/false)
";

/// Upper bound on one input wait, so resizes are noticed.
const IDLE_WAIT: Duration = Duration::from_millis(250);
/// Input wait while a drag or resize is waiting for its frame.
const FRAME_WAIT: Duration = Duration::from_millis(16);
/// How long a lone ESC byte waits for the rest of a sequence.
const ESC_WAIT: Duration = Duration::from_millis(25);

#[derive(Debug, Default)]
struct Args {
    headless: Option<(u16, u16)>,
    skip: bool,
    help: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> std::result::Result<Self, String> {
        let mut parsed = Self::default();
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--skip" => parsed.skip = true,
                "--headless" => {
                    let size = match args.peek() {
                        Some(next) if !next.starts_with('-') => {
                            let size = parse_size(next)?;
                            args.next();
                            size
                        }
                        _ => (80, 24),
                    };
                    parsed.headless = Some(size);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(parsed)
    }
}

fn parse_size(value: &str) -> std::result::Result<(u16, u16), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {value}"))?;
    let w = w.parse().map_err(|_| format!("bad width: {w}"))?;
    let h = h.parse().map_err(|_| format!("bad height: {h}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero: {value}"));
    }
    Ok((w, h))
}

fn init_logging() -> io::Result<()> {
    let Ok(path) = env::var("TYPEDESK_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("TYPEDESK_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        print!("{HELP_TEXT}");
        return ExitCode::SUCCESS;
    }
    if let Err(e) = init_logging() {
        eprintln!("Error: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.headless {
        Some(size) => run_headless(size),
        None => run_interactive(args.skip),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn options() -> Result<DeskOptions> {
    DeskOptions::terminal().apply_env()
}

/// Print the finished desk, one line per row.
fn run_headless((width, height): (u16, u16)) -> Result<()> {
    let mut page = Page::standard(options()?, i32::from(width), i32::from(height))?;
    page.complete_instantly();
    page.run_until_idle(64);

    let mut canvas = Canvas::new(u32::from(width), u32::from(height));
    paint(&page, &mut canvas);
    let mut out = io::stdout().lock();
    for y in 0..canvas.height() {
        writeln!(out, "{}", canvas.row_text(y).trim_end())?;
    }
    Ok(())
}

enum Flow {
    Continue { redraw: bool },
    Quit,
}

struct App {
    page: Page,
    renderer: Renderer<io::Stdout>,
    size: (u16, u16),
}

impl App {
    fn handle(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) => self.key(key),
            Event::Pointer(pointer) => self.pointer(pointer),
            Event::Ignored => Flow::Continue { redraw: false },
        }
    }

    fn key(&mut self, key: &KeyEvent) -> Flow {
        let Some(command) = Command::from_key(key) else {
            return Flow::Continue { redraw: false };
        };
        debug!(?command, "key command");
        match command {
            Command::Quit => Flow::Quit,
            Command::Click(id) => Flow::Continue {
                redraw: self.click(id),
            },
            Command::Scroll(lines) => Flow::Continue {
                redraw: self.page.scroll(ids::WORK_TEXT, lines),
            },
        }
    }

    fn click(&mut self, id: &str) -> bool {
        match self.page.click(id) {
            Ok(acted) => acted,
            Err(e) => {
                warn!(id, error = %e, "click failed");
                false
            }
        }
    }

    fn pointer(&mut self, pointer: &PointerEvent) -> Flow {
        let p = pointer.point();
        let redraw = match pointer.kind {
            PointerKind::Press if pointer.is_primary_press() => {
                match hotspot_at(self.renderer.hotspots(), p).map(str::to_string) {
                    Some(id) => self.click(&id),
                    None => self.page.pointer_down(p).is_some(),
                }
            }
            PointerKind::Drag | PointerKind::Move => {
                self.page.pointer_move(p);
                false
            }
            PointerKind::Release => {
                self.page.pointer_up();
                true
            }
            PointerKind::Wheel(lines) => self.page.wheel(p, lines),
            PointerKind::Press => false,
        };
        Flow::Continue { redraw }
    }

    fn check_resize(&mut self) -> bool {
        let Ok(size) = terminal_size() else {
            return false;
        };
        if size == self.size {
            return false;
        }
        info!(width = size.0, height = size.1, "terminal resized");
        self.size = size;
        self.page.set_viewport(i32::from(size.0), i32::from(size.1));
        self.renderer.resize(u32::from(size.0), u32::from(size.1));
        true
    }
}

fn run_interactive(skip: bool) -> Result<()> {
    let stdin = io::stdin();
    if !is_tty(&stdin) || !is_tty(&io::stdout()) {
        eprintln!("typedesk needs an interactive terminal; try --headless");
        return Ok(());
    }

    let size = terminal_size().unwrap_or((80, 24));
    let page = Page::standard(options()?, i32::from(size.0), i32::from(size.1))?;
    let mut terminal = Terminal::new(io::stdout());
    terminal.enter()?;
    terminal.set_title("typedesk")?;

    let mut app = App {
        page,
        renderer: Renderer::new(io::stdout(), u32::from(size.0), u32::from(size.1)),
        size,
    };
    app.page.start();
    if skip {
        app.page.skip();
    }

    let clock = Instant::now();
    let mut parser = InputParser::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut buf = [0u8; 1024];
    let mut redraw = true;

    'outer: loop {
        redraw |= app.check_resize();
        redraw |= app.page.advance(clock.elapsed()) > 0;
        redraw |= app.page.animation_frame();
        if redraw {
            app.renderer.render(&app.page)?;
            redraw = false;
        }

        let wait = if app.page.windows().frame_pending() {
            FRAME_WAIT
        } else {
            app.page
                .next_deadline()
                .map_or(IDLE_WAIT, |deadline| deadline.saturating_sub(clock.elapsed()))
                .min(IDLE_WAIT)
        };
        if !poll_readable(&stdin, wait)? {
            continue;
        }
        let n = read_available(&stdin, &mut buf)?;
        pending.extend_from_slice(&buf[..n]);

        let (mut events, used) = parser.parse_all(&pending);
        pending.drain(..used);
        if pending == [0x1b] && !poll_readable(&stdin, ESC_WAIT)? {
            pending.clear();
            events.push(KeyEvent::key(KeyCode::Esc).into());
        }

        for event in &events {
            match app.handle(event) {
                Flow::Quit => break 'outer,
                Flow::Continue { redraw: r } => redraw |= r,
            }
        }
    }

    info!("quit");
    drop(terminal);
    Ok(())
}
