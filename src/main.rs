use std::io::{self, stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use pomodoro::app::LogicThread;
use pomodoro::config::Config;
use pomodoro::render::RenderState;
use pomodoro::{plog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Pomodoro - a terminal work/break interval timer
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    POMODORO_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.pomodoro/pomodoro.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Work interval in minutes (overrides the config file)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub work: Option<i64>,

    /// Short break in minutes (overrides the config file)
    #[arg(long = "break", value_name = "MINUTES", allow_negative_numbers = true)]
    pub brk: Option<i64>,

    /// Long break in minutes (overrides the config file)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub long_break: Option<i64>,

    /// Keep the clock running across phase changes
    #[arg(long)]
    pub auto_start: bool,

    /// Do not ring the terminal bell on phase changes
    #[arg(long)]
    pub no_bell: bool,

    /// Do not send desktop notifications on phase changes
    #[arg(long)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the config file location and current values
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(work) = self.work {
            config.work_minutes = work;
        }
        if let Some(brk) = self.brk {
            config.break_minutes = brk;
        }
        if let Some(long_break) = self.long_break {
            config.long_break_minutes = long_break;
        }
        if self.auto_start {
            config.auto_start = true;
        }
        if self.no_bell {
            config.bell = false;
        }
        if self.no_notify {
            config.desktop_notifications = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    pomodoro::log::init_with_debug(cli.debug);

    if let Some(Command::Config { init }) = cli.command {
        return run_config(init);
    }

    if pomodoro::log::is_debug() {
        plog!("Pomodoro starting (debug mode enabled)");
    } else {
        plog!("Pomodoro starting");
    }

    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);
    // Rejected before the terminal is touched so the error prints cleanly.
    let durations = config.durations()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, durations, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;

    match logic_result {
        Ok(Err(e)) => {
            plog!("Logic thread failed: {}", e);
            Err(e)
        }
        Err(_) => Err(pomodoro::Error::TaskJoin("logic thread panicked".to_string())),
        Ok(Ok(())) => {
            plog!("Pomodoro exiting");
            result
        }
    }
}

/// Print the config file location and values, optionally writing defaults.
fn run_config(init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init && !path.exists() {
        Config::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
    }

    let config = Config::load_from(&path)?;
    let source = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("Config: {}{}", path.display(), source);
    println!("  work_minutes          = {}", config.work_minutes);
    println!("  break_minutes         = {}", config.break_minutes);
    println!("  long_break_minutes    = {}", config.long_break_minutes);
    println!("  auto_start            = {}", config.auto_start);
    println!("  bell                  = {}", config.bell);
    println!("  desktop_notifications = {}", config.desktop_notifications);

    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_bell: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if state.bell_count > last_bell {
            ring_bell(terminal)?;
            last_bell = state.bell_count;
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

/// Ring the terminal bell through the same writer ratatui draws with.
fn ring_bell(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let backend = terminal.backend_mut();
    backend.write_all(b"\x07")?;
    backend.flush()?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
