use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal, ExecutableCommand,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use moon_shooter::assets::Textures;
use moon_shooter::config::Config;
use moon_shooter::display::TerminalCanvas;
use moon_shooter::input;
use moon_shooter::scene::Scene;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Route logs to a file; stderr is hidden behind the alternate screen.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run ticks until the player quits.  Input is drained before every tick so
/// commands apply in the order they were typed.
fn game_loop<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    scene: &mut Scene,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> Result<()> {
    let tick = config.tick();
    loop {
        let frame_start = Instant::now();

        loop {
            let ev = match rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("input stream closed"),
            };
            if let Event::Resize(cols, rows) = ev {
                canvas.resize(cols, rows);
            }
            if let Some(command) = input::translate(&ev) {
                if scene.handle(command) {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }

        scene.tick(canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let config = Config::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    init_tracing(&config.log_file)?;
    info!(?config, "starting");

    let textures = Textures::load(&config.assets).context("could not create scene")?;
    let mut scene = Scene::with_spawner(config.spawn_interval(), config.seed)?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("could not enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the tick loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                error!(%err, "could not read terminal event");
                break;
            }
        }
    });

    let result = terminal::size()
        .context("could not query terminal size")
        .and_then(|(cols, rows)| {
            let mut canvas = TerminalCanvas::new(&mut out, textures, cols, rows);
            game_loop(&mut canvas, &mut scene, &rx, config)
        });

    scene.shutdown();

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(ok = result.is_ok(), "shutting down");
    result
}
