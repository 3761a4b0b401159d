mod config;
mod errors;
mod gcode;
mod mesh;
mod process;
mod types;

use config::Config;
use errors::Error;
use gcode::GCodeFile;
use std::io::{self, BufRead, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::info;

fn run(args: &[String]) -> Result<(), Error> {
    let (cfg, path) = Config::from_args(args)?;
    info!("oozeBot Post-Processor");

    let file = GCodeFile::load(&path)?;
    info!(path = %path.display(), lines = file.len(), "file loaded into memory");

    let (file, outcome) = process::process(file, &cfg);
    if let Some(warning) = &outcome.warning {
        report_grid_error(warning);
        acknowledge();
    }
    info!("processing complete");

    file.save(&path)?;
    info!("file saved to disk");

    Ok(())
}

fn report_grid_error(e: &Error) {
    let headline = match e {
        Error::OutOfBounds { .. } => "grid will not fit in the defined area!",
        _ => "first layer dimensions can't be read!",
    };
    with_red_stderr(|stderr| {
        writeln!(stderr, " -- ERROR: {headline} No mesh will be created.")?;
        writeln!(stderr, " -- {e}")
    });
}

/// Hold until the operator presses Enter, if there is one
fn acknowledge() {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return;
    }
    print!(" -- Press Enter to Acknowledge:");
    io::stdout().flush().ok();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).ok();
}

fn with_red_stderr(f: impl FnOnce(&mut StandardStream) -> io::Result<()>) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    stderr
        .set_color(
            ColorSpec::new()
                .set_fg(Some(Color::Red))
                .set_bold(true)
                .set_intense(true),
        )
        .ok();
    f(&mut stderr).ok();
    stderr.reset().ok();
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        with_red_stderr(|stderr| writeln!(stderr, "Error: {e}"));
        std::process::exit(1);
    }
}
