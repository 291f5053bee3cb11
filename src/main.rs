//! bhl - print BASIC source with syntax highlighting

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use basic_highlight::display::{lines_for_range, RenderOptions, Renderer};
use basic_highlight::syntax::{Damage, IncrementalUpdater};
use basic_highlight::{Config, Document, EditorError, HighlightedDocument, Result};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    files: Vec<PathBuf>,
    line_numbers: bool,
    no_color: bool,
    tags: bool,
    config: Option<PathBuf>,
    replace: Option<(String, String)>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
    Version,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("BHL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let mut options = RenderOptions::from(&config);
    options.line_numbers |= args.line_numbers;
    options.color &= !args.no_color;
    options.show_tags = args.tags;
    let renderer = Renderer::new(&config.styles, options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let many = args.files.len() > 1;

    for path in &args.files {
        let mut doc: HighlightedDocument<Damage> =
            Document::open(path, IncrementalUpdater::with_sink(Damage::new()))?;
        doc.modes_mut().exact = config.exact_search;
        doc.observer_mut().sink_mut().take();

        if let Some((find, with)) = &args.replace {
            let times = doc.replace_all(find, with)?;
            let damage = doc.observer_mut().sink_mut().take();
            let touched = damage
                .iter()
                .map(|range| lines_for_range(doc.text(), range.clone()))
                .reduce(|a, b| a.start.min(b.start)..a.end.max(b.end));
            match touched {
                Some(lines) => eprintln!(
                    "{}: replaced {} occurrences, restyled lines {}-{}",
                    doc.name(),
                    times,
                    lines.start + 1,
                    lines.end
                ),
                None => eprintln!("{}: no occurrences of '{}' found", doc.name(), find),
            }
        }

        if many {
            writeln!(out, "==> {} <==", path.display())?;
        }
        renderer.render_document(&mut out, doc.text(), doc.styles())?;
    }

    Ok(())
}

fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--line-numbers" | "-n" => parsed.line_numbers = true,
            "--no-color" => parsed.no_color = true,
            "--tags" => parsed.tags = true,
            "--config" => {
                let path = args.next().ok_or_else(|| missing_value("--config"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--replace" => {
                let find = args.next().ok_or_else(|| missing_value("--replace"))?;
                let with = args.next().ok_or_else(|| missing_value("--replace"))?;
                parsed.replace = Some((find, with));
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(EditorError::Message(format!("Unknown option: {}", s)));
            }
            _ => parsed.files.push(PathBuf::from(&arg)),
        }
    }

    if parsed.files.is_empty() {
        return Err(EditorError::Message("No input files (try --help)".to_string()));
    }
    Ok(Command::Run(parsed))
}

fn missing_value(option: &str) -> EditorError {
    EditorError::Message(format!("{} needs a value", option))
}

fn print_usage() {
    println!("bhl {} - BASIC syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: bhl [OPTIONS] FILE...");
    println!();
    println!("Options:");
    println!("  -h, --help              Show this help message");
    println!("  -V, --version           Show version information");
    println!("  -n, --line-numbers      Number output lines");
    println!("      --no-color          Print without colors");
    println!("      --tags              Print style letters (A-F) under each line");
    println!("      --config PATH       Read settings from PATH");
    println!("      --replace FIND WITH Replace every FIND before printing");
    println!();
    println!("Set BHL_LOG (e.g. BHL_LOG=debug) to enable logging on stderr.");
}

fn print_version() {
    println!("bhl {}", env!("CARGO_PKG_VERSION"));
}
