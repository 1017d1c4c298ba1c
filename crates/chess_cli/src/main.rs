//! Chess CLI
//!
//! Reads one command per line on stdin and answers on stdout. Logs go to
//! stderr.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chess_cli::{CliConfig, HELP, Response, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Chess rules CLI");
    println!();
    println!("Usage:");
    println!("  chess_cli [--config FILE] [--fen FEN] [--json]");
    println!();
    println!("Options:");
    println!("  --config, -c FILE   TOML configuration (start_fen, log_filter, json, [rules])");
    println!("  --fen FEN           start from this position (quote it)");
    println!("  --json              answer with one JSON object per line");
    println!();
    println!("{HELP}");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    fen: Option<String>,
    json: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let path = args.get(i).context("--config needs a file path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--fen" => {
                i += 1;
                let fen = args.get(i).context("--fen needs a position")?;
                parsed.fen = Some(fen.clone());
            }
            "--json" => parsed.json = true,
            "help" | "--help" | "-h" => parsed.help = true,
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(fen) = args.fen {
        config.start_fen = Some(fen);
    }
    config.json |= args.json;

    init_logging(&config.log_filter);

    let mut session = Session::new(&config).context("invalid starting position")?;
    info!(
        fen = %session.game().export_position(),
        rules = ?config.rules,
        "session started"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let Some(response) = session.execute(&line) else {
            continue;
        };
        if config.json {
            let json = serde_json::to_string(&response).context("failed to encode response")?;
            writeln!(stdout, "{json}")?;
        } else {
            writeln!(stdout, "{response}")?;
        }
        stdout.flush()?;
        if response == Response::Bye {
            break;
        }
    }

    info!(
        plies = session.game().ply_count(),
        result = session.game().result(),
        "session finished"
    );
    Ok(())
}
