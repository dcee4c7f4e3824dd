//! mixtee-pcb: KiCad board generator for the MIXTEE daughter boards
//!
//! Builds a board from its compiled-in description and writes the board,
//! project and footprint library table files.

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use mixtee_pcb::board::BoardError;
use mixtee_pcb::boards::{self, BoardKind};
use mixtee_pcb::config;
use mixtee_pcb::kicad::RandomIds;

/// KiCad board generator for the MIXTEE daughter boards.
///
/// Writes `<project>.kicad_pcb`, `<project>.kicad_pro` and `fp-lib-table`
/// into the output directory.
#[derive(Parser, Debug)]
#[command(name = "mixtee-pcb")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board to generate
    #[command(subcommand)]
    board: BoardCommand,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration file)
    #[arg(short, long, value_name = "DIR", global = true)]
    out_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum BoardCommand {
    /// 80 x 20 mm output board with four 1/4" jacks
    DaughterOutput,
    /// 72 x 80 mm 4x4 keypad with per-key LEDs
    KeyPcb,
}

impl From<BoardCommand> for BoardKind {
    fn from(command: BoardCommand) -> Self {
        match command {
            BoardCommand::DaughterOutput => Self::DaughterOutput,
            BoardCommand::KeyPcb => Self::KeyPcb,
        }
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints an error followed by its source chain.
fn report(err: &BoardError) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn run(kind: BoardKind, cfg: &config::Config, out_dir: &Path) -> Result<(), BoardError> {
    let design = kind.design()?;
    let library = cfg.footprint_library.to_library();
    let files = boards::generate(&design, &library, &mut RandomIds)?;
    let written = boards::write_outputs(&files, out_dir)?;

    println!("{}", design.summary());
    println!();
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Entry point for the mixtee-pcb generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if let Some(source) = e.source() {
                eprintln!("  caused by: {source}");
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let kind = BoardKind::from(args.board);
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| cfg.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        board = %kind,
        out_dir = %out_dir.display(),
        "Generating board"
    );

    match run(kind, &cfg, &out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, board = %kind, "Generation failed");
            report(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parses_board_subcommand_and_flags() {
        let args = Args::try_parse_from(["mixtee-pcb", "key-pcb", "-o", "out", "-vv"]).unwrap();
        assert!(matches!(args.board, BoardCommand::KeyPcb));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn board_subcommand_is_required() {
        assert!(Args::try_parse_from(["mixtee-pcb"]).is_err());
    }

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(get_log_level(3, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(1, false, "error"), Level::INFO);
    }
}
