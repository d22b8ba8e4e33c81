//! dunlayout: lay out a level definition and print it
//!
//! Main entry point for the command-line generator.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record, error, info};

use dl_core::dungeon::{DungeonGenerator, NullObserver};
use dl_core::{GenerationConfig, LayoutRng, LevelDefinition};

use render::{AsciiMap, room_table};

/// Graph-driven dungeon room layout
#[derive(Parser, Debug)]
#[command(name = "dunlayout")]
#[command(author, version, about = "Lay out the rooms of a level definition", long_about = None)]
struct Args {
    /// Level definition (JSON)
    level: PathBuf,

    /// Seed for the layout RNG (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of role graphs to try
    #[arg(long = "max-build-attempts")]
    max_build_attempts: Option<u32>,

    /// Rebuilds per role graph before drawing another
    #[arg(long = "max-rebuild-attempts")]
    max_rebuild_attempts: Option<u32>,

    /// Only print the room table
    #[arg(long = "no-map")]
    no_map: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Flags override the level file, which overrides the defaults
    fn generation_config(&self, level: &LevelDefinition) -> GenerationConfig {
        let mut config = level.generation_config();
        if let Some(n) = self.max_build_attempts {
            config.max_dungeon_build_attempts = n;
        }
        if let Some(n) = self.max_rebuild_attempts {
            config.max_dungeon_rebuild_attempts_for_node_graph = n;
        }
        config
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Writes log records to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());

    let level = match LevelDefinition::load(&args.level) {
        Ok(level) => level,
        Err(e) => {
            error!("{}: {}", args.level.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let config = args.generation_config(&level);
    let mut rng = match args.seed {
        Some(seed) => LayoutRng::new(seed),
        None => LayoutRng::from_entropy(),
    };
    info!("level '{}' with seed {}", level.name, rng.seed());

    let mut generator = DungeonGenerator::new(config);
    let report = match generator.generate(&level, &mut rng, &mut NullObserver) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "level '{}' seed {}: graph '{}' ({} rooms, {} graph attempt(s), {} pass(es))",
        level.name,
        rng.seed(),
        report.graph_name,
        report.rooms,
        report.outer_attempts,
        report.passes
    );
    if !args.no_map {
        if let Some(map) = AsciiMap::from_registry(generator.registry()) {
            println!();
            print!("{}", map.render());
        }
    }
    println!();
    print!("{}", room_table(generator.registry()));

    ExitCode::SUCCESS
}
