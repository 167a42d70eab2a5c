use std::path::PathBuf;

use clap::Parser;
use corners::{render_all, Click, Game, SvgRenderer};
use corners_cli::{load_recording, play_clicks, play_random, GameConfig, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Clicks to play in order, as "x,y"
    clicks: Vec<Click>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of cells in each row and column (overrides the config file)
    #[arg(long)]
    cell_count: Option<usize>,

    /// Size of a cell in the SVG output, in pixels (overrides the config file)
    #[arg(long)]
    cell_dimension: Option<u32>,

    /// Don't place the starting anchors
    #[arg(long, default_value_t = false)]
    no_seed: bool,

    /// Replay the clicks of a recording before the other clicks
    #[arg(long)]
    replay: Option<PathBuf>,

    /// After the given clicks, play this many random legal moves
    #[arg(short, long, default_value_t = 0)]
    random_moves: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record all clicks as JSON into this file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Write the final board as SVG into this file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(cell_count) = args.cell_count {
        config.cell_count = cell_count;
    }
    if let Some(cell_dimension) = args.cell_dimension {
        config.cell_dimension = cell_dimension;
    }
    if args.no_seed {
        config.seed_edges = false;
    }
    config.validate()?;

    let mut recorder = if let Some(path) = args.record {
        Some(Recorder::new(path, config.clone())?)
    } else {
        None
    };

    let (mut game, _) = Game::new(config.cell_count, config.seed_edges)?;
    info!(cell_count = config.cell_count, seed_edges = config.seed_edges, "New game");

    let mut clicks = match &args.replay {
        Some(path) => {
            let recording = load_recording(path)?;
            if !recording.matches(&config) {
                warn!(
                    recorded = ?recording.config,
                    current = ?config,
                    "The recording was made with a different setup, the replay will diverge"
                );
            }
            recording.clicks()
        }
        None => Vec::new(),
    };
    clicks.extend(args.clicks);
    let mut summary = play_clicks(&mut game, clicks, &mut recorder)?;

    if args.random_moves > 0 {
        // Get a random seed
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let random_summary = play_random(&mut game, &mut rng, args.random_moves, &mut recorder)?;
        summary.accepted += random_summary.accepted;
        summary.rejected += random_summary.rejected;
    }

    if let Some(rec) = &recorder {
        rec.write_recording()?;
    }

    if let Some(path) = args.svg {
        let mut renderer = SvgRenderer::new(config.cell_count, config.cell_dimension);
        render_all(game.board(), &mut renderer);
        std::fs::write(&path, renderer.document())?;
        info!(path = %path.display(), "Wrote SVG");
    }

    println!("{}", game.board());
    eprintln!(
        "End result:\n- {} moves accepted\n- {} moves rejected\n- {} to move",
        summary.accepted,
        summary.rejected,
        game.turn()
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
