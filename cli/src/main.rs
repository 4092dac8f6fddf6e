mod rest;


use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use wheel::board::{BoardConfig, BoardError, RingId};
use wheel::config::{ConfigError, EngineConfig};
use wheel::economy::MarkerKey;
use wheel::engine::EngineCore;
use wheel::input::TileRef;
use wheel::sync::{BoardStore, Liveness, Snapshot, StoreError, SyncAdapter, TeamRef, poll_loop};

use crate::rest::RestStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid rotation {0:?}; expected RING=DEGREES")]
    InvalidRotation(String),
    #[error("tile {ring}-{tile} click rejected: {reason}")]
    ClickRejected { ring: RingId, tile: u32, reason: String },
}

#[derive(Parser, Debug)]
#[command(name = "wheel", about = "Wheel board renderer and store client")]
struct Cli {
    #[arg(long, env = "WHEEL_BASE_URL", default_value = "http://127.0.0.1:3001/api")]
    base_url: String,

    /// Engine config JSON; `WHEEL_*` environment variables override it.
    #[arg(long, env = "WHEEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a board file.
    Validate { board: PathBuf },
    /// Render a board file to SVG.
    Render(RenderArgs),
    Board(BoardCommand),
    Energy(EnergyCommand),
    /// Toggle one tile for a team, pushing board and energy like the browser does.
    Click {
        #[command(flatten)]
        team: TeamArgs,
        ring: RingId,
        tile: u32,
    },
    /// Follow a team's board as a read-only spectator.
    Watch {
        #[command(flatten)]
        team: TeamArgs,
        /// Stop after this many snapshots.
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct TeamArgs {
    room: String,
    team: String,
}

impl TeamArgs {
    fn team_ref(&self) -> TeamRef {
        TeamRef::new(self.room.clone(), self.team.clone())
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    board: PathBuf,
    /// Output file; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Ring rotation as RING=DEGREES; repeatable.
    #[arg(long = "rotate", value_parser = parse_rotation)]
    rotations: Vec<(RingId, f64)>,
    #[arg(long, default_value_t = wheel::consts::DEFAULT_STARTING_ENERGY)]
    balance: u32,
}

#[derive(Args, Debug)]
struct BoardCommand {
    #[command(subcommand)]
    command: BoardSubcommand,
}

#[derive(Subcommand, Debug)]
enum BoardSubcommand {
    Fetch {
        #[command(flatten)]
        team: TeamArgs,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    Push {
        #[command(flatten)]
        team: TeamArgs,
        board: PathBuf,
    },
}

#[derive(Args, Debug)]
struct EnergyCommand {
    #[command(subcommand)]
    command: EnergySubcommand,
}

#[derive(Subcommand, Debug)]
enum EnergySubcommand {
    Fetch {
        #[command(flatten)]
        team: TeamArgs,
    },
    Push {
        #[command(flatten)]
        team: TeamArgs,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Validate { board } => run_validate(&board),
        Command::Render(args) => run_render(config, &args),
        Command::Board(board) => run_board(&RestStore::new(&cli.base_url)?, board).await,
        Command::Energy(energy) => run_energy(&RestStore::new(&cli.base_url)?, energy).await,
        Command::Click { team, ring, tile } => {
            run_click(RestStore::new(&cli.base_url)?, config, team.team_ref(), TileRef::new(ring, tile)).await
        }
        Command::Watch { team, count } => run_watch(RestStore::new(&cli.base_url)?, config, team.team_ref(), count).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        return Ok(EngineConfig::from_env()?);
    };
    let config = EngineConfig::from_json(&read_file(path)?)?.with_env_overrides();
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|source| CliError::Write { path: path.to_owned(), source })?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn parse_rotation(raw: &str) -> Result<(RingId, f64), CliError> {
    let invalid = || CliError::InvalidRotation(raw.to_owned());
    let (ring, degrees) = raw.split_once('=').ok_or_else(invalid)?;
    let ring = ring.trim().parse::<RingId>().map_err(|_| invalid())?;
    let degrees = degrees.trim().parse::<f64>().map_err(|_| invalid())?;
    if !degrees.is_finite() {
        return Err(invalid());
    }
    Ok((ring, degrees))
}

/// One-line description of a board: ring, tile, and active marker counts.
fn board_summary(board: &BoardConfig) -> String {
    let tiles: usize = board.rings.iter().map(|r| r.tiles.len()).sum();
    let active = board.marker_keys().len();
    format!("{} rings, {tiles} tiles, {active} active", board.rings.len())
}

fn run_validate(path: &Path) -> Result<(), CliError> {
    let board = BoardConfig::from_json(&read_file(path)?)?;
    println!("ok: {}", board_summary(&board));
    Ok(())
}

/// Build the offline engine for `board`, with ring rotations applied.
fn render_engine(config: EngineConfig, board: BoardConfig, balance: u32, rotations: &[(RingId, f64)]) -> EngineCore {
    let mut engine = EngineCore::new(config, true);
    engine.load_snapshot(board, balance);
    for &(ring, degrees) in rotations {
        if engine.board.ring(ring).is_none() {
            tracing::warn!(ring, "rotation given for unknown ring");
        }
        engine.rotations.set(ring, degrees);
    }
    engine
}

fn run_render(config: EngineConfig, args: &RenderArgs) -> Result<(), CliError> {
    let board = BoardConfig::from_json(&read_file(&args.board)?)?;
    let engine = render_engine(config, board, args.balance, &args.rotations);
    write_output(args.output.as_deref(), &engine.render_svg())
}

async fn run_board(store: &RestStore, board: BoardCommand) -> Result<(), CliError> {
    match board.command {
        BoardSubcommand::Fetch { team, output } => {
            let board = store.fetch_board(&team.team_ref()).await?;
            board.validate()?;
            tracing::info!(team = %team.team, summary = %board_summary(&board), "fetched board");
            write_output(output.as_deref(), &serde_json::to_string_pretty(&board)?)
        }
        BoardSubcommand::Push { team, board } => {
            let board = BoardConfig::from_json(&read_file(&board)?)?;
            store.push_board(&team.team_ref(), &board).await?;
            println!("pushed: {}", board_summary(&board));
            Ok(())
        }
    }
}

async fn run_energy(store: &RestStore, energy: EnergyCommand) -> Result<(), CliError> {
    let balance = match energy.command {
        EnergySubcommand::Fetch { team } => store.fetch_energy(&team.team_ref()).await?,
        EnergySubcommand::Push { team, delta } => store.push_energy_delta(&team.team_ref(), delta).await?,
    };
    println!("{balance}");
    Ok(())
}

async fn run_click(store: RestStore, config: EngineConfig, team: TeamRef, tile: TileRef) -> Result<(), CliError> {
    let adapter = SyncAdapter::new(store, team, Liveness::new());
    let (before, after) = click_and_push(&adapter, config, tile).await?;
    println!("{}; balance {before} -> {after}", MarkerKey::from(tile));
    Ok(())
}

/// Load the team's board, click `tile` through the engine, and push what the
/// engine asks for. Returns the balance before and after.
async fn click_and_push<S: BoardStore>(
    adapter: &SyncAdapter<S>,
    config: EngineConfig,
    tile: TileRef,
) -> Result<(u32, u32), CliError> {
    let Snapshot { board, balance } = adapter.fetch_snapshot().await?;
    let mut engine = EngineCore::new(config, false);
    engine.load_snapshot(board, balance);

    let actions = engine.on_tile_click(tile, 0);
    if actions.is_empty() {
        // A rejected click leaves the engine untouched, so asking again reports why.
        let outcome = engine.click_tile(tile, 0);
        return Err(CliError::ClickRejected { ring: tile.ring_id, tile: tile.tile_id, reason: format!("{outcome:?}") });
    }
    for ack in adapter.dispatch_all(&actions).await {
        engine.apply_energy_ack(ack.seq, ack.balance);
    }
    Ok((balance, engine.balance()))
}

async fn run_watch(store: RestStore, config: EngineConfig, team: TeamRef, count: Option<usize>) -> Result<(), CliError> {
    let interval = Duration::from_millis(config.poll_interval_ms);
    let adapter = SyncAdapter::new(store, team, Liveness::new());
    let liveness = adapter.liveness().clone();
    let mut seen = 0_usize;
    let mut engine = EngineCore::new(config, true);

    tracing::info!(team = %adapter.team().team_name, interval_ms = interval.as_millis(), "watching board");
    poll_loop(
        &adapter,
        || tokio::time::sleep(interval),
        |snapshot| {
            engine.load_snapshot(snapshot.board, snapshot.balance);
            println!("balance {}: {}", engine.balance(), board_summary(&engine.board));
            seen += 1;
            if count.is_some_and(|limit| seen >= limit) {
                liveness.kill();
            }
        },
    )
    .await;
    Ok(())
}
