use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use alphabeta_chess::config::EngineConfig;
use alphabeta_chess::engines::engine_minimax::MinimaxEngine;
use alphabeta_chess::engines::engine_trait::{Engine, GoParams};
use alphabeta_chess::errors::{MoveInputError, SessionError};
use alphabeta_chess::game_state::chess_types::Color;
use alphabeta_chess::session::game_store::{GameId, GameStore};
use alphabeta_chess::utils::pgn::load_games_from_pgn_file;
use alphabeta_chess::utils::render_game_state::render_game_state;
use alphabeta_chess::utils::san::{move_to_san, san_to_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth alpha-beta chess engine", long_about = None)]
struct Args {
    /// Start position in FEN (standard start when omitted)
    #[arg(long)]
    fen: Option<String>,

    /// Search depth in plies
    #[arg(short, long)]
    depth: Option<i32>,

    /// Node budget per search
    #[arg(long)]
    nodes: Option<u64>,

    /// TOML engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the engine's move for the start position and exit
    #[arg(long)]
    analyze: bool,

    /// Load a PGN file and report how many games it holds
    #[arg(long, value_name = "FILE")]
    pgn: Option<PathBuf>,

    /// Colour played by the human
    #[arg(long, value_enum, default_value_t = Side::White)]
    play_as: Side,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format_timestamp_millis()
    .target(env_logger::Target::Stderr)
    .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if args.nodes.is_some() {
        config.search.node_budget = args.nodes;
    }

    if let Some(path) = &args.pgn {
        let games = load_games_from_pgn_file(path)?;
        println!("Loaded {} game(s) from {}", games.len(), path.display());
    }

    let mut engine = MinimaxEngine::new(config.search);
    let mut store = GameStore::new();
    let id = store.create_game(args.fen.as_deref())?;
    engine.new_game();

    if args.analyze {
        return analyze(&mut store, id, &mut engine);
    }

    play(&mut store, id, &mut engine, args.play_as)?;

    let game = store.get(id)?;
    println!("{}", render_game_state(&game.state));
    match &game.result {
        Some(result) => println!("Game over: {result}"),
        None => println!("Game abandoned"),
    }
    print!("{}", game.to_pgn());
    Ok(())
}

fn analyze(
    store: &mut GameStore,
    id: GameId,
    engine: &mut MinimaxEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = store.get(id)?.state.clone();
    let output = engine.choose_move(&mut state, &GoParams::default())?;
    for line in &output.info_lines {
        println!("{line}");
    }
    match output.best_move {
        Some(mv) => println!(
            "bestmove {mv} ({}) score {}",
            move_to_san(&state, mv),
            output.score
        ),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn play(
    store: &mut GameStore,
    id: GameId,
    engine: &mut MinimaxEngine,
    human: Side,
) -> Result<(), SessionError> {
    let human_color = match human {
        Side::White => Color::White,
        Side::Black => Color::Black,
    };
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while store.get(id)?.is_active() {
        let state = store.get(id)?.state.clone();

        if state.side_to_move() != human_color {
            let mv = store.apply_engine_move(id, engine, &GoParams::default())?;
            println!("Engine plays {} ({mv})", move_to_san(&state, mv));
            continue;
        }

        println!("{}", render_game_state(&state));
        print!("Your move (e2e4, Nf3, pgn, quit): ");
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else {
            return Ok(());
        };
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "pgn" => {
                print!("{}", store.get(id)?.to_pgn());
                continue;
            }
            _ => {}
        }

        // SAN is resolved here; the store only takes coordinate moves.
        let applied = san_to_move(&state, input)
            .map_err(SessionError::from)
            .and_then(|mv| store.apply_move(id, &mv.to_uci()));
        match applied {
            Ok(_) => {}
            Err(SessionError::MoveInput(MoveInputError::InvalidMoveFormat(text))) => {
                println!("Could not read '{text}'; use coordinates like e2e4 or e7e8q")
            }
            Err(SessionError::MoveInput(MoveInputError::IllegalMove(text))) => {
                println!("'{text}' is not legal in this position")
            }
            Err(other) => return Err(other),
        }
    }
    Ok(())
}
