//! Main CLI interface to Kibitz engine.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kibitz_engine::coretypes::{Color, Move, PlyKind};
use kibitz_engine::{Engine, EngineBuilder, EngineConfig, Fen, Position, Variant};

/// Play chess against a fixed-depth alpha-beta search.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search depth in plies. Overrides the config file and KIBITZ_DEPTH.
    #[arg(short, long)]
    depth: Option<PlyKind>,
    /// TOML file with engine settings.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start from this position instead of the standard start position.
    #[arg(long)]
    fen: Option<String>,
    /// Color the engine plays.
    #[arg(long, value_enum, default_value_t = Side::Black)]
    engine_color: Side,
    /// Rule set to play: standard or kingofthehill.
    #[arg(long, default_value_t = Variant::Standard)]
    variant: Variant,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

enum InputKind {
    Exit,
    Newgame,
    Help,
    Undo,
    Eval,
    Error,
    GameMove(Move),
}

impl From<&str> for InputKind {
    fn from(s: &str) -> Self {
        let maybe_move: Result<Move, _> = s.parse();
        if let Ok(move_) = maybe_move {
            Self::GameMove(move_)
        } else {
            match s {
                "exit" | "quit" => Self::Exit,
                "newgame" | "ng" => Self::Newgame,
                "help" => Self::Help,
                "undo" => Self::Undo,
                "eval" => Self::Eval,
                _ => Self::Error,
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("newgame | ng => Begin a new game.");
    println!("undo => Undo the position to return to your last move.");
    println!("eval => Print the static evaluation of the position.");
    println!("help => Print this help text.");
    println!("exit => end CLI.");
    println!("\nTo make a move, enter a move in coordinate form.");
    println!("Examples: d2d4 -> Move piece on D2 to D4. e7e8q -> Promote to a queen.");
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let config = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let config = config.apply_env_overrides();
    Ok(match args.depth {
        Some(depth) => config.depth(depth),
        None => config,
    })
}

fn start_position(args: &Args) -> anyhow::Result<Position> {
    let position = match &args.fen {
        Some(fen) => Position::parse_fen(fen).with_context(|| format!("invalid fen {fen:?}"))?,
        None => Position::start_position(),
    };
    Ok(position.with_variant(args.variant))
}

/// Let the engine play one move. Returns false if the engine could not move.
fn engine_turn(engine: &mut Engine) -> anyhow::Result<bool> {
    println!("thinking...");
    let result = engine.play_engine_move()?;
    match result.best_move {
        Some(best_move) => {
            println!("Kibitz played move {best_move}.");
            println!("{result}");
            Ok(true)
        }
        None => {
            println!("engine failed to move");
            Ok(false)
        }
    }
}

/// Undo moves until it is the human's turn again.
fn undo_to_human_turn(engine: &mut Engine, engine_color: Color) {
    while let Ok(move_) = engine.undo() {
        println!("Undo move {move_}.");
        if engine.position().side_to_move() != engine_color {
            break;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let start = start_position(&args)?;
    let engine_color = Color::from(args.engine_color);
    info!(?config, variant = %args.variant, %engine_color, "starting");

    let mut engine = EngineBuilder::new().position(start).config(config).build();
    let mut finished = false;
    let mut input = String::new();

    println!("Kibitz CLI {}\n", env!("CARGO_PKG_VERSION"));
    println!("Playing {} at depth {}, engine is {}.", args.variant, engine.depth(), engine_color);

    loop {
        if !finished
            && engine.outcome().is_none()
            && engine.position().side_to_move() == engine_color
        {
            finished = !engine_turn(&mut engine)?;
        }

        println!("{}", engine.position());
        if let Some(outcome) = engine.outcome() {
            println!("Game over: {outcome}. Enter newgame to play again.");
            finished = true;
        } else if finished {
            println!("Game over. Enter newgame to play again.");
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match InputKind::from(input.trim()) {
            InputKind::Exit => break,
            InputKind::Newgame => {
                engine.new_game();
                finished = false;
                println!("Starting new game...");
            }
            InputKind::Help => print_help(),
            InputKind::Undo => {
                undo_to_human_turn(&mut engine, engine_color);
                finished = false;
            }
            InputKind::Eval => println!("Current static score: {}", engine.evaluate()),
            InputKind::Error => println!("Invalid command: {}", input.trim()),
            InputKind::GameMove(_) if finished || engine.outcome().is_some() => {
                println!("The game is over. No action taken.");
            }
            InputKind::GameMove(move_) => {
                if engine.play_human_move(move_).is_err() {
                    println!("That move was illegal! No action taken.");
                }
            }
        }
    }

    Ok(())
}
