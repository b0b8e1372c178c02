use std::{io, process::ExitCode, time::Instant};

use chess_engine::{
    attacks::init_attack_tables,
    constants::{DEFAULT_MAGIC_SEED, DEFAULT_MAX_DEPTH, START_FEN},
    engine::{Engine, SearchInfo, format_moves},
    magic::discover_magics,
    perft::{perft, perft_divide},
    position::Position,
};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-engine-cli", version, about = "Magic bitboard chess engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf positions to a fixed depth
    Perft {
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = 4)]
        depth: u16,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Search a position and print the best move
    Search {
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: u16,
    },
    /// Regenerate the rook and bishop magic numbers
    Magics {
        #[arg(short, long, default_value_t = DEFAULT_MAGIC_SEED)]
        seed: u32,
    },
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let len = s.len();

    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

fn print_table(name: &str, magics: &[u64]) {
    println!("pub const {name}: [u64; 64] = [");
    for row in magics.chunks(4) {
        let row: Vec<String> = row.iter().map(|magic| format!("{magic:#x}")).collect();
        println!("    {},", row.join(", "));
    }
    println!("];\n");
}

fn run(command: Command) -> chess_engine::Result<()> {
    match command {
        Command::Perft { fen, depth, divide } => {
            let position = Position::from_fen(&fen)?;
            println!("{position}");

            let started = Instant::now();

            let nodes = if divide {
                let counts = perft_divide(&position, depth);
                for (move_, nodes) in &counts {
                    println!("  {move_}: {}", format_with_commas(*nodes));
                }
                counts.iter().map(|(_, nodes)| nodes).sum()
            } else {
                perft(&position, depth)
            };

            println!(
                "\nDepth {depth}: {} nodes in {} ms",
                format_with_commas(nodes),
                started.elapsed().as_millis()
            );
        }
        Command::Search { fen, depth } => {
            let mut engine = Engine::from_fen(&fen, Some(depth))?;
            println!("{}", engine.position);

            let result = engine.think(Some(|info: &SearchInfo| {
                println!(
                    "depth {:>2}  score {:>6}  nodes {:>12}  pv {}",
                    info.depth,
                    info.score,
                    format_with_commas(info.nodes),
                    format_moves(&info.pv)
                );
            }));

            match result.best_move {
                Some(move_) => println!("\nBest move: {move_} ({} ms)", result.time_ms),
                None => println!("\nNo legal moves"),
            }
        }
        Command::Magics { seed } => {
            let magics = discover_magics(seed)?;
            print_table("ROOK_MAGICS", &magics.rook);
            print_table("BISHOP_MAGICS", &magics.bishop);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = init_attack_tables() {
        error!(error = %e, "failed to build attack tables");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
