use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::{
    constants::DEFAULT_MAX_DEPTH,
    engine::{Engine, SearchInfo, format_moves},
    error::{EngineError, Result},
    moves::Move,
    perft::perft_divide,
    position::Position,
    types::{Piece, Square},
};

const ENGINE_NAME: &str = "Magic Bitboard Engine";
const ENGINE_AUTHOR: &str = "Brendan Dagys";

/// Reads commands until `quit` or end of input
pub fn uci_loop<R, W>(engine: &mut Engine, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        if command.is_empty() {
            continue;
        }

        debug!(command, "received");

        if !handle_command(engine, command, output)? {
            break;
        }
    }

    Ok(())
}

/// Executes one command. Returns `false` on `quit`.
pub fn handle_command<W: Write>(engine: &mut Engine, command: &str, output: &mut W) -> io::Result<bool> {
    let Some(keyword) = command.split_whitespace().next() else {
        return Ok(true);
    };

    match keyword {
        "uci" => {
            writeln!(output, "id name {ENGINE_NAME}")?;
            writeln!(output, "id author {ENGINE_AUTHOR}")?;
            writeln!(output, "uciok")?;
        }
        "isready" => {
            writeln!(output, "readyok")?;
        }
        "ucinewgame" => {
            engine.new_game();
        }
        "position" => {
            if let Err(e) = parse_position_command(engine, command) {
                warn!(error = %e, "rejected position command");
            }
        }
        "go" => {
            engine.search_settings.max_depth =
                parse_go_command(command).unwrap_or(DEFAULT_MAX_DEPTH);

            let result = engine.think(Some(|info: &SearchInfo| {
                if let Err(e) = writeln!(output, "{}", format_info(info)) {
                    warn!(error = %e, "failed to write search info");
                }
            }));

            match result.best_move {
                Some(move_) => writeln!(output, "bestmove {move_}")?,
                None => writeln!(output, "bestmove (none)")?,
            }
        }
        "perft" => {
            let depth = command
                .split_whitespace()
                .nth(1)
                .and_then(|d| d.parse::<u16>().ok())
                .unwrap_or(1);

            let mut total = 0;

            for (move_, nodes) in perft_divide(&engine.position, depth) {
                writeln!(output, "{move_}: {nodes}")?;
                total += nodes;
            }

            writeln!(output, "\nNodes searched: {total}")?;
        }
        "d" => {
            write!(output, "{}", engine.position)?;
        }
        "quit" => return Ok(false),
        _ => {
            debug!(command, "ignoring unknown command");
        }
    }

    output.flush()?;
    Ok(true)
}

/// `info score cp S depth D nodes N pv ...`
pub fn format_info(info: &SearchInfo) -> String {
    format!(
        "info score cp {} depth {} nodes {} pv {}",
        info.score,
        info.depth,
        info.nodes,
        format_moves(&info.pv)
    )
}

/// Finds the legal move matching coordinate text such as `e2e4` or `e7e8q`.
/// The promotion letter must match exactly.
pub fn parse_move(position: &Position, text: &str) -> Result<Move> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(EngineError::InvalidMove(text.to_string()));
    }

    let source: Square = text[0..2]
        .parse()
        .map_err(|_| EngineError::InvalidMove(text.to_string()))?;
    let target: Square = text[2..4]
        .parse()
        .map_err(|_| EngineError::InvalidMove(text.to_string()))?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => match Piece::from_char(c) {
            Some((_, piece)) if Piece::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(EngineError::InvalidMove(text.to_string())),
        },
    };

    position
        .legal_moves()
        .iter()
        .find(|m| m.source() == source && m.target() == target && m.promotion() == promotion)
        .ok_or_else(|| EngineError::IllegalMove(text.to_string()))
}

/// Examples:
///   position startpos
///   position startpos moves e2e4 e7e5
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 moves e2e4
///
/// Anything other than `fen` after `position` sets up the start position.
/// Moves are applied until the first one that does not parse or is illegal.
pub fn parse_position_command(engine: &mut Engine, command: &str) -> Result<()> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let moves_at = parts.iter().position(|&part| part == "moves");
    let setup = parts
        .get(1..moves_at.unwrap_or(parts.len()))
        .unwrap_or_default();

    let position = match setup.first() {
        Some(&"fen") => Position::from_fen(&setup[1..].join(" "))?,
        _ => Position::start(),
    };

    engine.position = position;

    if let Some(moves_at) = moves_at {
        for text in &parts[moves_at + 1..] {
            let played = parse_move(&engine.position, text).map(|move_| engine.play(move_));

            if !matches!(played, Ok(true)) {
                warn!(text, "stopping at unplayable move");
                break;
            }
        }
    }

    Ok(())
}

/// Returns the requested depth from `go depth N`, if any
pub fn parse_go_command(command: &str) -> Option<u16> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    parts
        .windows(2)
        .find(|pair| pair[0] == "depth")
        .and_then(|pair| pair[1].parse::<u16>().ok())
}
