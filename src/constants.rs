/// NOTE: 1 ply = one move by a single player
/// NOTE: every square-indexed table below is laid out rank 8 first (a8 = index 0)

pub const NUM_SQUARES: usize = 64;
pub const NUM_PIECE_TYPES: usize = 6;
pub const NUM_COLORED_PIECES: usize = 12;
pub const NUM_SIDES: usize = 2;
pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;

/// Default search depth (in ply) when none is requested.
pub const DEFAULT_MAX_DEPTH: u16 = 5;

/// Hard limit for search depth (in ply). Used to size arrays with per-ply information.
pub const MAX_PLY: usize = 64;

/// Capacity of a move list. No legal chess position has more than 218 moves.
pub const MAX_MOVES: usize = 256;

pub const INFINITY_SCORE: i32 = 50_000;
pub const MATE_VALUE: i32 = 49_000;
/// Scores beyond this are mates
pub const MATE_THRESHOLD: i32 = 48_000;

// Move ordering
pub const PV_SCORE: i32 = 20_000;
/// Added to MVV-LVA so that every capture sorts above every quiet move
pub const CAPTURE_SCORE: i32 = 10_000;
pub const FIRST_KILLER_SCORE: i32 = 9_000;
pub const SECOND_KILLER_SCORE: i32 = 8_000;

/// Attempts per square before magic discovery gives up.
pub const MAX_MAGIC_ATTEMPTS: u32 = 100_000_000;

/// Seed of the xorshift generator that produced the shipped magic numbers.
pub const DEFAULT_MAGIC_SEED: u32 = 1_804_289_383;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Used to determine the castling permissions after a move.
/// We logical-AND the castle bits with the entries for both of the move's squares.
///
/// 0001 white kingside  (h1: 14 = 1110)
/// 0010 white queenside (a1: 13 = 1101)
/// 0100 black kingside  (h8: 11 = 1011)
/// 1000 black queenside (a8:  7 = 0111)
///
/// King squares clear both of their side's bits (e1: 12, e8: 3).
#[rustfmt::skip]
pub const CASTLING_RIGHTS: [u8; NUM_SQUARES] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14
];

#[rustfmt::skip]
pub const BISHOP_RELEVANT_BITS: [u8; NUM_SQUARES] = [
    6, 5, 5, 5, 5, 5, 5, 6,
    5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 5, 5, 5, 5, 5, 5, 6
];

#[rustfmt::skip]
pub const ROOK_RELEVANT_BITS: [u8; NUM_SQUARES] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    12, 11, 11, 11, 11, 11, 11, 12
];

/// White's view; black reads `square.mirror()`
#[rustfmt::skip]
pub const PAWN_SCORE: [i32; NUM_SQUARES] = [
    90,  90,  90,  90,  90,  90,  90,  90,
    30,  30,  30,  40,  40,  30,  30,  30,
    20,  20,  20,  30,  30,  30,  20,  20,
    10,  10,  10,  20,  20,  10,  10,  10,
     5,   5,  10,  20,  20,   5,   5,   5,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,   0, -10, -10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0
];

#[rustfmt::skip]
pub const KNIGHT_SCORE: [i32; NUM_SQUARES] = [
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,  10,  10,   0,   0,  -5,
    -5,   5,  20,  20,  20,  20,   5,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,   5,  20,  10,  10,  20,   5,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5, -10,   0,   0,   0,   0, -10,  -5
];

#[rustfmt::skip]
pub const BISHOP_SCORE: [i32; NUM_SQUARES] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,  10,   0,   0,   0,   0,  10,   0,
     0,  30,   0,   0,   0,   0,  30,   0,
     0,   0, -10,   0,   0, -10,   0,   0
];

#[rustfmt::skip]
pub const ROOK_SCORE: [i32; NUM_SQUARES] = [
    50,  50,  50,  50,  50,  50,  50,  50,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,   0,  20,  20,   0,   0,   0
];

#[rustfmt::skip]
pub const KING_SCORE: [i32; NUM_SQUARES] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   5,   5,   5,   5,   0,   0,
     0,   5,   5,  10,  10,   5,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   5,   5,  -5,  -5,   0,   5,   0,
     0,   0,   5,   0, -15,   0,  10,   0
];

/// Most valuable victim / least valuable attacker, indexed [attacker][victim]
#[rustfmt::skip]
pub const MVV_LVA: [[i32; NUM_PIECE_TYPES]; NUM_PIECE_TYPES] = [
    [105, 205, 305, 405, 505, 605], // Pawn
    [104, 204, 304, 404, 504, 604], // Knight
    [103, 203, 303, 403, 503, 603], // Bishop
    [102, 202, 302, 402, 502, 602], // Rook
    [101, 201, 301, 401, 501, 601], // Queen
    [100, 200, 300, 400, 500, 600], // King
];
