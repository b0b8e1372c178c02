//! Precomputed attack tables.
//!
//! Leaper attacks are indexed by square. Slider attacks live in one flat table per
//! slider, addressed through `MagicEntry::index`. Everything is built once into a
//! process-wide `OnceLock` and is read-only afterwards.

use std::sync::OnceLock;

use tracing::{debug, error};

use crate::{
    bitboard::{BitBoard, NOT_A_FILE, NOT_AB_FILE, NOT_GH_FILE, NOT_H_FILE},
    constants::{NUM_SIDES, NUM_SQUARES},
    error::{EngineError, Result},
    magic::{BISHOP_MAGICS, ROOK_MAGICS, magic_index, relevant_bits},
    types::{Side, Slider, Square},
};

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub fn pawn_attack_mask(side: Side, square: Square) -> BitBoard {
    let bit = square.as_bit();

    let attacks = match side {
        Side::White => ((bit >> 7) & NOT_A_FILE) | ((bit >> 9) & NOT_H_FILE),
        Side::Black => ((bit << 7) & NOT_H_FILE) | ((bit << 9) & NOT_A_FILE),
    };

    BitBoard(attacks)
}

pub fn knight_attack_mask(square: Square) -> BitBoard {
    let bit = square.as_bit();

    BitBoard(
        ((bit >> 17) & NOT_H_FILE)
            | ((bit >> 15) & NOT_A_FILE)
            | ((bit >> 10) & NOT_GH_FILE)
            | ((bit >> 6) & NOT_AB_FILE)
            | ((bit << 17) & NOT_A_FILE)
            | ((bit << 15) & NOT_H_FILE)
            | ((bit << 10) & NOT_AB_FILE)
            | ((bit << 6) & NOT_GH_FILE),
    )
}

pub fn king_attack_mask(square: Square) -> BitBoard {
    let bit = square.as_bit();

    BitBoard(
        (bit >> 8)
            | ((bit >> 9) & NOT_H_FILE)
            | ((bit >> 7) & NOT_A_FILE)
            | ((bit >> 1) & NOT_H_FILE)
            | (bit << 8)
            | ((bit << 9) & NOT_A_FILE)
            | ((bit << 7) & NOT_H_FILE)
            | ((bit << 1) & NOT_A_FILE),
    )
}

/// Walks each ray from `square`. With `relevant_only` the walk stays off the
/// board edge along the direction of travel, which yields the occupancy mask.
fn slide(
    directions: &[(i8, i8); 4],
    square: Square,
    occupancy: BitBoard,
    relevant_only: bool,
) -> BitBoard {
    let (low, high) = if relevant_only { (1, 6) } else { (0, 7) };
    let mut attacks = BitBoard(0);

    for &(rank_step, file_step) in directions {
        let mut rank = square.rank() as i8 + rank_step;
        let mut file = square.file() as i8 + file_step;

        while (rank_step == 0 || (low..=high).contains(&rank))
            && (file_step == 0 || (low..=high).contains(&file))
        {
            let Some(target) = Square::from_coords(file as u8, rank as u8) else {
                break;
            };

            attacks.set_bit(target);

            if occupancy.is_bit_set(target) {
                break;
            }

            rank += rank_step;
            file += file_step;
        }
    }

    attacks
}

fn directions(slider: Slider) -> &'static [(i8, i8); 4] {
    match slider {
        Slider::Bishop => &BISHOP_DIRECTIONS,
        Slider::Rook => &ROOK_DIRECTIONS,
    }
}

/// Squares whose occupancy can change the slider's attacks (board edges excluded)
pub fn relevant_occupancy_mask(slider: Slider, square: Square) -> BitBoard {
    slide(directions(slider), square, BitBoard(0), true)
}

/// Reference ray walk. Used to fill the magic tables and to check them.
pub fn slider_attacks_on_the_fly(slider: Slider, square: Square, occupancy: BitBoard) -> BitBoard {
    slide(directions(slider), square, occupancy, false)
}

/// The `index`-th subset of `mask`: bit `i` of `index` selects the i-th lowest set bit
pub fn set_occupancy(index: usize, bits_in_mask: u32, mask: BitBoard) -> BitBoard {
    let mut occupancy = BitBoard(0);
    let mut mask = mask;

    for count in 0..bits_in_mask {
        let Some(square) = mask.pop_lsb() else {
            break;
        };

        if index & (1 << count) != 0 {
            occupancy.set_bit(square);
        }
    }

    occupancy
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: BitBoard,
    pub magic: u64,
    pub relevant_bits: u8,
    /// Start of this square's slice in the flat attack table
    pub offset: usize,
}

impl MagicEntry {
    #[inline]
    pub fn index(&self, occupancy: BitBoard) -> usize {
        self.offset + magic_index(occupancy.0 & self.mask.0, self.magic, self.relevant_bits)
    }
}

#[derive(Clone, Debug)]
pub struct AttackTables {
    pawn: [[BitBoard; NUM_SQUARES]; NUM_SIDES],
    knight: [BitBoard; NUM_SQUARES],
    king: [BitBoard; NUM_SQUARES],
    bishop_entries: [MagicEntry; NUM_SQUARES],
    rook_entries: [MagicEntry; NUM_SQUARES],
    bishop_attacks: Vec<BitBoard>,
    rook_attacks: Vec<BitBoard>,
}

impl AttackTables {
    /// Builds every table from the shipped magic numbers
    pub fn build() -> Result<Self> {
        Self::with_magics(&ROOK_MAGICS, &BISHOP_MAGICS)
    }

    /// Fails with `MagicCollision` if a magic maps two occupancies with different attacks to one slot
    pub fn with_magics(
        rook_magics: &[u64; NUM_SQUARES],
        bishop_magics: &[u64; NUM_SQUARES],
    ) -> Result<Self> {
        let mut pawn = [[BitBoard(0); NUM_SQUARES]; NUM_SIDES];
        let mut knight = [BitBoard(0); NUM_SQUARES];
        let mut king = [BitBoard(0); NUM_SQUARES];

        for square in Square::iter() {
            pawn[Side::White as usize][square as usize] = pawn_attack_mask(Side::White, square);
            pawn[Side::Black as usize][square as usize] = pawn_attack_mask(Side::Black, square);
            knight[square as usize] = knight_attack_mask(square);
            king[square as usize] = king_attack_mask(square);
        }

        let (bishop_entries, bishop_attacks) = build_slider_table(Slider::Bishop, bishop_magics)?;
        let (rook_entries, rook_attacks) = build_slider_table(Slider::Rook, rook_magics)?;

        debug!(
            bishop_slots = bishop_attacks.len(),
            rook_slots = rook_attacks.len(),
            "attack tables built"
        );

        Ok(AttackTables {
            pawn,
            knight,
            king,
            bishop_entries,
            rook_entries,
            bishop_attacks,
            rook_attacks,
        })
    }

    #[inline]
    pub fn pawn_attacks(&self, side: Side, square: Square) -> BitBoard {
        self.pawn[side as usize][square as usize]
    }

    #[inline]
    pub fn knight_attacks(&self, square: Square) -> BitBoard {
        self.knight[square as usize]
    }

    #[inline]
    pub fn king_attacks(&self, square: Square) -> BitBoard {
        self.king[square as usize]
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: BitBoard) -> BitBoard {
        self.bishop_attacks[self.bishop_entries[square as usize].index(occupancy)]
    }

    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: BitBoard) -> BitBoard {
        self.rook_attacks[self.rook_entries[square as usize].index(occupancy)]
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: BitBoard) -> BitBoard {
        BitBoard(self.bishop_attacks(square, occupancy).0 | self.rook_attacks(square, occupancy).0)
    }

    pub fn magic_entry(&self, slider: Slider, square: Square) -> &MagicEntry {
        match slider {
            Slider::Bishop => &self.bishop_entries[square as usize],
            Slider::Rook => &self.rook_entries[square as usize],
        }
    }
}

fn build_slider_table(
    slider: Slider,
    magics: &[u64; NUM_SQUARES],
) -> Result<([MagicEntry; NUM_SQUARES], Vec<BitBoard>)> {
    let mut entries = [MagicEntry::default(); NUM_SQUARES];
    let mut offset = 0;

    for square in Square::iter() {
        let bits = relevant_bits(slider, square);

        entries[square as usize] = MagicEntry {
            mask: relevant_occupancy_mask(slider, square),
            magic: magics[square as usize],
            relevant_bits: bits,
            offset,
        };

        offset += 1 << bits;
    }

    let mut table = vec![BitBoard(0); offset];
    let mut filled = vec![false; offset];

    for square in Square::iter() {
        let entry = entries[square as usize];

        for index in 0..(1usize << entry.relevant_bits) {
            let occupancy = set_occupancy(index, entry.relevant_bits as u32, entry.mask);
            let attacks = slider_attacks_on_the_fly(slider, square, occupancy);
            let slot = entry.index(occupancy);

            if filled[slot] && table[slot] != attacks {
                error!(%square, %slider, "magic number collision");

                return Err(EngineError::MagicCollision {
                    square: square as u8,
                    slider,
                });
            }

            table[slot] = attacks;
            filled[slot] = true;
        }
    }

    Ok((entries, table))
}

/// Builds the global tables if needed. Call once at startup to surface a bad magic as an error.
pub fn init_attack_tables() -> Result<&'static AttackTables> {
    if let Some(tables) = ATTACK_TABLES.get() {
        return Ok(tables);
    }

    let tables = AttackTables::build()?;
    Ok(ATTACK_TABLES.get_or_init(|| tables))
}

/// Global tables, built on first use
pub fn attack_tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(|| match AttackTables::build() {
        Ok(tables) => tables,
        Err(e) => panic!("{e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(bitboard: BitBoard) -> Vec<Square> {
        bitboard.collect()
    }

    #[test]
    fn test_pawn_attacks_face_forward() {
        assert_eq!(
            squares(pawn_attack_mask(Side::White, Square::E4)),
            vec![Square::D5, Square::F5]
        );
        assert_eq!(
            squares(pawn_attack_mask(Side::Black, Square::E4)),
            vec![Square::D3, Square::F3]
        );
        assert_eq!(squares(pawn_attack_mask(Side::White, Square::A2)), vec![Square::B3]);
        assert_eq!(squares(pawn_attack_mask(Side::Black, Square::H7)), vec![Square::G6]);
    }

    #[test]
    fn test_leaper_counts() {
        assert_eq!(knight_attack_mask(Square::A1).count_bits(), 2);
        assert_eq!(knight_attack_mask(Square::D4).count_bits(), 8);
        assert_eq!(knight_attack_mask(Square::H8).count_bits(), 2);
        assert_eq!(king_attack_mask(Square::A1).count_bits(), 3);
        assert_eq!(king_attack_mask(Square::E4).count_bits(), 8);
        assert_eq!(king_attack_mask(Square::H5).count_bits(), 5);
    }

    #[test]
    fn test_relevant_mask_sizes_match_bit_counts() {
        for square in Square::iter() {
            for slider in [Slider::Bishop, Slider::Rook] {
                assert_eq!(
                    relevant_occupancy_mask(slider, square).count_bits(),
                    relevant_bits(slider, square) as u32,
                    "{slider} on {square}"
                );
            }
        }
    }

    #[test]
    fn test_rook_mask_skips_edges() {
        let mask = relevant_occupancy_mask(Slider::Rook, Square::A1);

        assert!(mask.is_bit_set(Square::A2));
        assert!(mask.is_bit_set(Square::A7));
        assert!(!mask.is_bit_set(Square::A8));
        assert!(mask.is_bit_set(Square::G1));
        assert!(!mask.is_bit_set(Square::H1));
    }

    #[test]
    fn test_on_the_fly_stops_at_blockers() {
        let mut occupancy = BitBoard(0);
        occupancy.set_bit(Square::D6);
        occupancy.set_bit(Square::F4);

        let attacks = slider_attacks_on_the_fly(Slider::Rook, Square::D4, occupancy);

        assert!(attacks.is_bit_set(Square::D6));
        assert!(!attacks.is_bit_set(Square::D7));
        assert!(attacks.is_bit_set(Square::F4));
        assert!(!attacks.is_bit_set(Square::G4));
        assert!(attacks.is_bit_set(Square::A4));
        assert!(attacks.is_bit_set(Square::D1));
    }

    #[test]
    fn test_set_occupancy_enumerates_subsets() {
        let mask = relevant_occupancy_mask(Slider::Bishop, Square::A8);
        let bits = mask.count_bits();

        assert_eq!(set_occupancy(0, bits, mask), BitBoard(0));
        assert_eq!(set_occupancy((1 << bits) - 1, bits, mask), mask);
        assert_eq!(set_occupancy(1, bits, mask).lsb(), mask.lsb());
    }

    #[test]
    fn test_broken_magic_is_rejected() {
        let mut rook_magics = ROOK_MAGICS;
        rook_magics[Square::D4 as usize] = 1;

        let result = AttackTables::with_magics(&rook_magics, &BISHOP_MAGICS);

        assert!(matches!(
            result,
            Err(EngineError::MagicCollision { square, slider: Slider::Rook }) if square == Square::D4 as u8
        ));
    }
}
