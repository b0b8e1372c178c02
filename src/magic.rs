//! Magic numbers for sliding-piece attack hashing, and the offline search that finds them.
//!
//! The shipped constants were produced by `discover_magics(DEFAULT_MAGIC_SEED)`:
//! rook squares a8..h1 first, then bishop squares, all drawing from one generator.

use rand::{Error as RandError, RngCore, SeedableRng};
use tracing::{debug, trace};

use crate::{
    attacks::{relevant_occupancy_mask, set_occupancy, slider_attacks_on_the_fly},
    bitboard::BitBoard,
    constants::{
        BISHOP_RELEVANT_BITS, DEFAULT_MAGIC_SEED, MAX_MAGIC_ATTEMPTS, NUM_SQUARES,
        ROOK_RELEVANT_BITS,
    },
    error::{EngineError, Result},
    types::{Slider, Square},
};

#[rustfmt::skip]
pub const ROOK_MAGICS: [u64; NUM_SQUARES] = [
    0x8a80104000800020, 0x140002000100040, 0x2801880a0017001, 0x100081001000420,
    0x200020010080420, 0x3001c0002010008, 0x8480008002000100, 0x2080088004402900,
    0x800098204000, 0x2024401000200040, 0x100802000801000, 0x120800800801000,
    0x208808088000400, 0x2802200800400, 0x2200800100020080, 0x801000060821100,
    0x80044006422000, 0x100808020004000, 0x12108a0010204200, 0x140848010000802,
    0x481828014002800, 0x8094004002004100, 0x4010040010010802, 0x20008806104,
    0x100400080208000, 0x2040002120081000, 0x21200680100081, 0x20100080080080,
    0x2000a00200410, 0x20080800400, 0x80088400100102, 0x80004600042881,
    0x4040008040800020, 0x440003000200801, 0x4200011004500, 0x188020010100100,
    0x14800401802800, 0x2080040080800200, 0x124080204001001, 0x200046502000484,
    0x480400080088020, 0x1000422010034000, 0x30200100110040, 0x100021010009,
    0x2002080100110004, 0x202008004008002, 0x20020004010100, 0x2048440040820001,
    0x101002200408200, 0x40802000401080, 0x4008142004410100, 0x2060820c0120200,
    0x1001004080100, 0x20c020080040080, 0x2935610830022400, 0x44440041009200,
    0x280001040802101, 0x2100190040002085, 0x80c0084100102001, 0x4024081001000421,
    0x20030a0244872, 0x12001008414402, 0x2006104900a0804, 0x1004081002402,
];

#[rustfmt::skip]
pub const BISHOP_MAGICS: [u64; NUM_SQUARES] = [
    0x40040844404084, 0x2004208a004208, 0x10190041080202, 0x108060845042010,
    0x581104180800210, 0x2112080446200010, 0x1080820820060210, 0x3c0808410220200,
    0x4050404440404, 0x21001420088, 0x24d0080801082102, 0x1020a0a020400,
    0x40308200402, 0x4011002100800, 0x401484104104005, 0x801010402020200,
    0x400210c3880100, 0x404022024108200, 0x810018200204102, 0x4002801a02003,
    0x85040820080400, 0x810102c808880400, 0xe900410884800, 0x8002020480840102,
    0x220200865090201, 0x2010100a02021202, 0x152048408022401, 0x20080002081110,
    0x4001001021004000, 0x800040400a011002, 0xe4004081011002, 0x1c004001012080,
    0x8004200962a00220, 0x8422100208500202, 0x2000402200300c08, 0x8646020080080080,
    0x80020a0200100808, 0x2010004880111000, 0x623000a080011400, 0x42008c0340209202,
    0x209188240001000, 0x400408a884001800, 0x110400a6080400, 0x1840060a44020800,
    0x90080104000041, 0x201011000808101, 0x1a2208080504f080, 0x8012020600211212,
    0x500861011240000, 0x180806108200800, 0x4000020e01040044, 0x300000261044000a,
    0x802241102020002, 0x20906061210001, 0x5a84841004010310, 0x4010801011c04,
    0xa010109502200, 0x4a02012000, 0x500201010098b028, 0x8040002811040900,
    0x28000010020204, 0x6000020202d0240, 0x8918844842082200, 0x4010011029020020,
];

pub fn relevant_bits(slider: Slider, square: Square) -> u8 {
    match slider {
        Slider::Bishop => BISHOP_RELEVANT_BITS[square as usize],
        Slider::Rook => ROOK_RELEVANT_BITS[square as usize],
    }
}

pub fn shipped_magic(slider: Slider, square: Square) -> u64 {
    match slider {
        Slider::Bishop => BISHOP_MAGICS[square as usize],
        Slider::Rook => ROOK_MAGICS[square as usize],
    }
}

/// Dense table index for an occupancy already masked to the relevant squares
#[inline]
pub fn magic_index(masked_occupancy: u64, magic: u64, relevant_bits: u8) -> usize {
    (masked_occupancy.wrapping_mul(magic) >> (64 - relevant_bits as u32)) as usize
}

/// 32-bit xorshift (13, 17, 5). Reproducible, so discovered magics can be regenerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// A zero state would only ever produce zeros, so seed 0 falls back to the default seed.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_MAGIC_SEED } else { seed },
        }
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let mut number = self.state;
        number ^= number << 13;
        number ^= number >> 17;
        number ^= number << 5;
        self.state = number;
        number
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        XorShift32::new(DEFAULT_MAGIC_SEED)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    /// Low 16 bits of four successive draws, lowest slice first
    fn next_u64(&mut self) -> u64 {
        let n1 = (self.step() & 0xFFFF) as u64;
        let n2 = (self.step() & 0xFFFF) as u64;
        let n3 = (self.step() & 0xFFFF) as u64;
        let n4 = (self.step() & 0xFFFF) as u64;

        n1 | (n2 << 16) | (n3 << 32) | (n4 << 48)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        XorShift32::new(u32::from_le_bytes(seed))
    }
}

/// Sparse candidate: few set bits make good magics
pub fn magic_candidate<R: RngCore + ?Sized>(rng: &mut R) -> u64 {
    rng.next_u64() & rng.next_u64() & rng.next_u64()
}

/// Searches for a magic number that maps every occupancy subset of the relevant
/// mask to a slot holding its attack set. Collisions are fine as long as the
/// colliding subsets share the same attacks.
pub fn find_magic_number<R: RngCore>(
    square: Square,
    relevant_bits: u8,
    slider: Slider,
    rng: &mut R,
) -> Result<u64> {
    find_magic_number_with_limit(square, relevant_bits, slider, rng, MAX_MAGIC_ATTEMPTS)
}

pub fn find_magic_number_with_limit<R: RngCore>(
    square: Square,
    relevant_bits: u8,
    slider: Slider,
    rng: &mut R,
    max_attempts: u32,
) -> Result<u64> {
    let mask = relevant_occupancy_mask(slider, square);
    let subsets = 1usize << relevant_bits;

    let occupancies: Vec<BitBoard> = (0..subsets)
        .map(|index| set_occupancy(index, relevant_bits as u32, mask))
        .collect();

    let attacks: Vec<BitBoard> = occupancies
        .iter()
        .map(|&occupancy| slider_attacks_on_the_fly(slider, square, occupancy))
        .collect();

    // Slider attack sets are never empty, so 0 marks an unused slot
    let mut used = vec![0u64; subsets];

    for attempt in 0..max_attempts {
        let magic = magic_candidate(rng);

        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(0);

        let collides = occupancies.iter().zip(&attacks).any(|(occupancy, attack)| {
            let slot = &mut used[magic_index(occupancy.0, magic, relevant_bits)];

            if *slot == 0 {
                *slot = attack.0;
                false
            } else {
                *slot != attack.0
            }
        });

        if !collides {
            trace!(%square, %slider, attempt, magic = format_args!("{magic:#x}"), "magic found");
            return Ok(magic);
        }
    }

    Err(EngineError::MagicNotFound {
        square: square as u8,
        slider,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredMagics {
    pub rook: [u64; NUM_SQUARES],
    pub bishop: [u64; NUM_SQUARES],
}

/// Regenerates both magic tables from a seed: all rook squares, then all bishop squares
pub fn discover_magics(seed: u32) -> Result<DiscoveredMagics> {
    let mut rng = XorShift32::new(seed);
    let mut rook = [0u64; NUM_SQUARES];
    let mut bishop = [0u64; NUM_SQUARES];

    for square in Square::iter() {
        rook[square as usize] = find_magic_number(
            square,
            relevant_bits(Slider::Rook, square),
            Slider::Rook,
            &mut rng,
        )?;
    }

    for square in Square::iter() {
        bishop[square as usize] = find_magic_number(
            square,
            relevant_bits(Slider::Bishop, square),
            Slider::Bishop,
            &mut rng,
        )?;
    }

    debug!(seed, "magic discovery complete");

    Ok(DiscoveredMagics { rook, bishop })
}
