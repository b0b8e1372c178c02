use chess_engine::{
    attacks::{
        AttackTables, attack_tables, init_attack_tables, king_attack_mask, knight_attack_mask,
        pawn_attack_mask, relevant_occupancy_mask, set_occupancy, slider_attacks_on_the_fly,
    },
    bitboard::BitBoard,
    magic::{
        BISHOP_MAGICS, ROOK_MAGICS, XorShift32, find_magic_number, relevant_bits, shipped_magic,
    },
    types::{Side, Slider, Square},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn test_magic_lookup_matches_ray_walk_for_every_subset() {
    let tables = attack_tables();

    for slider in [Slider::Bishop, Slider::Rook] {
        for square in Square::iter() {
            let mask = relevant_occupancy_mask(slider, square);
            let bits = mask.count_bits();

            for index in 0..(1usize << bits) {
                let occupancy = set_occupancy(index, bits, mask);
                let expected = slider_attacks_on_the_fly(slider, square, occupancy);

                let actual = match slider {
                    Slider::Bishop => tables.bishop_attacks(square, occupancy),
                    Slider::Rook => tables.rook_attacks(square, occupancy),
                };

                assert_eq!(actual, expected, "{slider} on {square}, subset {index}");
            }
        }
    }
}

#[test]
fn test_occupancy_outside_the_mask_is_ignored() {
    let tables = attack_tables();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..2000 {
        let occupancy = BitBoard(rng.r#gen::<u64>() & rng.r#gen::<u64>());
        let square = Square::from_index(rng.gen_range(0..64));

        assert_eq!(
            tables.rook_attacks(square, occupancy),
            slider_attacks_on_the_fly(Slider::Rook, square, occupancy)
        );
        assert_eq!(
            tables.bishop_attacks(square, occupancy),
            slider_attacks_on_the_fly(Slider::Bishop, square, occupancy)
        );
        assert_eq!(
            tables.queen_attacks(square, occupancy).0,
            tables.rook_attacks(square, occupancy).0 | tables.bishop_attacks(square, occupancy).0
        );
    }
}

#[test]
fn test_leaper_tables_match_masks() {
    let tables = attack_tables();

    for square in Square::iter() {
        assert_eq!(tables.knight_attacks(square), knight_attack_mask(square));
        assert_eq!(tables.king_attacks(square), king_attack_mask(square));

        for side in Side::iter() {
            assert_eq!(tables.pawn_attacks(side, square), pawn_attack_mask(side, square));
        }
    }
}

#[test]
fn test_leaper_attacks_are_symmetric() {
    for a in Square::iter() {
        for b in Square::iter() {
            assert_eq!(
                knight_attack_mask(a).is_bit_set(b),
                knight_attack_mask(b).is_bit_set(a)
            );
            assert_eq!(king_attack_mask(a).is_bit_set(b), king_attack_mask(b).is_bit_set(a));
            assert_eq!(
                pawn_attack_mask(Side::White, a).is_bit_set(b),
                pawn_attack_mask(Side::Black, b).is_bit_set(a)
            );
        }
    }
}

#[test]
fn test_empty_board_slider_counts() {
    let tables = attack_tables();

    for square in Square::iter() {
        assert_eq!(tables.rook_attacks(square, BitBoard(0)).count_bits(), 14);
    }

    assert_eq!(tables.bishop_attacks(Square::A1, BitBoard(0)).count_bits(), 7);
    assert_eq!(tables.bishop_attacks(Square::D4, BitBoard(0)).count_bits(), 13);
    assert_eq!(tables.queen_attacks(Square::D4, BitBoard(0)).count_bits(), 27);
}

#[test]
fn test_entries_use_shipped_magics() {
    let tables = init_attack_tables().unwrap();

    for square in Square::iter() {
        for slider in [Slider::Bishop, Slider::Rook] {
            let entry = tables.magic_entry(slider, square);

            assert_eq!(entry.magic, shipped_magic(slider, square));
            assert_eq!(entry.relevant_bits, relevant_bits(slider, square));
            assert_eq!(entry.mask, relevant_occupancy_mask(slider, square));
        }
    }
}

#[test]
fn test_init_is_idempotent() {
    let first = init_attack_tables().unwrap() as *const AttackTables;
    let second = init_attack_tables().unwrap() as *const AttackTables;

    assert_eq!(first, second);
    assert_eq!(first, attack_tables() as *const AttackTables);
}

#[test]
fn test_rebuilt_tables_agree_with_global() {
    let rebuilt = AttackTables::with_magics(&ROOK_MAGICS, &BISHOP_MAGICS).unwrap();
    let global = attack_tables();
    let occupancy = BitBoard(0x0042_1800_2400_8100);

    for square in Square::iter() {
        assert_eq!(
            rebuilt.queen_attacks(square, occupancy),
            global.queen_attacks(square, occupancy)
        );
    }
}

#[test]
fn test_discovered_bishop_magic_is_valid() {
    // Any magic found by the search must build a collision-free table
    let mut rng = XorShift32::new(12345);
    let mut bishop_magics = BISHOP_MAGICS;

    bishop_magics[Square::E4 as usize] = find_magic_number(
        Square::E4,
        relevant_bits(Slider::Bishop, Square::E4),
        Slider::Bishop,
        &mut rng,
    )
    .unwrap();

    let tables = AttackTables::with_magics(&ROOK_MAGICS, &bishop_magics).unwrap();
    let occupancy = BitBoard(0x0000_2800_0028_0000);

    assert_eq!(
        tables.bishop_attacks(Square::E4, occupancy),
        slider_attacks_on_the_fly(Slider::Bishop, Square::E4, occupancy)
    );
}
