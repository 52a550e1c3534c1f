//! Move-count (perft) correctness against the standard reference table.

use std::time::Instant;

use rayon::prelude::*;

use chess_rules::{perft, Position};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 10_000_000;

struct PerftCase {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(u8, u64)],
}

const CASES: &[PerftCase] = &[
    PerftCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[
            (1, 20),
            (2, 400),
            (3, 8_902),
            (4, 197_281),
            (5, 4_865_609),
            (6, 119_060_324),
        ],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2_039), (3, 97_862), (4, 4_085_603)],
    },
    PerftCase {
        name: "rook endgame with en passant traps",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191), (3, 2_812), (4, 43_238), (5, 674_624)],
    },
    PerftCase {
        name: "promotion heavy",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        depths: &[(1, 6), (2, 264), (3, 9_467), (4, 422_333)],
    },
    PerftCase {
        name: "talkchess position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        depths: &[(1, 44), (2, 1_486), (3, 62_379), (4, 2_103_487)],
    },
    PerftCase {
        name: "steven edwards position 6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        depths: &[(1, 46), (2, 2_079), (3, 89_890), (4, 3_894_594)],
    },
];

#[test]
fn perft_reference_table() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().for_each(|case| {
        let start = Instant::now();
        let mut total_nodes = 0u64;

        for &(depth, expected) in case.depths {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping {} depth {} ({} nodes); set {}=1 to run all.",
                    case.name, depth, expected, FULL_PERFT_ENV
                );
                continue;
            }
            let mut pos = Position::from_fen(case.fen).expect("reference FEN must parse");
            let got = perft(&mut pos, depth);
            assert_eq!(
                got, expected,
                "perft mismatch for '{}' at depth {}: expected {}, got {}",
                case.name, depth, expected, got
            );
            total_nodes += got;
        }

        let elapsed = start.elapsed();
        println!(
            "{}: {} nodes in {:.3?} ({:.1} Mn/s)",
            case.name,
            total_nodes,
            elapsed,
            (total_nodes as f64 / 1_000_000.0) / elapsed.as_secs_f64()
        );
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let mut pos = Position::startpos();
    assert_eq!(perft(&mut pos, 0), 1);
}
