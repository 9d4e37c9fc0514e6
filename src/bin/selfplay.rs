use std::collections::BTreeMap;

use chess_rules::GameState;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const MAX_PLIES: u32 = 600;

/// Play one game of uniformly random legal moves. Promotions pick a random
/// piece, the way a shell's promotion prompt would.
fn play_game(rng: &mut StdRng) -> (GameState, u32) {
    let mut state = GameState::default();
    let mut plies = 0;
    while !state.is_game_over() && plies < MAX_PLIES {
        let moves = state.all_legal_moves_for(state.current_player());
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        let mv = *mv.promotion_choices().choose(rng).unwrap_or(&mv);
        state.make_move(&mv);
        plies += 1;
    }
    (state, plies)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let games: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally: BTreeMap<String, u32> = BTreeMap::new();

    for game in 1..=games {
        let (state, plies) = play_game(&mut rng);
        let outcome = state
            .result()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unfinished".to_string());
        eprintln!("game {game}: {outcome} after {plies} plies");
        if state.result().and_then(|r| r.winner()).is_some() {
            eprintln!("  mate position: {}", state.fingerprint());
        }
        *tally.entry(outcome).or_insert(0) += 1;
    }

    println!("{games} games, seed {seed}");
    for (outcome, count) in &tally {
        println!("  {outcome:<32} {count}");
    }
}
