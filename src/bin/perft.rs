use chess_rules::fen::parse_fen;
use chess_rules::perft::perft_divide;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Usage: perft <depth> [fen]
fn main() {
    let mut args = std::env::args().skip(1);
    let depth: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3).max(1);
    let fen = args.collect::<Vec<_>>().join(" ");
    let fen = if fen.is_empty() { START.to_string() } else { fen };

    let parsed = match parse_fen(&fen) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let divide = perft_divide(&parsed.board, parsed.side_to_move, depth);
    let mut total = 0;
    for (mv, nodes) in &divide {
        let promo = mv
            .promotion()
            .map(|p| p.letter().to_string())
            .unwrap_or_default();
        println!("{}{}{promo}: {nodes}", mv.from(), mv.to());
        total += nodes;
    }
    println!();
    println!("Nodes searched: {total}");
}
