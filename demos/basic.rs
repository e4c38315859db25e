//! Collect links for a puzzle and report the first short AIC that proves
//! something.
//!
//! Run with `cargo run -p sudoku-chaining --example basic [puzzle]`.

use sudoku_chaining::{
    CandidateFabric, ChainFormat, ChainOrLoop, ChainShape, ChainingOptions, ChainingRules,
    LinkPools, Node,
};

const DEFAULT_PUZZLE: &str =
    "000000010400000000020000000000050407008000300001090000300400200050100000000806000";

fn main() -> sudoku_chaining::Result<()> {
    let puzzle = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PUZZLE.to_string());
    let grid = CandidateFabric::from_puzzle(&puzzle)?;

    let options: ChainingOptions = std::env::var("CHAINING_OPTIONS")
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default();
    let rules = ChainingRules::with_defaults(options);
    let (strong, weak) = rules.collect_links(&grid);
    println!(
        "{} strong and {} weak links",
        strong.link_count(),
        weak.link_count()
    );
    let pools = LinkPools::from_dictionaries(&strong, &weak);

    // a == b -- c == d
    for (a, bs) in strong.iter().filter(|(a, _)| !a.is_on()) {
        for b in bs.iter().filter(|b| b.is_on()) {
            for c in weak.neighbors(b).filter(|c| !c.is_on()) {
                for d in strong.neighbors(c).filter(|d| d.is_on() && *d != b) {
                    let path: [Node; 4] = [*a, *b, *c, *d];
                    let Ok(chain) = ChainOrLoop::from_path(&path, ChainShape::Chain, pools.clone())
                    else {
                        continue;
                    };
                    let conclusions = chain.conclusions(&grid, Some(&rules));
                    if conclusions.is_empty() || chain.overlaps_with_conclusions(&conclusions) {
                        continue;
                    }
                    report(&chain, &grid);
                    println!("  => {conclusions}");
                    return Ok(());
                }
            }
        }
    }

    println!("no four-node chain found");
    Ok(())
}

fn report(chain: &ChainOrLoop, grid: &CandidateFabric) {
    let name = chain
        .technique(grid)
        .map(|t| t.to_string())
        .unwrap_or_default();
    println!("{name}");
    for format in [
        ChainFormat::standard(),
        ChainFormat::spaced(),
        ChainFormat::eureka(),
    ] {
        println!("  {}", chain.to_string_with(&format));
    }
}
