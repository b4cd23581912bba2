//! Explore Records Example
//!
//! Loads the sample valuation file, answers every question and shows the
//! detail view for one investor.
//!
//! Run from the `cli/` directory:
//! `cargo run --example explore_records -- ../data/valuations.json`

use std::error::Error;
use valuation_explorer::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    valuation_explorer::init_logger()?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "../data/valuations.json".to_string());
    let source = RecordSource::parse(&path);

    println!("Loading {}", source.describe());
    let mut analyzer = ValuationAnalyzer::load(&source).await?;
    println!("{} investors loaded\n", analyzer.records().len());

    for (kind, answer) in analyzer.answer_all() {
        println!("{}\n  {}\n", kind.title(), answer);
    }

    if let Some(winner) = analyzer.winner().map(|r| r.investor.clone()) {
        analyzer.select_investor(&winner)?;
        if let Some(detail) = analyzer.selected_detail() {
            println!("{}", detail);
        }
    }

    Ok(())
}
