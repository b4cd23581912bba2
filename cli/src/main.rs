use valuation_explorer::{
    analysis::answers::format_record_line,
    api::ValuationAnalyzer,
    services::RecordSource,
    utils::init_logger,
};

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "valuation-explorer")]
#[command(about = "Explore investor valuation ranges for a single asset")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer one question about the record set
    Ask {
        /// Record file path or http(s) URL (.csv or .json)
        #[arg(short, long)]
        source: String,
        /// Question: overlap, highest, lowest or winner
        #[arg(short, long)]
        question: String,
        /// Investor to select before answering
        #[arg(long)]
        select: Option<String>,
    },
    /// Answer every question in order
    Summary {
        /// Record file path or http(s) URL (.csv or .json)
        #[arg(short, long)]
        source: String,
    },
    /// List the records in source order
    Records {
        /// Record file path or http(s) URL (.csv or .json)
        #[arg(short, long)]
        source: String,
    },
    /// Show the detail view for one investor
    Detail {
        /// Record file path or http(s) URL (.csv or .json)
        #[arg(short, long)]
        source: String,
        /// Investor name, as it appears in the source
        #[arg(short, long)]
        investor: String,
    },
}

async fn load(source: &str) -> anyhow::Result<ValuationAnalyzer> {
    let source = RecordSource::parse(source);
    ValuationAnalyzer::load(&source)
        .await
        .with_context(|| format!("could not load records from {}", source.describe()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            source,
            question,
            select,
        } => {
            let mut analyzer = load(&source).await?;
            if let Some(investor) = select {
                analyzer.select_investor(&investor)?;
            }
            println!("{}", analyzer.ask(&question));
            if let Some(detail) = analyzer.selected_detail() {
                println!("\n{}", detail);
            }
        }
        Commands::Summary { source } => {
            let analyzer = load(&source).await?;
            for (kind, answer) in analyzer.answer_all() {
                println!("## {}\n{}\n", kind.title(), answer);
            }
        }
        Commands::Records { source } => {
            let analyzer = load(&source).await?;
            for (position, record) in analyzer.records().iter().enumerate() {
                println!("{}", format_record_line(position, record));
            }
        }
        Commands::Detail { source, investor } => {
            let mut analyzer = load(&source).await?;
            analyzer.select_investor(&investor)?;
            if let Some(detail) = analyzer.selected_detail() {
                println!("{}", detail);
            }
        }
    }

    Ok(())
}
