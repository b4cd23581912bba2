//! # valuation-explorer - Investor Valuation Range Analysis
//!
//! Explore a set of investor valuation ranges for a single asset:
//! - Overlap band across every investor's `[low, high]` range
//! - Heuristic "most likely winner" from band membership and discount rate
//! - Natural-language answers to a fixed set of questions
//! - JSON / CSV ingestion from local files or URLs
//!
//! ## Quick Start
//!
//! ```no_run
//! use valuation_explorer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = RecordSource::parse("data/valuations.json");
//!     let mut analyzer = ValuationAnalyzer::load(&source).await?;
//!     println!("{}", analyzer.ask("overlap"));
//!     analyzer.select_investor("Harbour Capital")?;
//!     println!("{}", analyzer.selected_detail().unwrap_or_default());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Analysis modules - the pure computations behind every answer
pub mod analysis {
    //! Overlap band and winner heuristic

    /// Intersection of all valuation ranges
    pub mod overlap {
        pub use crate::utils::overlap::*;
    }

    /// Heuristic winner selection
    pub mod winner {
        pub use crate::utils::winner::*;
    }

    /// Answer composition for the fixed question set
    pub mod answers {
        pub use crate::ask::*;
    }
}

// Public API for easy library usage
pub mod api;

mod ask;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use valuation_explorer::prelude::*;
    //! ```

    pub use crate::analysis::answers::{compose, compose_answer, format_record_detail, QuestionKind};
    pub use crate::analysis::overlap::compute_overlap;
    pub use crate::analysis::winner::select_winner;
    pub use crate::api::ValuationAnalyzer;
    pub use crate::error::{LoadError, SelectionError};
    pub use crate::models::{OverlapBand, RecordSet, SelectionState, ValuationRecord};
    pub use crate::services::{load_records, RecordSource};
    pub use crate::utils::format_money;
}

pub use utils::{init_logger, Logger, Timer};
