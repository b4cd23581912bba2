//! High-level API for easy library usage

pub mod analyzer;

pub use analyzer::ValuationAnalyzer;
