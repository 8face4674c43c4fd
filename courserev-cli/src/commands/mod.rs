//! Command implementations for the courserev CLI

pub mod report;
pub mod seed;
pub mod serve;
pub mod source;

// Re-export main dispatcher functions for flat access from main.rs
pub use report::run_report;
pub use seed::run_seed;
pub use serve::run_serve;
