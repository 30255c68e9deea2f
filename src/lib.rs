//! Battery energy-storage dispatch simulator and decision engine.

pub mod config;
pub mod demand;
pub mod error;
pub mod forecast;
/// CSV ledger export.
pub mod io;
pub mod policy;
pub mod pricing;
/// Dispatch loop, battery state, results, and summaries.
pub mod sim;
pub mod tariff;
