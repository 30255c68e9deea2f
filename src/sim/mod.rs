/// Battery energy store.
pub mod battery;
pub mod dispatch;
/// Hourly ledger rows and per-run results.
pub mod result;
pub mod summary;
