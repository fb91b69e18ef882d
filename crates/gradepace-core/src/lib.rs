//! gradepace-core: target-achievement projection engine.
//!
//! This crate defines the progress snapshot model and the pure functions that
//! derive standings, pace requirements, shortfalls and statuses from it.

pub mod aggregate;
pub mod distribution;
pub mod edit;
pub mod error;
pub mod model;
pub mod projection;
pub mod reconcile;
pub mod report;
pub mod shortfall;
pub mod status;
pub mod totals;
pub mod traits;
pub mod validate;

#[cfg(test)]
mod test_support;
