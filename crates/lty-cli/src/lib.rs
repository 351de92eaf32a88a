//! Command-line front end for the lty class-type engine.
//!
//! The binary loads a JSON project index (see `lty_solver::ProjectIndex`) and
//! answers a single query against it.

pub mod args;
pub mod driver;
pub mod tracing_config;
