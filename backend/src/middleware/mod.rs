//! Actix middleware wrapped around every catalog route.

pub mod trace;

pub use trace::Trace;
