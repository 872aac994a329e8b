//! Fundamental analyses over filing-derived metric histories: point-in-time
//! ratios, filing-over-filing growth, composite health, and lifecycle
//! classification.

pub mod growth;
pub mod health;
pub mod lifecycle;
pub mod ratios;

pub use growth::compute_growth;
pub use health::compose_health;
pub use lifecycle::classify_lifecycle;
pub use ratios::compute_ratios;
