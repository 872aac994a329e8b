//! Statistical analyses over metric histories: descriptive summaries,
//! least-squares trend fits, percent-change volatility, and z-score
//! anomaly detection.

pub mod anomaly;
pub mod summary;
pub mod trend;
pub mod volatility;

pub use anomaly::detect_anomalies;
pub use summary::summarize;
pub use trend::fit_trends;
pub use volatility::analyze_volatility;
