use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("No filings available: {0}")]
    NoFilings(String),

    #[error("Fact source error: {0}")]
    Source(String),

    #[error("Profile store error: {0}")]
    Store(String),
}
