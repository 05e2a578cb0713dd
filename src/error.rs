use thiserror::Error;

/// Errors produced by the geodata fetch layer
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Geodata request failed: {0}")]
    Transport(String),
    #[error("Geodata server answered with status {0}")]
    Status(u16),
    #[error("Invalid geodata payload: {0}")]
    Decode(String),
    #[error("All {0} geodata servers exhausted")]
    ServersExhausted(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}
