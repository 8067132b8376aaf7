use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplifeatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("clustering failed: {0}")]
    ClusteringFailure(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}
