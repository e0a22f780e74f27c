use thiserror::Error;

pub mod commands {
    pub mod audit;
    pub mod contrast;
    pub mod generate;
    pub mod simulate;
    pub mod suggest;
}

mod output;
pub mod store;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Could not serialize output: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] color_engine::Error),
    #[error("{0}")]
    General(String),
}
