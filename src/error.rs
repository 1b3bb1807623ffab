use std::io;

use thiserror::Error;

pub type Result<T, E = LatchError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LatchError {
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

impl LatchError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
