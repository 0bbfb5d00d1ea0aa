use thiserror::Error;

use sealink_core::session::SessionError;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad key file {path}: got {got} bytes, expected {expected}")]
    KeyFile {
        path: String,
        got: usize,
        expected: usize,
    },

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
