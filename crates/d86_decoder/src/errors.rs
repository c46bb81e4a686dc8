use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Stream ended in the middle of an instruction (offset {offset:#06x})")]
    TruncatedStream { offset: usize },

    #[error("Could not read from or write to stream ({0})")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
