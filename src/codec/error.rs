/// Errors raised while transcoding the raw chat link payload.
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("unexpected end of data. Pos: {pos} Wanted: {wanted} Remaining: {remaining}")]
    UnexpectedEnd {
        pos: usize,
        wanted: usize,
        remaining: usize,
    },

    #[error("expected zero padding but found {value:#x}. Pos: {pos}")]
    NonZeroPadding { value: u32, pos: usize },

    #[error("invalid base64 character {0:?}. Pos: {1}")]
    InvalidBase64Char(char, usize),

    #[error("found data after padding char. Pos: {0}")]
    DataAfterPadding(usize),

    #[error("found third padding char. Pos: {0}")]
    ExcessPadding(usize),

    #[error("unsupported chat link format: {0:x}")]
    UnsupportedFormat(u8),

    #[error("encoding of {0} chat links is not supported")]
    EncodingUnsupported(&'static str),
}
