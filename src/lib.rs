#![warn(clippy::all)]
pub mod chatlink;
pub mod codec;
pub mod config;
pub mod profession;
pub mod weapon;

pub use chatlink::ChatLink;
pub use profession::Profession;
pub use weapon::Weapon;

use thiserror::Error;
use tracing::trace;

pub type Result<T, E = Error> = std::result::Result<T, E>;

const CHAT_LINK_PREFIX: &str = "[&";
const CHAT_LINK_SUFFIX: &str = "]";

#[derive(Error, Debug)]
pub enum Error {
    #[error("input does not start with chat link prefix (\"[&\"): {0}")]
    MissingPrefix(String),

    #[error("input does not end with chat link suffix (\"]\"): {0}")]
    MissingSuffix(String),

    #[error("codec error: {0}")]
    Codec(#[from] codec::Error),

    #[error("{field} must be in unsigned 24bit range (0..=16777215). Value: {value}")]
    IdOutOfRange { field: &'static str, value: u32 },

    #[error("{field} must contain exactly {expected} elements. Found: {actual}")]
    InvalidArity {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} must not contain more than 255 elements. Found: {actual}")]
    ListTooLong { field: &'static str, actual: usize },

    #[error("major trait index must be in range 0..=2. Value: {0}")]
    MajorTraitOutOfRange(u8),

    #[error("profession context doesn't match profession {0:?}")]
    ProfessionContextMismatch(Profession),

    #[error("invalid account GUID length: {0}")]
    InvalidAccountGuid(usize),

    #[error("character name is not valid UTF-16 without surrogates")]
    InvalidCharacterName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Decodes a chat link of the form `[&<base64>]`.
pub fn decode_chat_link(source: &str) -> Result<ChatLink> {
    if !source.starts_with(CHAT_LINK_PREFIX) {
        return Err(Error::MissingPrefix(source.to_string()));
    }
    if !source.ends_with(CHAT_LINK_SUFFIX) || source.len() < CHAT_LINK_PREFIX.len() + CHAT_LINK_SUFFIX.len() {
        return Err(Error::MissingSuffix(source.to_string()));
    }

    let payload = &source[CHAT_LINK_PREFIX.len()..source.len() - CHAT_LINK_SUFFIX.len()];
    trace!("Decoding chat link payload {}", payload);
    let data = codec::base64::decode(payload)?;
    ChatLink::from_bytes(&data)
}

/// Encodes the given chat link into its textual `[&<base64>]` form.
pub fn encode_chat_link(link: &ChatLink) -> Result<String> {
    let data = link.to_bytes()?;
    Ok(format!(
        "{}{}{}",
        CHAT_LINK_PREFIX,
        codec::base64::encode(&data),
        CHAT_LINK_SUFFIX
    ))
}
