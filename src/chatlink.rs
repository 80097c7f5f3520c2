/// This module provides the chat link definitions and the dispatch on their leading identifier byte.
pub use basic::*;
pub use build_template::*;
pub use item::*;
pub use user::*;

use std::str::FromStr;

use crate::codec::{self, ByteReader, ByteWriter};
use crate::{decode_chat_link, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Used in unit tests to check the decoding and encoding of a chat link against real world data.
#[cfg(test)]
macro_rules! chatlink_test {
    (
        name: $name:ident,
        text: $text:expr,
        expected: $link:expr
    ) => {
        #[test]
        fn $name() -> $crate::Result<()> {
            let expected = $link;
            assert_eq!(expected, $crate::decode_chat_link($text)?);
            assert_eq!($text, $crate::encode_chat_link(&expected)?);
            Ok(())
        }
    };
}

mod basic;
mod build_template;
mod item;
mod user;

pub const COIN: u8 = 0x01;
pub const ITEM: u8 = 0x02;
pub const NPC_TEXT: u8 = 0x03;
pub const POI: u8 = 0x04;
pub const PVP_GAME: u8 = 0x05;
pub const SKILL: u8 = 0x06;
pub const TRAIT: u8 = 0x07;
pub const USER: u8 = 0x08;
pub const RECIPE: u8 = 0x09;
pub const SKIN: u8 = 0x0A;
pub const OUTFIT: u8 = 0x0B;
pub const WVW_OBJECTIVE: u8 = 0x0C;
pub const BUILD_TEMPLATE: u8 = 0x0D;
pub const ACHIEVEMENT: u8 = 0x0E;

/// Writes the body of a chat link (everything after the identifier byte).
pub(crate) trait Encode {
    /// Exact number of bytes written by `write`.
    fn encoded_len(&self) -> usize;

    fn write(&self, writer: &mut ByteWriter);
}

/// A chat link as posted in the game chat.
///
/// Coin, NPC text, PvP game and user links are not officially documented. Their layouts are kept stable as far
/// as they are known, but may break with future game updates.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ChatLink {
    Coin(Coin),
    Item(Item),
    NpcText(NpcText),
    PoI(PoI),
    /// The layout of PvP game links is unknown. They can be recognized, but not encoded.
    PvpGame,
    Skill(Skill),
    Trait(Trait),
    User(User),
    Recipe(Recipe),
    Skin(Skin),
    Outfit(Outfit),
    WvWObjective(WvWObjective),
    BuildTemplate(BuildTemplate),
    Achievement(Achievement),
}

impl ChatLink {
    /// The identifier byte that starts the encoded link.
    pub fn identifier(&self) -> u8 {
        match self {
            ChatLink::Coin(_) => COIN,
            ChatLink::Item(_) => ITEM,
            ChatLink::NpcText(_) => NPC_TEXT,
            ChatLink::PoI(_) => POI,
            ChatLink::PvpGame => PVP_GAME,
            ChatLink::Skill(_) => SKILL,
            ChatLink::Trait(_) => TRAIT,
            ChatLink::User(_) => USER,
            ChatLink::Recipe(_) => RECIPE,
            ChatLink::Skin(_) => SKIN,
            ChatLink::Outfit(_) => OUTFIT,
            ChatLink::WvWObjective(_) => WVW_OBJECTIVE,
            ChatLink::BuildTemplate(_) => BUILD_TEMPLATE,
            ChatLink::Achievement(_) => ACHIEVEMENT,
        }
    }

    /// Parses the raw (base64 decoded) payload of a chat link.
    pub fn from_bytes(data: &[u8]) -> Result<ChatLink> {
        let mut reader = ByteReader::new(data);
        let identifier = reader.next_u8()?;
        trace!("Chat link identifier: {:#04x}", identifier);

        let link = match identifier {
            COIN => ChatLink::Coin(Coin::read(&mut reader)?),
            ITEM => ChatLink::Item(Item::read(&mut reader)?),
            NPC_TEXT => ChatLink::NpcText(NpcText::read(&mut reader)?),
            POI => ChatLink::PoI(PoI::read(&mut reader)?),
            PVP_GAME => ChatLink::PvpGame,
            SKILL => ChatLink::Skill(Skill::read(&mut reader)?),
            TRAIT => ChatLink::Trait(Trait::read(&mut reader)?),
            USER => ChatLink::User(User::read(&mut reader)?),
            RECIPE => ChatLink::Recipe(Recipe::read(&mut reader)?),
            SKIN => ChatLink::Skin(Skin::read(&mut reader)?),
            OUTFIT => ChatLink::Outfit(Outfit::read(&mut reader)?),
            WVW_OBJECTIVE => ChatLink::WvWObjective(WvWObjective::read(&mut reader)?),
            BUILD_TEMPLATE => ChatLink::BuildTemplate(BuildTemplate::read(&mut reader)?),
            ACHIEVEMENT => ChatLink::Achievement(Achievement::read(&mut reader)?),
            _ => return Err(codec::Error::UnsupportedFormat(identifier).into()),
        };

        if reader.remaining() > 0 && !matches!(link, ChatLink::PvpGame) {
            debug!(
                "Ignoring {} trailing bytes of chat link with identifier {:#04x}",
                reader.remaining(),
                identifier
            );
        }
        Ok(link)
    }

    /// Encodes the chat link into its raw payload (without base64 and delimiters).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let body: &dyn Encode = match self {
            ChatLink::Coin(link) => link,
            ChatLink::Item(link) => link,
            ChatLink::NpcText(link) => link,
            ChatLink::PoI(link) => link,
            ChatLink::PvpGame => return Err(codec::Error::EncodingUnsupported("PvpGame").into()),
            ChatLink::Skill(link) => link,
            ChatLink::Trait(link) => link,
            ChatLink::User(link) => link,
            ChatLink::Recipe(link) => link,
            ChatLink::Skin(link) => link,
            ChatLink::Outfit(link) => link,
            ChatLink::WvWObjective(link) => link,
            ChatLink::BuildTemplate(link) => link,
            ChatLink::Achievement(link) => link,
        };

        let mut writer = ByteWriter::with_size(1 + body.encoded_len());
        writer.put_u8(self.identifier());
        body.write(&mut writer);
        Ok(writer.finish())
    }
}

impl FromStr for ChatLink {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        decode_chat_link(s)
    }
}
